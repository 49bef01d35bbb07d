//! Entity definition writer.
//!
//! Writes each entity as a TOML or JSON definition under
//! `<out_dir>/<package as directories>/<Name>.<ext>`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    data::entity::Entity,
    emit::traits::EntityEmitter,
    error::{GenerateError, Result},
};

/// Serialization format of definition files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefinitionFormat {
    #[default]
    Toml,
    Json,
}

impl DefinitionFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }
}

/// Writes entity definitions below an output directory.
pub struct DefinitionEmitter {
    out_dir: PathBuf,
    format: DefinitionFormat,
}

impl DefinitionEmitter {
    /// Creates an emitter writing TOML definitions to `out_dir`.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            format: DefinitionFormat::Toml,
        }
    }

    pub fn with_format(mut self, format: DefinitionFormat) -> Self {
        self.format = format;
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Path the definition of `entity` is written to.
    pub fn path_for(&self, entity: &Entity) -> PathBuf {
        let mut path = self.out_dir.clone();
        for segment in entity.package.split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{}.{}", entity.name, self.format.extension()));
        path
    }

    fn render(&self, entity: &Entity) -> Result<String> {
        let rendered = match self.format {
            DefinitionFormat::Toml => toml::to_string_pretty(entity).map_err(|e| e.to_string()),
            DefinitionFormat::Json => serde_json::to_string_pretty(entity).map_err(|e| e.to_string()),
        };
        rendered.map_err(|message| GenerateError::Serialize {
            entity: entity.qualified_name(),
            message,
        })
    }
}

impl EntityEmitter for DefinitionEmitter {
    fn emit(&self, entity: &Entity) -> Result<PathBuf> {
        let path = self.path_for(entity);
        let content = self.render(entity)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| GenerateError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, content).map_err(|source| GenerateError::Io {
            path: path.clone(),
            source,
        })?;

        debug!("wrote definition {}", path.display());
        Ok(path)
    }

    fn get_name(&self) -> &'static str {
        match self.format {
            DefinitionFormat::Toml => "definition-toml",
            DefinitionFormat::Json => "definition-json",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{
        entity::{DeclaredType, FieldKind, FieldSpec, RoleTag},
        schema::ValueType,
    };

    fn root() -> Entity {
        let mut entity = Entity::root(
            "FlightDetail",
            "com.example.hibersap",
            Some("BAPI_FLCONN_GETDETAIL".into()),
        );
        entity.fields.push(FieldSpec {
            name: "_flightdate".into(),
            declared_type: DeclaredType::Primitive(ValueType::Date),
            wire_name: "FLIGHTDATE".into(),
            kind: FieldKind::Simple,
            role: Some(RoleTag::Import),
        });
        entity.fields.push(FieldSpec {
            name: "_extensionOut".into(),
            declared_type: DeclaredType::sequence_of(DeclaredType::Entity("ExtensionOut".into())),
            wire_name: "EXTENSION_OUT".into(),
            kind: FieldKind::Table,
            role: Some(RoleTag::Table),
        });
        entity
    }

    #[test]
    fn test_path_follows_package() {
        let emitter = DefinitionEmitter::new("/out");
        assert_eq!(
            emitter.path_for(&root()),
            PathBuf::from("/out/com/example/hibersap/FlightDetail.toml")
        );

        let emitter = DefinitionEmitter::new("/out").with_format(DefinitionFormat::Json);
        assert_eq!(
            emitter.path_for(&Entity::structure("PriceInfo", "")),
            PathBuf::from("/out/PriceInfo.json")
        );
    }

    #[test]
    fn test_emit_toml_definition() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = DefinitionEmitter::new(dir.path());

        let path = emitter.emit(&root()).expect("emit should succeed");
        let content = fs::read_to_string(&path).unwrap();
        let parsed: Entity = toml::from_str(&content).unwrap();

        assert_eq!(parsed, root());
        assert_eq!(parsed.operation(), Some("BAPI_FLCONN_GETDETAIL"));
        assert_eq!(emitter.get_name(), "definition-toml");
    }

    #[test]
    fn test_emit_json_definition() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = DefinitionEmitter::new(dir.path()).with_format(DefinitionFormat::Json);

        let path = emitter.emit(&Entity::structure("PriceInfo", "pkg")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();

        assert_eq!(value["name"], "PriceInfo");
        assert_eq!(value["kind"], "structure");
    }
}
