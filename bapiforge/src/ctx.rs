//! Application context and state management.
//!
//! This module provides the [`AppContext`] type which holds the workspace
//! paths and drives the generation workflow: read a parameter schema,
//! generate entities, emit them and register the root entity in the session
//! document.

use std::path::{Path, PathBuf};

use bapigen::{
    EntityEmitter, GeneratedEntitySet, ParameterSchema,
    emit::DefinitionEmitter,
    naming::to_camel_case,
};
use clap::ValueEnum;
use colored::Colorize;

use crate::{
    properties::{
        ConnectionProperties, JCA_CONNECTION_FACTORY_KEY, JCA_CONNECTION_SPEC_FACTORY_KEY,
        JCA_CONTEXT_KEY, SESSION_NAME_KEY,
    },
    session::{MergeMode, MergeOutcome, SessionConfig, SessionError, SessionManager},
    utils::read_typed,
};

/// Package used when none is given.
pub const DEFAULT_PACKAGE: &str = "hibersap";
/// Output directory, relative to the workspace, used when none is given.
pub const DEFAULT_OUT_DIR: &str = "src/generated";

/// How generated sessions connect to the remote system.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Adapter {
    /// Flat JCo connection properties.
    #[default]
    Jco,
    /// JCA resource adapter factories.
    Jca,
}

/// Path configuration grouping all path-related fields.
#[derive(Default, Clone)]
pub struct PathConfig {
    /// Workspace root directory.
    pub workspace: PathBuf,
}

impl PathConfig {
    /// Connection properties store.
    pub fn properties(&self) -> PathBuf {
        self.workspace.join(ConnectionProperties::FILE_NAME)
    }

    /// Session document.
    pub fn sessions(&self) -> PathBuf {
        self.workspace.join(SessionManager::FILE_NAME)
    }

    /// Resolves `path` against the workspace unless it is absolute.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_relative() {
            self.workspace.join(path)
        } else {
            path.to_path_buf()
        }
    }
}

/// Options of one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Parameter schema file (`json` or `toml`).
    pub schema: PathBuf,
    /// Root entity name; defaults to the camel-cased operation wire name.
    pub name: Option<String>,
    /// Package of the generated entities.
    pub package: Option<String>,
    /// Output directory for entity definitions.
    pub out_dir: Option<PathBuf>,
    pub adapter: Adapter,
    /// Existing session to register the root entity with.
    pub session: Option<String>,
    /// Replace an existing session of the same name instead of updating it.
    pub replace: bool,
}

/// Result of a generation run.
#[derive(Debug)]
pub struct GenerateReport {
    pub entities: GeneratedEntitySet,
    /// Written definition files, root first.
    pub written: Vec<PathBuf>,
    pub outcome: MergeOutcome,
}

/// The main application context holding all state.
#[derive(Default, Clone)]
pub struct AppContext {
    /// Path configuration.
    pub paths: PathConfig,
}

impl AppContext {
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            paths: PathConfig {
                workspace: workspace.into(),
            },
        }
    }

    /// Opens the connection properties store, creating it from defaults if needed.
    pub fn properties(&self) -> anyhow::Result<ConnectionProperties> {
        ConnectionProperties::open(self.paths.properties())
    }

    /// Loads the session document.
    pub fn sessions(&self) -> anyhow::Result<SessionManager> {
        Ok(SessionManager::load(self.paths.sessions())?)
    }

    /// Runs the whole generation workflow.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be read, generation fails, the
    /// target session does not exist, a definition cannot be written or the
    /// session document cannot be saved. Nothing is written before the merge
    /// target has been checked, and the session document is only written
    /// after every entity has been emitted.
    pub fn generate(&self, opts: &GenerateOptions) -> anyhow::Result<GenerateReport> {
        let schema_path = self.paths.resolve(&opts.schema);
        let schema: ParameterSchema = read_typed(&schema_path)?;

        let name = match (&opts.name, &schema.operation) {
            (Some(name), _) => name.clone(),
            (None, Some(op)) => to_camel_case(op, '_'),
            (None, None) => bail!(
                "{} has no operation name, pass an entity name",
                schema_path.display()
            ),
        };
        let package = opts.package.as_deref().unwrap_or(DEFAULT_PACKAGE);

        let entities = bapigen::generate(&name, package, &schema)?;
        info!(
            "generated {} with {} structure entities",
            entities.root.qualified_name(),
            entities.structures.len()
        );

        let properties = self.properties()?;
        let cfg = self.session_config(&properties, opts.adapter, &entities)?;
        let mut sessions = self.sessions()?;
        let mode = merge_mode(&sessions, &cfg, opts)?;

        let out_dir = self
            .paths
            .resolve(opts.out_dir.as_deref().unwrap_or(Path::new(DEFAULT_OUT_DIR)));
        let emitter = DefinitionEmitter::new(out_dir);
        let mut written = Vec::new();
        for entity in entities.all() {
            let path = emitter.emit(entity)?;
            println!(
                "{}",
                format!("Created entity [{}]", entity.qualified_name()).green()
            );
            written.push(path);
        }

        let outcome = sessions.apply(cfg, mode)?;
        sessions.save()?;

        Ok(GenerateReport {
            entities,
            written,
            outcome,
        })
    }

    /// Builds the session configuration registering the root entity.
    pub fn session_config(
        &self,
        properties: &ConnectionProperties,
        adapter: Adapter,
        entities: &GeneratedEntitySet,
    ) -> anyhow::Result<SessionConfig> {
        let name = properties.require(SESSION_NAME_KEY)?;

        let cfg = match adapter {
            Adapter::Jco => SessionConfig::with_properties(name, properties.jco_properties()),
            Adapter::Jca => SessionConfig::with_resources(
                name,
                properties.get(JCA_CONTEXT_KEY).map(str::to_string),
                properties.require(JCA_CONNECTION_FACTORY_KEY)?,
                properties.require(JCA_CONNECTION_SPEC_FACTORY_KEY)?,
            ),
        };

        Ok(cfg.with_class(entities.root.qualified_name()))
    }
}

/// Picks the merge path: an explicitly named session is updated; a session
/// sharing the new name is replaced or updated depending on `replace`;
/// otherwise the new session is added.
///
/// Fails with [`SessionError::NotFound`] if the explicit target is missing.
fn merge_mode(
    sessions: &SessionManager,
    cfg: &SessionConfig,
    opts: &GenerateOptions,
) -> Result<MergeMode, SessionError> {
    if let Some(target) = &opts.session {
        if !sessions.exists(target) {
            return Err(SessionError::NotFound {
                name: target.clone(),
            });
        }
        return Ok(MergeMode::Update {
            target: target.clone(),
        });
    }
    let mode = if sessions.exists(&cfg.name) {
        if opts.replace {
            MergeMode::Override
        } else {
            MergeMode::Update {
                target: cfg.name.clone(),
            }
        }
    } else {
        MergeMode::Add
    };
    Ok(mode)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::session::Connection;

    const SCHEMA: &str = r#"
operation = "BAPI_FLCONN_GETDETAIL"

[[import]]
wire_name = "FLIGHTDATE"
local_name = "_flightdate"
kind = "scalar"
value_type = "date"

[[export]]
wire_name = "PRICE_INFO"
local_name = "_priceInfo"
kind = "structure"
fields = [
    { wire_name = "CURR", local_name = "_curr", kind = "scalar", value_type = "string" },
]
"#;

    fn workspace() -> (tempfile::TempDir, AppContext) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("flight.toml"), SCHEMA).unwrap();
        let ctx = AppContext::new(dir.path());
        (dir, ctx)
    }

    fn opts() -> GenerateOptions {
        GenerateOptions {
            schema: PathBuf::from("flight.toml"),
            package: Some("com.example".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_generate_adds_session() {
        let (dir, ctx) = workspace();
        let report = ctx.generate(&opts()).unwrap();

        assert_eq!(report.entities.root.name, "BapiFlconnGetdetail");
        assert_eq!(report.written.len(), 2);
        assert!(dir
            .path()
            .join("src/generated/com/example/PriceInfo.toml")
            .exists());
        assert_eq!(report.outcome, MergeOutcome::Added { name: "SM001".into() });

        let sessions = ctx.sessions().unwrap();
        let session = sessions.get("SM001").unwrap();
        assert!(session.classes.contains("com.example.BapiFlconnGetdetail"));
        let Connection::Properties(props) = &session.connection else {
            panic!("expected property connection");
        };
        assert_eq!(props.len(), 7);
    }

    #[test]
    fn test_generate_twice_updates_session() {
        let (_dir, ctx) = workspace();
        ctx.generate(&opts()).unwrap();

        let report = ctx
            .generate(&GenerateOptions {
                name: Some("FlightDetail".into()),
                ..opts()
            })
            .unwrap();
        assert_eq!(report.outcome, MergeOutcome::Updated { name: "SM001".into() });

        let sessions = ctx.sessions().unwrap();
        assert_eq!(sessions.names(), vec!["SM001"]);
        assert_eq!(sessions.get("SM001").unwrap().classes.len(), 2);
    }

    #[test]
    fn test_generate_replace_with_jca() {
        let (_dir, ctx) = workspace();
        ctx.generate(&opts()).unwrap();

        let report = ctx
            .generate(&GenerateOptions {
                name: Some("FlightDetail".into()),
                adapter: Adapter::Jca,
                replace: true,
                ..opts()
            })
            .unwrap();
        assert_eq!(report.outcome, MergeOutcome::Replaced { name: "SM001".into() });

        let sessions = ctx.sessions().unwrap();
        let session = sessions.get("SM001").unwrap();
        assert_eq!(session.classes.len(), 1);
        assert!(matches!(session.connection, Connection::Resources { .. }));
        assert_eq!(
            session.context.as_deref(),
            Some("org.hibersap.execution.jca.JCAContext")
        );
    }

    #[test]
    fn test_generate_into_missing_session_fails() {
        let (dir, ctx) = workspace();
        let err = ctx
            .generate(&GenerateOptions {
                session: Some("SM404".into()),
                ..opts()
            })
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SessionError>(),
            Some(SessionError::NotFound { .. })
        ));
        assert!(!ctx.paths.sessions().exists());
        assert!(!dir.path().join(DEFAULT_OUT_DIR).exists());
    }

    #[test]
    fn test_generate_into_named_session() {
        let (_dir, ctx) = workspace();
        ctx.generate(&opts()).unwrap();

        let report = ctx
            .generate(&GenerateOptions {
                name: Some("FlightDetail".into()),
                session: Some("SM001".into()),
                ..opts()
            })
            .unwrap();
        assert_eq!(report.outcome, MergeOutcome::Updated { name: "SM001".into() });
        assert_eq!(report.written.len(), 2);
    }

    #[test]
    fn test_structure_named_like_root_writes_nothing() {
        let (dir, ctx) = workspace();
        fs::write(
            dir.path().join("order.toml"),
            r#"
operation = "Z_ORDER"

[[export]]
wire_name = "ORDER"
local_name = "_order"
kind = "structure"
fields = [
    { wire_name = "ID", local_name = "_id", kind = "scalar", value_type = "long" },
]
"#,
        )
        .unwrap();

        let err = ctx
            .generate(&GenerateOptions {
                schema: PathBuf::from("order.toml"),
                name: Some("Order".into()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<bapigen::GenerateError>(),
            Some(bapigen::GenerateError::StructureConflict { .. })
        ));
        assert!(!dir.path().join(DEFAULT_OUT_DIR).exists());
        assert!(!ctx.paths.sessions().exists());
    }

    #[test]
    fn test_generate_requires_a_name() {
        let (dir, ctx) = workspace();
        fs::write(dir.path().join("anon.json"), r#"{"import": []}"#).unwrap();

        let result = ctx.generate(&GenerateOptions {
            schema: PathBuf::from("anon.json"),
            ..Default::default()
        });
        assert!(result.is_err());
    }
}
