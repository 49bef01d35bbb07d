use std::collections::{HashMap, HashSet};

use crate::{
    data::entity::Entity,
    error::{GenerateError, Result},
};

/// Name-keyed accumulator for structure entities.
///
/// Keeps first-registration order. A name is emitted once: registering an
/// identical definition again is a no-op, registering a different definition
/// under a taken name is a [`GenerateError::StructureConflict`]. Names
/// claimed with [`reserve`](Self::reserve) reject every structure.
#[derive(Debug, Default)]
pub struct StructureRegistry {
    entities: Vec<Entity>,
    index: HashMap<String, usize>,
    reserved: HashSet<String>,
}

impl StructureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `name` for an entity that is not a structure, such as the root.
    pub fn reserve(&mut self, name: impl Into<String>) {
        self.reserved.insert(name.into());
    }

    /// Inserts `entity` unless its name is already registered.
    ///
    /// Returns `Ok(true)` when the entity was added and `Ok(false)` when an
    /// identical definition was already present. `path` names the parameter
    /// the entity was derived from and only feeds the error message.
    pub fn insert(&mut self, entity: Entity, path: &str) -> Result<bool> {
        if self.reserved.contains(&entity.name) {
            return Err(GenerateError::StructureConflict {
                name: entity.name,
                path: path.to_string(),
            });
        }
        if let Some(&idx) = self.index.get(&entity.name) {
            if self.entities[idx] == entity {
                return Ok(false);
            }
            return Err(GenerateError::StructureConflict {
                name: entity.name,
                path: path.to_string(),
            });
        }

        self.index.insert(entity.name.clone(), self.entities.len());
        self.entities.push(entity);
        Ok(true)
    }

    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.index.get(name).map(|&idx| &self.entities[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name) || self.reserved.contains(name)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn into_entities(self) -> Vec<Entity> {
        self.entities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{
        entity::{DeclaredType, FieldKind, FieldSpec},
        schema::ValueType,
    };

    fn detail(wire_name: &str) -> Entity {
        let mut e = Entity::structure("Detail", "pkg");
        e.fields.push(FieldSpec {
            name: "_value".into(),
            declared_type: DeclaredType::Primitive(ValueType::String),
            wire_name: wire_name.into(),
            kind: FieldKind::Simple,
            role: None,
        });
        e
    }

    #[test]
    fn test_insert_keeps_order() {
        let mut registry = StructureRegistry::new();
        assert!(registry.insert(Entity::structure("B", "pkg"), "B").unwrap());
        assert!(registry.insert(Entity::structure("A", "pkg"), "A").unwrap());

        let names: Vec<_> = registry.into_entities().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_identical_definition_is_deduplicated() {
        let mut registry = StructureRegistry::new();
        assert!(registry.insert(detail("VALUE"), "HEADER.DETAIL").unwrap());
        assert!(!registry.insert(detail("VALUE"), "ITEMS.DETAIL").unwrap());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_conflicting_definition_is_rejected() {
        let mut registry = StructureRegistry::new();
        registry.insert(detail("VALUE"), "HEADER.DETAIL").unwrap();

        let err = registry.insert(detail("OTHER"), "ITEMS.DETAIL").unwrap_err();
        assert!(matches!(
            err,
            GenerateError::StructureConflict { ref name, ref path }
                if name == "Detail" && path == "ITEMS.DETAIL"
        ));
        assert_eq!(registry.get("Detail").unwrap().fields[0].wire_name, "VALUE");
    }

    #[test]
    fn test_reserved_name_is_rejected() {
        let mut registry = StructureRegistry::new();
        registry.reserve("Detail");
        assert!(registry.contains("Detail"));

        let err = registry.insert(detail("VALUE"), "HEADER.DETAIL").unwrap_err();
        assert!(matches!(
            err,
            GenerateError::StructureConflict { ref name, ref path }
                if name == "Detail" && path == "HEADER.DETAIL"
        ));
        assert!(registry.is_empty());
    }
}
