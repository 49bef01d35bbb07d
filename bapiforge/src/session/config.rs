use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Execution context used for the flat JCo property connection.
pub const JCO_CONTEXT: &str = "org.hibersap.execution.jco.JCoContext";

/// Whole session document as persisted.
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionDocument {
    /// Sessions in document order. Required, so a truncated file never
    /// parses as an empty document.
    #[serde(rename = "session")]
    pub sessions: Vec<SessionConfig>,
}

/// One named session configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    /// Unique key within a document.
    pub name: String,
    /// Execution context class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Registered entity class names.
    #[serde(default)]
    pub classes: BTreeSet<String>,
    /// How the session reaches the remote system.
    pub connection: Connection,
}

/// Connection settings of a session.
///
/// A session either carries a flat property bag or references container
/// managed resource factories, never both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Connection {
    /// Flat connection properties, e.g. `jco.client.ashost`.
    Properties(BTreeMap<String, String>),
    /// Resource factory references of a JCA resource adapter.
    Resources {
        connection_factory: String,
        connection_spec_factory: String,
    },
}

impl Default for Connection {
    fn default() -> Self {
        Self::Properties(BTreeMap::new())
    }
}

impl SessionConfig {
    /// Creates a session with an empty property connection and no classes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            context: None,
            classes: BTreeSet::new(),
            connection: Connection::default(),
        }
    }

    /// Session connecting through a flat JCo property bag.
    pub fn with_properties(name: impl Into<String>, properties: BTreeMap<String, String>) -> Self {
        Self {
            context: Some(JCO_CONTEXT.to_string()),
            connection: Connection::Properties(properties),
            ..Self::new(name)
        }
    }

    /// Session connecting through JCA resource factories.
    pub fn with_resources(
        name: impl Into<String>,
        context: Option<String>,
        connection_factory: impl Into<String>,
        connection_spec_factory: impl Into<String>,
    ) -> Self {
        Self {
            context,
            connection: Connection::Resources {
                connection_factory: connection_factory.into(),
                connection_spec_factory: connection_spec_factory.into(),
            },
            ..Self::new(name)
        }
    }

    /// Registers an entity class.
    pub fn add_class(&mut self, class: impl Into<String>) -> &mut Self {
        self.classes.insert(class.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_toml_round_trip() {
        let mut props = BTreeMap::new();
        props.insert("jco.client.ashost".to_string(), "some.sap-system.com".to_string());
        props.insert("jco.client.client".to_string(), "000".to_string());

        let doc = SessionDocument {
            sessions: vec![
                SessionConfig::with_properties("SM001", props).with_class("pkg.FlightDetail"),
                SessionConfig::with_resources(
                    "SM002",
                    Some("org.hibersap.execution.jca.JCAContext".into()),
                    "java:/eis/sap/NSP",
                    "org.hibersap.execution.jca.cci.SapBapiJcaAdapterConnectionSpecFactory",
                ),
            ],
        };

        let content = toml::to_string_pretty(&doc).unwrap();
        assert!(content.contains("\"jco.client.ashost\""));

        let parsed: SessionDocument = toml::from_str(&content).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_classes_are_a_set() {
        let cfg = SessionConfig::new("SM001")
            .with_class("b.Two")
            .with_class("a.One")
            .with_class("b.Two");

        let classes: Vec<_> = cfg.classes.iter().map(String::as_str).collect();
        assert_eq!(classes, vec!["a.One", "b.Two"]);
    }

    #[test]
    fn test_empty_document_round_trip() {
        let content = toml::to_string_pretty(&SessionDocument::default()).unwrap();
        let doc: SessionDocument = toml::from_str(&content).unwrap();
        assert!(doc.sessions.is_empty());

        assert!(toml::from_str::<SessionDocument>("").is_err());
    }
}
