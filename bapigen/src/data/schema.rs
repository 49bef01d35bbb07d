//! Parameter schema of one remote function.
//!
//! A schema is usually stored as JSON or TOML next to the project:
//!
//! ```toml
//! operation = "BAPI_FLCONN_GETDETAIL"
//!
//! [[import]]
//! wire_name = "FLIGHTDATE"
//! local_name = "_flightdate"
//! kind = "scalar"
//! value_type = "date"
//!
//! [[export]]
//! wire_name = "PRICE_INFO"
//! local_name = "_priceInfo"
//! kind = "structure"
//! fields = [
//!     { wire_name = "CURR", local_name = "_curr", kind = "scalar", value_type = "string" },
//! ]
//! ```

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Import, export and table parameters of one remote function.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ParameterSchema {
    /// Wire name of the function, e.g. `BAPI_FLCONN_GETDETAIL`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    /// Parameters sent to the remote system.
    #[serde(default)]
    pub import: Vec<Parameter>,
    /// Parameters received from the remote system.
    #[serde(default)]
    pub export: Vec<Parameter>,
    /// Table parameters, exchanged in both directions.
    #[serde(default)]
    pub table: Vec<Parameter>,
}

impl ParameterSchema {
    /// Creates an empty schema for the given function wire name.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    /// Appends an import parameter.
    pub fn with_import(mut self, parameter: Parameter) -> Self {
        self.import.push(parameter);
        self
    }

    /// Appends an export parameter.
    pub fn with_export(mut self, parameter: Parameter) -> Self {
        self.export.push(parameter);
        self
    }

    /// Appends a table parameter.
    pub fn with_table(mut self, parameter: Parameter) -> Self {
        self.table.push(parameter);
        self
    }

    /// Total number of top-level parameters.
    pub fn len(&self) -> usize {
        self.import.len() + self.export.len() + self.table.len()
    }

    /// Returns `true` if the schema has no parameters at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One parameter, either at the top level or nested inside a structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Parameter {
    /// Identifier on the remote system.
    pub wire_name: String,
    /// Identifier of the generated field.
    pub local_name: String,
    /// Shape of the parameter.
    #[serde(flatten)]
    pub kind: ParameterKind,
}

/// Shape of a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParameterKind {
    /// Leaf value. `value_type` is the raw type name reported by introspection.
    Scalar { value_type: String },
    /// Nested named group of fields.
    Structure { fields: Vec<Parameter> },
    /// Repeated nested group of fields.
    TableOfStructure { fields: Vec<Parameter> },
}

impl Parameter {
    pub fn scalar(
        wire_name: impl Into<String>,
        local_name: impl Into<String>,
        value_type: impl Into<String>,
    ) -> Self {
        Self {
            wire_name: wire_name.into(),
            local_name: local_name.into(),
            kind: ParameterKind::Scalar {
                value_type: value_type.into(),
            },
        }
    }

    pub fn structure(
        wire_name: impl Into<String>,
        local_name: impl Into<String>,
        fields: Vec<Parameter>,
    ) -> Self {
        Self {
            wire_name: wire_name.into(),
            local_name: local_name.into(),
            kind: ParameterKind::Structure { fields },
        }
    }

    pub fn table(
        wire_name: impl Into<String>,
        local_name: impl Into<String>,
        fields: Vec<Parameter>,
    ) -> Self {
        Self {
            wire_name: wire_name.into(),
            local_name: local_name.into(),
            kind: ParameterKind::TableOfStructure { fields },
        }
    }
}

/// Primitive value types a scalar parameter can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    String,
    Char,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    Decimal,
    Boolean,
    Date,
    Time,
    Timestamp,
    Bytes,
}

impl ValueType {
    /// Resolves a type name reported by introspection.
    ///
    /// Matching is case-insensitive and accepts the Java class names emitted
    /// by JCo based tooling as well as the short names.
    pub fn parse(name: &str) -> Option<Self> {
        let ty = match name.trim().to_ascii_lowercase().as_str() {
            "string" | "str" | "java.lang.string" => Self::String,
            "char" | "character" | "java.lang.character" => Self::Char,
            "byte" | "java.lang.byte" => Self::Byte,
            "short" | "java.lang.short" => Self::Short,
            "integer" | "int" | "java.lang.integer" => Self::Integer,
            "long" | "java.lang.long" => Self::Long,
            "float" | "java.lang.float" => Self::Float,
            "double" | "java.lang.double" => Self::Double,
            "decimal" | "bigdecimal" | "java.math.bigdecimal" => Self::Decimal,
            "boolean" | "bool" | "java.lang.boolean" => Self::Boolean,
            "date" | "java.util.date" | "java.sql.date" => Self::Date,
            "time" | "java.sql.time" => Self::Time,
            "timestamp" | "datetime" | "java.sql.timestamp" => Self::Timestamp,
            "bytes" | "binary" | "byte[]" => Self::Bytes,
            _ => return None,
        };
        Some(ty)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Char => "char",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Integer => "integer",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Time => "time",
            Self::Timestamp => "timestamp",
            Self::Bytes => "bytes",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
