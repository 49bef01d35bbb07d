//! Connection properties store.
//!
//! A flat key/value bag holding everything needed to reach the remote
//! system. On first use the bundled defaults are written to the store file;
//! afterwards the file is the source of truth.
//!
//! ```toml
//! "session-manager.name" = "SM001"
//! "jco.client.ashost" = "some.sap-system.com"
//! ```

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::utils::filter_entries;

/// Bundled default connection properties.
const DEFAULT_PROPERTIES: &str = include_str!("../assets/connection.toml");

/// Key holding the session name used for newly built session configurations.
pub const SESSION_NAME_KEY: &str = "session-manager.name";
/// Execution context class for JCA sessions.
pub const JCA_CONTEXT_KEY: &str = "jca.context";
/// Connection factory reference for JCA sessions.
pub const JCA_CONNECTION_FACTORY_KEY: &str = "jca.connection.factory";
/// Connection spec factory class for JCA sessions.
pub const JCA_CONNECTION_SPEC_FACTORY_KEY: &str = "jca.connectionspec.factory";

/// Prefix of the flat JCo connection properties.
pub const JCO_PREFIX: &str = "jco.";
/// Keys containing this are not connection properties even under [`JCO_PREFIX`].
pub const JCO_EXCLUDE: &str = "context";

/// Flat connection properties persisted at a fixed path.
#[derive(Debug, Clone)]
pub struct ConnectionProperties {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl ConnectionProperties {
    /// Default store file name inside a workspace.
    pub const FILE_NAME: &'static str = ".connection.toml";

    /// Opens the store at `path`.
    ///
    /// If the file does not exist it is created from the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or created.
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();

        if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let entries = toml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            return Ok(Self { path, entries });
        }

        info!("creating default connection properties at {}", path.display());
        let this = Self {
            path,
            entries: Self::defaults()?,
        };
        this.save()?;
        Ok(this)
    }

    /// The bundled default properties.
    pub fn defaults() -> anyhow::Result<BTreeMap<String, String>> {
        toml::from_str(DEFAULT_PROPERTIES).context("Bundled connection properties are invalid")
    }

    /// Writes all properties to the store file.
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(&self.entries)?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Removes `key`, returning its previous value.
    pub fn delete(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    /// All properties, sorted by key.
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    /// Properties whose key starts with `prefix` and does not contain `exclude`.
    pub fn filtered(&self, prefix: &str, exclude: &str) -> BTreeMap<String, String> {
        filter_entries(&self.entries, prefix, exclude)
    }

    /// The flat JCo connection properties.
    pub fn jco_properties(&self) -> BTreeMap<String, String> {
        self.filtered(JCO_PREFIX, JCO_EXCLUDE)
    }

    /// Returns the value of `key` or an error naming the missing key.
    pub fn require(&self, key: &str) -> anyhow::Result<&str> {
        self.get(key).ok_or_else(|| {
            anyhow!(
                "connection property `{key}` is not set, use `set-property --key {key} --value ..`"
            )
        })
    }
}
