//! Common utilities and helper functions.

use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{Context, bail};
use serde::de::DeserializeOwned;

/// Selects the entries whose key starts with `prefix` and does not contain
/// `exclude`.
///
/// The source map is left untouched; values are copied unchanged.
pub fn filter_entries(
    entries: &BTreeMap<String, String>,
    prefix: &str,
    exclude: &str,
) -> BTreeMap<String, String> {
    entries
        .iter()
        .filter(|(key, _)| key.starts_with(prefix) && !key.contains(exclude))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Reads a JSON or TOML file, chosen by extension, into `T`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, has another extension, or
/// does not parse into `T`.
pub fn read_typed<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
    let value: T = match ext {
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?,
        "toml" => {
            toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?
        }
        _ => bail!("unsupported file extension: {ext:?}"),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bag() -> BTreeMap<String, String> {
        [
            ("session-manager.name", "SM001"),
            ("jco.client.client", "000"),
            ("jco.client.user", "user"),
            ("jco.client.passwd", "secret"),
            ("jco.client.lang", "en"),
            ("jco.client.ashost", "some.sap-system.com"),
            ("jco.client.sysnr", "00"),
            ("jco.destination.peak_limit", "10"),
            ("jca.context", "org.hibersap.execution.jca.JCAContext"),
            ("jca.connection.factory", "java:/eis/sap/NSP"),
            ("jca.connectionspec.factory", "SpecFactory"),
            ("other.key", "value"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_filter_jco_entries() {
        let entries = bag();
        assert_eq!(entries.len(), 12);

        let filtered = filter_entries(&entries, "jco.", "context");
        assert_eq!(filtered.len(), 7);
        for (key, value) in &filtered {
            assert_eq!(entries.get(key), Some(value));
        }
        // source is not affected
        assert_eq!(entries.len(), 12);
    }

    #[test]
    fn test_filter_excludes_substring() {
        let mut entries = bag();
        entries.insert("jco.context".into(), "JCoContext".into());

        let filtered = filter_entries(&entries, "jco.", "context");
        assert_eq!(filtered.len(), 7);
        assert!(!filtered.contains_key("jco.context"));

        let jca = filter_entries(&entries, "jca.", "context");
        assert_eq!(
            jca.keys().collect::<Vec<_>>(),
            vec!["jca.connection.factory", "jca.connectionspec.factory"]
        );
    }

    #[test]
    fn test_read_typed_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("bag.toml");
        fs::write(&toml_path, "\"jco.client.lang\" = \"de\"\n").unwrap();
        let parsed: BTreeMap<String, String> = read_typed(&toml_path).unwrap();
        assert_eq!(parsed["jco.client.lang"], "de");

        let json_path = dir.path().join("bag.json");
        fs::write(&json_path, r#"{"jco.client.lang": "fr"}"#).unwrap();
        let parsed: BTreeMap<String, String> = read_typed(&json_path).unwrap();
        assert_eq!(parsed["jco.client.lang"], "fr");

        let xml_path = dir.path().join("bag.xml");
        fs::write(&xml_path, "<bag/>").unwrap();
        assert!(read_typed::<BTreeMap<String, String>>(&xml_path).is_err());
    }
}
