//! Extension configuration (YAML / properties / env loading)
//!
//! # YAML schema
//!
//! ```yaml
//! report:
//!   dir: build/archgraph-report
//! extensions:
//!   archgraph-report:
//!     enabled: true
//!     properties:
//!       only_violations: "true"
//! ```
//!
//! # Properties
//!
//! Flat keys `extension.<id>.<key>=<value>`; the first `.` after the
//! identifier separates it from the key, hence identifiers never contain `.`.
//! `extension.<id>.enabled` maps to the enabled flag, `report.dir` to the
//! report directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ExtensionError, Result};

/// Environment override for the report directory
pub const REPORT_DIR_ENV: &str = "ARCHGRAPH_REPORT_DIR";

/// Report directory used when neither env nor configuration name one
pub const DEFAULT_REPORT_DIR: &str = "target/archgraph-report";

const EXTENSION_PREFIX: &str = "extension.";
const REPORT_DIR_KEY: &str = "report.dir";
const ENABLED_KEY: &str = "enabled";

fn default_enabled() -> bool {
    true
}

/// Check an extension identifier: non-empty, no `.`
pub fn validate_identifier(identifier: &str) -> Result<()> {
    if identifier.is_empty() {
        return Err(ExtensionError::illegal_identifier(
            identifier,
            "identifier must not be empty",
        ));
    }
    if identifier.contains('.') {
        return Err(ExtensionError::illegal_identifier(
            identifier,
            "'.' is reserved as namespace separator",
        ));
    }
    Ok(())
}

/// Flat configuration handed to one extension at registration
///
/// In YAML, keys live under `properties`; any other key next to `enabled`
/// is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtensionConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            properties: BTreeMap::new(),
        }
    }
}

impl ExtensionConfig {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Boolean property; `None` when absent
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        self.get(key)
            .map(|raw| parse_bool(key, raw))
            .transpose()
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

/// Configuration of one analysis run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArchConfig {
    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub extensions: BTreeMap<String, ExtensionConfig>,
}

impl ArchConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: ArchConfig = serde_yaml::from_str(yaml)?;
        for identifier in config.extensions.keys() {
            validate_identifier(identifier)?;
        }
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Build from flat `key=value` properties
    ///
    /// Keys outside the `extension.` and `report.` namespaces are ignored.
    pub fn from_properties<I, K, V>(properties: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = ArchConfig::default();
        for (key, value) in properties {
            let key = key.as_ref();
            if key == REPORT_DIR_KEY {
                config.report.dir = Some(PathBuf::from(value.into()));
                continue;
            }
            let Some(rest) = key.strip_prefix(EXTENSION_PREFIX) else {
                tracing::debug!("Ignoring property outside extension namespace: {}", key);
                continue;
            };
            let Some((identifier, property)) = rest.split_once('.') else {
                return Err(ExtensionError::configuration(format!(
                    "Property '{}' must have the form extension.<id>.<key>",
                    key
                )));
            };
            validate_identifier(identifier)?;

            let entry = config.extensions.entry(identifier.to_string()).or_default();
            let value = value.into();
            if property == ENABLED_KEY {
                entry.enabled = parse_bool(key, &value)?;
            } else {
                entry.properties.insert(property.to_string(), value);
            }
        }
        Ok(config)
    }

    /// Configuration for `identifier`, default (enabled, empty) if none given
    pub fn extension(&self, identifier: &str) -> ExtensionConfig {
        self.extensions.get(identifier).cloned().unwrap_or_default()
    }

    pub fn with_extension(mut self, identifier: impl Into<String>, config: ExtensionConfig) -> Self {
        self.extensions.insert(identifier.into(), config);
        self
    }

    /// Report directory: env override, then configuration, then default
    pub fn report_dir(&self) -> PathBuf {
        resolve_report_dir(std::env::var(REPORT_DIR_ENV).ok(), self.report.dir.as_deref())
    }
}

/// Pick the report directory from an env value and the configured one
pub fn resolve_report_dir(env_value: Option<String>, configured: Option<&Path>) -> PathBuf {
    match env_value.filter(|dir| !dir.trim().is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => configured
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_DIR)),
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(ExtensionError::configuration(format!(
            "Property '{}' expects true or false, got '{}'",
            key, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("archgraph-report").is_ok());
        assert!(validate_identifier("foo").is_ok());

        let err = validate_identifier("foo.bar").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
        let err = validate_identifier("").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_from_yaml_str() {
        let yaml = r#"
report:
  dir: build/report
extensions:
  archgraph-report:
    properties:
      only_violations: "true"
  silent:
    enabled: false
"#;
        let config = ArchConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.report.dir, Some(PathBuf::from("build/report")));
        let report = config.extension("archgraph-report");
        assert!(report.enabled);
        assert_eq!(report.get_bool("only_violations").unwrap(), Some(true));
        assert!(!config.extension("silent").enabled);
        assert!(config.extension("unknown").enabled);
    }

    #[test]
    fn test_from_yaml_documented_schema() {
        let yaml = r#"
report:
  dir: build/archgraph-report
extensions:
  archgraph-report:
    enabled: true
    properties:
      only_violations: "true"
  layers:
    properties:
      depth: "3"
"#;
        let config = ArchConfig::from_yaml_str(yaml).unwrap();

        let expected = ArchConfig::default()
            .with_extension(
                "archgraph-report",
                ExtensionConfig::default().with_property("only_violations", "true"),
            )
            .with_extension("layers", ExtensionConfig::default().with_property("depth", "3"));
        assert_eq!(config.extensions, expected.extensions);
        assert_eq!(
            config.report.dir,
            Some(PathBuf::from("build/archgraph-report"))
        );
    }

    #[test]
    fn test_from_yaml_rejects_key_outside_properties() {
        let yaml = "extensions:\n  foo:\n    enabled: true\n    depth: \"3\"\n";
        let err = ArchConfig::from_yaml_str(yaml).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Serialization);
        assert!(err.message.contains("depth"));
    }

    #[test]
    fn test_from_yaml_rejects_dotted_identifier() {
        let yaml = "extensions:\n  foo.bar:\n    enabled: true\n";
        let err = ArchConfig::from_yaml_str(yaml).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_from_yaml_rejects_unknown_fields() {
        let err = ArchConfig::from_yaml_str("reports: {}\n").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Serialization);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = ArchConfig::default()
            .with_extension("foo", ExtensionConfig::default().with_property("a", "1"));
        let yaml = config.to_yaml_string().unwrap();
        assert_eq!(ArchConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_from_properties() {
        let config = ArchConfig::from_properties(vec![
            ("extension.foo.enabled", "false"),
            ("extension.foo.depth", "3"),
            ("extension.bar.nested.key", "x"),
            ("report.dir", "out"),
            ("unrelated.key", "ignored"),
        ])
        .unwrap();

        let foo = config.extension("foo");
        assert!(!foo.enabled);
        assert_eq!(foo.get("depth"), Some("3"));
        assert_eq!(config.extension("bar").get("nested.key"), Some("x"));
        assert_eq!(config.report.dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_from_properties_rejects_malformed_keys() {
        let err = ArchConfig::from_properties(vec![("extension.foo", "x")]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);

        let err = ArchConfig::from_properties(vec![("extension.foo.enabled", "maybe")]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_resolve_report_dir_precedence() {
        let configured = Path::new("configured");

        assert_eq!(
            resolve_report_dir(Some("from-env".into()), Some(configured)),
            PathBuf::from("from-env")
        );
        assert_eq!(
            resolve_report_dir(Some("  ".into()), Some(configured)),
            PathBuf::from("configured")
        );
        assert_eq!(
            resolve_report_dir(None, None),
            PathBuf::from(DEFAULT_REPORT_DIR)
        );
    }
}
