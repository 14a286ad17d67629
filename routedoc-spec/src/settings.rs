use std::path::Path;

use serde::Deserialize;

use crate::config::Server;
use crate::error::Error;
use crate::option::{self, OpenApiOption};

/// Declarative document settings, typically read from an `application.yaml`.
///
/// The values may sit at the top level of the document or under an
/// `openapi:` section:
///
/// ```yaml
/// openapi:
///   title: Pet Store
///   version: 1.0.0
///   docs_path: /reference
///   servers:
///     - url: https://petstore.example.com
///       description: Production
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OpenApiSettings {
    pub title: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub docs_path: Option<String>,
    pub disabled: Option<bool>,
    pub servers: Vec<ServerSettings>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerSettings {
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl OpenApiSettings {
    pub fn from_yaml_str(content: &str) -> Result<Self, Error> {
        let mut yaml: serde_yaml::Value = serde_yaml::from_str(content)?;
        if let Some(section) = yaml.get("openapi").cloned() {
            yaml = section;
        }
        if yaml.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_value(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Convert into options. Only fields present in the settings produce one.
    pub fn into_options(self) -> Vec<OpenApiOption> {
        let mut opts = Vec::new();
        if let Some(title) = self.title {
            opts.push(option::with_title(title));
        }
        if let Some(version) = self.version {
            opts.push(option::with_version(version));
        }
        if let Some(description) = self.description {
            opts.push(option::with_description(description));
        }
        if let Some(docs_path) = self.docs_path {
            opts.push(option::with_docs_path(docs_path));
        }
        if let Some(disabled) = self.disabled {
            opts.push(option::with_disable_openapi(disabled));
        }
        for server in self.servers {
            let mut entry = Server::new(server.url);
            entry.description = server.description;
            opts.push(option::with_server(entry));
        }
        opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_nested_section() {
        let settings = OpenApiSettings::from_yaml_str(
            "openapi:\n  title: Pets\n  disabled: true\n  servers:\n    - url: http://localhost\n",
        )
        .unwrap();
        assert_eq!(settings.title.as_deref(), Some("Pets"));
        assert_eq!(settings.disabled, Some(true));
        assert_eq!(settings.servers.len(), 1);
        assert!(settings.servers[0].description.is_none());
    }

    #[test]
    fn reads_top_level_values() {
        let settings = OpenApiSettings::from_yaml_str("version: 2.0.0\n").unwrap();
        assert_eq!(settings.version.as_deref(), Some("2.0.0"));
        assert!(settings.title.is_none());
    }

    #[test]
    fn empty_document_yields_defaults() {
        let settings = OpenApiSettings::from_yaml_str("").unwrap();
        assert_eq!(settings, OpenApiSettings::default());
        assert!(settings.into_options().is_empty());
    }

    #[test]
    fn malformed_yaml_is_a_serialization_error() {
        let err = OpenApiSettings::from_yaml_str("title: [unclosed").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
