use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

use http::Method;
use serde_json::Value;

use crate::builder::build_document;
use crate::config::Config;
use crate::error::Error;
use crate::meta::SecurityRequirement;
use crate::option::OpenApiOption;
use crate::router::{read, Registry, SharedRegistry, SpecRouter};

/// Output encoding of the generated document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchemaFormat {
    #[default]
    Yaml,
    Json,
}

impl SchemaFormat {
    /// `.json` files get JSON, everything else YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SchemaFormat::Json,
            _ => SchemaFormat::Yaml,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            SchemaFormat::Yaml => "application/yaml",
            SchemaFormat::Json => "application/json",
        }
    }
}

impl FromStr for SchemaFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(SchemaFormat::Yaml),
            "json" => Ok(SchemaFormat::Json),
            other => Err(Error::Serialization(format!(
                "unsupported schema format `{other}` (expected `yaml` or `json`)"
            ))),
        }
    }
}

/// Holds the configuration and every recorded operation; validates and
/// serializes the OpenAPI document.
///
/// Cloning is cheap: clones share the configuration and the route table.
#[derive(Clone)]
pub struct Generator {
    config: Arc<Config>,
    registry: SharedRegistry,
    root: SpecRouter,
}

impl Generator {
    pub fn new(opts: impl IntoIterator<Item = OpenApiOption>) -> Self {
        let config = Arc::new(Config::from_options(opts));
        let registry = Arc::new(RwLock::new(Registry::default()));
        let root = SpecRouter::root(config.clone(), registry.clone());
        Self {
            config,
            registry,
            root,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn shared_config(&self) -> Arc<Config> {
        self.config.clone()
    }

    /// The root spec router. Routes added through it or its groups are
    /// included in this generator's document.
    pub fn router(&self) -> SpecRouter {
        self.root.clone()
    }

    /// Recorded (method, path) pairs in registration order, hidden ones included.
    pub fn operations(&self) -> Vec<(Method, String)> {
        read(&self.registry)
            .operations
            .iter()
            .map(|op| (op.method.clone(), op.path.clone()))
            .collect()
    }

    /// Check the declared options for consistency.
    ///
    /// Reports undeclared security schemes, unknown OAuth2 scopes, duplicate
    /// operations and a malformed docs path. Calling it does not change any
    /// state, so it can be repeated.
    pub fn validate(&self) -> Result<(), Error> {
        let registry = read(&self.registry);
        let mut issues = Vec::new();

        if !self.config.disable_openapi && !self.config.docs_path.starts_with('/') {
            issues.push(format!(
                "docs path `{}` must start with `/`",
                self.config.docs_path
            ));
        }

        for (index, server) in self.config.servers.iter().enumerate() {
            if server.url.trim().is_empty() {
                issues.push(format!("server #{index} has an empty url"));
            }
        }

        for group in &registry.groups {
            let config = group
                .config
                .read()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            let prefix = if group.prefix.is_empty() { "/" } else { group.prefix.as_str() };
            for requirement in &config.security {
                self.check_requirement(requirement, &format!("group `{prefix}`"), &mut issues);
            }
        }

        let mut seen = HashSet::new();
        for op in &registry.operations {
            let location = format!("operation {} {}", op.method, op.path);
            if !seen.insert((op.method.clone(), op.path.clone())) {
                issues.push(format!("{location} is registered more than once"));
            }
            for requirement in &op.config.security {
                self.check_requirement(requirement, &location, &mut issues);
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(Error::Configuration(issues))
        }
    }

    fn check_requirement(
        &self,
        requirement: &SecurityRequirement,
        location: &str,
        issues: &mut Vec<String>,
    ) {
        let Some(scheme) = self.config.security_schemes.get(&requirement.name) else {
            let issue = format!(
                "{location} references undeclared security scheme `{}`",
                requirement.name
            );
            if !issues.contains(&issue) {
                issues.push(issue);
            }
            return;
        };
        for scope in &requirement.scopes {
            if !scheme.declares_scope(scope) {
                issues.push(format!(
                    "{location} requires scope `{scope}` not declared by security scheme `{}`",
                    requirement.name
                ));
            }
        }
    }

    /// Validate, then assemble the document as a JSON value.
    pub fn document(&self) -> Result<Value, Error> {
        self.validate()?;
        let registry = read(&self.registry);
        let document = build_document(&self.config, &registry.operations)?;
        self.config.debug_log(|| {
            format!(
                "generated OpenAPI document with {} operations",
                registry.operations.len()
            )
        });
        Ok(document)
    }

    /// Serialize the document in the requested format.
    pub fn generate_schema(&self, format: SchemaFormat) -> Result<Vec<u8>, Error> {
        let document = self.document()?;
        match format {
            SchemaFormat::Json => Ok(serde_json::to_vec_pretty(&document)?),
            SchemaFormat::Yaml => Ok(serde_yaml::to_string(&document)?.into_bytes()),
        }
    }

    /// Write the document to `path`, choosing the format from its extension.
    /// Existing files are overwritten.
    pub fn write_schema_to(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let bytes = self.generate_schema(SchemaFormat::from_path(path))?;
        std::fs::write(path, bytes)?;
        self.config
            .debug_log(|| format!("wrote OpenAPI document to {}", path.display()));
        Ok(())
    }
}
