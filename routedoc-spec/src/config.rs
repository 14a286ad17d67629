use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::option::OpenApiOption;

/// Settings for the generated OpenAPI document and the documentation endpoints.
///
/// Built once from [`Config::default`] overridden by an ordered list of
/// options (last write wins), then shared read-only.
pub struct Config {
    pub openapi_version: String,
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    pub disable_openapi: bool,
    pub docs_path: String,
    pub swagger_config: SwaggerConfig,
    pub security_schemes: BTreeMap<String, SecurityScheme>,
    pub servers: Vec<Server>,
    pub reflector: ReflectorConfig,
    pub debug: bool,
    pub logger: Arc<dyn Logger>,
}

impl Config {
    /// Apply `opts` in order on top of the default values.
    pub fn from_options(opts: impl IntoIterator<Item = OpenApiOption>) -> Self {
        let mut config = Config::default();
        for opt in opts {
            opt.apply(&mut config);
        }
        config
    }

    /// Send a message to the configured logger when debug output is enabled.
    pub fn debug_log(&self, message: impl FnOnce() -> String) {
        if self.debug {
            self.logger.log(&message());
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openapi_version: "3.1.0".to_string(),
            title: "OpenAPI".to_string(),
            version: "1.0.0".to_string(),
            description: None,
            disable_openapi: false,
            docs_path: "/docs".to_string(),
            swagger_config: SwaggerConfig::default(),
            security_schemes: BTreeMap::new(),
            servers: Vec::new(),
            reflector: ReflectorConfig::default(),
            debug: false,
            logger: Arc::new(NoopLogger),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("openapi_version", &self.openapi_version)
            .field("title", &self.title)
            .field("version", &self.version)
            .field("description", &self.description)
            .field("disable_openapi", &self.disable_openapi)
            .field("docs_path", &self.docs_path)
            .field("security_schemes", &self.security_schemes.keys().collect::<Vec<_>>())
            .field("servers", &self.servers)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

// ── Logging ─────────────────────────────────────────────────────────────────

/// Sink for generator debug output.
pub trait Logger: Send + Sync {
    fn log(&self, message: &str);
}

/// Discards every message. The default logger.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _message: &str) {}
}

/// Forwards messages to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, message: &str) {
        tracing::debug!(target: "routedoc", "{message}");
    }
}

// ── Documentation UI ────────────────────────────────────────────────────────

/// Swagger UI settings embedded verbatim into the documentation page.
///
/// Unset fields are omitted so Swagger UI falls back to its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwaggerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deep_linking: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_expansion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_request_duration: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persist_authorization: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_models_expand_depth: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub try_it_out_enabled: Option<bool>,
}

// ── Servers ─────────────────────────────────────────────────────────────────

/// An entry of the document's `servers` list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Server {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, ServerVariable>,
}

impl Server {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
            variables: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declare a `{name}` substitution variable used in the server URL.
    pub fn with_variable(mut self, name: impl Into<String>, variable: ServerVariable) -> Self {
        self.variables.insert(name.into(), variable);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerVariable {
    pub default: String,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub allowed: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ── Security schemes ────────────────────────────────────────────────────────

/// A security scheme declared under `components.securitySchemes`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum SecurityScheme {
    #[serde(rename = "http", rename_all = "camelCase")]
    Http {
        scheme: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        bearer_format: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    #[serde(rename = "apiKey")]
    ApiKey {
        name: String,
        #[serde(rename = "in")]
        location: ApiKeyLocation,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    #[serde(rename = "oauth2")]
    OAuth2 {
        flows: OAuthFlows,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    #[serde(rename = "openIdConnect", rename_all = "camelCase")]
    OpenIdConnect {
        open_id_connect_url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

impl SecurityScheme {
    /// HTTP bearer authentication without a format hint.
    pub fn bearer() -> Self {
        SecurityScheme::Http {
            scheme: "bearer".to_string(),
            bearer_format: None,
            description: None,
        }
    }

    /// HTTP bearer authentication with a format hint such as `"JWT"`.
    pub fn bearer_with_format(format: impl Into<String>) -> Self {
        SecurityScheme::Http {
            scheme: "bearer".to_string(),
            bearer_format: Some(format.into()),
            description: None,
        }
    }

    pub fn basic() -> Self {
        SecurityScheme::Http {
            scheme: "basic".to_string(),
            bearer_format: None,
            description: None,
        }
    }

    pub fn api_key(name: impl Into<String>, location: ApiKeyLocation) -> Self {
        SecurityScheme::ApiKey {
            name: name.into(),
            location,
            description: None,
        }
    }

    pub fn oauth2(flows: OAuthFlows) -> Self {
        SecurityScheme::OAuth2 {
            flows,
            description: None,
        }
    }

    pub fn open_id_connect(url: impl Into<String>) -> Self {
        SecurityScheme::OpenIdConnect {
            open_id_connect_url: url.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        let slot = match &mut self {
            SecurityScheme::Http { description, .. }
            | SecurityScheme::ApiKey { description, .. }
            | SecurityScheme::OAuth2 { description, .. }
            | SecurityScheme::OpenIdConnect { description, .. } => description,
        };
        *slot = Some(text.into());
        self
    }

    /// Whether `scope` is declared by any OAuth2 flow of this scheme.
    ///
    /// Non-OAuth2 schemes accept any scope name (OpenAPI treats them as roles).
    pub fn declares_scope(&self, scope: &str) -> bool {
        match self {
            SecurityScheme::OAuth2 { flows, .. } => flows.scopes().any(|s| s == scope),
            _ => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    Header,
    Query,
    Cookie,
}

/// The OAuth2 flows supported by an `oauth2` security scheme.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthFlows {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implicit: Option<OAuthFlow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<OAuthFlow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_credentials: Option<OAuthFlow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<OAuthFlow>,
}

impl OAuthFlows {
    fn scopes(&self) -> impl Iterator<Item = &str> {
        [
            &self.implicit,
            &self.password,
            &self.client_credentials,
            &self.authorization_code,
        ]
        .into_iter()
        .flatten()
        .flat_map(|flow| flow.scopes.keys().map(String::as_str))
    }
}

/// A single OAuth2 flow. Which URLs are required depends on the flow kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthFlow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_url: Option<String>,
    pub scopes: BTreeMap<String, String>,
}

impl OAuthFlow {
    pub fn implicit(authorization_url: impl Into<String>) -> Self {
        Self {
            authorization_url: Some(authorization_url.into()),
            ..Self::default()
        }
    }

    pub fn password(token_url: impl Into<String>) -> Self {
        Self {
            token_url: Some(token_url.into()),
            ..Self::default()
        }
    }

    pub fn client_credentials(token_url: impl Into<String>) -> Self {
        Self::password(token_url)
    }

    pub fn authorization_code(
        authorization_url: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Self {
        Self {
            authorization_url: Some(authorization_url.into()),
            token_url: Some(token_url.into()),
            ..Self::default()
        }
    }

    pub fn with_refresh_url(mut self, url: impl Into<String>) -> Self {
        self.refresh_url = Some(url.into());
        self
    }

    pub fn with_scope(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.scopes.insert(name.into(), description.into());
        self
    }
}

// ── Reflector ───────────────────────────────────────────────────────────────

/// How `required` lists are produced for reflected object schemas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequiredFields {
    /// Keep what schemars infers: non-`Option` fields are required.
    #[default]
    FromSchema,
    /// Drop every `required` list.
    None,
}

/// Tuning for the schemars-based type reflection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReflectorConfig {
    pub required_fields: RequiredFields,
    pub inline_refs: bool,
    /// Component schemas replaced by a hand-written schema, keyed by name.
    pub type_mappings: BTreeMap<String, Value>,
}
