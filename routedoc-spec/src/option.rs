//! Function-shaped options for the configuration, groups and routes.
//!
//! Every option is a [`Mutator`] that sets one field of its target. Options
//! are applied in the order they are supplied, so a later option overrides an
//! earlier one on the same field.
//!
//! ```ignore
//! use routedoc_spec::option;
//!
//! let generator = Generator::new([
//!     option::with_title("Pet Store"),
//!     option::with_version("1.0.0"),
//!     option::with_security("bearerAuth", SecurityScheme::bearer_with_format("JWT")),
//! ]);
//! ```

use std::sync::Arc;

use schemars::JsonSchema;
use serde_json::Value;

use crate::config::{Config, Logger, ReflectorConfig, RequiredFields, SecurityScheme, Server, SwaggerConfig};
use crate::meta::{
    GroupConfig, OperationConfig, ParamInfo, ParamLocation, RequestInfo, ResponseInfo,
    SecurityRequirement, TypeBinding, JSON_CONTENT_TYPE,
};
use crate::settings::OpenApiSettings;

/// A deferred mutation of a `T`.
pub struct Mutator<T>(Box<dyn FnOnce(&mut T) + Send>);

impl<T> Mutator<T> {
    pub fn new(f: impl FnOnce(&mut T) + Send + 'static) -> Self {
        Self(Box::new(f))
    }

    pub fn apply(self, target: &mut T) {
        (self.0)(target)
    }
}

/// Option targeting the document-wide [`Config`].
pub type OpenApiOption = Mutator<Config>;
/// Option targeting the metadata of a route group.
pub type GroupOption = Mutator<GroupConfig>;
/// Option targeting the metadata of a single route.
pub type RouteOption = Mutator<OperationConfig>;
/// Option targeting the type reflector.
pub type ReflectorOption = Mutator<ReflectorConfig>;

// ── Document options ────────────────────────────────────────────────────────

pub fn with_openapi_version(version: impl Into<String>) -> OpenApiOption {
    let version = version.into();
    Mutator::new(move |cfg: &mut Config| cfg.openapi_version = version)
}

pub fn with_title(title: impl Into<String>) -> OpenApiOption {
    let title = title.into();
    Mutator::new(move |cfg: &mut Config| cfg.title = title)
}

/// Set the API version reported in `info.version`.
pub fn with_version(version: impl Into<String>) -> OpenApiOption {
    let version = version.into();
    Mutator::new(move |cfg: &mut Config| cfg.version = version)
}

pub fn with_description(description: impl Into<String>) -> OpenApiOption {
    let description = description.into();
    Mutator::new(move |cfg: &mut Config| cfg.description = Some(description))
}

/// Path of the documentation page. The schema is served at `<path>/openapi.yaml`.
pub fn with_docs_path(path: impl Into<String>) -> OpenApiOption {
    let path = path.into();
    Mutator::new(move |cfg: &mut Config| cfg.docs_path = path)
}

/// Disable the documentation endpoints entirely.
pub fn with_disable_openapi(disable: bool) -> OpenApiOption {
    Mutator::new(move |cfg: &mut Config| cfg.disable_openapi = disable)
}

pub fn with_swagger_config(swagger: SwaggerConfig) -> OpenApiOption {
    Mutator::new(move |cfg: &mut Config| cfg.swagger_config = swagger)
}

/// Declare a named security scheme. Redeclaring a name replaces the scheme.
pub fn with_security(name: impl Into<String>, scheme: SecurityScheme) -> OpenApiOption {
    let name = name.into();
    Mutator::new(move |cfg: &mut Config| {
        cfg.security_schemes.insert(name, scheme);
    })
}

/// Append an entry to the `servers` list.
pub fn with_server(server: Server) -> OpenApiOption {
    Mutator::new(move |cfg: &mut Config| cfg.servers.push(server))
}

pub fn with_reflector_config(opts: impl IntoIterator<Item = ReflectorOption>) -> OpenApiOption {
    let opts: Vec<ReflectorOption> = opts.into_iter().collect();
    Mutator::new(move |cfg: &mut Config| {
        for opt in opts {
            opt.apply(&mut cfg.reflector);
        }
    })
}

pub fn with_debug(debug: bool) -> OpenApiOption {
    Mutator::new(move |cfg: &mut Config| cfg.debug = debug)
}

pub fn with_logger(logger: impl Logger + 'static) -> OpenApiOption {
    let logger: Arc<dyn Logger> = Arc::new(logger);
    Mutator::new(move |cfg: &mut Config| cfg.logger = logger)
}

/// Apply declarative settings loaded from YAML.
pub fn with_settings(settings: OpenApiSettings) -> OpenApiOption {
    Mutator::new(move |cfg: &mut Config| {
        for opt in settings.into_options() {
            opt.apply(cfg);
        }
    })
}

// ── Reflector options ───────────────────────────────────────────────────────

/// Keep the `required` lists inferred from non-`Option` fields (the default).
pub fn required_from_schema() -> ReflectorOption {
    Mutator::new(|r: &mut ReflectorConfig| r.required_fields = RequiredFields::FromSchema)
}

/// Strip every `required` list from reflected schemas.
pub fn no_required_fields() -> ReflectorOption {
    Mutator::new(|r: &mut ReflectorConfig| r.required_fields = RequiredFields::None)
}

/// Inline nested types instead of emitting `#/components/schemas` references.
pub fn inline_refs() -> ReflectorOption {
    Mutator::new(|r: &mut ReflectorConfig| r.inline_refs = true)
}

/// Replace the component schema named `name` with `schema`.
pub fn type_mapping(name: impl Into<String>, schema: Value) -> ReflectorOption {
    let name = name.into();
    Mutator::new(move |r: &mut ReflectorConfig| {
        r.type_mappings.insert(name, schema);
    })
}

// ── Group options ───────────────────────────────────────────────────────────

pub fn group_tags<I, S>(tags: I) -> GroupOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
    Mutator::new(move |g: &mut GroupConfig| {
        for tag in tags {
            if !g.tags.contains(&tag) {
                g.tags.push(tag);
            }
        }
    })
}

/// Require the named security scheme for every route of the group.
pub fn group_security<I, S>(name: impl Into<String>, scopes: I) -> GroupOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let requirement = SecurityRequirement::new(name, scopes);
    Mutator::new(move |g: &mut GroupConfig| g.security.push(requirement))
}

/// Leave the group's routes out of the document.
pub fn group_hidden(hidden: bool) -> GroupOption {
    Mutator::new(move |g: &mut GroupConfig| g.hidden = hidden)
}

pub fn group_deprecated(deprecated: bool) -> GroupOption {
    Mutator::new(move |g: &mut GroupConfig| g.deprecated = deprecated)
}

// ── Route options ───────────────────────────────────────────────────────────

pub fn summary(text: impl Into<String>) -> RouteOption {
    let text = text.into();
    Mutator::new(move |op: &mut OperationConfig| op.summary = Some(text))
}

pub fn description(text: impl Into<String>) -> RouteOption {
    let text = text.into();
    Mutator::new(move |op: &mut OperationConfig| op.description = Some(text))
}

pub fn operation_id(id: impl Into<String>) -> RouteOption {
    let id = id.into();
    Mutator::new(move |op: &mut OperationConfig| op.operation_id = Some(id))
}

/// Bind `T` as the JSON request body.
pub fn request<T: JsonSchema>() -> RouteOption {
    request_with_content_type::<T>(JSON_CONTENT_TYPE)
}

/// Bind `T` as the request body sent as `content_type`, e.g.
/// `application/x-www-form-urlencoded` or `multipart/form-data`.
pub fn request_with_content_type<T: JsonSchema>(content_type: impl Into<String>) -> RouteOption {
    let request = RequestInfo {
        content_type: content_type.into(),
        body: TypeBinding::of::<T>(),
    };
    Mutator::new(move |op: &mut OperationConfig| op.request = Some(request))
}

/// Bind `T` as the JSON body of the `status` response.
pub fn response<T: JsonSchema>(status: u16) -> RouteOption {
    let binding = TypeBinding::of::<T>();
    Mutator::new(move |op: &mut OperationConfig| {
        op.responses.entry(status).or_default().body = Some(binding);
    })
}

pub fn response_with_description<T: JsonSchema>(
    status: u16,
    description: impl Into<String>,
) -> RouteOption {
    let description = description.into();
    let binding = TypeBinding::of::<T>();
    Mutator::new(move |op: &mut OperationConfig| {
        op.responses.insert(
            status,
            ResponseInfo {
                description: Some(description),
                body: Some(binding),
            },
        );
    })
}

/// Document a response without a body, e.g. `204 No Content`.
pub fn empty_response(status: u16, description: impl Into<String>) -> RouteOption {
    let description = description.into();
    Mutator::new(move |op: &mut OperationConfig| {
        op.responses.insert(
            status,
            ResponseInfo {
                description: Some(description),
                body: None,
            },
        );
    })
}

pub fn tags<I, S>(tags: I) -> RouteOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
    Mutator::new(move |op: &mut OperationConfig| {
        for tag in tags {
            op.add_tag(tag);
        }
    })
}

/// Require a previously declared security scheme for this route.
pub fn security<I, S>(name: impl Into<String>, scopes: I) -> RouteOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let requirement = SecurityRequirement::new(name, scopes);
    Mutator::new(move |op: &mut OperationConfig| op.security.push(requirement))
}

/// Type a `{name}` path placeholder. Untyped placeholders are documented as strings.
pub fn path_param<T: JsonSchema>(name: impl Into<String>) -> RouteOption {
    param::<T>(name.into(), ParamLocation::Path, true)
}

pub fn query_param<T: JsonSchema>(name: impl Into<String>, required: bool) -> RouteOption {
    param::<T>(name.into(), ParamLocation::Query, required)
}

pub fn header_param<T: JsonSchema>(name: impl Into<String>, required: bool) -> RouteOption {
    param::<T>(name.into(), ParamLocation::Header, required)
}

fn param<T: JsonSchema>(name: String, location: ParamLocation, required: bool) -> RouteOption {
    let schema = TypeBinding::of::<T>();
    Mutator::new(move |op: &mut OperationConfig| {
        op.params.retain(|p| !(p.name == name && p.location == location));
        op.params.push(ParamInfo {
            name,
            location,
            required,
            schema,
        });
    })
}

pub fn hidden(hidden: bool) -> RouteOption {
    Mutator::new(move |op: &mut OperationConfig| op.hidden = hidden)
}

pub fn deprecated(deprecated: bool) -> RouteOption {
    Mutator::new(move |op: &mut OperationConfig| op.deprecated = deprecated)
}
