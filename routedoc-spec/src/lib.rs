//! OpenAPI 3.1 document generation from recorded route metadata.
//!
//! A [`Generator`] owns the document [`Config`] and a route table fed through
//! [`SpecRouter`]s. Request and response types are reflected with schemars;
//! the generator validates the declared options and serializes the document
//! as YAML or JSON.

mod builder;
pub mod config;
mod error;
mod generator;
pub mod meta;
pub mod option;
pub mod path;
mod router;
pub mod schema;
mod settings;

pub use builder::build_document;
pub use config::{
    ApiKeyLocation, Config, Logger, NoopLogger, OAuthFlow, OAuthFlows, ReflectorConfig,
    RequiredFields, SecurityScheme, Server, ServerVariable, SwaggerConfig, TracingLogger,
};
pub use error::Error;
pub use generator::{Generator, SchemaFormat};
pub use meta::{
    GroupConfig, OperationConfig, ParamLocation, RequestInfo, SecurityRequirement, TypeBinding,
    JSON_CONTENT_TYPE,
};
pub use option::{GroupOption, Mutator, OpenApiOption, ReflectorOption, RouteOption};
pub use router::{Operation, SpecRoute, SpecRouter};
pub use schema::SchemaRegistry;
pub use settings::{OpenApiSettings, ServerSettings};

pub use schemars;
