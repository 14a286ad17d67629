//! Axum adapter for routedoc.
//!
//! [`Router`] wraps an axum routing tree and a [`SpecRouter`](routedoc_spec::SpecRouter):
//! each `get`/`post`/`group`/`with` call is mirrored onto both, so the OpenAPI
//! document always matches what the application actually serves. Unless
//! disabled, the root router also serves Swagger UI at the docs path and the
//! YAML document at `<docs path>/openapi.yaml`.

pub mod handlers;
mod live;
pub mod path;
mod route;
mod router;

pub use handlers::{OpenApiHandler, OPENAPI_FILE_NAME};
pub use live::StaticConfig;
pub use path::{convert_path, join_path};
pub use route::Route;
pub use router::{Router, DEFAULT_DESCRIPTION, DEFAULT_TITLE, DEFAULT_VERSION};

pub use routedoc_spec::{option, Error, SchemaFormat};
