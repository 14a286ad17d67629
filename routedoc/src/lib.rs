//! routedoc: self-documenting axum routers.
//!
//! This facade crate re-exports the routedoc sub-crates through a single
//! dependency. Import everything you need with:
//!
//! ```ignore
//! use routedoc::prelude::*;
//! ```
//!
//! # Feature flags
//!
//! | Feature | Default | Crate           |
//! |---------|---------|-----------------|
//! | `axum`  | **yes** | `routedoc-axum` |
//!
//! `routedoc-spec` (document generation) is always available.

pub use routedoc_spec;

#[cfg(feature = "axum")]
pub use routedoc_axum;

pub use routedoc_spec::{option, Config, Error, Generator, SchemaFormat, SecurityScheme, Server};

#[cfg(feature = "axum")]
pub use routedoc_axum::{Route, Router, StaticConfig};

/// Unified prelude. Import everything with `use routedoc::prelude::*`.
pub mod prelude {
    pub use routedoc_spec::option;
    pub use routedoc_spec::schemars::JsonSchema;
    pub use routedoc_spec::{
        ApiKeyLocation, Error, Generator, OAuthFlow, OAuthFlows, OpenApiSettings, SchemaFormat,
        SecurityScheme, Server, SwaggerConfig, TracingLogger,
    };

    #[cfg(feature = "axum")]
    pub use routedoc_axum::{Route, Router, StaticConfig};
}
