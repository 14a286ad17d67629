use std::convert::Infallible;
use std::path::Path;

use axum::extract::Request;
use axum::handler::Handler;
use axum::response::IntoResponse;
use http::Method;
use routedoc_spec::option;
use routedoc_spec::{
    Error, Generator, GroupOption, OpenApiOption, SchemaFormat, SpecRouter, SwaggerConfig,
};

use crate::handlers::OpenApiHandler;
use crate::live::{LiveRouter, StaticConfig};
use crate::path::{convert_path, join_path, unsupported_segment};
use crate::route::Route;

pub const DEFAULT_TITLE: &str = "Axum OpenAPI";
pub const DEFAULT_DESCRIPTION: &str = "OpenAPI documentation for an axum application";
pub const DEFAULT_VERSION: &str = "1.0.0";

/// An axum router that documents itself.
///
/// Every registration goes to two places in the same call: the axum routing
/// tree that dispatches requests and the spec router that feeds the OpenAPI
/// document. Sub-routers created with [`group`](Self::group) share both trees
/// with their parent.
///
/// ```ignore
/// let app = Router::new([option::with_title("Pets"), option::with_version("1.0.0")]);
/// app.get("/pets/:id", get_pet)
///     .with([option::summary("Get a pet"), option::response::<Pet>(200)]);
/// app.validate()?;
/// let router: axum::Router = app.into_router();
/// ```
pub struct Router<S = ()> {
    live: LiveRouter<S>,
    spec: SpecRouter,
    generator: Option<Generator>,
}

impl<S> Clone for Router<S> {
    fn clone(&self) -> Self {
        Self {
            live: self.live.clone(),
            spec: self.spec.clone(),
            generator: self.generator.clone(),
        }
    }
}

fn baseline_options() -> Vec<OpenApiOption> {
    vec![
        option::with_title(DEFAULT_TITLE),
        option::with_description(DEFAULT_DESCRIPTION),
        option::with_version(DEFAULT_VERSION),
        option::with_swagger_config(SwaggerConfig::default()),
    ]
}

fn routable_path(path: &str) -> String {
    let converted = convert_path(path);
    if let Some(segment) = unsupported_segment(&converted) {
        panic!(
            "unsupported segment `{segment}` in route path `{path}`: a path parameter must fill its whole segment"
        );
    }
    converted
}

impl<S> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Create a root router. `opts` are applied after the baseline title,
    /// description and version, so they override them.
    pub fn new(opts: impl IntoIterator<Item = OpenApiOption>) -> Self {
        Self::build(None, opts)
    }

    /// Like [`new`](Self::new), keeping the routes already present on `router`.
    /// Those routes are not documented.
    pub fn from_router(router: axum::Router<S>, opts: impl IntoIterator<Item = OpenApiOption>) -> Self {
        Self::build(Some(router), opts)
    }

    fn build(base: Option<axum::Router<S>>, opts: impl IntoIterator<Item = OpenApiOption>) -> Self {
        let mut all = baseline_options();
        all.extend(opts);
        let generator = Generator::new(all);

        let router = Self {
            live: LiveRouter::new(base),
            spec: generator.router(),
            generator: Some(generator.clone()),
        };

        let config = generator.config();
        if config.disable_openapi {
            tracing::debug!("OpenAPI disabled, documentation routes not mounted");
            return router;
        }

        let handler = OpenApiHandler::new(generator.clone());
        let docs_path = config.docs_path.clone();
        let schema_path = join_path(&docs_path, crate::handlers::OPENAPI_FILE_NAME);

        let docs = handler.clone();
        router
            .live
            .add(Method::GET, &docs_path, move || std::future::ready(docs.docs()));
        router.live.add(Method::GET, &schema_path, move || {
            std::future::ready(handler.openapi_yaml())
        });

        tracing::debug!(docs = %docs_path, schema = %schema_path, "mounted OpenAPI documentation routes");
        router
    }

    // ── Verbs ───────────────────────────────────────────────────────────

    pub fn get<H, T>(&self, path: &str, handler: H) -> Route
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.add(Method::GET, path, handler)
    }

    pub fn head<H, T>(&self, path: &str, handler: H) -> Route
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.add(Method::HEAD, path, handler)
    }

    pub fn post<H, T>(&self, path: &str, handler: H) -> Route
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.add(Method::POST, path, handler)
    }

    pub fn put<H, T>(&self, path: &str, handler: H) -> Route
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.add(Method::PUT, path, handler)
    }

    pub fn patch<H, T>(&self, path: &str, handler: H) -> Route
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.add(Method::PATCH, path, handler)
    }

    pub fn delete<H, T>(&self, path: &str, handler: H) -> Route
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.add(Method::DELETE, path, handler)
    }

    pub fn connect<H, T>(&self, path: &str, handler: H) -> Route
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.add(Method::CONNECT, path, handler)
    }

    pub fn options<H, T>(&self, path: &str, handler: H) -> Route
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.add(Method::OPTIONS, path, handler)
    }

    pub fn trace<H, T>(&self, path: &str, handler: H) -> Route
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.add(Method::TRACE, path, handler)
    }

    /// Register `handler` for `method` at `path`, on both trees.
    ///
    /// `:name` markers are rewritten to `{name}` first.
    ///
    /// # Panics
    ///
    /// If a segment of `path` holds a parameter alongside other text, such as
    /// `/files/:name.json`. axum cannot route those.
    pub fn add<H, T>(&self, method: Method, path: &str, handler: H) -> Route
    where
        H: Handler<T, S>,
        T: 'static,
    {
        let path = routable_path(path);
        let full = self.live.add(method.clone(), &path, handler);
        let spec = self.spec.add(method.clone(), &path);
        Route::new(method, full, spec)
    }

    // ── Grouping ────────────────────────────────────────────────────────

    /// Create a sub-router whose routes live under `prefix`.
    ///
    /// # Panics
    ///
    /// Under the same conditions as [`add`](Self::add).
    pub fn group(&self, prefix: &str) -> Router<S> {
        let prefix = routable_path(prefix);
        Router {
            live: self.live.group(&prefix),
            spec: self.spec.group(&prefix),
            generator: None,
        }
    }

    /// [`group`](Self::group), then let `f` register the group's routes.
    pub fn route(&self, prefix: &str, f: impl FnOnce(&Router<S>)) -> Router<S> {
        let child = self.group(prefix);
        f(&child);
        child
    }

    /// Apply documentation options to routes registered from now on through
    /// this router and its sub-routers.
    pub fn with(&self, opts: impl IntoIterator<Item = GroupOption>) -> &Self {
        self.spec.with(opts);
        self
    }

    /// Wrap this router's routes, including those of its sub-routers, in a
    /// tower layer. Documentation is unaffected.
    pub fn layer<L>(&self, layer: L) -> &Self
    where
        L: tower::Layer<axum::routing::Route> + Clone + Send + Sync + 'static,
        L::Service: tower::Service<Request> + Clone + Send + Sync + 'static,
        <L::Service as tower::Service<Request>>::Response: IntoResponse + 'static,
        <L::Service as tower::Service<Request>>::Error: Into<Infallible> + 'static,
        <L::Service as tower::Service<Request>>::Future: Send + 'static,
    {
        self.live
            .push_layer(Box::new(move |router: axum::Router<S>| router.layer(layer)));
        self
    }

    /// Serve the files under `root` at `prefix`. Not documented.
    pub fn static_files(&self, prefix: &str, root: impl AsRef<Path>) -> &Self {
        self.static_files_with(prefix, root, StaticConfig::default())
    }

    pub fn static_files_with(
        &self,
        prefix: &str,
        root: impl AsRef<Path>,
        config: StaticConfig,
    ) -> &Self {
        self.live
            .static_files(prefix, root.as_ref().to_path_buf(), &config);
        self
    }

    // ── Document ────────────────────────────────────────────────────────

    /// The generator of a root router; `None` for sub-routers.
    pub fn generator(&self) -> Option<&Generator> {
        self.generator.as_ref()
    }

    fn root_generator(&self) -> Result<&Generator, Error> {
        self.generator
            .as_ref()
            .ok_or_else(|| Error::configuration("schema operations are only available on the root router"))
    }

    /// Check the declared documentation options for consistency.
    pub fn validate(&self) -> Result<(), Error> {
        self.root_generator()?.validate()
    }

    pub fn generate_openapi_schema(&self, format: SchemaFormat) -> Result<Vec<u8>, Error> {
        self.root_generator()?.generate_schema(format)
    }

    /// Write the document to `path`: JSON for `.json`, YAML otherwise.
    pub fn write_schema_to(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        self.root_generator()?.write_schema_to(path)
    }

    /// Every (method, path) pair registered on the axum side, documentation
    /// routes included.
    pub fn live_routes(&self) -> Vec<(Method, String)> {
        self.live.registered()
    }

    /// Assemble the axum router. Call once, on the root, after registration.
    pub fn into_router(self) -> axum::Router<S> {
        self.live.build()
    }
}
