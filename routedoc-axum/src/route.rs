use http::Method;
use routedoc_spec::{Operation, RouteOption, SpecRoute};

/// Handle returned by every verb registration.
///
/// The handler itself already lives in the axum router; the handle only
/// carries the documentation side.
#[derive(Clone)]
pub struct Route {
    method: Method,
    path: String,
    spec: SpecRoute,
}

impl Route {
    pub(crate) fn new(method: Method, path: String, spec: SpecRoute) -> Self {
        Self { method, path, spec }
    }

    /// Attach documentation metadata to the route.
    pub fn with(&self, opts: impl IntoIterator<Item = RouteOption>) -> &Self {
        self.spec.with(opts);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Full path, with `{name}` placeholders.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn operation(&self) -> Option<Operation> {
        self.spec.operation()
    }
}
