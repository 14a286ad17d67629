use std::collections::BTreeMap;
use std::convert::Infallible;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{Request, State};
use axum::handler::Handler;
use axum::response::{IntoResponse, Response};
use axum::routing::{on, MethodFilter, MethodRouter};
use http::{Method, StatusCode};
use tower_http::services::{ServeDir, ServeFile};

use crate::path::join_path;

/// Deferred transformation of an assembled axum router.
pub(crate) type LayerFn<S> = Box<dyn FnOnce(axum::Router<S>) -> axum::Router<S> + Send>;

type ResponseFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// A handler for a method axum's `MethodFilter` does not cover.
type ExtensionHandler<S> = Arc<dyn Fn(Request, S) -> ResponseFuture + Send + Sync>;

/// Options for [`Router::static_files_with`](crate::Router::static_files_with).
#[derive(Debug, Clone)]
pub struct StaticConfig {
    /// Serve `index.html` for directory requests.
    pub index: bool,
    /// Prefer `<file>.gz` when the client accepts gzip.
    pub precompressed_gzip: bool,
    /// Prefer `<file>.br` when the client accepts brotli.
    pub precompressed_br: bool,
    /// File served with `404 Not Found` when nothing matches.
    pub not_found: Option<PathBuf>,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            index: true,
            precompressed_gzip: false,
            precompressed_br: false,
            not_found: None,
        }
    }
}

impl StaticConfig {
    fn serve_dir(&self, root: PathBuf) -> ServeDir {
        let mut dir = ServeDir::new(root).append_index_html_on_directories(self.index);
        if self.precompressed_gzip {
            dir = dir.precompressed_gzip();
        }
        if self.precompressed_br {
            dir = dir.precompressed_br();
        }
        dir
    }
}

struct LiveNode<S> {
    base: Option<axum::Router<S>>,
    routes: Vec<(String, MethodRouter<S>)>,
    extensions: Vec<(String, Method, ExtensionHandler<S>)>,
    mounts: Vec<LayerFn<S>>,
    layers: Vec<LayerFn<S>>,
    children: Vec<Arc<Mutex<LiveNode<S>>>>,
}

impl<S> LiveNode<S> {
    fn empty() -> Self {
        Self {
            base: None,
            routes: Vec::new(),
            extensions: Vec::new(),
            mounts: Vec::new(),
            layers: Vec::new(),
            children: Vec::new(),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One node of the axum-side routing tree.
///
/// Routes are stored under their full path. Each node becomes its own axum
/// router on assembly so its layers only wrap its own routes and those of its
/// descendants.
pub(crate) struct LiveRouter<S> {
    prefix: String,
    node: Arc<Mutex<LiveNode<S>>>,
    registered: Arc<Mutex<Vec<(Method, String)>>>,
}

impl<S> Clone for LiveRouter<S> {
    fn clone(&self) -> Self {
        Self {
            prefix: self.prefix.clone(),
            node: self.node.clone(),
            registered: self.registered.clone(),
        }
    }
}

impl<S> LiveRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub(crate) fn new(base: Option<axum::Router<S>>) -> Self {
        let mut node = LiveNode::empty();
        node.base = base;
        Self {
            prefix: String::new(),
            node: Arc::new(Mutex::new(node)),
            registered: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Register `handler` for `method` at `path` below this node's prefix.
    /// Returns the full path.
    pub(crate) fn add<H, T>(&self, method: Method, path: &str, handler: H) -> String
    where
        H: Handler<T, S>,
        T: 'static,
    {
        let full = join_path(&self.prefix, path);
        match MethodFilter::try_from(method.clone()) {
            Ok(filter) => lock(&self.node).routes.push((full.clone(), on(filter, handler))),
            Err(_) => lock(&self.node).extensions.push((
                full.clone(),
                method.clone(),
                extension_handler(handler),
            )),
        }
        lock(&self.registered).push((method, full.clone()));
        full
    }

    pub(crate) fn group(&self, prefix: &str) -> Self {
        let node = Arc::new(Mutex::new(LiveNode::empty()));
        lock(&self.node).children.push(node.clone());
        Self {
            prefix: join_path(&self.prefix, prefix),
            node,
            registered: self.registered.clone(),
        }
    }

    pub(crate) fn push_layer(&self, layer: LayerFn<S>) {
        lock(&self.node).layers.push(layer);
    }

    pub(crate) fn static_files(&self, prefix: &str, root: PathBuf, config: &StaticConfig) {
        let full = join_path(&self.prefix, prefix);
        let dir = config.serve_dir(root);
        let mount: LayerFn<S> = match config.not_found.clone() {
            Some(page) => {
                let service = dir.not_found_service(ServeFile::new(page));
                Box::new(move |router: axum::Router<S>| mount_service(router, &full, service))
            }
            None => Box::new(move |router: axum::Router<S>| mount_service(router, &full, dir)),
        };
        lock(&self.node).mounts.push(mount);
    }

    /// Every (method, path) pair registered on the live side, in order.
    pub(crate) fn registered(&self) -> Vec<(Method, String)> {
        lock(&self.registered).clone()
    }

    /// Assemble the axum router for this node and its descendants.
    ///
    /// The node is drained; a second call yields an empty router.
    pub(crate) fn build(&self) -> axum::Router<S> {
        build_node(&self.node)
    }
}

fn build_node<S>(node: &Mutex<LiveNode<S>>) -> axum::Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let node = std::mem::replace(&mut *lock(node), LiveNode::empty());

    let mut router = node.base.unwrap_or_default();
    for (path, method_router) in node.routes {
        router = router.route(&path, method_router);
    }
    for (path, handlers) in group_extensions(node.extensions) {
        router = router.route(&path, MethodRouter::new().fallback(dispatch(handlers)));
    }
    for mount in node.mounts {
        router = mount(router);
    }
    for child in &node.children {
        router = router.merge(build_node(child));
    }
    for layer in node.layers {
        router = layer(router);
    }
    router
}

fn mount_service<S, T>(router: axum::Router<S>, path: &str, service: T) -> axum::Router<S>
where
    S: Clone + Send + Sync + 'static,
    T: tower::Service<Request, Error = Infallible> + Clone + Send + Sync + 'static,
    T::Response: IntoResponse,
    T::Future: Send + 'static,
{
    if path == "/" {
        router.fallback_service(service)
    } else {
        router.nest_service(path, service)
    }
}

fn extension_handler<S, H, T>(handler: H) -> ExtensionHandler<S>
where
    S: Clone + Send + Sync + 'static,
    H: Handler<T, S>,
    T: 'static,
{
    Arc::new(move |req: Request, state: S| -> ResponseFuture {
        Box::pin(handler.clone().call(req, state))
    })
}

fn group_extensions<S>(
    extensions: Vec<(String, Method, ExtensionHandler<S>)>,
) -> BTreeMap<String, Vec<(Method, ExtensionHandler<S>)>> {
    let mut by_path: BTreeMap<String, Vec<(Method, ExtensionHandler<S>)>> = BTreeMap::new();
    for (path, method, handler) in extensions {
        by_path.entry(path).or_default().push((method, handler));
    }
    by_path
}

/// axum only knows the standard verbs. Extension methods of one path share a
/// single fallback that dispatches on the method and rejects the rest.
fn dispatch<S>(
    handlers: Vec<(Method, ExtensionHandler<S>)>,
) -> impl Fn(State<S>, Request) -> ResponseFuture + Clone + Send + Sync + 'static
where
    S: Clone + Send + Sync + 'static,
{
    let handlers = Arc::new(handlers);
    move |State(state): State<S>, req: Request| -> ResponseFuture {
        let handler = handlers
            .iter()
            .find(|(method, _)| method == req.method())
            .map(|(_, handler)| handler.clone());
        match handler {
            Some(handler) => handler(req, state),
            None => Box::pin(async { StatusCode::METHOD_NOT_ALLOWED.into_response() }),
        }
    }
}
