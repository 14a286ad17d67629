use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use http::Method;

use crate::config::Config;
use crate::meta::{GroupConfig, OperationConfig};
use crate::option::{GroupOption, RouteOption};
use crate::path::{join_path, openapi_path};

/// A documented operation: method, OpenAPI path template and metadata.
#[derive(Debug, Clone)]
pub struct Operation {
    pub method: Method,
    pub path: String,
    pub config: OperationConfig,
}

/// A route group in the spec tree. Settings are read when a route is
/// registered, so they only reach routes added after they were applied.
pub(crate) struct GroupNode {
    pub(crate) prefix: String,
    parent: Option<Arc<GroupNode>>,
    pub(crate) config: RwLock<GroupConfig>,
}

impl GroupNode {
    /// Effective settings: root first, then each descendant down to `self`.
    fn effective(&self) -> GroupConfig {
        let mut chain = vec![self];
        let mut current = self;
        while let Some(parent) = current.parent.as_deref() {
            chain.push(parent);
            current = parent;
        }
        let mut merged = GroupConfig::default();
        for node in chain.into_iter().rev() {
            merged.merge_from(&node.config.read().unwrap_or_else(PoisonError::into_inner));
        }
        merged
    }
}

/// Shared table behind every spec router and route handle of one generator.
#[derive(Default)]
pub(crate) struct Registry {
    pub(crate) operations: Vec<Operation>,
    pub(crate) groups: Vec<Arc<GroupNode>>,
}

pub(crate) type SharedRegistry = Arc<RwLock<Registry>>;

pub(crate) fn read(registry: &SharedRegistry) -> RwLockReadGuard<'_, Registry> {
    registry.read().unwrap_or_else(PoisonError::into_inner)
}

fn write(registry: &SharedRegistry) -> RwLockWriteGuard<'_, Registry> {
    registry.write().unwrap_or_else(PoisonError::into_inner)
}

/// Accumulates route metadata destined for the OpenAPI document.
///
/// Cloning is cheap; clones share the same node.
#[derive(Clone)]
pub struct SpecRouter {
    config: Arc<Config>,
    registry: SharedRegistry,
    node: Arc<GroupNode>,
}

impl SpecRouter {
    pub(crate) fn root(config: Arc<Config>, registry: SharedRegistry) -> Self {
        let node = Arc::new(GroupNode {
            prefix: String::new(),
            parent: None,
            config: RwLock::new(GroupConfig::default()),
        });
        write(&registry).groups.push(node.clone());
        Self {
            config,
            registry,
            node,
        }
    }

    /// The full prefix of this router.
    pub fn prefix(&self) -> &str {
        &self.node.prefix
    }

    /// Record an operation. `path` must already use `{name}` placeholders.
    pub fn add(&self, method: Method, path: &str) -> SpecRoute {
        let path = openapi_path(&join_path(&self.node.prefix, path));
        let config = OperationConfig::inherit(&self.node.effective());
        self.config
            .debug_log(|| format!("registered operation {method} {path}"));

        let mut registry = write(&self.registry);
        registry.operations.push(Operation {
            method,
            path,
            config,
        });
        SpecRoute {
            registry: self.registry.clone(),
            index: registry.operations.len() - 1,
        }
    }

    /// Create a sub-router whose routes live under `prefix`.
    pub fn group(&self, prefix: &str) -> SpecRouter {
        let node = Arc::new(GroupNode {
            prefix: join_path(&self.node.prefix, prefix),
            parent: Some(self.node.clone()),
            config: RwLock::new(GroupConfig::default()),
        });
        write(&self.registry).groups.push(node.clone());
        Self {
            config: self.config.clone(),
            registry: self.registry.clone(),
            node,
        }
    }

    /// Apply group options to routes registered from now on.
    pub fn with(&self, opts: impl IntoIterator<Item = GroupOption>) -> &Self {
        let mut config = self.node.config.write().unwrap_or_else(PoisonError::into_inner);
        for opt in opts {
            opt.apply(&mut config);
        }
        self
    }
}

/// Handle to one recorded operation.
#[derive(Clone)]
pub struct SpecRoute {
    registry: SharedRegistry,
    index: usize,
}

impl SpecRoute {
    /// Apply route options to the recorded operation.
    pub fn with(&self, opts: impl IntoIterator<Item = RouteOption>) -> &Self {
        let mut registry = write(&self.registry);
        if let Some(operation) = registry.operations.get_mut(self.index) {
            for opt in opts {
                opt.apply(&mut operation.config);
            }
        }
        self
    }

    /// A snapshot of the recorded operation.
    pub fn operation(&self) -> Option<Operation> {
        read(&self.registry).operations.get(self.index).cloned()
    }
}
