use std::collections::BTreeMap;
use std::fmt;

use schemars::generate::SchemaGenerator;
use schemars::{JsonSchema, Schema};

/// A Rust type bound to a request body, response body or parameter.
///
/// Reflection is deferred until the document is generated. Every binding of
/// one document goes through the same generator, so two types that share a
/// schema name still get distinct components.
#[derive(Clone)]
pub struct TypeBinding {
    name: String,
    inline: bool,
    subschema: fn(&mut SchemaGenerator) -> Schema,
    schema: fn(&mut SchemaGenerator) -> Schema,
}

impl fmt::Debug for TypeBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeBinding")
            .field("name", &self.name)
            .field("inline", &self.inline)
            .finish()
    }
}

impl TypeBinding {
    pub fn of<T: JsonSchema>() -> Self {
        Self {
            name: T::schema_name().into_owned(),
            inline: T::inline_schema(),
            subschema: subschema_for::<T>,
            schema: schema_for::<T>,
        }
    }

    /// The schema name of the type. Type mappings are keyed by it.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the type is rendered in place rather than as a component
    /// (primitives, collections).
    pub fn is_inline(&self) -> bool {
        self.inline
    }

    /// A `$ref` for named types, registering the definition with `generator`.
    pub(crate) fn subschema(&self, generator: &mut SchemaGenerator) -> Schema {
        (self.subschema)(generator)
    }

    /// The type's own schema, never a reference to it.
    pub(crate) fn schema(&self, generator: &mut SchemaGenerator) -> Schema {
        (self.schema)(generator)
    }
}

fn subschema_for<T: JsonSchema>(generator: &mut SchemaGenerator) -> Schema {
    generator.subschema_for::<T>()
}

fn schema_for<T: JsonSchema>(generator: &mut SchemaGenerator) -> Schema {
    T::json_schema(generator)
}

/// Where a parameter is located in the HTTP request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    Path,
    Query,
    Header,
}

impl ParamLocation {
    pub fn as_str(self) -> &'static str {
        match self {
            ParamLocation::Path => "path",
            ParamLocation::Query => "query",
            ParamLocation::Header => "header",
        }
    }
}

/// An explicitly declared operation parameter.
#[derive(Debug, Clone)]
pub struct ParamInfo {
    pub name: String,
    pub location: ParamLocation,
    pub required: bool,
    pub schema: TypeBinding,
}

/// Media type of request bodies bound without an explicit one.
pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone)]
pub struct RequestInfo {
    pub content_type: String,
    pub body: TypeBinding,
}

#[derive(Debug, Clone, Default)]
pub struct ResponseInfo {
    pub description: Option<String>,
    pub body: Option<TypeBinding>,
}

/// A reference to a declared security scheme, with the scopes it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityRequirement {
    pub name: String,
    pub scopes: Vec<String>,
}

impl SecurityRequirement {
    pub fn new<I, S>(name: impl Into<String>, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            scopes: scopes.into_iter().map(Into::into).collect(),
        }
    }
}

/// Documentation metadata shared by every route registered under a group.
#[derive(Debug, Clone, Default)]
pub struct GroupConfig {
    pub tags: Vec<String>,
    pub security: Vec<SecurityRequirement>,
    pub hidden: bool,
    pub deprecated: bool,
}

/// Documentation metadata of a single operation.
#[derive(Debug, Clone, Default)]
pub struct OperationConfig {
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub security: Vec<SecurityRequirement>,
    pub request: Option<RequestInfo>,
    pub responses: BTreeMap<u16, ResponseInfo>,
    pub params: Vec<ParamInfo>,
    pub hidden: bool,
    pub deprecated: bool,
}

impl OperationConfig {
    /// Seed an operation with the effective metadata of its enclosing groups.
    pub(crate) fn inherit(group: &GroupConfig) -> Self {
        Self {
            tags: group.tags.clone(),
            security: group.security.clone(),
            hidden: group.hidden,
            deprecated: group.deprecated,
            ..Self::default()
        }
    }

    pub(crate) fn add_tag(&mut self, tag: String) {
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }
}

impl GroupConfig {
    /// Fold a descendant's settings into the accumulated ancestor settings.
    pub(crate) fn merge_from(&mut self, child: &GroupConfig) {
        for tag in &child.tags {
            if !self.tags.contains(tag) {
                self.tags.push(tag.clone());
            }
        }
        self.security.extend(child.security.iter().cloned());
        self.hidden |= child.hidden;
        self.deprecated |= child.deprecated;
    }
}
