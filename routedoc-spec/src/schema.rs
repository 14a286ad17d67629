use schemars::generate::{SchemaGenerator, SchemaSettings};
use schemars::Schema;
use serde_json::{json, Map, Value};

use crate::config::{ReflectorConfig, RequiredFields};
use crate::error::Error;
use crate::meta::TypeBinding;

/// Recursively rewrite `$ref` paths from schemars format to OpenAPI components format.
///
/// schemars 1.x generates JSON Schema Draft 2020-12 using `$defs` and
/// `$ref: "#/$defs/X"`. OpenAPI 3.1.0 expects schemas under `#/components/schemas/X`.
fn sanitize_schema(value: &mut Value) {
    match value {
        Value::Object(obj) => {
            if let Some(Value::String(ref_str)) = obj.get_mut("$ref") {
                if ref_str.starts_with("#/$defs/") {
                    *ref_str = ref_str.replace("#/$defs/", "#/components/schemas/");
                }
            }

            for (_, v) in obj.iter_mut() {
                sanitize_schema(v);
            }
        }
        Value::Array(arr) => {
            for v in arr.iter_mut() {
                sanitize_schema(v);
            }
        }
        _ => {}
    }
}

/// Remove every `required` list. Properties that happen to be named
/// `required` hold objects, not arrays, and are left alone.
fn strip_required(value: &mut Value) {
    match value {
        Value::Object(obj) => {
            if matches!(obj.get("required"), Some(Value::Array(_))) {
                obj.remove("required");
            }
            for (_, v) in obj.iter_mut() {
                strip_required(v);
            }
        }
        Value::Array(arr) => {
            for v in arr.iter_mut() {
                strip_required(v);
            }
        }
        _ => {}
    }
}

/// Collects the component schemas referenced by a document.
///
/// Every bound type is reflected through one schemars generator. Types that
/// share a schema name but differ in identity (two instantiations of a
/// generic envelope, same-named types in different modules) get distinct
/// components, `Response` and `Response2`. Explicit registrations under a
/// name already holding a different schema are rejected.
pub struct SchemaRegistry {
    generator: SchemaGenerator,
    inline_refs: bool,
    required_fields: RequiredFields,
    type_mappings: Map<String, Value>,
    schemas: Map<String, Value>,
}

impl SchemaRegistry {
    pub fn new(reflector: &ReflectorConfig) -> Self {
        let mut settings = SchemaSettings::draft2020_12();
        settings.inline_subschemas = reflector.inline_refs;
        Self {
            generator: settings.into_generator(),
            inline_refs: reflector.inline_refs,
            required_fields: reflector.required_fields,
            type_mappings: reflector
                .type_mappings
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            schemas: Map::new(),
        }
    }

    /// Register a schema definition under the given name.
    ///
    /// Registering an identical schema twice is a no-op.
    pub fn register(&mut self, name: &str, schema: Value) -> Result<(), Error> {
        insert_component(&mut self.schemas, name, schema)
    }

    /// Check if a schema is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name) || self.generator.definitions().contains_key(name)
    }

    /// Schema to embed where `binding` is used: a `$ref` to a component for
    /// named types, the schema itself for inline types.
    pub fn schema_for(&mut self, binding: &TypeBinding) -> Result<Value, Error> {
        if let Some(mapped) = self.type_mappings.get(binding.name()) {
            if binding.is_inline() || self.inline_refs {
                return Ok(mapped.clone());
            }
            let mapped = mapped.clone();
            self.register(binding.name(), mapped)?;
            return Ok(component_ref(binding.name()));
        }

        let schema = binding.subschema(&mut self.generator);
        self.to_json(binding, &schema)
    }

    /// The inline schema of `binding`; nested named types stay references.
    pub fn inline_schema_for(&mut self, binding: &TypeBinding) -> Result<Value, Error> {
        if let Some(mapped) = self.type_mappings.get(binding.name()) {
            return Ok(mapped.clone());
        }
        let schema = binding.schema(&mut self.generator);
        self.to_json(binding, &schema)
    }

    fn to_json(&self, binding: &TypeBinding, schema: &Schema) -> Result<Value, Error> {
        let mut value = serde_json::to_value(schema).map_err(|e| {
            Error::Serialization(format!("failed to reflect `{}`: {e}", binding.name()))
        })?;
        self.normalize(&mut value);
        Ok(value)
    }

    fn normalize(&self, schema: &mut Value) {
        sanitize_schema(schema);
        if self.required_fields == RequiredFields::None {
            strip_required(schema);
        }
    }

    /// Consume the registry and return the schemas map for embedding
    /// in the OpenAPI spec.
    pub fn into_schemas(self) -> Result<Map<String, Value>, Error> {
        let mut schemas = self.schemas.clone();
        for (name, definition) in self.generator.definitions() {
            let definition = match self.type_mappings.get(name) {
                Some(mapped) => mapped.clone(),
                None => {
                    let mut definition = definition.clone();
                    self.normalize(&mut definition);
                    definition
                }
            };
            insert_component(&mut schemas, name, definition)?;
        }
        Ok(schemas)
    }
}

fn insert_component(schemas: &mut Map<String, Value>, name: &str, schema: Value) -> Result<(), Error> {
    match schemas.get(name) {
        Some(existing) if *existing != schema => Err(Error::Serialization(format!(
            "conflicting definitions for component schema `{name}`"
        ))),
        Some(_) => Ok(()),
        None => {
            schemas.insert(name.to_string(), schema);
            Ok(())
        }
    }
}

fn component_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}
