use http::StatusCode;
use serde_json::{json, Map, Value};

use crate::config::Config;
use crate::error::Error;
use crate::meta::{OperationConfig, ParamLocation};
use crate::path::placeholders;
use crate::router::Operation;
use crate::schema::SchemaRegistry;

/// Build an OpenAPI 3.1 document from the configuration and the recorded operations.
///
/// Hidden operations are skipped. Component schemas are collected from the
/// bound request, response and parameter types.
pub fn build_document(config: &Config, operations: &[Operation]) -> Result<Value, Error> {
    let mut registry = SchemaRegistry::new(&config.reflector);
    let mut paths: Map<String, Value> = Map::new();

    for op in operations.iter().filter(|op| !op.config.hidden) {
        let operation = build_operation(&mut registry, &op.path, &op.config)?;
        let path_entry = paths
            .entry(op.path.clone())
            .or_insert_with(|| json!({}));

        if let Some(obj) = path_entry.as_object_mut() {
            obj.insert(op.method.as_str().to_lowercase(), operation);
        }
    }

    let mut info: Map<String, Value> = Map::new();
    info.insert("title".into(), json!(config.title));
    info.insert("version".into(), json!(config.version));
    if let Some(ref desc) = config.description {
        info.insert("description".into(), json!(desc));
    }

    let mut document: Map<String, Value> = Map::new();
    document.insert("openapi".into(), json!(config.openapi_version));
    document.insert("info".into(), Value::Object(info));
    if !config.servers.is_empty() {
        document.insert("servers".into(), serde_json::to_value(&config.servers)?);
    }
    document.insert("paths".into(), Value::Object(paths));

    let schemas = registry.into_schemas()?;
    let mut components: Map<String, Value> = Map::new();
    if !schemas.is_empty() {
        components.insert("schemas".into(), Value::Object(schemas));
    }
    if !config.security_schemes.is_empty() {
        components.insert(
            "securitySchemes".into(),
            serde_json::to_value(&config.security_schemes)?,
        );
    }
    if !components.is_empty() {
        document.insert("components".into(), Value::Object(components));
    }

    Ok(Value::Object(document))
}

fn build_operation(
    registry: &mut SchemaRegistry,
    path: &str,
    op: &OperationConfig,
) -> Result<Value, Error> {
    let mut operation: Map<String, Value> = Map::new();

    if !op.tags.is_empty() {
        operation.insert("tags".into(), json!(op.tags));
    }
    if let Some(ref summary) = op.summary {
        operation.insert("summary".into(), json!(summary));
    }
    if let Some(ref description) = op.description {
        operation.insert("description".into(), json!(description));
    }
    if let Some(ref id) = op.operation_id {
        operation.insert("operationId".into(), json!(id));
    }

    // Parameters: every placeholder is documented, typed ones use their binding.
    let mut params: Vec<Value> = Vec::new();
    for name in placeholders(path) {
        let declared = op
            .params
            .iter()
            .find(|p| p.location == ParamLocation::Path && p.name == name);
        let schema = match declared {
            Some(p) => registry.inline_schema_for(&p.schema)?,
            None => json!({ "type": "string" }),
        };
        params.push(json!({
            "name": name,
            "in": "path",
            "required": true,
            "schema": schema
        }));
    }
    for p in op.params.iter().filter(|p| p.location != ParamLocation::Path) {
        params.push(json!({
            "name": p.name,
            "in": p.location.as_str(),
            "required": p.required,
            "schema": registry.inline_schema_for(&p.schema)?
        }));
    }
    if !params.is_empty() {
        operation.insert("parameters".into(), json!(params));
    }

    if let Some(ref request) = op.request {
        let mut content: Map<String, Value> = Map::new();
        content.insert(
            request.content_type.clone(),
            json!({ "schema": registry.schema_for(&request.body)? }),
        );
        operation.insert(
            "requestBody".into(),
            json!({ "required": true, "content": content }),
        );
    }

    let mut responses: Map<String, Value> = Map::new();
    for (status, response) in &op.responses {
        let description = response
            .description
            .clone()
            .unwrap_or_else(|| status_description(*status));
        let mut entry: Map<String, Value> = Map::new();
        entry.insert("description".into(), json!(description));
        if let Some(ref body) = response.body {
            entry.insert(
                "content".into(),
                json!({ "application/json": { "schema": registry.schema_for(body)? } }),
            );
        }
        responses.insert(status.to_string(), Value::Object(entry));
    }
    if responses.is_empty() {
        responses.insert("200".into(), json!({ "description": "OK" }));
    }
    operation.insert("responses".into(), Value::Object(responses));

    if op.deprecated {
        operation.insert("deprecated".into(), json!(true));
    }

    if !op.security.is_empty() {
        let requirements: Vec<Value> = op
            .security
            .iter()
            .map(|req| {
                let mut requirement = Map::new();
                requirement.insert(req.name.clone(), json!(req.scopes));
                Value::Object(requirement)
            })
            .collect();
        operation.insert("security".into(), json!(requirements));
    }

    Ok(Value::Object(operation))
}

fn status_description(status: u16) -> String {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Response")
        .to_string()
}
