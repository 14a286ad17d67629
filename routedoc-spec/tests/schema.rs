use routedoc_spec::option;
use routedoc_spec::{Config, Error, SchemaRegistry, TypeBinding};
use schemars::JsonSchema;
use serde_json::json;

#[allow(dead_code)]
#[derive(JsonSchema)]
struct Owner {
    name: String,
}

#[allow(dead_code)]
#[derive(JsonSchema)]
struct Pet {
    id: i64,
    owner: Owner,
    nickname: Option<String>,
}

mod other {
    #[allow(dead_code)]
    #[derive(schemars::JsonSchema)]
    pub struct Owner {
        pub id: u32,
    }
}

fn registry() -> SchemaRegistry {
    SchemaRegistry::new(&Config::default().reflector)
}

#[test]
fn named_type_is_referenced() {
    let mut registry = registry();
    let schema = registry.schema_for(&TypeBinding::of::<Pet>()).unwrap();
    assert_eq!(schema, json!({ "$ref": "#/components/schemas/Pet" }));
    assert!(registry.contains("Pet"));
    assert!(registry.contains("Owner"));

    let schemas = registry.into_schemas().unwrap();
    assert_eq!(
        schemas["Pet"]["properties"]["owner"]["$ref"],
        "#/components/schemas/Owner"
    );
    assert!(schemas["Pet"].get("$defs").is_none());
}

#[test]
fn primitives_stay_inline() {
    let mut registry = registry();
    let schema = registry.schema_for(&TypeBinding::of::<String>()).unwrap();
    assert_eq!(schema["type"], "string");
    assert!(registry.into_schemas().unwrap().is_empty());
}

#[test]
fn same_type_registered_once() {
    let mut registry = registry();
    registry.schema_for(&TypeBinding::of::<Pet>()).unwrap();
    registry.schema_for(&TypeBinding::of::<Pet>()).unwrap();
    registry.schema_for(&TypeBinding::of::<Vec<Pet>>()).unwrap();
    assert_eq!(registry.into_schemas().unwrap().len(), 2);
}

#[test]
fn same_named_types_get_distinct_components() {
    let mut registry = registry();
    let first = registry.schema_for(&TypeBinding::of::<Owner>()).unwrap();
    let second = registry.schema_for(&TypeBinding::of::<other::Owner>()).unwrap();
    assert_eq!(first, json!({ "$ref": "#/components/schemas/Owner" }));
    assert_eq!(second, json!({ "$ref": "#/components/schemas/Owner2" }));

    let schemas = registry.into_schemas().unwrap();
    assert_eq!(schemas["Owner"]["properties"]["name"]["type"], "string");
    assert_eq!(schemas["Owner2"]["properties"]["id"]["type"], "integer");
}

#[test]
fn registration_clashing_with_reflected_type_fails() {
    let mut registry = registry();
    registry.schema_for(&TypeBinding::of::<Owner>()).unwrap();
    registry.register("Owner", json!({ "type": "string" })).unwrap();
    match registry.into_schemas().unwrap_err() {
        Error::Serialization(message) => assert!(message.contains("`Owner`")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn explicit_register_conflict() {
    let mut registry = registry();
    registry.register("Thing", json!({ "type": "string" })).unwrap();
    registry.register("Thing", json!({ "type": "string" })).unwrap();
    assert!(registry.register("Thing", json!({ "type": "integer" })).is_err());
}

#[test]
fn required_follows_reflector_settings() {
    let mut registry = registry();
    let schema = registry.inline_schema_for(&TypeBinding::of::<Pet>()).unwrap();
    assert_eq!(schema["required"], json!(["id", "owner"]));

    let config = Config::from_options([option::with_reflector_config([
        option::no_required_fields(),
    ])]);
    let mut registry = SchemaRegistry::new(&config.reflector);
    let schema = registry.inline_schema_for(&TypeBinding::of::<Pet>()).unwrap();
    assert!(schema.get("required").is_none());
    assert!(registry.into_schemas().unwrap()["Owner"].get("required").is_none());
}
