use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use routedoc::SchemaFormat;
use serde_json::{json, Value};
use tower::ServiceExt;

fn document() -> Value {
    let app = example_auth::app();
    let bytes = app.generate_openapi_schema(SchemaFormat::Json).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn resolve<'a>(doc: &'a Value, schema: &'a Value) -> &'a Value {
    match schema["$ref"].as_str() {
        Some(r) => &doc["components"]["schemas"][r.trim_start_matches("#/components/schemas/")],
        None => schema,
    }
}

#[test]
fn configuration_is_valid() {
    assert!(example_auth::app().validate().is_ok());
}

#[test]
fn login_is_documented() {
    let doc = document();
    let op = &doc["paths"]["/api/v1/auth/login"]["post"];
    assert_eq!(op["summary"], "User Login");
    assert_eq!(op["tags"], json!(["Authentication"]));

    let request = resolve(&doc, &op["requestBody"]["content"]["application/json"]["schema"]);
    assert_eq!(request["required"], json!(["username", "password"]));

    let ok = resolve(&doc, &op["responses"]["200"]["content"]["application/json"]["schema"]);
    let token = resolve(&doc, &ok["properties"]["data"]);
    assert_eq!(token["properties"]["access_token"]["type"], "string");
    assert_eq!(token["properties"]["refresh_token"]["type"], "string");

    assert!(op["responses"]["400"].is_object());
    assert!(op["responses"]["422"].is_object());
    assert!(op.get("security").is_none());
}

#[test]
fn secured_routes_carry_requirements() {
    let doc = document();
    let me = &doc["paths"]["/api/v1/auth/me"]["get"];
    assert_eq!(me["tags"], json!(["Authentication", "Profile"]));
    assert_eq!(me["security"], json!([{ "bearerAuth": [] }]));

    let update = &doc["paths"]["/api/v1/profile/update"]["put"];
    assert_eq!(update["tags"], json!(["Profile"]));
    assert_eq!(update["security"], json!([{ "bearerAuth": [] }]));

    assert_eq!(
        doc["components"]["securitySchemes"]["bearerAuth"]["bearerFormat"],
        "JWT"
    );
}

#[tokio::test]
async fn login_endpoint_answers() {
    let router = example_auth::app().into_router();
    let request = Request::post("/api/v1/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"username":"alice","password":"pw"}"#))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["data"]["access_token"], "access-alice");
}

#[tokio::test]
async fn docs_are_served() {
    let router = example_auth::app().into_router();
    let response = router
        .oneshot(Request::get("/docs/openapi.yaml").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let doc: Value = serde_yaml::from_slice(&bytes).unwrap();
    assert_eq!(doc["info"]["title"], "My API");
    assert_eq!(doc["servers"][0]["url"], "http://localhost:3000");
}
