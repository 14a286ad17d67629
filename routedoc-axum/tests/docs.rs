use axum::body::Body;
use http::{Method, StatusCode};
use http_body_util::BodyExt;
use routedoc_axum::option;
use routedoc_axum::Router;
use routedoc_spec::SwaggerConfig;
use serde_json::Value;
use tower::ServiceExt;

async fn ok() -> &'static str {
    "ok"
}

struct Reply {
    status: StatusCode,
    content_type: Option<String>,
    body: String,
}

async fn get(app: Router, uri: &str) -> Reply {
    let request = http::Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.into_router().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    Reply {
        status,
        content_type,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

#[tokio::test]
async fn docs_page_is_html() {
    let app: Router = Router::new([option::with_title("Pet <Store>")]);
    app.get("/pets", ok);

    let reply = get(app, "/docs").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.content_type.unwrap().starts_with("text/html"));
    assert!(reply.body.contains("SwaggerUIBundle"));
    assert!(reply.body.contains(r#""url":"/docs/openapi.yaml""#));
    assert!(reply.body.contains("<title>Pet &lt;Store&gt;</title>"));
}

#[tokio::test]
async fn docs_page_embeds_ui_config() {
    let app: Router = Router::new([option::with_swagger_config(SwaggerConfig {
        deep_linking: Some(true),
        doc_expansion: Some("none".to_string()),
        ..SwaggerConfig::default()
    })]);

    let reply = get(app, "/docs").await;
    assert!(reply.body.contains(r#""deepLinking":true"#));
    assert!(reply.body.contains(r#""docExpansion":"none""#));
}

#[tokio::test]
async fn raw_document_is_yaml() {
    let app: Router = Router::new([option::with_title("Pets"), option::with_version("3.0.0")]);
    app.get("/pets/:id", ok);

    let reply = get(app, "/docs/openapi.yaml").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.content_type.as_deref(), Some("application/yaml"));

    let doc: Value = serde_yaml::from_str(&reply.body).unwrap();
    assert_eq!(doc["openapi"], "3.1.0");
    assert_eq!(doc["info"]["title"], "Pets");
    assert_eq!(doc["info"]["version"], "3.0.0");
    assert!(doc["paths"]["/pets/{id}"]["get"].is_object());
    assert!(doc["paths"].get("/docs").is_none());
}

#[tokio::test]
async fn custom_docs_path() {
    let app: Router = Router::new([option::with_docs_path("/reference")]);
    let paths: Vec<String> = app.live_routes().into_iter().map(|(_, p)| p).collect();
    assert_eq!(paths, vec!["/reference", "/reference/openapi.yaml"]);

    let reply = get(app.clone(), "/reference/openapi.yaml").await;
    assert_eq!(reply.status, StatusCode::OK);
}

#[tokio::test]
async fn disabled_openapi_adds_no_routes() {
    let app: Router = Router::new([option::with_disable_openapi(true)]);
    assert!(app.live_routes().is_empty());

    app.get("/pets", ok);
    assert_eq!(get(app.clone(), "/docs").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn disabled_router_still_serves_routes() {
    let app: Router = Router::new([option::with_disable_openapi(true)]);
    app.get("/pets", ok);

    let reply = get(app, "/pets").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, "ok");
}

#[tokio::test]
async fn invalid_configuration_is_a_500() {
    let app: Router = Router::new([]);
    app.get("/me", ok)
        .with([option::security("bearerAuth", Vec::<String>::new())]);

    let reply = get(app, "/docs/openapi.yaml").await;
    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_str(&reply.body).unwrap();
    assert!(body["error"].as_str().unwrap().contains("bearerAuth"));
}
