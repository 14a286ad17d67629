use axum::response::{Html, IntoResponse, Response};
use http::StatusCode;
use routedoc_spec::{Generator, SchemaFormat};
use serde_json::json;

use crate::path::join_path;

/// File name of the raw document, relative to the docs path.
pub const OPENAPI_FILE_NAME: &str = "openapi.yaml";

/// Serves the documentation page and the raw YAML document of a generator.
#[derive(Clone)]
pub struct OpenApiHandler {
    generator: Generator,
}

impl OpenApiHandler {
    pub fn new(generator: Generator) -> Self {
        Self { generator }
    }

    /// URL of the raw document, e.g. `/docs/openapi.yaml`.
    pub fn schema_url(&self) -> String {
        join_path(&self.generator.config().docs_path, OPENAPI_FILE_NAME)
    }

    /// Swagger UI page pointing at [`schema_url`](Self::schema_url).
    pub fn docs(&self) -> Response {
        let config = self.generator.config();
        let mut ui = match serde_json::to_value(&config.swagger_config) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };
        ui.insert("url".into(), json!(self.schema_url()));
        ui.insert("dom_id".into(), json!("#swagger-ui"));

        // Keep `</script>` in string values from closing the inline script.
        let ui = serde_json::Value::Object(ui).to_string().replace("</", "<\\/");
        let title = html_escape::encode_text(&config.title);

        Html(
            SWAGGER_UI_HTML
                .replace("{{title}}", &title)
                .replace("{{config}}", &ui),
        )
        .into_response()
    }

    /// The document as YAML, regenerated on every request.
    pub fn openapi_yaml(&self) -> Response {
        match self.generator.generate_schema(SchemaFormat::Yaml) {
            Ok(bytes) => (
                [("content-type", SchemaFormat::Yaml.content_type())],
                bytes,
            )
                .into_response(),
            Err(err) => {
                tracing::error!(error = %err, "failed to generate OpenAPI document");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    axum::Json(json!({ "error": err.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{title}}</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <style>
        html { box-sizing: border-box; overflow-y: scroll; }
        *, *:before, *:after { box-sizing: inherit; }
        body { margin: 0; background: #fafafa; }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = function() {
            const config = {{config}};
            window.ui = SwaggerUIBundle(Object.assign(config, {
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                plugins: [
                    SwaggerUIBundle.plugins.DownloadUrl
                ],
                layout: "StandaloneLayout"
            }));
        };
    </script>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use routedoc_spec::option;

    #[test]
    fn schema_url_follows_docs_path() {
        let handler = OpenApiHandler::new(Generator::new([option::with_docs_path("/reference/")]));
        assert_eq!(handler.schema_url(), "/reference/openapi.yaml");
    }
}
