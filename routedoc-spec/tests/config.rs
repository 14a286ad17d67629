use std::sync::{Arc, Mutex};

use routedoc_spec::option;
use routedoc_spec::{
    Config, Logger, OpenApiSettings, RequiredFields, SecurityScheme, Server, SwaggerConfig,
};

// ── Defaults ────────────────────────────────────────────────────────────────

#[test]
fn config_defaults() {
    let config = Config::from_options([]);
    assert_eq!(config.openapi_version, "3.1.0");
    assert_eq!(config.title, "OpenAPI");
    assert_eq!(config.version, "1.0.0");
    assert!(config.description.is_none());
    assert!(!config.disable_openapi);
    assert_eq!(config.docs_path, "/docs");
    assert_eq!(config.swagger_config, SwaggerConfig::default());
    assert!(config.security_schemes.is_empty());
    assert!(config.servers.is_empty());
    assert_eq!(config.reflector.required_fields, RequiredFields::FromSchema);
    assert!(!config.debug);
}

// ── Ordering ────────────────────────────────────────────────────────────────

#[test]
fn later_option_wins() {
    let config = Config::from_options([
        option::with_title("First"),
        option::with_title("Second"),
    ]);
    assert_eq!(config.title, "Second");
}

#[test]
fn independent_fields_do_not_interact() {
    let config = Config::from_options([
        option::with_title("Pets"),
        option::with_docs_path("/reference"),
        option::with_version("2.0.0"),
    ]);
    assert_eq!(config.title, "Pets");
    assert_eq!(config.docs_path, "/reference");
    assert_eq!(config.version, "2.0.0");
    assert!(config.description.is_none());
}

#[test]
fn disable_can_be_reverted() {
    let config = Config::from_options([
        option::with_disable_openapi(true),
        option::with_disable_openapi(false),
    ]);
    assert!(!config.disable_openapi);
}

#[test]
fn redeclared_security_scheme_replaces_previous() {
    let config = Config::from_options([
        option::with_security("auth", SecurityScheme::basic()),
        option::with_security("auth", SecurityScheme::bearer()),
    ]);
    assert_eq!(config.security_schemes.len(), 1);
    assert_eq!(config.security_schemes["auth"], SecurityScheme::bearer());
}

#[test]
fn servers_accumulate_in_order() {
    let config = Config::from_options([
        option::with_server(Server::new("https://a.example.com")),
        option::with_server(Server::new("https://b.example.com").with_description("B")),
    ]);
    assert_eq!(config.servers.len(), 2);
    assert_eq!(config.servers[0].url, "https://a.example.com");
    assert_eq!(config.servers[1].description.as_deref(), Some("B"));
}

#[test]
fn reflector_options_apply_in_order() {
    let config = Config::from_options([option::with_reflector_config([
        option::no_required_fields(),
        option::required_from_schema(),
        option::inline_refs(),
    ])]);
    assert_eq!(config.reflector.required_fields, RequiredFields::FromSchema);
    assert!(config.reflector.inline_refs);
}

// ── Logger ──────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<String>>>);

impl Logger for Captured {
    fn log(&self, message: &str) {
        self.0.lock().unwrap().push(message.to_string());
    }
}

#[test]
fn debug_log_only_when_enabled() {
    let quiet = Captured::default();
    let config = Config::from_options([option::with_logger(quiet.clone())]);
    config.debug_log(|| "hidden".to_string());
    assert!(quiet.0.lock().unwrap().is_empty());

    let loud = Captured::default();
    let config = Config::from_options([
        option::with_logger(loud.clone()),
        option::with_debug(true),
    ]);
    config.debug_log(|| "shown".to_string());
    assert_eq!(*loud.0.lock().unwrap(), vec!["shown".to_string()]);
}

// ── Declarative settings ────────────────────────────────────────────────────

#[test]
fn settings_match_equivalent_options() {
    let settings = OpenApiSettings::from_yaml_str(
        r#"
openapi:
  title: Pet Store
  version: 1.2.3
  description: Pets
  docs_path: /reference
  servers:
    - url: https://petstore.example.com
      description: Production
"#,
    )
    .unwrap();

    let from_settings = Config::from_options([option::with_settings(settings)]);
    let from_options = Config::from_options([
        option::with_title("Pet Store"),
        option::with_version("1.2.3"),
        option::with_description("Pets"),
        option::with_docs_path("/reference"),
        option::with_server(
            Server::new("https://petstore.example.com").with_description("Production"),
        ),
    ]);

    assert_eq!(from_settings.title, from_options.title);
    assert_eq!(from_settings.version, from_options.version);
    assert_eq!(from_settings.description, from_options.description);
    assert_eq!(from_settings.docs_path, from_options.docs_path);
    assert_eq!(from_settings.servers, from_options.servers);
}

#[test]
fn settings_file_can_be_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("application.yaml");
    std::fs::write(&path, "openapi:\n  disabled: true\n").unwrap();

    let settings = OpenApiSettings::from_yaml_file(&path).unwrap();
    let config = Config::from_options([option::with_settings(settings)]);
    assert!(config.disable_openapi);
}

#[test]
fn missing_settings_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = OpenApiSettings::from_yaml_file(dir.path().join("missing.yaml")).unwrap_err();
    assert!(matches!(err, routedoc_spec::Error::Io(_)));
}
