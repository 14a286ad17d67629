//! Path helpers shared by the spec router and the HTTP adapter.

/// Join a group prefix and a route path with exactly one `/` between them.
///
/// An empty path is treated as `/`, and `/` under a non-empty prefix resolves
/// to the prefix itself.
pub fn join_path(prefix: &str, path: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    match (prefix.is_empty(), path.is_empty()) {
        (true, true) => "/".to_string(),
        (true, false) => format!("/{path}"),
        (false, true) => ensure_leading_slash(prefix),
        (false, false) => format!("{}/{path}", ensure_leading_slash(prefix)),
    }
}

fn ensure_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Rewrite a brace-style route path into an OpenAPI path template.
///
/// Catch-all captures (`{*rest}`) become plain placeholders (`{rest}`).
pub fn openapi_path(path: &str) -> String {
    path.replace("{*", "{")
}

/// Names of the `{name}` placeholders of a path, in order of appearance.
pub fn placeholders(path: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = path;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else { break };
        let name = after[..end].trim_start_matches('*');
        if !name.is_empty() {
            names.push(name.to_string());
        }
        rest = &after[end + 1..];
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_prefixes() {
        assert_eq!(join_path("/api", "/v1"), "/api/v1");
        assert_eq!(join_path("/api/", "/v1"), "/api/v1");
        assert_eq!(join_path("api", "v1"), "/api/v1");
        assert_eq!(join_path("", "/pets"), "/pets");
        assert_eq!(join_path("", ""), "/");
        assert_eq!(join_path("/", "/"), "/");
    }

    #[test]
    fn root_path_under_prefix_is_the_prefix() {
        assert_eq!(join_path("/api/v3/pet", "/"), "/api/v3/pet");
        assert_eq!(join_path("/auth", ""), "/auth");
    }

    #[test]
    fn group_root_slash_is_transparent() {
        assert_eq!(join_path(&join_path("/auth", "/"), "/me"), "/auth/me");
    }

    #[test]
    fn catch_all_becomes_placeholder() {
        assert_eq!(openapi_path("/files/{*rest}"), "/files/{rest}");
        assert_eq!(openapi_path("/pets/{id}"), "/pets/{id}");
    }

    #[test]
    fn lists_placeholders() {
        assert_eq!(
            placeholders("/users/{userId}/pets/{petId}"),
            vec!["userId".to_string(), "petId".to_string()]
        );
        assert!(placeholders("/health").is_empty());
        assert_eq!(placeholders("/files/{*rest}"), vec!["rest".to_string()]);
    }
}
