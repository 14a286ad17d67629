//! Route path helpers.

pub use routedoc_spec::path::join_path;

/// Rewrite `:name` parameter markers into `{name}` placeholders.
///
/// A marker only counts when it fills a whole segment and its name is made of
/// `[A-Za-z0-9_]` characters. Anything else, including paths that already use
/// braces, is returned unchanged.
pub fn convert_path(path: &str) -> String {
    path.split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) if !name.is_empty() && name.chars().all(is_ident_char) => {
                format!("{{{name}}}")
            }
            _ => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// The first segment of a converted path that axum cannot route: a leading
/// `:` that did not convert, or a `{capture}` sharing its segment with other
/// text.
pub fn unsupported_segment(path: &str) -> Option<&str> {
    path.split('/').find(|segment| {
        if segment.starts_with(':') {
            return true;
        }
        if !segment.contains('{') {
            return false;
        }
        let whole = segment.starts_with('{')
            && segment.ends_with('}')
            && segment.matches('{').count() == 1;
        !whole
    })
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
