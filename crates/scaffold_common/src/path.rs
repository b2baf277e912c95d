//! Small path and filename helpers shared by the resolver crates.

/// Replaces backslashes with forward slashes.
///
/// Import directives and configured paths may arrive with Windows-style
/// separators; everything downstream works with `/`.
pub fn normalize_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

/// Returns `true` if the name ends in a CSS extension.
///
/// The check is purely textual and does not touch the filesystem, so it
/// can run before an existence check.
pub fn is_css_name(name: &str) -> bool {
    std::path::Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("css"))
}

/// Appends a trailing `/` to a non-empty string if one is absent.
pub fn ensure_trailing_slash(value: &str) -> String {
    if value.is_empty() || value.ends_with('/') {
        value.to_string()
    } else {
        format!("{value}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_backslashes() {
        assert_eq!(normalize_slashes("css\\base\\reset.css"), "css/base/reset.css");
    }

    #[test]
    fn normalize_leaves_forward_slashes() {
        assert_eq!(normalize_slashes("css/reset.css"), "css/reset.css");
    }

    #[test]
    fn css_extension_accepted() {
        assert!(is_css_name("reset.css"));
        assert!(is_css_name("path/to/reset.CSS"));
    }

    #[test]
    fn non_css_extension_rejected() {
        assert!(!is_css_name("notes.txt"));
        assert!(!is_css_name("reset"));
        assert!(!is_css_name("style.css.bak"));
    }

    #[test]
    fn trailing_slash_added() {
        assert_eq!(ensure_trailing_slash("/var/cache"), "/var/cache/");
    }

    #[test]
    fn trailing_slash_preserved() {
        assert_eq!(ensure_trailing_slash("/var/cache/"), "/var/cache/");
    }

    #[test]
    fn empty_string_untouched() {
        assert_eq!(ensure_trailing_slash(""), "");
    }
}
