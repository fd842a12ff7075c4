//! Post-login redirect validation

/// Accepts `next` only when it is a path on this host. Scheme-relative
/// (`//evil`), backslash and absolute URLs are refused.
pub fn safe_redirect_target(next: &str) -> Option<&str> {
    let next = next.trim();
    if !next.starts_with('/') || next.starts_with("//") {
        return None;
    }
    if next.contains('\\') || next.contains("://") || next.chars().any(char::is_control) {
        return None;
    }
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_paths_pass() {
        assert_eq!(safe_redirect_target("/employees"), Some("/employees"));
        assert_eq!(
            safe_redirect_target("/employee/3/edit?tab=leave"),
            Some("/employee/3/edit?tab=leave")
        );
    }

    #[test]
    fn external_targets_fail() {
        assert_eq!(safe_redirect_target("https://evil.example"), None);
        assert_eq!(safe_redirect_target("//evil.example"), None);
        assert_eq!(safe_redirect_target("/\\evil.example"), None);
        assert_eq!(safe_redirect_target("/x?u=http://evil"), None);
        assert_eq!(safe_redirect_target("employees"), None);
        assert_eq!(safe_redirect_target(""), None);
        assert_eq!(safe_redirect_target("/a\r\nSet-Cookie: x"), None);
    }
}
