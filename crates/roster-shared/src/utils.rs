//! Utility functions

/// Masks the local part of an email for log output, e.g. `ad***@test.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let keep = if local.chars().count() <= 2 { 1 } else { 2 };
            let visible: String = local.chars().take(keep).collect();
            format!("{}***@{}", visible, domain)
        }
        _ => "***".to_string(),
    }
}

/// Trims a form value and maps blank input to `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
