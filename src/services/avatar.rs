//! Avatar resolution: uploaded avatars, Gravatar fallback, and the
//! default color palette shown behind initials.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Fixed palette for default avatar backgrounds.
pub const AVATAR_COLORS: [&str; 9] = [
    "#fdb660", "#93521e", "#bd5067", "#b3d5fe", "#ff9807", "#709512", "#98e050", "#f2cb39",
    "#a1e5ef",
];

/// Deterministic palette pick keyed on the contact id.
pub fn default_color(contact_id: Uuid) -> &'static str {
    let sum: u32 = contact_id.as_bytes().iter().map(|b| u32::from(*b)).sum();
    AVATAR_COLORS[sum as usize % AVATAR_COLORS.len()]
}

/// Gravatar URL derived from the SHA-256 of the normalized email.
pub fn gravatar_url(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    format!(
        "https://www.gravatar.com/avatar/{}?s=200&d=mp",
        hex::encode(hasher.finalize())
    )
}

/// Resolve the avatar URL for a contact.
///
/// An uploaded avatar wins; otherwise fall back to Gravatar when an email
/// exists. `None` means the UI renders initials on the default color.
pub fn resolve_url(
    has_avatar: bool,
    stored_url: Option<&str>,
    email: Option<&str>,
) -> Option<String> {
    if has_avatar {
        return stored_url.map(str::to_string);
    }
    email.map(gravatar_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravatar_url_uses_sha256_of_email() {
        let url = gravatar_url("test@example.com");
        assert_eq!(
            url,
            "https://www.gravatar.com/avatar/973dfe463ec85785f5f95af5ba3906eedb2d931c24e69824a89ea65dba4e813b?s=200&d=mp"
        );
    }

    #[test]
    fn gravatar_normalizes_case_and_whitespace() {
        let url = gravatar_url("  Test@Example.COM ");
        assert_eq!(url, gravatar_url("test@example.com"));
    }

    #[test]
    fn uploaded_avatar_wins() {
        let url = resolve_url(true, Some("https://cdn.test/a.png"), Some("x@y.z"));
        assert_eq!(url.as_deref(), Some("https://cdn.test/a.png"));
    }

    #[test]
    fn falls_back_to_gravatar_then_none() {
        let url = resolve_url(false, None, Some("test@example.com"));
        assert!(url.unwrap().contains("gravatar.com"));
        assert_eq!(resolve_url(false, None, None), None);
    }

    #[test]
    fn default_color_is_deterministic() {
        let id = Uuid::new_v4();
        assert_eq!(default_color(id), default_color(id));
        assert!(AVATAR_COLORS.contains(&default_color(id)));
    }
}
