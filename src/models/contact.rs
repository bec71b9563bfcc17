//! Contact model and display-name formatting.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::user::NameOrder;

/// Full contact row from database.
#[derive(Debug, Clone, FromRow)]
pub struct Contact {
    pub id: Uuid,
    pub account_id: Uuid,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub is_partial: bool,
    pub has_avatar: bool,
    pub avatar_url: Option<String>,
    pub default_avatar_color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact contact projection embedded in dashboard payloads.
#[derive(Debug, Clone, Serialize)]
pub struct ContactCard {
    pub id: Uuid,
    pub has_avatar: bool,
    pub avatar_url: Option<String>,
    pub initials: String,
    pub default_avatar_color: String,
    pub complete_name: String,
}

/// Format a full display name honoring the name-order preference.
///
/// Contacts without a last name render the first name alone in either order.
pub fn complete_name(first: &str, last: Option<&str>, order: NameOrder) -> String {
    match (order, last) {
        (NameOrder::FirstnameFirst, Some(last)) => format!("{first} {last}"),
        (NameOrder::LastnameFirst, Some(last)) => format!("{last} {first}"),
        (_, None) => first.to_string(),
    }
}

/// Format a short name: first name plus last-name initial.
pub fn incomplete_name(first: &str, last: Option<&str>) -> String {
    match last.and_then(|l| l.chars().next()) {
        Some(initial) => format!("{first} {initial}."),
        None => first.to_string(),
    }
}

/// Uppercased first letters of the name parts.
pub fn initials(first: &str, last: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(c) = first.chars().next() {
        out.extend(c.to_uppercase());
    }
    if let Some(c) = last.and_then(|l| l.chars().next()) {
        out.extend(c.to_uppercase());
    }
    out
}

impl Contact {
    pub fn complete_name(&self, order: NameOrder) -> String {
        complete_name(&self.first_name, self.last_name.as_deref(), order)
    }

    pub fn initials(&self) -> String {
        initials(&self.first_name, self.last_name.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_name_firstname_first() {
        let name = complete_name("John", Some("Doe"), NameOrder::FirstnameFirst);
        assert_eq!(name, "John Doe");
    }

    #[test]
    fn complete_name_lastname_first() {
        let name = complete_name("John", Some("Doe"), NameOrder::LastnameFirst);
        assert_eq!(name, "Doe John");
    }

    #[test]
    fn complete_name_without_last_name() {
        assert_eq!(
            complete_name("Madonna", None, NameOrder::FirstnameFirst),
            "Madonna"
        );
        assert_eq!(
            complete_name("Madonna", None, NameOrder::LastnameFirst),
            "Madonna"
        );
    }

    #[test]
    fn incomplete_name_abbreviates_last_name() {
        assert_eq!(incomplete_name("John", Some("Doe")), "John D.");
        assert_eq!(incomplete_name("John", None), "John");
        assert_eq!(incomplete_name("John", Some("")), "John");
    }

    #[test]
    fn initials_uppercased() {
        assert_eq!(initials("john", Some("doe")), "JD");
        assert_eq!(initials("Ada", None), "A");
        assert_eq!(initials("émile", Some("zola")), "ÉZ");
    }
}
