//! User model and the name-order display preference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Preference controlling first/last name display sequence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq)]
#[sqlx(type_name = "name_order", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NameOrder {
    FirstnameFirst,
    LastnameFirst,
}

/// Full user row from database (includes password_hash — never serialize to API).
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub account_id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub timezone: String,
    pub name_order: NameOrder,
    pub dashboard_active_tab: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User response DTO — excludes password_hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub account_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub timezone: String,
    pub name_order: NameOrder,
    pub dashboard_active_tab: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            account_id: u.account_id,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            timezone: u.timezone,
            name_order: u.name_order,
            dashboard_active_tab: u.dashboard_active_tab,
            created_at: u.created_at,
        }
    }
}

/// Registration payload: creates an account and its first user.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_order_serialization() {
        let order = NameOrder::LastnameFirst;
        let json = serde_json::to_string(&order).unwrap();
        assert_eq!(json, "\"lastname_first\"");
    }

    #[test]
    fn name_order_round_trip() {
        let order: NameOrder = serde_json::from_str("\"firstname_first\"").unwrap();
        assert_eq!(order, NameOrder::FirstnameFirst);
    }

    #[test]
    fn user_response_excludes_password() {
        let json = serde_json::to_string(&UserResponse {
            id: Uuid::nil(),
            account_id: Uuid::nil(),
            email: "jane@example.com".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            timezone: "UTC".to_string(),
            name_order: NameOrder::FirstnameFirst,
            dashboard_active_tab: None,
            created_at: Utc::now(),
        })
        .unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("hash"));
    }

    #[test]
    fn user_to_response_conversion() {
        let user = User {
            id: Uuid::nil(),
            account_id: Uuid::nil(),
            email: "jane@example.com".to_string(),
            password_hash: "secret_hash".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            timezone: "Europe/Paris".to_string(),
            name_order: NameOrder::LastnameFirst,
            dashboard_active_tab: Some("calls".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let response: UserResponse = user.into();
        assert_eq!(response.email, "jane@example.com");
        assert_eq!(response.name_order, NameOrder::LastnameFirst);
        assert_eq!(response.dashboard_active_tab.as_deref(), Some("calls"));
    }

    #[test]
    fn register_request_validation() {
        use validator::Validate;

        let valid = RegisterRequest {
            email: "jane@example.com".to_string(),
            password: "longenough".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            ..valid.clone()
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterRequest {
            password: "short".to_string(),
            ..valid
        };
        assert!(short_password.validate().is_err());
    }
}
