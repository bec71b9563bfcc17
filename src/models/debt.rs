//! Debt status and direction enums.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a debt. Only in-progress debts count toward
/// dashboard totals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq)]
#[sqlx(type_name = "debt_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DebtStatus {
    InProgress,
    Complete,
}

/// Whether the contact owes the account or the account owes the contact.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq)]
#[sqlx(type_name = "debt_direction", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DebtDirection {
    OwedToAccount,
    OwedByAccount,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debt_status_serialization() {
        let json = serde_json::to_string(&DebtStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }

    #[test]
    fn debt_direction_round_trip() {
        let direction: DebtDirection = serde_json::from_str("\"owed_to_account\"").unwrap();
        assert_eq!(direction, DebtDirection::OwedToAccount);
        let json = serde_json::to_string(&DebtDirection::OwedByAccount).unwrap();
        assert_eq!(json, "\"owed_by_account\"");
    }
}
