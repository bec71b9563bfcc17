//! Dashboard aggregation queries: account counts, recent contacts, debt
//! totals, the event feed, calls, and favorited notes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::contact::{self, Contact, ContactCard};
use crate::models::debt::{DebtDirection, DebtStatus};
use crate::models::user::{NameOrder, User, UserResponse};
use crate::services::{avatar, dates};

/// Dashboard summary for the overview page.
///
/// Accounts with no contacts at all get the blank state — a distinct
/// terminal result, not an error.
#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardSummary {
    Blank,
    Full(Box<FullSummary>),
}

/// Everything the populated dashboard renders.
#[derive(Debug, Serialize)]
pub struct FullSummary {
    pub counts: AccountCounts,
    pub last_updated_contacts: Vec<ContactCard>,
    pub events: Vec<EventView>,
    pub debt_due: i64,
    pub debt_owed: i64,
    pub debts: Vec<DebtView>,
    pub user: UserResponse,
}

/// Per-account entity counts shown in the dashboard header.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct AccountCounts {
    pub contacts: i64,
    pub reminders: i64,
    pub notes: i64,
    pub activities: i64,
    pub gifts: i64,
    pub tasks: i64,
}

/// Event feed entry, dated in the requesting user's timezone.
#[derive(Debug, Serialize)]
pub struct EventView {
    pub id: Uuid,
    pub date: String,
    pub object_type: String,
    pub object_id: Uuid,
    pub contact_id: Uuid,
    pub contact_complete_name: String,
    pub nature_of_operation: String,
}

/// In-progress debt with its contact card.
#[derive(Debug, Serialize)]
pub struct DebtView {
    pub id: Uuid,
    pub amount: i64,
    pub status: DebtStatus,
    pub direction: DebtDirection,
    pub reason: Option<String>,
    pub contact: ContactCard,
}

/// Call list entry for the dashboard calls tab.
#[derive(Debug, Serialize)]
pub struct CallView {
    pub id: Uuid,
    pub called_at: String,
    pub name: String,
    pub contact_id: Uuid,
}

/// Favorited note with its contact card.
#[derive(Debug, Serialize)]
pub struct NoteView {
    pub id: Uuid,
    pub body: String,
    pub created_at: String,
    pub name: String,
    pub contact: ContactCard,
}

/// Build the dashboard summary for the user's account.
///
/// Returns the blank state when the account has zero contacts; otherwise
/// composes counts, the ten most recently updated contacts, in-progress
/// debt totals, and the recent event feed.
pub async fn get_summary(pool: &PgPool, user: &User) -> Result<DashboardSummary, AppError> {
    let counts = fetch_account_counts(pool, user.account_id).await?;

    if counts.contacts == 0 {
        return Ok(DashboardSummary::Blank);
    }

    let (contacts, debts, events) = tokio::try_join!(
        fetch_recent_contacts(pool, user.account_id),
        fetch_in_progress_debts(pool, user.account_id),
        fetch_recent_events(pool, user.account_id),
    )?;

    let last_updated_contacts = contacts
        .iter()
        .map(|c| contact_card(c, user.name_order))
        .collect();

    let (debt_due, debt_owed) = partition_debt_totals(&debts);

    let events = project_events(&events, user.name_order, &user.timezone);

    let debts = debts
        .into_iter()
        .map(|d| {
            let contact = d.contact_card(user.name_order);
            DebtView {
                id: d.id,
                amount: d.amount,
                status: d.status,
                direction: d.direction,
                reason: d.reason,
                contact,
            }
        })
        .collect();

    Ok(DashboardSummary::Full(Box::new(FullSummary {
        counts,
        last_updated_contacts,
        events,
        debt_due,
        debt_owed,
        debts,
        user: UserResponse::from(user.clone()),
    })))
}

/// Fetch the 15 most recent calls for the account, newest first.
pub async fn recent_calls(pool: &PgPool, account_id: Uuid) -> Result<Vec<CallView>, AppError> {
    let rows = fetch_recent_calls(pool, account_id).await?;
    Ok(rows
        .into_iter()
        .map(|c| CallView {
            id: c.id,
            called_at: dates::short_date(c.called_at),
            name: contact::incomplete_name(
                &c.contact_first_name,
                c.contact_last_name.as_deref(),
            ),
            contact_id: c.contact_id,
        })
        .collect())
}

/// Fetch all favorited notes for the account, newest first. No pagination.
pub async fn favorited_notes(pool: &PgPool, user: &User) -> Result<Vec<NoteView>, AppError> {
    let rows = fetch_favorited_notes(pool, user.account_id).await?;
    Ok(rows
        .into_iter()
        .map(|n| {
            let contact = n.contact_card(user.name_order);
            NoteView {
                id: n.id,
                body: n.body,
                created_at: dates::short_date(n.created_at),
                name: contact::incomplete_name(
                    &n.contact_first_name,
                    n.contact_last_name.as_deref(),
                ),
                contact,
            }
        })
        .collect())
}

/// Persist the active dashboard tab on the user row.
///
/// The tab value is an opaque string; last write wins.
pub async fn set_active_tab(pool: &PgPool, user_id: Uuid, tab: &str) -> Result<(), AppError> {
    sqlx::query("UPDATE users SET dashboard_active_tab = $2, updated_at = NOW() WHERE id = $1")
        .bind(user_id)
        .bind(tab)
        .execute(pool)
        .await?;
    Ok(())
}

/// Count all dashboard entities for the account in one query.
async fn fetch_account_counts(pool: &PgPool, account_id: Uuid) -> Result<AccountCounts, AppError> {
    let counts = sqlx::query_as::<_, AccountCounts>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM contacts   WHERE account_id = $1) AS contacts,
            (SELECT COUNT(*) FROM reminders  WHERE account_id = $1) AS reminders,
            (SELECT COUNT(*) FROM notes      WHERE account_id = $1) AS notes,
            (SELECT COUNT(*) FROM activities WHERE account_id = $1) AS activities,
            (SELECT COUNT(*) FROM gifts      WHERE account_id = $1) AS gifts,
            (SELECT COUNT(*) FROM tasks      WHERE account_id = $1) AS tasks
        "#,
    )
    .bind(account_id)
    .fetch_one(pool)
    .await?;
    Ok(counts)
}

/// Fetch the 10 most recently updated non-partial contacts.
async fn fetch_recent_contacts(pool: &PgPool, account_id: Uuid) -> Result<Vec<Contact>, AppError> {
    let rows = sqlx::query_as::<_, Contact>(
        r#"
        SELECT * FROM contacts
        WHERE account_id = $1 AND is_partial = false
        ORDER BY updated_at DESC
        LIMIT 10
        "#,
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// In-progress debt joined with its contact.
#[derive(Debug, sqlx::FromRow)]
struct DebtWithContact {
    id: Uuid,
    amount: i64,
    status: DebtStatus,
    direction: DebtDirection,
    reason: Option<String>,
    contact_id: Uuid,
    contact_first_name: String,
    contact_last_name: Option<String>,
    contact_email: Option<String>,
    contact_has_avatar: bool,
    contact_avatar_url: Option<String>,
    contact_default_avatar_color: String,
}

impl DebtWithContact {
    fn contact_card(&self, order: NameOrder) -> ContactCard {
        ContactCard {
            id: self.contact_id,
            has_avatar: self.contact_has_avatar,
            avatar_url: avatar::resolve_url(
                self.contact_has_avatar,
                self.contact_avatar_url.as_deref(),
                self.contact_email.as_deref(),
            ),
            initials: contact::initials(
                &self.contact_first_name,
                self.contact_last_name.as_deref(),
            ),
            default_avatar_color: self.contact_default_avatar_color.clone(),
            complete_name: contact::complete_name(
                &self.contact_first_name,
                self.contact_last_name.as_deref(),
                order,
            ),
        }
    }
}

/// Fetch the account's in-progress debts with their contacts.
async fn fetch_in_progress_debts(
    pool: &PgPool,
    account_id: Uuid,
) -> Result<Vec<DebtWithContact>, AppError> {
    let rows = sqlx::query_as::<_, DebtWithContact>(
        r#"
        SELECT d.id, d.amount, d.status, d.direction, d.reason,
               c.id AS contact_id,
               c.first_name AS contact_first_name,
               c.last_name AS contact_last_name,
               c.email AS contact_email,
               c.has_avatar AS contact_has_avatar,
               c.avatar_url AS contact_avatar_url,
               c.default_avatar_color AS contact_default_avatar_color
        FROM debts d
        INNER JOIN contacts c ON c.id = d.contact_id
        WHERE d.account_id = $1 AND d.status = 'in_progress'
        ORDER BY d.created_at DESC
        "#,
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Sum in-progress debt amounts by direction: (due to the account,
/// owed by the account). Debts in any other status contribute to neither.
fn partition_debt_totals(debts: &[DebtWithContact]) -> (i64, i64) {
    let mut due = 0i64;
    let mut owed = 0i64;
    for debt in debts.iter().filter(|d| d.status == DebtStatus::InProgress) {
        match debt.direction {
            DebtDirection::OwedToAccount => due += debt.amount,
            DebtDirection::OwedByAccount => owed += debt.amount,
        }
    }
    (due, owed)
}

/// Event row left-joined with its contact; the contact columns are null
/// when the contact was deleted.
#[derive(Debug, sqlx::FromRow)]
struct EventWithContact {
    id: Uuid,
    created_at: DateTime<Utc>,
    object_type: String,
    object_id: Uuid,
    nature_of_operation: String,
    contact_id: Option<Uuid>,
    contact_first_name: Option<String>,
    contact_last_name: Option<String>,
}

/// Fetch the 30 most recent events for the account, newest first.
async fn fetch_recent_events(
    pool: &PgPool,
    account_id: Uuid,
) -> Result<Vec<EventWithContact>, AppError> {
    let rows = sqlx::query_as::<_, EventWithContact>(
        r#"
        SELECT e.id, e.created_at, e.object_type, e.object_id, e.nature_of_operation,
               c.id AS contact_id,
               c.first_name AS contact_first_name,
               c.last_name AS contact_last_name
        FROM events e
        LEFT JOIN contacts c ON c.id = e.contact_id
        WHERE e.account_id = $1
        ORDER BY e.created_at DESC
        LIMIT 30
        "#,
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Project fetched events into feed entries, silently dropping rows whose
/// contact is gone. Fetch order is preserved.
fn project_events(
    events: &[EventWithContact],
    order: NameOrder,
    timezone: &str,
) -> Vec<EventView> {
    events
        .iter()
        .filter_map(|e| match (e.contact_id, e.contact_first_name.as_deref()) {
            (Some(contact_id), Some(first)) => Some(EventView {
                id: e.id,
                date: dates::localized(e.created_at, timezone),
                object_type: e.object_type.clone(),
                object_id: e.object_id,
                contact_id,
                contact_complete_name: contact::complete_name(
                    first,
                    e.contact_last_name.as_deref(),
                    order,
                ),
                nature_of_operation: e.nature_of_operation.clone(),
            }),
            _ => None,
        })
        .collect()
}

/// Call row joined with its contact.
#[derive(Debug, sqlx::FromRow)]
struct CallWithContact {
    id: Uuid,
    called_at: DateTime<Utc>,
    contact_id: Uuid,
    contact_first_name: String,
    contact_last_name: Option<String>,
}

/// Fetch the 15 most recent calls for the account, newest first.
async fn fetch_recent_calls(
    pool: &PgPool,
    account_id: Uuid,
) -> Result<Vec<CallWithContact>, AppError> {
    let rows = sqlx::query_as::<_, CallWithContact>(
        r#"
        SELECT cl.id, cl.called_at,
               c.id AS contact_id,
               c.first_name AS contact_first_name,
               c.last_name AS contact_last_name
        FROM calls cl
        INNER JOIN contacts c ON c.id = cl.contact_id
        WHERE cl.account_id = $1
        ORDER BY cl.called_at DESC
        LIMIT 15
        "#,
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Favorited note joined with its contact.
#[derive(Debug, sqlx::FromRow)]
struct NoteWithContact {
    id: Uuid,
    body: String,
    created_at: DateTime<Utc>,
    contact_id: Uuid,
    contact_first_name: String,
    contact_last_name: Option<String>,
    contact_email: Option<String>,
    contact_has_avatar: bool,
    contact_avatar_url: Option<String>,
    contact_default_avatar_color: String,
}

impl NoteWithContact {
    fn contact_card(&self, order: NameOrder) -> ContactCard {
        ContactCard {
            id: self.contact_id,
            has_avatar: self.contact_has_avatar,
            avatar_url: avatar::resolve_url(
                self.contact_has_avatar,
                self.contact_avatar_url.as_deref(),
                self.contact_email.as_deref(),
            ),
            initials: contact::initials(
                &self.contact_first_name,
                self.contact_last_name.as_deref(),
            ),
            default_avatar_color: self.contact_default_avatar_color.clone(),
            complete_name: contact::complete_name(
                &self.contact_first_name,
                self.contact_last_name.as_deref(),
                order,
            ),
        }
    }
}

/// Fetch all favorited notes for the account, newest first.
async fn fetch_favorited_notes(
    pool: &PgPool,
    account_id: Uuid,
) -> Result<Vec<NoteWithContact>, AppError> {
    let rows = sqlx::query_as::<_, NoteWithContact>(
        r#"
        SELECT n.id, n.body, n.created_at,
               c.id AS contact_id,
               c.first_name AS contact_first_name,
               c.last_name AS contact_last_name,
               c.email AS contact_email,
               c.has_avatar AS contact_has_avatar,
               c.avatar_url AS contact_avatar_url,
               c.default_avatar_color AS contact_default_avatar_color
        FROM notes n
        INNER JOIN contacts c ON c.id = n.contact_id
        WHERE n.account_id = $1 AND n.is_favorited = true
        ORDER BY n.created_at DESC
        "#,
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Build a contact card from a full contact row.
fn contact_card(contact: &Contact, order: NameOrder) -> ContactCard {
    ContactCard {
        id: contact.id,
        has_avatar: contact.has_avatar,
        avatar_url: avatar::resolve_url(
            contact.has_avatar,
            contact.avatar_url.as_deref(),
            contact.email.as_deref(),
        ),
        initials: contact.initials(),
        default_avatar_color: contact.default_avatar_color.clone(),
        complete_name: contact.complete_name(order),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debt_row(amount: i64, direction: DebtDirection, status: DebtStatus) -> DebtWithContact {
        DebtWithContact {
            id: Uuid::new_v4(),
            amount,
            status,
            direction,
            reason: None,
            contact_id: Uuid::new_v4(),
            contact_first_name: "Jane".to_string(),
            contact_last_name: Some("Doe".to_string()),
            contact_email: None,
            contact_has_avatar: false,
            contact_avatar_url: None,
            contact_default_avatar_color: "#fdb660".to_string(),
        }
    }

    fn event_row(contact: Option<(Uuid, &str)>) -> EventWithContact {
        EventWithContact {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            object_type: "note".to_string(),
            object_id: Uuid::new_v4(),
            nature_of_operation: "create".to_string(),
            contact_id: contact.map(|(id, _)| id),
            contact_first_name: contact.map(|(_, name)| name.to_string()),
            contact_last_name: None,
        }
    }

    #[test]
    fn debt_totals_partition_by_direction() {
        let debts = vec![
            debt_row(50, DebtDirection::OwedToAccount, DebtStatus::InProgress),
            debt_row(30, DebtDirection::OwedToAccount, DebtStatus::InProgress),
            debt_row(20, DebtDirection::OwedByAccount, DebtStatus::InProgress),
            debt_row(999, DebtDirection::OwedToAccount, DebtStatus::Complete),
        ];
        let (due, owed) = partition_debt_totals(&debts);
        assert_eq!(due, 80);
        assert_eq!(owed, 20);
    }

    #[test]
    fn debt_totals_empty_partitions_sum_to_zero() {
        assert_eq!(partition_debt_totals(&[]), (0, 0));

        let only_owed = vec![debt_row(
            15,
            DebtDirection::OwedByAccount,
            DebtStatus::InProgress,
        )];
        assert_eq!(partition_debt_totals(&only_owed), (0, 15));
    }

    #[test]
    fn events_without_contact_are_dropped() {
        let kept_a = Uuid::new_v4();
        let kept_b = Uuid::new_v4();
        let kept_c = Uuid::new_v4();
        let events = vec![
            event_row(Some((kept_a, "Ada"))),
            event_row(None),
            event_row(Some((kept_b, "Grace"))),
            event_row(None),
            event_row(Some((kept_c, "Edsger"))),
        ];

        let views = project_events(&events, NameOrder::FirstnameFirst, "UTC");
        assert_eq!(views.len(), 3);
        assert_eq!(
            views.iter().map(|v| v.contact_id).collect::<Vec<_>>(),
            vec![kept_a, kept_b, kept_c]
        );
    }

    #[test]
    fn event_projection_honors_name_order() {
        let mut event = event_row(Some((Uuid::new_v4(), "Jane")));
        event.contact_last_name = Some("Doe".to_string());

        let views = project_events(
            std::slice::from_ref(&event),
            NameOrder::LastnameFirst,
            "UTC",
        );
        assert_eq!(views[0].contact_complete_name, "Doe Jane");
    }

    #[test]
    fn debt_contact_card_falls_back_to_gravatar() {
        let mut debt = debt_row(10, DebtDirection::OwedToAccount, DebtStatus::InProgress);
        debt.contact_email = Some("jane.doe@example.com".to_string());

        let card = debt.contact_card(NameOrder::FirstnameFirst);
        assert_eq!(card.complete_name, "Jane Doe");
        assert_eq!(card.initials, "JD");
        assert!(card.avatar_url.unwrap().contains("gravatar.com"));
    }

    #[test]
    fn blank_summary_serializes_with_state_tag() {
        let json = serde_json::to_value(DashboardSummary::Blank).unwrap();
        assert_eq!(json["state"], "blank");
        assert!(json.get("counts").is_none());
    }
}
