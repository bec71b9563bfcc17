//! Seed script for development — populates a fresh database with sample data.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires `DATABASE_URL` environment variable (reads .env).

use sqlx::PgPool;
use uuid::Uuid;

const DEMO_EMAIL: &str = "demo@kithbook.local";
const DEMO_PASSWORD: &str = "Demo123!";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    // Run migrations first
    sqlx::migrate!("./migrations").run(&pool).await?;

    println!("=== Kithbook Seed Script ===");

    let account_id = seed_demo_user(&pool).await?;
    let contact_ids = seed_contacts(&pool, account_id).await?;
    seed_debts(&pool, account_id, &contact_ids).await?;
    seed_events(&pool, account_id, &contact_ids).await?;
    seed_calls(&pool, account_id, &contact_ids).await?;
    seed_notes(&pool, account_id, &contact_ids).await?;
    seed_planner_items(&pool, account_id).await?;

    println!("\n=== Seed complete! ===");
    println!("Demo login: {DEMO_EMAIL} / {DEMO_PASSWORD}");

    Ok(())
}

async fn seed_demo_user(pool: &PgPool) -> anyhow::Result<Uuid> {
    let existing: Option<(Uuid, Uuid)> =
        sqlx::query_as("SELECT id, account_id FROM users WHERE email = $1")
            .bind(DEMO_EMAIL)
            .fetch_optional(pool)
            .await?;

    let hash = kithbook::services::auth::hash_password(DEMO_PASSWORD)?;

    if let Some((user_id, account_id)) = existing {
        // Reset the password for the existing demo user
        sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(&hash)
            .bind(user_id)
            .execute(pool)
            .await?;
        println!("[done] Updated demo user password");
        return Ok(account_id);
    }

    let account_id: Uuid = sqlx::query_scalar("INSERT INTO accounts DEFAULT VALUES RETURNING id")
        .fetch_one(pool)
        .await?;

    sqlx::query(
        "INSERT INTO users (account_id, email, password_hash, first_name, last_name, timezone)
         VALUES ($1, $2, $3, 'Demo', 'User', 'Europe/Paris')",
    )
    .bind(account_id)
    .bind(DEMO_EMAIL)
    .bind(&hash)
    .execute(pool)
    .await?;

    println!("[done] Created demo account and user");
    Ok(account_id)
}

async fn seed_contacts(pool: &PgPool, account_id: Uuid) -> anyhow::Result<Vec<Uuid>> {
    let existing: Vec<Uuid> = sqlx::query_scalar(
        "SELECT id FROM contacts
         WHERE account_id = $1 AND is_partial = false
         ORDER BY created_at",
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;

    if !existing.is_empty() {
        println!("[skip] Contacts already exist ({})", existing.len());
        return Ok(existing);
    }

    let contacts = [
        ("Ada", Some("Lovelace"), Some("ada@example.test")),
        ("Grace", Some("Hopper"), Some("grace@example.test")),
        ("Alan", Some("Turing"), None),
        ("Margaret", Some("Hamilton"), Some("margaret@example.test")),
        ("Edsger", None, None),
    ];

    let mut ids = Vec::with_capacity(contacts.len());
    for (first, last, email) in contacts {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO contacts (id, account_id, first_name, last_name, email, default_avatar_color)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(id)
        .bind(account_id)
        .bind(first)
        .bind(last)
        .bind(email)
        .bind(kithbook::services::avatar::default_color(id))
        .execute(pool)
        .await?;
        ids.push(id);
    }

    // One partial contact, which the recent-contacts list must not show
    sqlx::query(
        "INSERT INTO contacts (account_id, first_name, is_partial) VALUES ($1, 'Placeholder', true)",
    )
    .bind(account_id)
    .execute(pool)
    .await?;

    println!("[done] Created {} contacts (plus 1 partial)", ids.len());
    Ok(ids)
}

async fn seed_debts(pool: &PgPool, account_id: Uuid, contacts: &[Uuid]) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM debts WHERE account_id = $1")
        .bind(account_id)
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Debts already exist ({count})");
        return Ok(());
    }

    let debts = [
        (contacts[0], 5000i64, "owed_to_account", "in_progress", "Lunch money"),
        (contacts[1], 3000, "owed_to_account", "in_progress", "Concert ticket"),
        (contacts[2], 2000, "owed_by_account", "in_progress", "Book club order"),
        (contacts[0], 99900, "owed_to_account", "complete", "Old loan, settled"),
    ];

    for (contact_id, amount, direction, status, reason) in debts {
        sqlx::query(
            "INSERT INTO debts (account_id, contact_id, amount, direction, status, reason)
             VALUES ($1, $2, $3, $4::debt_direction, $5::debt_status, $6)",
        )
        .bind(account_id)
        .bind(contact_id)
        .bind(amount)
        .bind(direction)
        .bind(status)
        .bind(reason)
        .execute(pool)
        .await?;
    }

    println!("[done] Created 4 debts");
    Ok(())
}

async fn seed_events(pool: &PgPool, account_id: Uuid, contacts: &[Uuid]) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events WHERE account_id = $1")
        .bind(account_id)
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Events already exist ({count})");
        return Ok(());
    }

    for (i, contact_id) in contacts.iter().enumerate() {
        sqlx::query(
            "INSERT INTO events (account_id, contact_id, object_type, object_id, nature_of_operation, created_at)
             VALUES ($1, $2, 'contact', $2, 'create', NOW() - make_interval(mins => $3))",
        )
        .bind(account_id)
        .bind(contact_id)
        .bind(i as i32 * 10)
        .execute(pool)
        .await?;
    }

    // One event whose contact is gone; the feed must drop it
    sqlx::query(
        "INSERT INTO events (account_id, contact_id, object_type, object_id, nature_of_operation)
         VALUES ($1, NULL, 'note', gen_random_uuid(), 'update')",
    )
    .bind(account_id)
    .execute(pool)
    .await?;

    println!("[done] Created {} events (plus 1 dangling)", contacts.len());
    Ok(())
}

async fn seed_calls(pool: &PgPool, account_id: Uuid, contacts: &[Uuid]) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM calls WHERE account_id = $1")
        .bind(account_id)
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Calls already exist ({count})");
        return Ok(());
    }

    for day in 0..6i32 {
        let contact_id = contacts[day as usize % contacts.len()];
        sqlx::query(
            "INSERT INTO calls (account_id, contact_id, called_at, content)
             VALUES ($1, $2, NOW() - make_interval(days => $3), $4)",
        )
        .bind(account_id)
        .bind(contact_id)
        .bind(day)
        .bind(format!("Catch-up call #{}", day + 1))
        .execute(pool)
        .await?;
    }

    println!("[done] Created 6 calls");
    Ok(())
}

async fn seed_notes(pool: &PgPool, account_id: Uuid, contacts: &[Uuid]) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notes WHERE account_id = $1")
        .bind(account_id)
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Notes already exist ({count})");
        return Ok(());
    }

    sqlx::query(
        "INSERT INTO notes (account_id, contact_id, body, is_favorited, favorited_at)
         VALUES ($1, $2, 'Loves hiking in the Alps every summer.', true, NOW())",
    )
    .bind(account_id)
    .bind(contacts[0])
    .execute(pool)
    .await?;

    sqlx::query(
        "INSERT INTO notes (account_id, contact_id, body, is_favorited, favorited_at)
         VALUES ($1, $2, 'Allergic to peanuts.', true, NOW() - interval '1 day')",
    )
    .bind(account_id)
    .bind(contacts[1])
    .execute(pool)
    .await?;

    sqlx::query(
        "INSERT INTO notes (account_id, contact_id, body) VALUES ($1, $2, 'Met at the conference.')",
    )
    .bind(account_id)
    .bind(contacts[2])
    .execute(pool)
    .await?;

    println!("[done] Created 3 notes (2 favorited)");
    Ok(())
}

async fn seed_planner_items(pool: &PgPool, account_id: Uuid) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reminders WHERE account_id = $1")
        .bind(account_id)
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Planner items already exist");
        return Ok(());
    }

    sqlx::query(
        "INSERT INTO reminders (account_id, title)
         VALUES ($1, 'Birthday: Ada'), ($1, 'Anniversary call')",
    )
    .bind(account_id)
    .execute(pool)
    .await?;

    sqlx::query("INSERT INTO activities (account_id, title) VALUES ($1, 'Museum visit')")
        .bind(account_id)
        .execute(pool)
        .await?;

    sqlx::query("INSERT INTO gifts (account_id, title) VALUES ($1, 'Fountain pen')")
        .bind(account_id)
        .execute(pool)
        .await?;

    sqlx::query("INSERT INTO tasks (account_id, title) VALUES ($1, 'Send thank-you card')")
        .bind(account_id)
        .execute(pool)
        .await?;

    println!("[done] Created planner items (reminders, activities, gifts, tasks)");
    Ok(())
}
