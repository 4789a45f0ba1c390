use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::Contact;

/// Insert a new contact. `created_at` is assigned here, never by the caller.
pub async fn insert(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    phone: &str,
    message: &str,
) -> Result<Contact, sqlx::Error> {
    sqlx::query_as::<_, Contact>(
        "INSERT INTO contacts (name, email, phone, message, created_at)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(message)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

/// All contacts, newest first. Id breaks ties between same-instant inserts.
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Contact>, sqlx::Error> {
    sqlx::query_as::<_, Contact>("SELECT * FROM contacts ORDER BY created_at DESC, id DESC")
        .fetch_all(pool)
        .await
}
