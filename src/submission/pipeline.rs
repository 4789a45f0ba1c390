use std::net::IpAddr;

use axum::http::HeaderMap;
use serde_json::Value;

use crate::db;
use crate::email;
use crate::error::AppError;
use crate::state::SharedState;

use super::client_ip;
use super::sanitize::sanitize;
use super::validate;

/// Run one submission through validate → sanitize → persist → notify.
///
/// Persistence is the durability boundary: the caller gets the assigned id as
/// soon as the insert commits. Notification is advisory and runs on a
/// detached task whose outcome is only logged.
pub async fn run(
    state: &SharedState,
    headers: &HeaderMap,
    peer_addr: Option<IpAddr>,
    raw: Value,
) -> Result<i64, AppError> {
    let ip = client_ip::extract(headers, peer_addr, &state.config.trusted_proxies);

    if let Err(retry_after) = state.contact_limiter.check(
        ip,
        state.config.rate_limit,
        state.config.rate_limit_window_secs,
    ) {
        tracing::debug!("Rate limited {ip}, retry after {retry_after}s");
        return Err(AppError::RateLimited);
    }

    let name = raw.get("name").and_then(Value::as_str);
    let email_field = raw.get("email").and_then(Value::as_str);
    let phone = raw.get("phone").and_then(Value::as_str);
    let message = raw.get("message").and_then(Value::as_str);

    // First failure wins, in field order: name, email, phone.
    if let Some(err) = validate::validate_name(name)
        .or_else(|| validate::validate_email(email_field))
        .or_else(|| validate::validate_phone(phone))
    {
        return Err(AppError::Validation(err.to_string()));
    }

    let name = sanitize(name.unwrap_or_default());
    let email_field = sanitize(email_field.unwrap_or_default());
    let phone = sanitize(phone.unwrap_or_default());
    let message = sanitize(message.unwrap_or_default());

    let contact = db::contacts::insert(&state.pool, &name, &email_field, &phone, &message).await?;

    tracing::info!("Contact saved: id={}, name={}, ip={ip}", contact.id, contact.name);

    match &state.mailer {
        Some(mailer) => {
            let mailer = mailer.clone();
            let retries = state.config.smtp_retries;
            let id = contact.id;
            let contact = contact.clone();
            tokio::spawn(async move {
                match email::notify_with_retry(mailer.as_ref(), &contact, retries).await {
                    Ok(()) => tracing::info!("Email notification sent for contact {id}"),
                    Err(e) => {
                        tracing::error!("Email notification failed for contact {id}: {e}")
                    }
                }
            });
        }
        None => tracing::warn!("SMTP not configured, skipping notification for contact {}", contact.id),
    }

    Ok(contact.id)
}
