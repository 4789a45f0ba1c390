use std::net::SocketAddr;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{ConnectInfo, State};
use axum::http::HeaderMap;
use serde_json::{json, Value};

use crate::db;
use crate::error::AppError;
use crate::state::SharedState;
use crate::submission::{parser, pipeline};

pub async fn submit(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let content_type = headers.get("content-type").and_then(|v| v.to_str().ok());

    let raw = parser::parse_body(content_type, &body).map_err(AppError::Validation)?;

    let id = pipeline::run(&state, &headers, Some(addr.ip()), raw).await?;

    Ok(Json(json!({
        "ok": true,
        "message": "Contact form submitted successfully",
        "id": id,
    })))
}

/// Historical submissions, newest first.
pub async fn list(State(state): State<SharedState>) -> Result<Json<Value>, AppError> {
    let contacts = db::contacts::list_all(&state.pool).await?;

    Ok(Json(json!({
        "ok": true,
        "contacts": contacts,
    })))
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
