use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::email::Mailer;
use crate::rate_limit::ContactRateLimiter;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub mailer: Option<Arc<dyn Mailer>>,
    pub contact_limiter: ContactRateLimiter,
}
