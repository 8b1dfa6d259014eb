use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Durable opaque API token, one per user, reused across logins.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuthToken {
    pub token_key: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}
