use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub comment_id: i64,
    pub body: String,
    pub rating: i32,
    /// NULL for anonymous comments
    pub user_id: Option<i64>,
    pub product_id: i64,
    pub good_comment: Option<String>,
    pub bad_comment: Option<String>,
    pub attachment: Option<String>,
    /// stamped once at creation, never updated
    pub created_at: DateTime<Utc>,
}
