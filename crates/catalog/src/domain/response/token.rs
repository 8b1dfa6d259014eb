use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JWT login variant: short-lived access token plus refresh token.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// Opaque-token login variant: the durable per-user key.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct AuthTokenResponse {
    pub token: String,
}
