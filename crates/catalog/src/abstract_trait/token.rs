use crate::domain::{
    requests::{LoginRequest, LogoutJwtRequest, RefreshTokenRequest},
    response::{ApiResponse, AuthTokenResponse, TokenResponse},
};
use async_trait::async_trait;
use shared::errors::{RepositoryError, ServiceError};
use shared::model::AuthToken as AuthTokenModel;
use std::sync::Arc;

pub type DynAuthTokenQueryRepository = Arc<dyn AuthTokenQueryRepositoryTrait + Send + Sync>;
pub type DynAuthTokenCommandRepository = Arc<dyn AuthTokenCommandRepositoryTrait + Send + Sync>;
pub type DynRevokedTokenRepository = Arc<dyn RevokedTokenRepositoryTrait + Send + Sync>;
pub type DynAuthService = Arc<dyn AuthServiceTrait + Send + Sync>;

#[async_trait]
pub trait AuthTokenQueryRepositoryTrait {
    async fn find_by_key(&self, key: &str) -> Result<Option<AuthTokenModel>, RepositoryError>;
    async fn find_by_user(&self, user_id: i64)
    -> Result<Option<AuthTokenModel>, RepositoryError>;
}

#[async_trait]
pub trait AuthTokenCommandRepositoryTrait {
    async fn create(&self, user_id: i64, key: &str) -> Result<AuthTokenModel, RepositoryError>;
    async fn delete_by_key(&self, key: &str) -> Result<(), RepositoryError>;
}

/// Blacklist for refresh tokens invalidated by the JWT logout variant.
#[async_trait]
pub trait RevokedTokenRepositoryTrait {
    async fn revoke(&self, token: &str) -> Result<(), RepositoryError>;
    async fn is_revoked(&self, token: &str) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait AuthServiceTrait {
    async fn login_token(
        &self,
        req: &LoginRequest,
    ) -> Result<ApiResponse<AuthTokenResponse>, ServiceError>;
    async fn login_jwt(&self, req: &LoginRequest)
    -> Result<ApiResponse<TokenResponse>, ServiceError>;
    async fn logout_token(&self, token_key: &str) -> Result<ApiResponse<bool>, ServiceError>;
    async fn logout_jwt(&self, req: &LogoutJwtRequest)
    -> Result<ApiResponse<bool>, ServiceError>;
    async fn refresh_token(
        &self,
        req: &RefreshTokenRequest,
    ) -> Result<ApiResponse<TokenResponse>, ServiceError>;
}
