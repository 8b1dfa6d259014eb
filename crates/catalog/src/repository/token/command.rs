use crate::abstract_trait::{AuthTokenCommandRepositoryTrait, RevokedTokenRepositoryTrait};
use async_trait::async_trait;
use shared::config::ConnectionPool;
use shared::errors::RepositoryError;
use shared::model::AuthToken as AuthTokenModel;
use tracing::{error, info};

pub struct AuthTokenCommandRepository {
    db: ConnectionPool,
}

impl AuthTokenCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuthTokenCommandRepositoryTrait for AuthTokenCommandRepository {
    async fn create(&self, user_id: i64, key: &str) -> Result<AuthTokenModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let token = sqlx::query_as::<_, AuthTokenModel>(
            r#"
            INSERT INTO auth_tokens (token_key, user_id, created_at)
            VALUES ($1, $2, current_timestamp)
            RETURNING token_key, user_id, created_at
            "#,
        )
        .bind(key)
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create auth token for user {}: {:?}", user_id, err);
            RepositoryError::from(err)
        })?;

        info!("🔑 Issued auth token for user {}", user_id);
        Ok(token)
    }

    async fn delete_by_key(&self, key: &str) -> Result<(), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query(
            r#"
            DELETE FROM auth_tokens
            WHERE token_key = $1
            "#,
        )
        .bind(key)
        .execute(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to delete auth token: {:?}", err);
            RepositoryError::from(err)
        })?;

        info!("🔒 Deleted auth token");
        Ok(())
    }
}

pub struct RevokedTokenRepository {
    db: ConnectionPool,
}

impl RevokedTokenRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RevokedTokenRepositoryTrait for RevokedTokenRepository {
    async fn revoke(&self, token: &str) -> Result<(), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query(
            r#"
            INSERT INTO revoked_refresh_tokens (token, revoked_at)
            VALUES ($1, current_timestamp)
            ON CONFLICT (token) DO NOTHING
            "#,
        )
        .bind(token)
        .execute(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to revoke refresh token: {:?}", err);
            RepositoryError::from(err)
        })?;

        info!("🔒 Refresh token revoked");
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM revoked_refresh_tokens WHERE token = $1
            )
            "#,
        )
        .bind(token)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to check refresh token revocation: {:?}", err);
            RepositoryError::from(err)
        })
    }
}
