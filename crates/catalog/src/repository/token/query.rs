use crate::abstract_trait::AuthTokenQueryRepositoryTrait;
use async_trait::async_trait;
use shared::config::ConnectionPool;
use shared::errors::RepositoryError;
use shared::model::AuthToken as AuthTokenModel;
use tracing::error;

pub struct AuthTokenQueryRepository {
    db: ConnectionPool,
}

impl AuthTokenQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuthTokenQueryRepositoryTrait for AuthTokenQueryRepository {
    async fn find_by_key(&self, key: &str) -> Result<Option<AuthTokenModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, AuthTokenModel>(
            r#"
            SELECT token_key, user_id, created_at
            FROM auth_tokens
            WHERE token_key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to look up auth token: {:?}", err);
            RepositoryError::from(err)
        })
    }

    async fn find_by_user(
        &self,
        user_id: i64,
    ) -> Result<Option<AuthTokenModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, AuthTokenModel>(
            r#"
            SELECT token_key, user_id, created_at
            FROM auth_tokens
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to fetch auth token for user {}: {:?}", user_id, err);
            RepositoryError::from(err)
        })
    }
}
