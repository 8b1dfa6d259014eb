use crate::abstract_trait::CommentQueryRepositoryTrait;
use async_trait::async_trait;
use shared::config::ConnectionPool;
use shared::errors::RepositoryError;
use shared::model::Comment as CommentModel;
use tracing::error;

pub struct CommentQueryRepository {
    db: ConnectionPool,
}

impl CommentQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentQueryRepositoryTrait for CommentQueryRepository {
    async fn find_all(&self) -> Result<Vec<CommentModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, CommentModel>(
            r#"
            SELECT comment_id, body, rating, user_id, product_id,
                   good_comment, bad_comment, attachment, created_at
            FROM comments
            ORDER BY created_at
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to list comments: {:?}", err);
            RepositoryError::from(err)
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<CommentModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, CommentModel>(
            r#"
            SELECT comment_id, body, rating, user_id, product_id,
                   good_comment, bad_comment, attachment, created_at
            FROM comments
            WHERE comment_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to fetch comment {}: {:?}", id, err);
            RepositoryError::from(err)
        })
    }
}
