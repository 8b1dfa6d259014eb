use crate::abstract_trait::CommentCommandRepositoryTrait;
use crate::domain::requests::{NewComment, UpdateCommentRequest};
use async_trait::async_trait;
use shared::config::ConnectionPool;
use shared::errors::RepositoryError;
use shared::model::Comment as CommentModel;
use tracing::{error, info};

pub struct CommentCommandRepository {
    db: ConnectionPool,
}

impl CommentCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentCommandRepositoryTrait for CommentCommandRepository {
    async fn create(&self, comment: &NewComment) -> Result<CommentModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let created = sqlx::query_as::<_, CommentModel>(
            r#"
            INSERT INTO comments (body, rating, user_id, product_id,
                                  good_comment, bad_comment, attachment, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, current_timestamp)
            RETURNING comment_id, body, rating, user_id, product_id,
                      good_comment, bad_comment, attachment, created_at
            "#,
        )
        .bind(&comment.body)
        .bind(comment.rating)
        .bind(comment.user_id)
        .bind(comment.product_id)
        .bind(&comment.good_comment)
        .bind(&comment.bad_comment)
        .bind(&comment.attachment)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to create comment for product {}: {:?}",
                comment.product_id, err
            );
            RepositoryError::from(err)
        })?;

        info!(
            "✅ Created comment ID {} on product {}",
            created.comment_id, created.product_id
        );
        Ok(created)
    }

    async fn update(
        &self,
        id: i64,
        req: &UpdateCommentRequest,
    ) -> Result<CommentModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        // created_at is immutable, never part of the SET list
        let updated = sqlx::query_as::<_, CommentModel>(
            r#"
            UPDATE comments
            SET body = $2,
                rating = $3,
                good_comment = $4,
                bad_comment = $5
            WHERE comment_id = $1
            RETURNING comment_id, body, rating, user_id, product_id,
                      good_comment, bad_comment, attachment, created_at
            "#,
        )
        .bind(id)
        .bind(&req.body)
        .bind(req.rating)
        .bind(&req.good_comment)
        .bind(&req.bad_comment)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update comment {}: {:?}", id, err);
            RepositoryError::from(err)
        })?
        .ok_or(RepositoryError::NotFound)?;

        info!("🔄 Updated comment ID {}", updated.comment_id);
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query(
            r#"
            DELETE FROM comments
            WHERE comment_id = $1
            "#,
        )
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to delete comment {}: {:?}", id, err);
            RepositoryError::from(err)
        })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted comment ID {}", id);
        Ok(())
    }
}
