use crate::abstract_trait::ImageCommandRepositoryTrait;
use async_trait::async_trait;
use shared::config::ConnectionPool;
use shared::errors::RepositoryError;
use shared::model::Image as ImageModel;
use tracing::{error, info};

pub struct ImageCommandRepository {
    db: ConnectionPool,
}

impl ImageCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ImageCommandRepositoryTrait for ImageCommandRepository {
    async fn create(
        &self,
        product_id: i64,
        file_path: &str,
        is_primary: bool,
    ) -> Result<ImageModel, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        if is_primary {
            // the partial unique index on (product_id) WHERE is_primary
            // requires the previous primary to be demoted first
            sqlx::query(
                r#"
                UPDATE images
                SET is_primary = FALSE
                WHERE product_id = $1 AND is_primary
                "#,
            )
            .bind(product_id)
            .execute(&mut *tx)
            .await
            .map_err(|err| {
                error!(
                    "❌ Failed to demote primary image for product {}: {:?}",
                    product_id, err
                );
                RepositoryError::from(err)
            })?;
        }

        let image = sqlx::query_as::<_, ImageModel>(
            r#"
            INSERT INTO images (product_id, file_path, is_primary)
            VALUES ($1, $2, $3)
            RETURNING image_id, product_id, file_path, is_primary
            "#,
        )
        .bind(product_id)
        .bind(file_path)
        .bind(is_primary)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to create image for product {}: {:?}",
                product_id, err
            );
            RepositoryError::from(err)
        })?;

        tx.commit().await.map_err(RepositoryError::from)?;

        info!(
            "✅ Created image ID {} for product {} (primary: {})",
            image.image_id, product_id, is_primary
        );
        Ok(image)
    }

    async fn delete(&self, id: i64) -> Result<Option<ImageModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let image = sqlx::query_as::<_, ImageModel>(
            r#"
            DELETE FROM images
            WHERE image_id = $1
            RETURNING image_id, product_id, file_path, is_primary
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to delete image {}: {:?}", id, err);
            RepositoryError::from(err)
        })?;

        if image.is_some() {
            info!("🗑️ Deleted image ID {}", id);
        }
        Ok(image)
    }

    async fn delete_primary_for_product(
        &self,
        product_id: i64,
    ) -> Result<Vec<ImageModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let removed = sqlx::query_as::<_, ImageModel>(
            r#"
            DELETE FROM images
            WHERE product_id = $1 AND is_primary
            RETURNING image_id, product_id, file_path, is_primary
            "#,
        )
        .bind(product_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to delete primary images for product {}: {:?}",
                product_id, err
            );
            RepositoryError::from(err)
        })?;

        if !removed.is_empty() {
            info!(
                "🗑️ Removed {} primary image(s) for product {}",
                removed.len(),
                product_id
            );
        }
        Ok(removed)
    }
}
