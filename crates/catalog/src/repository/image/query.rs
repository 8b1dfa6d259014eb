use crate::abstract_trait::ImageQueryRepositoryTrait;
use async_trait::async_trait;
use shared::config::ConnectionPool;
use shared::errors::RepositoryError;
use shared::model::Image as ImageModel;
use tracing::error;

pub struct ImageQueryRepository {
    db: ConnectionPool,
}

impl ImageQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ImageQueryRepositoryTrait for ImageQueryRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<ImageModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, ImageModel>(
            r#"
            SELECT image_id, product_id, file_path, is_primary
            FROM images
            WHERE image_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to fetch image {}: {:?}", id, err);
            RepositoryError::from(err)
        })
    }

    async fn find_by_product(&self, product_id: i64) -> Result<Vec<ImageModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, ImageModel>(
            r#"
            SELECT image_id, product_id, file_path, is_primary
            FROM images
            WHERE product_id = $1
            ORDER BY image_id
            "#,
        )
        .bind(product_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to list images for product {}: {:?}", product_id, err);
            RepositoryError::from(err)
        })
    }

    async fn find_by_product_ids(
        &self,
        product_ids: &[i64],
    ) -> Result<Vec<ImageModel>, RepositoryError> {
        if product_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, ImageModel>(
            r#"
            SELECT image_id, product_id, file_path, is_primary
            FROM images
            WHERE product_id = ANY($1)
            ORDER BY image_id
            "#,
        )
        .bind(product_ids.to_vec())
        .fetch_all(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to list images by products: {:?}", err);
            RepositoryError::from(err)
        })
    }
}
