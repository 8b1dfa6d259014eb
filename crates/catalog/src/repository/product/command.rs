use crate::abstract_trait::{DynProductWriteHook, ProductCommandRepositoryTrait};
use crate::domain::requests::{CreateProductRequest, UpdateProductRequest};
use async_trait::async_trait;
use shared::config::ConnectionPool;
use shared::errors::RepositoryError;
use shared::model::Product as ProductModel;
use tracing::{error, info};

/// Product writes always run the attached write hook, so cache invalidation
/// happens on every path that saves a product, not just the HTTP handlers.
pub struct ProductCommandRepository {
    db: ConnectionPool,
    hook: DynProductWriteHook,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool, hook: DynProductWriteHook) -> Self {
        Self { db, hook }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create(&self, req: &CreateProductRequest) -> Result<ProductModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let product = sqlx::query_as::<_, ProductModel>(
            r#"
            INSERT INTO products (name, description, price, category_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, current_timestamp, current_timestamp)
            RETURNING product_id, name, description, price, category_id, created_at, updated_at
            "#,
        )
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.price)
        .bind(req.category)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create product {}: {:?}", req.name, err);
            RepositoryError::from(err)
        })?;

        info!(
            "✅ Created product ID {} ({})",
            product.product_id, product.name
        );
        self.hook.on_product_saved(product.product_id).await;
        Ok(product)
    }

    async fn update(
        &self,
        id: i64,
        req: &UpdateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let product = sqlx::query_as::<_, ProductModel>(
            r#"
            UPDATE products
            SET name = $2,
                description = $3,
                price = $4,
                category_id = $5,
                updated_at = current_timestamp
            WHERE product_id = $1
            RETURNING product_id, name, description, price, category_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.price)
        .bind(req.category)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update product {}: {:?}", id, err);
            RepositoryError::from(err)
        })?
        .ok_or(RepositoryError::NotFound)?;

        info!("🔄 Updated product ID {}", product.product_id);
        self.hook.on_product_saved(product.product_id).await;
        Ok(product)
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query(
            r#"
            DELETE FROM products
            WHERE product_id = $1
            "#,
        )
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to delete product {}: {:?}", id, err);
            RepositoryError::from(err)
        })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted product ID {}", id);
        self.hook.on_product_saved(id).await;
        Ok(())
    }
}
