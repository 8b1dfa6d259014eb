use crate::abstract_trait::{
    DynCategoryQueryRepository, DynImageCommandRepository, DynImageQueryRepository,
    DynProductCommandRepository, DynProductQueryRepository, ProductCommandServiceTrait,
};
use crate::domain::{
    requests::{CreateProductRequest, UpdateProductRequest},
    response::{ApiResponse, ProductResponse, build_product_response},
};
use crate::storage::{FileStorage, UploadedFile};
use async_trait::async_trait;
use shared::errors::{RepositoryError, ServiceError};
use std::sync::Arc;
use tracing::info;

pub struct ProductCommandServiceDeps {
    pub command: DynProductCommandRepository,
    pub query: DynProductQueryRepository,
    pub categories: DynCategoryQueryRepository,
    pub images_query: DynImageQueryRepository,
    pub images_command: DynImageCommandRepository,
    pub storage: Arc<FileStorage>,
}

pub struct ProductCommandService {
    command: DynProductCommandRepository,
    query: DynProductQueryRepository,
    categories: DynCategoryQueryRepository,
    images_query: DynImageQueryRepository,
    images_command: DynImageCommandRepository,
    storage: Arc<FileStorage>,
}

impl ProductCommandService {
    pub fn new(deps: ProductCommandServiceDeps) -> Self {
        let ProductCommandServiceDeps {
            command,
            query,
            categories,
            images_query,
            images_command,
            storage,
        } = deps;

        Self {
            command,
            query,
            categories,
            images_query,
            images_command,
            storage,
        }
    }

    async fn ensure_category_exists(&self, category_id: i64) -> Result<(), ServiceError> {
        let exists = self
            .categories
            .find_by_id(category_id)
            .await
            .map_err(ServiceError::Repo)?
            .is_some();

        if exists {
            Ok(())
        } else {
            Err(ServiceError::Validation(vec![format!(
                "category: invalid category id {category_id}"
            )]))
        }
    }

    /// Stores the uploaded file and attaches it as the product's primary
    /// image; any previous primary rows are removed first, files included.
    async fn replace_primary_image(
        &self,
        product_id: i64,
        file: &UploadedFile,
    ) -> Result<(), ServiceError> {
        let removed = self
            .images_command
            .delete_primary_for_product(product_id)
            .await
            .map_err(ServiceError::Repo)?;

        let path = self.storage.save("products", file).await?;
        self.images_command
            .create(product_id, &path, true)
            .await
            .map_err(ServiceError::Repo)?;

        for old in removed {
            self.storage.remove(&old.file_path).await;
        }

        Ok(())
    }

    async fn assemble(&self, product: shared::model::Product) -> Result<ProductResponse, ServiceError> {
        let images = self
            .images_query
            .find_by_product(product.product_id)
            .await
            .map_err(ServiceError::Repo)?;
        Ok(build_product_response(product, images, &self.storage))
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create(
        &self,
        req: &CreateProductRequest,
        image: Option<UploadedFile>,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        self.ensure_category_exists(req.category).await?;

        let product = self.command.create(req).await.map_err(ServiceError::Repo)?;

        if let Some(file) = image {
            let path = self.storage.save("products", &file).await?;
            self.images_command
                .create(product.product_id, &path, true)
                .await
                .map_err(ServiceError::Repo)?;
        }

        info!("✅ Product '{}' created", product.name);
        let data = self.assemble(product).await?;
        Ok(ApiResponse::success("Product created successfully", data))
    }

    async fn update(
        &self,
        id: i64,
        req: &UpdateProductRequest,
        image: Option<UploadedFile>,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        self.query
            .find_by_id(id)
            .await
            .map_err(ServiceError::Repo)?
            .ok_or(ServiceError::Repo(RepositoryError::NotFound))?;

        self.ensure_category_exists(req.category).await?;

        if let Some(file) = &image {
            self.replace_primary_image(id, file).await?;
        }

        let product = self
            .command
            .update(id, req)
            .await
            .map_err(ServiceError::Repo)?;

        info!("🔄 Product {} updated", id);
        let data = self.assemble(product).await?;
        Ok(ApiResponse::success("Product updated successfully", data))
    }

    async fn delete(&self, id: i64) -> Result<ApiResponse<bool>, ServiceError> {
        self.command.delete(id).await.map_err(ServiceError::Repo)?;
        Ok(ApiResponse::success("Product deleted successfully", true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::{
        CategoryQueryRepositoryTrait, ImageCommandRepositoryTrait, ImageQueryRepositoryTrait,
        ProductCommandRepositoryTrait, ProductQueryRepositoryTrait,
    };
    use crate::domain::requests::ProductListQuery;
    use chrono::Utc;
    use shared::model::{Category as CategoryModel, Image as ImageModel, Product as ProductModel};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicI64, Ordering};

    struct MockCategoryRepo;

    #[async_trait]
    impl CategoryQueryRepositoryTrait for MockCategoryRepo {
        async fn find_all(&self) -> Result<Vec<CategoryModel>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<CategoryModel>, RepositoryError> {
            Ok((id == 1).then(|| CategoryModel {
                category_id: 1,
                name: "Phones".into(),
            }))
        }
    }

    #[derive(Default)]
    struct MockProductStore {
        products: Mutex<Vec<ProductModel>>,
        next_id: AtomicI64,
    }

    struct MockProductCommandRepo(Arc<MockProductStore>);

    #[async_trait]
    impl ProductCommandRepositoryTrait for MockProductCommandRepo {
        async fn create(
            &self,
            req: &CreateProductRequest,
        ) -> Result<ProductModel, RepositoryError> {
            let product = ProductModel {
                product_id: self.0.next_id.fetch_add(1, Ordering::SeqCst) + 1,
                name: req.name.clone(),
                description: req.description.clone(),
                price: req.price,
                category_id: req.category,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            self.0.products.lock().unwrap().push(product.clone());
            Ok(product)
        }

        async fn update(
            &self,
            id: i64,
            req: &UpdateProductRequest,
        ) -> Result<ProductModel, RepositoryError> {
            let mut products = self.0.products.lock().unwrap();
            let product = products
                .iter_mut()
                .find(|p| p.product_id == id)
                .ok_or(RepositoryError::NotFound)?;
            product.name = req.name.clone();
            product.description = req.description.clone();
            product.price = req.price;
            product.category_id = req.category;
            Ok(product.clone())
        }

        async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
            let mut products = self.0.products.lock().unwrap();
            let before = products.len();
            products.retain(|p| p.product_id != id);
            if products.len() == before {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        }
    }

    struct MockProductQueryRepo(Arc<MockProductStore>);

    #[async_trait]
    impl ProductQueryRepositoryTrait for MockProductQueryRepo {
        async fn find_all(
            &self,
            _filter: &ProductListQuery,
        ) -> Result<Vec<ProductModel>, RepositoryError> {
            Ok(self.0.products.lock().unwrap().clone())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<ProductModel>, RepositoryError> {
            Ok(self
                .0
                .products
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.product_id == id)
                .cloned())
        }

        async fn find_by_category_ids(
            &self,
            _category_ids: &[i64],
        ) -> Result<Vec<ProductModel>, RepositoryError> {
            Ok(Vec::new())
        }
    }

    #[derive(Default)]
    struct MockImageStore {
        images: Mutex<Vec<ImageModel>>,
        next_id: AtomicI64,
    }

    struct MockImageCommandRepo(Arc<MockImageStore>);

    #[async_trait]
    impl ImageCommandRepositoryTrait for MockImageCommandRepo {
        async fn create(
            &self,
            product_id: i64,
            file_path: &str,
            is_primary: bool,
        ) -> Result<ImageModel, RepositoryError> {
            let mut images = self.0.images.lock().unwrap();
            if is_primary {
                for image in images.iter_mut().filter(|i| i.product_id == product_id) {
                    image.is_primary = false;
                }
            }
            let image = ImageModel {
                image_id: self.0.next_id.fetch_add(1, Ordering::SeqCst) + 1,
                product_id,
                file_path: file_path.to_string(),
                is_primary,
            };
            images.push(image.clone());
            Ok(image)
        }

        async fn delete(&self, id: i64) -> Result<Option<ImageModel>, RepositoryError> {
            let mut images = self.0.images.lock().unwrap();
            let found = images.iter().position(|i| i.image_id == id);
            Ok(found.map(|idx| images.remove(idx)))
        }

        async fn delete_primary_for_product(
            &self,
            product_id: i64,
        ) -> Result<Vec<ImageModel>, RepositoryError> {
            let mut images = self.0.images.lock().unwrap();
            let (removed, kept): (Vec<ImageModel>, Vec<ImageModel>) = images
                .drain(..)
                .partition(|i| i.product_id == product_id && i.is_primary);
            *images = kept;
            Ok(removed)
        }
    }

    struct MockImageQueryRepo(Arc<MockImageStore>);

    #[async_trait]
    impl ImageQueryRepositoryTrait for MockImageQueryRepo {
        async fn find_by_id(&self, id: i64) -> Result<Option<ImageModel>, RepositoryError> {
            Ok(self
                .0
                .images
                .lock()
                .unwrap()
                .iter()
                .find(|i| i.image_id == id)
                .cloned())
        }

        async fn find_by_product(
            &self,
            product_id: i64,
        ) -> Result<Vec<ImageModel>, RepositoryError> {
            Ok(self
                .0
                .images
                .lock()
                .unwrap()
                .iter()
                .filter(|i| i.product_id == product_id)
                .cloned()
                .collect())
        }

        async fn find_by_product_ids(
            &self,
            _product_ids: &[i64],
        ) -> Result<Vec<ImageModel>, RepositoryError> {
            Ok(Vec::new())
        }
    }

    fn service(dir: &tempfile::TempDir) -> (ProductCommandService, Arc<MockImageStore>) {
        let products = Arc::new(MockProductStore::default());
        let images = Arc::new(MockImageStore::default());
        let storage = Arc::new(FileStorage::new(dir.path(), "http://localhost:8000"));

        let service = ProductCommandService::new(ProductCommandServiceDeps {
            command: Arc::new(MockProductCommandRepo(products.clone())),
            query: Arc::new(MockProductQueryRepo(products.clone())),
            categories: Arc::new(MockCategoryRepo),
            images_query: Arc::new(MockImageQueryRepo(images.clone())),
            images_command: Arc::new(MockImageCommandRepo(images.clone())),
            storage,
        });

        (service, images)
    }

    fn create_request() -> CreateProductRequest {
        CreateProductRequest {
            name: "Phone".into(),
            description: "flagship".into(),
            price: 500_000,
            category: 1,
        }
    }

    fn file(name: &str) -> UploadedFile {
        UploadedFile {
            file_name: name.into(),
            bytes: vec![0xFF, 0xD8],
        }
    }

    #[tokio::test]
    async fn unknown_category_fails_validation() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (service, _) = service(&dir);

        let req = CreateProductRequest {
            category: 99,
            ..create_request()
        };
        let err = service.create(&req, None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn create_with_file_yields_one_primary_image() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (service, images) = service(&dir);

        let created = service
            .create(&create_request(), Some(file("front.jpg")))
            .await
            .expect("create");

        assert_eq!(created.data.images.len(), 1);
        assert!(created.data.images[0].is_primary);

        let primaries = images
            .images
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.is_primary)
            .count();
        assert_eq!(primaries, 1);
    }

    #[tokio::test]
    async fn update_with_file_replaces_the_primary_image() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (service, images) = service(&dir);

        let created = service
            .create(&create_request(), Some(file("front.jpg")))
            .await
            .expect("create");
        let product_id = created.data.id;
        let first_image_id = created.data.images[0].id;

        let update = UpdateProductRequest {
            name: "Phone".into(),
            description: "flagship".into(),
            price: 450_000,
            category: 1,
        };
        let updated = service
            .update(product_id, &update, Some(file("back.jpg")))
            .await
            .expect("update");

        assert_eq!(updated.data.price, 450_000);
        assert_eq!(updated.data.images.len(), 1);
        assert!(updated.data.images[0].is_primary);
        assert_ne!(updated.data.images[0].id, first_image_id);

        let stored = images.images.lock().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored.iter().filter(|i| i.is_primary).count(), 1);
    }

    #[tokio::test]
    async fn update_of_missing_product_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (service, _) = service(&dir);

        let update = UpdateProductRequest {
            name: "Phone".into(),
            description: "".into(),
            price: 1,
            category: 1,
        };
        let err = service.update(42, &update, None).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Repo(RepositoryError::NotFound)
        ));
    }
}
