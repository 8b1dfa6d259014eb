use crate::abstract_trait::{
    CommentCommandServiceTrait, DynCommentCommandRepository, DynCommentQueryRepository,
    DynProductQueryRepository,
};
use crate::domain::{
    requests::{CreateCommentRequest, NewComment, UpdateCommentRequest},
    response::{ApiResponse, CommentResponse},
};
use crate::storage::{FileStorage, UploadedFile};
use async_trait::async_trait;
use chrono::Duration;
use shared::abstract_trait::DynClock;
use shared::errors::{RepositoryError, ServiceError};
use shared::model::Comment as CommentModel;
use std::sync::Arc;
use tracing::{info, warn};

pub struct CommentCommandServiceDeps {
    pub command: DynCommentCommandRepository,
    pub query: DynCommentQueryRepository,
    pub products: DynProductQueryRepository,
    pub clock: DynClock,
    pub storage: Arc<FileStorage>,
}

pub struct CommentCommandService {
    command: DynCommentCommandRepository,
    query: DynCommentQueryRepository,
    products: DynProductQueryRepository,
    clock: DynClock,
    storage: Arc<FileStorage>,
}

impl CommentCommandService {
    pub fn new(deps: CommentCommandServiceDeps) -> Self {
        let CommentCommandServiceDeps {
            command,
            query,
            products,
            clock,
            storage,
        } = deps;

        Self {
            command,
            query,
            products,
            clock,
            storage,
        }
    }

    /// Only the creating user may mutate a comment; anonymous comments have
    /// no owner and stay immutable.
    fn ensure_owner(comment: &CommentModel, caller: Option<i64>) -> Result<(), ServiceError> {
        match comment.user_id {
            Some(owner) if caller == Some(owner) => Ok(()),
            _ => {
                warn!(
                    "❌ Caller {:?} is not the owner of comment {}",
                    caller, comment.comment_id
                );
                Err(ServiceError::Forbidden(
                    "You can only modify your own comments".to_string(),
                ))
            }
        }
    }

    fn ensure_within_window(
        &self,
        comment: &CommentModel,
        window: Duration,
        message: &str,
    ) -> Result<(), ServiceError> {
        let elapsed = self.clock.now() - comment.created_at;
        if elapsed >= window {
            return Err(ServiceError::Forbidden(message.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CommentCommandServiceTrait for CommentCommandService {
    async fn create(
        &self,
        req: &CreateCommentRequest,
        caller: Option<i64>,
        attachment: Option<UploadedFile>,
    ) -> Result<ApiResponse<CommentResponse>, ServiceError> {
        let product_id = req.product_id.ok_or_else(|| {
            ServiceError::Validation(vec!["product_id: This field is required.".to_string()])
        })?;

        // the referenced product must exist before any row is written
        self.products
            .find_by_id(product_id)
            .await
            .map_err(ServiceError::Repo)?
            .ok_or(ServiceError::Repo(RepositoryError::NotFound))?;

        let attachment_path = match &attachment {
            Some(file) => Some(self.storage.save("comments", file).await?),
            None => None,
        };

        let comment = self
            .command
            .create(&NewComment {
                body: req.body.clone(),
                rating: req.rating,
                user_id: caller,
                product_id,
                good_comment: req.good_comment.clone(),
                bad_comment: req.bad_comment.clone(),
                attachment: attachment_path,
            })
            .await
            .map_err(ServiceError::Repo)?;

        info!(
            "✅ Comment {} created on product {}",
            comment.comment_id, product_id
        );
        Ok(ApiResponse::success(
            "Comment created successfully",
            CommentResponse::from_model(comment, &self.storage),
        ))
    }

    async fn update(
        &self,
        id: i64,
        req: &UpdateCommentRequest,
        caller: Option<i64>,
    ) -> Result<ApiResponse<CommentResponse>, ServiceError> {
        let comment = self
            .query
            .find_by_id(id)
            .await
            .map_err(ServiceError::Repo)?
            .ok_or(ServiceError::Repo(RepositoryError::NotFound))?;

        Self::ensure_owner(&comment, caller)?;
        self.ensure_within_window(
            &comment,
            Duration::minutes(2),
            "More than 2 minutes have passed to update the comment.",
        )?;

        let updated = self
            .command
            .update(id, req)
            .await
            .map_err(ServiceError::Repo)?;

        Ok(ApiResponse::success(
            "Comment updated successfully",
            CommentResponse::from_model(updated, &self.storage),
        ))
    }

    async fn delete(
        &self,
        id: i64,
        caller: Option<i64>,
    ) -> Result<ApiResponse<bool>, ServiceError> {
        let comment = self
            .query
            .find_by_id(id)
            .await
            .map_err(ServiceError::Repo)?
            .ok_or(ServiceError::Repo(RepositoryError::NotFound))?;

        Self::ensure_owner(&comment, caller)?;
        self.ensure_within_window(
            &comment,
            Duration::minutes(1),
            "More than 1 minute has passed to delete the comment.",
        )?;

        self.command.delete(id).await.map_err(ServiceError::Repo)?;

        if let Some(path) = &comment.attachment {
            self.storage.remove(path).await;
        }

        Ok(ApiResponse::success("Comment deleted successfully", true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::{
        CommentCommandRepositoryTrait, CommentQueryRepositoryTrait, ProductQueryRepositoryTrait,
    };
    use crate::domain::requests::ProductListQuery;
    use chrono::{TimeZone, Utc};
    use shared::abstract_trait::Clock;
    use shared::model::Product as ProductModel;
    use shared::utils::FixedClock;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicI64, Ordering};

    #[derive(Default)]
    struct MockCommentStore {
        comments: Mutex<Vec<CommentModel>>,
        next_id: AtomicI64,
    }

    struct MockCommentCommandRepo {
        store: Arc<MockCommentStore>,
        clock: Arc<FixedClock>,
    }

    #[async_trait]
    impl CommentCommandRepositoryTrait for MockCommentCommandRepo {
        async fn create(&self, comment: &NewComment) -> Result<CommentModel, RepositoryError> {
            let created = CommentModel {
                comment_id: self.store.next_id.fetch_add(1, Ordering::SeqCst) + 1,
                body: comment.body.clone(),
                rating: comment.rating,
                user_id: comment.user_id,
                product_id: comment.product_id,
                good_comment: comment.good_comment.clone(),
                bad_comment: comment.bad_comment.clone(),
                attachment: comment.attachment.clone(),
                created_at: self.clock.now(),
            };
            self.store.comments.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn update(
            &self,
            id: i64,
            req: &UpdateCommentRequest,
        ) -> Result<CommentModel, RepositoryError> {
            let mut comments = self.store.comments.lock().unwrap();
            let comment = comments
                .iter_mut()
                .find(|c| c.comment_id == id)
                .ok_or(RepositoryError::NotFound)?;
            comment.body = req.body.clone();
            comment.rating = req.rating;
            comment.good_comment = req.good_comment.clone();
            comment.bad_comment = req.bad_comment.clone();
            Ok(comment.clone())
        }

        async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
            let mut comments = self.store.comments.lock().unwrap();
            let before = comments.len();
            comments.retain(|c| c.comment_id != id);
            if comments.len() == before {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        }
    }

    struct MockCommentQueryRepo(Arc<MockCommentStore>);

    #[async_trait]
    impl CommentQueryRepositoryTrait for MockCommentQueryRepo {
        async fn find_all(&self) -> Result<Vec<CommentModel>, RepositoryError> {
            Ok(self.0.comments.lock().unwrap().clone())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<CommentModel>, RepositoryError> {
            Ok(self
                .0
                .comments
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.comment_id == id)
                .cloned())
        }
    }

    struct SingleProductRepo;

    #[async_trait]
    impl ProductQueryRepositoryTrait for SingleProductRepo {
        async fn find_all(
            &self,
            _filter: &ProductListQuery,
        ) -> Result<Vec<ProductModel>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<ProductModel>, RepositoryError> {
            Ok((id == 1).then(|| ProductModel {
                product_id: 1,
                name: "Phone".into(),
                description: "".into(),
                price: 500_000,
                category_id: 1,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }))
        }

        async fn find_by_category_ids(
            &self,
            _category_ids: &[i64],
        ) -> Result<Vec<ProductModel>, RepositoryError> {
            Ok(Vec::new())
        }
    }

    fn service(dir: &tempfile::TempDir) -> (CommentCommandService, Arc<FixedClock>) {
        let base = Utc.with_ymd_and_hms(2025, 8, 6, 12, 0, 0).unwrap();
        let clock = Arc::new(FixedClock::at(base));
        let store = Arc::new(MockCommentStore::default());

        let service = CommentCommandService::new(CommentCommandServiceDeps {
            command: Arc::new(MockCommentCommandRepo {
                store: store.clone(),
                clock: clock.clone(),
            }),
            query: Arc::new(MockCommentQueryRepo(store)),
            products: Arc::new(SingleProductRepo),
            clock: clock.clone(),
            storage: Arc::new(FileStorage::new(dir.path(), "http://localhost:8000")),
        });

        (service, clock)
    }

    fn create_request() -> CreateCommentRequest {
        CreateCommentRequest {
            body: "Solid phone".into(),
            rating: 4,
            product_id: Some(1),
            good_comment: None,
            bad_comment: None,
        }
    }

    fn update_request() -> UpdateCommentRequest {
        UpdateCommentRequest {
            body: "Edited".into(),
            rating: 3,
            good_comment: None,
            bad_comment: None,
        }
    }

    #[tokio::test]
    async fn create_requires_a_resolvable_product() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (service, _) = service(&dir);

        let missing = CreateCommentRequest {
            product_id: None,
            ..create_request()
        };
        let err = service.create(&missing, Some(1), None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let unknown = CreateCommentRequest {
            product_id: Some(99),
            ..create_request()
        };
        let err = service.create(&unknown, Some(1), None).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Repo(RepositoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn update_window_closes_after_two_minutes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (service, clock) = service(&dir);

        let created = service
            .create(&create_request(), Some(1), None)
            .await
            .expect("create");
        let id = created.data.id;

        // one minute in: still allowed
        clock.advance(Duration::minutes(1));
        let updated = service
            .update(id, &update_request(), Some(1))
            .await
            .expect("update within window");
        assert_eq!(updated.data.body, "Edited");

        // three minutes in: window closed, regardless of caller
        clock.advance(Duration::minutes(2));
        let err = service
            .update(id, &update_request(), Some(1))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[tokio::test]
    async fn delete_window_closes_after_one_minute() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (service, clock) = service(&dir);

        let first = service
            .create(&create_request(), Some(1), None)
            .await
            .expect("create");

        // 30 seconds in: delete succeeds
        clock.advance(Duration::seconds(30));
        service
            .delete(first.data.id, Some(1))
            .await
            .expect("delete within window");

        let second = service
            .create(&create_request(), Some(1), None)
            .await
            .expect("create again");

        // 90 seconds in: window closed
        clock.advance(Duration::seconds(90));
        let err = service.delete(second.data.id, Some(1)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[tokio::test]
    async fn only_the_owner_may_mutate() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (service, _) = service(&dir);

        let created = service
            .create(&create_request(), Some(1), None)
            .await
            .expect("create");
        let id = created.data.id;

        let err = service
            .update(id, &update_request(), Some(2))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        let err = service.delete(id, None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[tokio::test]
    async fn anonymous_comments_are_immutable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (service, _) = service(&dir);

        let created = service
            .create(&create_request(), None, None)
            .await
            .expect("anonymous create");
        assert_eq!(created.data.user, None);

        // not even an authenticated caller may touch it
        let err = service
            .update(created.data.id, &update_request(), Some(1))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }
}
