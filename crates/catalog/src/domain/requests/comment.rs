use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "Comment body is required"))]
    pub body: String,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    #[validate(required(message = "product_id: This field is required."))]
    pub product_id: Option<i64>,

    pub good_comment: Option<String>,
    pub bad_comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, message = "Comment body is required"))]
    pub body: String,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    pub good_comment: Option<String>,
    pub bad_comment: Option<String>,
}

/// Fully resolved comment row ready for insertion: the caller identity and
/// any stored attachment path have already been settled by the service.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub body: String,
    pub rating: i32,
    pub user_id: Option<i64>,
    pub product_id: i64,
    pub good_comment: Option<String>,
    pub bad_comment: Option<String>,
    pub attachment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> CreateCommentRequest {
        CreateCommentRequest {
            body: "Great phone".into(),
            rating: 5,
            product_id: Some(1),
            good_comment: None,
            bad_comment: None,
        }
    }

    #[test]
    fn ratings_outside_one_to_five_are_rejected() {
        for rating in [0, 6, -3, 100] {
            let req = CreateCommentRequest {
                rating,
                ..base_request()
            };
            assert!(req.validate().is_err(), "rating {rating} should fail");
        }

        for rating in 1..=5 {
            let req = CreateCommentRequest {
                rating,
                ..base_request()
            };
            assert!(req.validate().is_ok(), "rating {rating} should pass");
        }
    }

    #[test]
    fn missing_product_id_fails_validation() {
        let req = CreateCommentRequest {
            product_id: None,
            ..base_request()
        };
        assert!(req.validate().is_err());
    }
}
