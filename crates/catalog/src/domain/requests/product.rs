use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[validate(range(min = 0, message = "Price must not be negative"))]
    pub price: i64,

    /// id of the owning category
    pub category: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[validate(range(min = 0, message = "Price must not be negative"))]
    pub price: i64,

    pub category: i64,
}

/// List filters; unknown query parameters are silently ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
pub struct ProductListQuery {
    pub category: Option<i64>,
    pub price: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_price_is_rejected() {
        let req = CreateProductRequest {
            name: "Phone".into(),
            description: "".into(),
            price: -1,
            category: 1,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn zero_price_is_allowed() {
        let req = CreateProductRequest {
            name: "Phone".into(),
            description: "flagship".into(),
            price: 0,
            category: 1,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn unknown_filter_params_are_ignored() {
        let query: ProductListQuery =
            serde_json::from_str(r#"{"category": 3, "colour": "red"}"#).expect("deserialize");
        assert_eq!(query.category, Some(3));
        assert_eq!(query.price, None);
    }
}
