mod api;
mod category;
mod comment;
mod image;
mod product;
mod token;

pub use self::api::ApiResponse;
pub use self::category::CategoryResponse;
pub use self::comment::CommentResponse;
pub use self::image::{ImageResponse, ImageUrlResponse};
pub use self::product::{ProductResponse, build_product_response, build_product_responses};
pub use self::token::{AuthTokenResponse, TokenResponse};
