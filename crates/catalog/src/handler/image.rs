use crate::{
    abstract_trait::{DynImageCommandService, DynImageQueryService},
    domain::{
        requests::CreateImageRequest,
        response::{ApiResponse, ImageResponse, ImageUrlResponse},
    },
    handler::forms::read_multipart,
    middleware::{auth_context_middleware, weekday_gate_middleware},
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Multipart, Path},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use shared::errors::HttpError;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/images/{id}/",
    tag = "Image",
    params(("id" = i64, Path, description = "Image ID")),
    responses(
        (status = 200, description = "Absolute URL of the stored file", body = ImageUrlResponse),
        (status = 404, description = "Unknown image")
    )
)]
pub async fn get_image(
    Extension(service): Extension<DynImageQueryService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_url(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/images/",
    tag = "Image",
    request_body = CreateImageRequest,
    responses(
        (status = 201, description = "Image attached to the product", body = ApiResponse<ImageResponse>),
        (status = 400, description = "Missing file or unknown product"),
        (status = 403, description = "Weekend")
    )
)]
pub async fn create_image(
    Extension(service): Extension<DynImageCommandService>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpError> {
    let mut form = read_multipart(&mut multipart).await?;

    let payload = CreateImageRequest {
        product: form.require_i64("product")?,
        is_primary: form.bool_flag("is_primary"),
    };
    let file = form
        .take_file("image")
        .ok_or_else(|| HttpError::BadRequest("image: This field is required.".to_string()))?;

    let response = service.create(&payload, file).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/images/{id}/",
    tag = "Image",
    params(("id" = i64, Path, description = "Image ID")),
    responses(
        (status = 200, description = "Image removed", body = ApiResponse<bool>),
        (status = 403, description = "Weekend"),
        (status = 404, description = "Unknown image")
    )
)]
pub async fn delete_image(
    Extension(service): Extension<DynImageCommandService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn image_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/images/", post(create_image))
        .route("/images/{id}/", get(get_image).delete(delete_image))
        .route_layer(middleware::from_fn(weekday_gate_middleware))
        .route_layer(middleware::from_fn(auth_context_middleware))
        .layer(Extension(app_state.di_container.image_query.clone()))
        .layer(Extension(app_state.di_container.image_command.clone()))
        .layer(Extension(app_state.di_container.auth_tokens.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
        .layer(Extension(app_state.clock.clone()))
}
