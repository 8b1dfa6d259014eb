use crate::{
    abstract_trait::{DynProductCommandService, DynProductQueryService},
    domain::{
        requests::{CreateProductRequest, ProductListQuery, UpdateProductRequest},
        response::{ApiResponse, ProductResponse},
    },
    handler::forms::{is_multipart, read_multipart},
    middleware::{
        auth_context_middleware, validate::format_validation_errors, weekday_gate_middleware,
    },
    state::AppState,
    storage::UploadedFile,
};
use axum::{
    Json,
    extract::{Extension, FromRequest, Multipart, Path, Query, RawQuery, Request},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};
use shared::errors::HttpError;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use validator::Validate;

#[utoipa::path(
    get,
    path = "/products/",
    tag = "Product",
    params(ProductListQuery),
    responses(
        (status = 200, description = "Products matching the filters", body = ApiResponse<Vec<ProductResponse>>)
    )
)]
pub async fn list_products(
    Extension(service): Extension<DynProductQueryService>,
    Query(filter): Query<ProductListQuery>,
    RawQuery(raw_query): RawQuery,
) -> Result<impl IntoResponse, HttpError> {
    let response = service
        .find_all(&filter, raw_query.as_deref().unwrap_or_default())
        .await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/products/",
    tag = "Product",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created, optionally with a primary image", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Validation failure"),
        (status = 403, description = "Weekend")
    )
)]
pub async fn create_product(
    Extension(service): Extension<DynProductCommandService>,
    req: Request,
) -> Result<impl IntoResponse, HttpError> {
    let (payload, image) = if is_multipart(req.headers()) {
        let mut multipart = Multipart::from_request(req, &())
            .await
            .map_err(|e| HttpError::BadRequest(format!("Invalid multipart payload: {e}")))?;
        let mut form = read_multipart(&mut multipart).await?;

        let payload = CreateProductRequest {
            name: form.require_text("name")?,
            description: form.text("description").unwrap_or_default().to_string(),
            price: form.require_i64("price")?,
            category: form.require_i64("category")?,
        };
        let image = form.take_file("image");
        (payload, image)
    } else {
        let Json(payload) = Json::<CreateProductRequest>::from_request(req, &())
            .await
            .map_err(|rejection| HttpError::BadRequest(rejection.body_text()))?;
        (payload, None)
    };

    payload
        .validate()
        .map_err(|e| HttpError::BadRequest(format_validation_errors(&e)))?;

    let response = service.create(&payload, image).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/products/{id}/",
    tag = "Product",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product detail", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Unknown product")
    )
)]
pub async fn get_product(
    Extension(service): Extension<DynProductQueryService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/products/{id}/",
    tag = "Product",
    params(("id" = i64, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated; a new file replaces the primary image", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Validation failure"),
        (status = 403, description = "Weekend"),
        (status = 404, description = "Unknown product")
    )
)]
pub async fn update_product(
    Extension(service): Extension<DynProductCommandService>,
    Path(id): Path<i64>,
    req: Request,
) -> Result<impl IntoResponse, HttpError> {
    let (payload, image): (UpdateProductRequest, Option<UploadedFile>) =
        if is_multipart(req.headers()) {
            let mut multipart = Multipart::from_request(req, &())
                .await
                .map_err(|e| HttpError::BadRequest(format!("Invalid multipart payload: {e}")))?;
            let mut form = read_multipart(&mut multipart).await?;

            let payload = UpdateProductRequest {
                name: form.require_text("name")?,
                description: form.text("description").unwrap_or_default().to_string(),
                price: form.require_i64("price")?,
                category: form.require_i64("category")?,
            };
            let image = form.take_file("image");
            (payload, image)
        } else {
            let Json(payload) = Json::<UpdateProductRequest>::from_request(req, &())
                .await
                .map_err(|rejection| HttpError::BadRequest(rejection.body_text()))?;
            (payload, None)
        };

    payload
        .validate()
        .map_err(|e| HttpError::BadRequest(format_validation_errors(&e)))?;

    let response = service.update(id, &payload, image).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/products/{id}/",
    tag = "Product",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted with its images and comments", body = ApiResponse<bool>),
        (status = 403, description = "Weekend"),
        (status = 404, description = "Unknown product")
    )
)]
pub async fn delete_product(
    Extension(service): Extension<DynProductCommandService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn product_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/products/", get(list_products).post(create_product))
        .route(
            "/products/{id}/",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route_layer(middleware::from_fn(weekday_gate_middleware))
        .route_layer(middleware::from_fn(auth_context_middleware))
        .layer(Extension(app_state.di_container.product_query.clone()))
        .layer(Extension(app_state.di_container.product_command.clone()))
        .layer(Extension(app_state.di_container.auth_tokens.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
        .layer(Extension(app_state.clock.clone()))
}
