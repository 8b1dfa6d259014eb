use crate::{
    abstract_trait::{DynCategoryCommandService, DynCategoryQueryService},
    domain::{
        requests::{CreateCategoryRequest, UpdateCategoryRequest},
        response::{ApiResponse, CategoryResponse},
    },
    middleware::{
        CurrentUser, SimpleValidatedJson, auth_context_middleware, weekday_gate_middleware,
    },
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};
use shared::errors::HttpError;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/categories/",
    tag = "Category",
    responses(
        (status = 200, description = "All categories with nested products", body = ApiResponse<Vec<CategoryResponse>>)
    )
)]
pub async fn list_categories(
    Extension(service): Extension<DynCategoryQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/categories/",
    tag = "Category",
    security(("bearer_auth" = [])),
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponse>),
        (status = 403, description = "Unauthenticated or weekend")
    )
)]
pub async fn create_category(
    Extension(service): Extension<DynCategoryCommandService>,
    Extension(current): Extension<CurrentUser>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateCategoryRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create(current.user_id(), &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/categories/{id}/",
    tag = "Category",
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category detail", body = ApiResponse<CategoryResponse>),
        (status = 404, description = "Unknown category")
    )
)]
pub async fn get_category(
    Extension(service): Extension<DynCategoryQueryService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/categories/{id}/",
    tag = "Category",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Category ID")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponse>),
        (status = 403, description = "Unauthenticated or weekend"),
        (status = 404, description = "Unknown category")
    )
)]
pub async fn update_category(
    Extension(service): Extension<DynCategoryCommandService>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateCategoryRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update(current.user_id(), id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/categories/{id}/",
    tag = "Category",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted with its products", body = ApiResponse<bool>),
        (status = 403, description = "Unauthenticated or weekend"),
        (status = 404, description = "Unknown category")
    )
)]
pub async fn delete_category(
    Extension(service): Extension<DynCategoryCommandService>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete(current.user_id(), id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn category_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/categories/", get(list_categories).post(create_category))
        .route(
            "/categories/{id}/",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        .route_layer(middleware::from_fn(weekday_gate_middleware))
        .route_layer(middleware::from_fn(auth_context_middleware))
        .layer(Extension(app_state.di_container.category_query.clone()))
        .layer(Extension(app_state.di_container.category_command.clone()))
        .layer(Extension(app_state.di_container.auth_tokens.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
        .layer(Extension(app_state.clock.clone()))
}
