use crate::{
    abstract_trait::{DynCommentCommandService, DynCommentQueryService},
    domain::{
        requests::{CreateCommentRequest, UpdateCommentRequest},
        response::{ApiResponse, CommentResponse},
    },
    handler::forms::{is_multipart, read_multipart},
    middleware::{
        CurrentUser, SimpleValidatedJson, auth_context_middleware,
        validate::format_validation_errors, weekday_gate_middleware,
    },
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, FromRequest, Multipart, Path, Request},
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
    path = "/comment-list/",
    tag = "Comment",
    responses(
        (status = 200, description = "All comments, oldest first", body = ApiResponse<Vec<CommentResponse>>)
    )
)]
pub async fn list_comments(
    Extension(service): Extension<DynCommentQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/comment-list/",
    tag = "Comment",
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created, anonymously or as the caller", body = ApiResponse<CommentResponse>),
        (status = 400, description = "Missing product id or invalid rating"),
        (status = 403, description = "Weekend"),
        (status = 404, description = "Unknown product")
    )
)]
pub async fn create_comment(
    Extension(service): Extension<DynCommentCommandService>,
    Extension(current): Extension<CurrentUser>,
    req: Request,
) -> Result<impl IntoResponse, HttpError> {
    let (payload, attachment) = if is_multipart(req.headers()) {
        let mut multipart = Multipart::from_request(req, &())
            .await
            .map_err(|e| HttpError::BadRequest(format!("Invalid multipart payload: {e}")))?;
        let mut form = read_multipart(&mut multipart).await?;

        let payload = CreateCommentRequest {
            body: form.require_text("body")?,
            rating: form.require_i32("rating")?,
            product_id: Some(form.require_i64("product_id")?),
            good_comment: form.text("good_comment").map(str::to_owned),
            bad_comment: form.text("bad_comment").map(str::to_owned),
        };
        let attachment = form.take_file("attachment");
        (payload, attachment)
    } else {
        let Json(payload) = Json::<CreateCommentRequest>::from_request(req, &())
            .await
            .map_err(|rejection| HttpError::BadRequest(rejection.body_text()))?;
        (payload, None)
    };

    payload
        .validate()
        .map_err(|e| HttpError::BadRequest(format_validation_errors(&e)))?;

    let response = service
        .create(&payload, current.user_id(), attachment)
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/comment-list/{id}/",
    tag = "Comment",
    params(("id" = i64, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Comment detail", body = ApiResponse<CommentResponse>),
        (status = 404, description = "Unknown comment")
    )
)]
pub async fn get_comment(
    Extension(service): Extension<DynCommentQueryService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/comment-list/{id}/",
    tag = "Comment",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Comment ID")),
    request_body = UpdateCommentRequest,
    responses(
        (status = 200, description = "Comment updated within the 2-minute window", body = ApiResponse<CommentResponse>),
        (status = 403, description = "Window closed, not the owner, or weekend"),
        (status = 404, description = "Unknown comment")
    )
)]
pub async fn update_comment(
    Extension(service): Extension<DynCommentCommandService>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateCommentRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update(id, &body, current.user_id()).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/comment-list/{id}/",
    tag = "Comment",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Comment deleted within the 1-minute window", body = ApiResponse<bool>),
        (status = 403, description = "Window closed, not the owner, or weekend"),
        (status = 404, description = "Unknown comment")
    )
)]
pub async fn delete_comment(
    Extension(service): Extension<DynCommentCommandService>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete(id, current.user_id()).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn comment_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/comment-list/", get(list_comments).post(create_comment))
        .route(
            "/comment-list/{id}/",
            get(get_comment).put(update_comment).delete(delete_comment),
        )
        .route_layer(middleware::from_fn(weekday_gate_middleware))
        .route_layer(middleware::from_fn(auth_context_middleware))
        .layer(Extension(app_state.di_container.comment_query.clone()))
        .layer(Extension(app_state.di_container.comment_command.clone()))
        .layer(Extension(app_state.di_container.auth_tokens.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
        .layer(Extension(app_state.clock.clone()))
}
