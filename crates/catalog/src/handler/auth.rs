use crate::{
    abstract_trait::DynAuthService,
    domain::{
        requests::{LoginRequest, LogoutJwtRequest, RefreshTokenRequest},
        response::{ApiResponse, AuthTokenResponse, TokenResponse},
    },
    middleware::{
        AuthCredential, AuthUser, CurrentUser, SimpleValidatedJson, auth_context_middleware,
    },
    state::AppState,
};
use axum::{
    Json, extract::Extension, http::StatusCode, middleware, response::IntoResponse, routing::post,
};
use shared::errors::HttpError;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/login/",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Durable opaque token, reused across logins", body = ApiResponse<AuthTokenResponse>),
        (status = 400, description = "Invalid username or password")
    )
)]
pub async fn login(
    Extension(service): Extension<DynAuthService>,
    SimpleValidatedJson(body): SimpleValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.login_token(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/logout/",
    tag = "Auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Stored token deleted", body = ApiResponse<bool>),
        (status = 400, description = "Caller is not token-authenticated")
    )
)]
pub async fn logout(
    Extension(service): Extension<DynAuthService>,
    Extension(current): Extension<CurrentUser>,
) -> Result<impl IntoResponse, HttpError> {
    match current.0 {
        Some(AuthUser {
            credential: AuthCredential::OpaqueToken(key),
            ..
        }) => {
            let response = service.logout_token(&key).await?;
            Ok((StatusCode::OK, Json(response)))
        }
        _ => Err(HttpError::BadRequest(
            "User is not authenticated.".to_string(),
        )),
    }
}

#[utoipa::path(
    post,
    path = "/login-jwt/",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Access and refresh token pair", body = ApiResponse<TokenResponse>),
        (status = 400, description = "Invalid username or password")
    )
)]
pub async fn login_jwt(
    Extension(service): Extension<DynAuthService>,
    SimpleValidatedJson(body): SimpleValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.login_jwt(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/logout-jwt/",
    tag = "Auth",
    request_body = LogoutJwtRequest,
    responses(
        (status = 200, description = "Refresh token blacklisted", body = ApiResponse<bool>),
        (status = 400, description = "Invalid refresh token")
    )
)]
pub async fn logout_jwt(
    Extension(service): Extension<DynAuthService>,
    SimpleValidatedJson(body): SimpleValidatedJson<LogoutJwtRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.logout_jwt(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/refresh-token/",
    tag = "Auth",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Fresh access token", body = ApiResponse<TokenResponse>),
        (status = 403, description = "Expired or revoked refresh token")
    )
)]
pub async fn refresh_token(
    Extension(service): Extension<DynAuthService>,
    SimpleValidatedJson(body): SimpleValidatedJson<RefreshTokenRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.refresh_token(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn auth_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/login/", post(login))
        // DRF-style token obtain endpoint, same behavior as /login/
        .route("/custom-token/", post(login))
        .route("/logout/", post(logout))
        .route("/login-jwt/", post(login_jwt))
        .route("/logout-jwt/", post(logout_jwt))
        .route("/refresh-token/", post(refresh_token))
        .route_layer(middleware::from_fn(auth_context_middleware))
        .layer(Extension(app_state.di_container.auth.clone()))
        .layer(Extension(app_state.di_container.auth_tokens.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
