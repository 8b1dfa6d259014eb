use crate::abstract_trait::DynAuthTokenQueryRepository;
use axum::{
    body::Body,
    extract::Extension,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use shared::abstract_trait::DynJwtService;
use shared::errors::{HttpError, ServiceError};

#[derive(Debug, Clone)]
pub enum AuthCredential {
    /// durable per-user key from the `Token` scheme
    OpaqueToken(String),
    /// short-lived access JWT from the `Bearer` scheme
    AccessJwt,
}

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub credential: AuthCredential,
}

/// Request identity resolved by `auth_context_middleware`; `None` means the
/// caller is anonymous.
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(pub Option<AuthUser>);

impl CurrentUser {
    pub fn user_id(&self) -> Option<i64> {
        self.0.as_ref().map(|user| user.user_id)
    }
}

/// Resolves the caller's identity without rejecting anonymous requests.
/// A credential that is present but invalid is a permission error; absence
/// just leaves the request anonymous. Handlers and services decide which
/// operations demand an identity.
pub async fn auth_context_middleware(
    cookie_jar: CookieJar,
    Extension(jwt): Extension<DynJwtService>,
    Extension(tokens): Extension<DynAuthTokenQueryRepository>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HttpError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let current = match header_value {
        Some(value) if value.starts_with("Bearer ") => {
            let token = value.trim_start_matches("Bearer ").trim();
            let user_id = jwt
                .verify_token(token, "access")
                .map_err(|_| HttpError::Forbidden("Invalid authentication token".to_string()))?;
            CurrentUser(Some(AuthUser {
                user_id,
                credential: AuthCredential::AccessJwt,
            }))
        }
        Some(value) if value.starts_with("Token ") => {
            let key = value.trim_start_matches("Token ").trim();
            let token = tokens
                .find_by_key(key)
                .await
                .map_err(|err| HttpError::from(ServiceError::Repo(err)))?
                .ok_or_else(|| {
                    HttpError::Forbidden("Invalid authentication token".to_string())
                })?;
            CurrentUser(Some(AuthUser {
                user_id: token.user_id,
                credential: AuthCredential::OpaqueToken(key.to_string()),
            }))
        }
        // unrecognized schemes are treated as anonymous
        Some(_) => CurrentUser::default(),
        None => match cookie_jar.get("token") {
            Some(cookie) => {
                let user_id = jwt.verify_token(cookie.value(), "access").map_err(|_| {
                    HttpError::Forbidden("Invalid authentication token".to_string())
                })?;
                CurrentUser(Some(AuthUser {
                    user_id,
                    credential: AuthCredential::AccessJwt,
                }))
            }
            None => CurrentUser::default(),
        },
    };

    req.extensions_mut().insert(current);
    Ok(next.run(req).await)
}
