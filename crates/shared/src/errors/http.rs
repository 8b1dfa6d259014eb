use crate::errors::{
    error::ErrorResponse, repository::RepositoryError, service::ServiceError,
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    Forbidden(String),
    NotFound(String),
    Internal(String),
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            // login failures stay generic and carry a 400, never hinting
            // which credential was wrong
            ServiceError::InvalidCredentials => {
                HttpError::BadRequest("Invalid username or password".to_string())
            }

            ServiceError::Validation(errors) => HttpError::BadRequest(errors.join("; ")),

            ServiceError::Forbidden(msg) => HttpError::Forbidden(msg),

            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => HttpError::NotFound("Not found".into()),
                RepositoryError::ForeignKey(msg) => {
                    HttpError::BadRequest(format!("Foreign key violation: {msg}"))
                }
                _ => HttpError::Internal("Repository error".into()),
            },

            ServiceError::Jwt(_) => HttpError::Forbidden("Invalid authentication token".into()),

            ServiceError::TokenExpired => HttpError::Forbidden("Token expired".into()),

            ServiceError::InvalidTokenType => HttpError::Forbidden("Invalid token type".into()),

            ServiceError::Bcrypt(_) => HttpError::Internal("Internal authentication error".into()),

            ServiceError::Internal(msg) | ServiceError::Custom(msg) => HttpError::Internal(msg),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse {
            status: "error".into(),
            message: msg,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_credentials_map_to_generic_400() {
        let err = HttpError::from(ServiceError::InvalidCredentials);
        match err {
            HttpError::BadRequest(msg) => {
                assert_eq!(msg, "Invalid username or password");
                assert!(!msg.contains("password was wrong"));
            }
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[test]
    fn not_found_and_forbidden_keep_their_statuses() {
        assert!(matches!(
            HttpError::from(ServiceError::Repo(RepositoryError::NotFound)),
            HttpError::NotFound(_)
        ));
        assert!(matches!(
            HttpError::from(ServiceError::Forbidden("no".into())),
            HttpError::Forbidden(_)
        ));
    }
}
