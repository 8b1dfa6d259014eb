use crate::abstract_trait::{
    AuthServiceTrait, DynAuthTokenCommandRepository, DynAuthTokenQueryRepository,
    DynRevokedTokenRepository, DynUserQueryRepository,
};
use crate::domain::{
    requests::{LoginRequest, LogoutJwtRequest, RefreshTokenRequest},
    response::{ApiResponse, AuthTokenResponse, TokenResponse},
};
use async_trait::async_trait;
use shared::abstract_trait::{DynHashing, DynJwtService};
use shared::errors::ServiceError;
use shared::model::User as UserModel;
use shared::utils::generate_random_string;
use tracing::{info, warn};

const TOKEN_KEY_LENGTH: usize = 40;

pub struct AuthServiceDeps {
    pub users: DynUserQueryRepository,
    pub token_query: DynAuthTokenQueryRepository,
    pub token_command: DynAuthTokenCommandRepository,
    pub revoked: DynRevokedTokenRepository,
    pub jwt: DynJwtService,
    pub hash: DynHashing,
}

pub struct AuthService {
    users: DynUserQueryRepository,
    token_query: DynAuthTokenQueryRepository,
    token_command: DynAuthTokenCommandRepository,
    revoked: DynRevokedTokenRepository,
    jwt: DynJwtService,
    hash: DynHashing,
}

impl AuthService {
    pub fn new(deps: AuthServiceDeps) -> Self {
        let AuthServiceDeps {
            users,
            token_query,
            token_command,
            revoked,
            jwt,
            hash,
        } = deps;

        Self {
            users,
            token_query,
            token_command,
            revoked,
            jwt,
            hash,
        }
    }

    /// Unknown user and wrong password collapse into the same generic error.
    async fn verify_credentials(&self, req: &LoginRequest) -> Result<UserModel, ServiceError> {
        let user = self
            .users
            .find_by_username(&req.username)
            .await
            .map_err(ServiceError::Repo)?
            .ok_or_else(|| {
                warn!("❌ Login attempt for unknown user");
                ServiceError::InvalidCredentials
            })?;

        self.hash
            .compare_password(&user.password, &req.password)
            .await
            .map_err(|_| {
                warn!("❌ Invalid password for user {}", user.user_id);
                ServiceError::InvalidCredentials
            })?;

        Ok(user)
    }
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    async fn login_token(
        &self,
        req: &LoginRequest,
    ) -> Result<ApiResponse<AuthTokenResponse>, ServiceError> {
        let user = self.verify_credentials(req).await?;

        // one durable token per user, reused on every login
        let token = match self
            .token_query
            .find_by_user(user.user_id)
            .await
            .map_err(ServiceError::Repo)?
        {
            Some(existing) => existing,
            None => {
                let key = generate_random_string(TOKEN_KEY_LENGTH)
                    .map_err(|e| ServiceError::Internal(e.to_string()))?;
                self.token_command
                    .create(user.user_id, &key)
                    .await
                    .map_err(ServiceError::Repo)?
            }
        };

        info!("🔐 User {} logged in (opaque token)", user.user_id);
        Ok(ApiResponse::success(
            "Login successful",
            AuthTokenResponse {
                token: token.token_key,
            },
        ))
    }

    async fn login_jwt(
        &self,
        req: &LoginRequest,
    ) -> Result<ApiResponse<TokenResponse>, ServiceError> {
        let user = self.verify_credentials(req).await?;

        let access_token = self.jwt.generate_token(user.user_id, "access")?;
        let refresh_token = self.jwt.generate_token(user.user_id, "refresh")?;

        info!("🔐 User {} logged in (JWT)", user.user_id);
        Ok(ApiResponse::success(
            "Login successful",
            TokenResponse {
                access_token,
                refresh_token,
            },
        ))
    }

    async fn logout_token(&self, token_key: &str) -> Result<ApiResponse<bool>, ServiceError> {
        self.token_command
            .delete_by_key(token_key)
            .await
            .map_err(ServiceError::Repo)?;

        Ok(ApiResponse::success("Successfully logged out.", true))
    }

    async fn logout_jwt(
        &self,
        req: &LogoutJwtRequest,
    ) -> Result<ApiResponse<bool>, ServiceError> {
        self.jwt
            .verify_token(&req.refresh_token, "refresh")
            .map_err(|_| ServiceError::Validation(vec!["Invalid refresh token".to_string()]))?;

        self.revoked
            .revoke(&req.refresh_token)
            .await
            .map_err(ServiceError::Repo)?;

        Ok(ApiResponse::success("Successfully logged out.", true))
    }

    async fn refresh_token(
        &self,
        req: &RefreshTokenRequest,
    ) -> Result<ApiResponse<TokenResponse>, ServiceError> {
        let user_id = self.jwt.verify_token(&req.refresh_token, "refresh")?;

        if self
            .revoked
            .is_revoked(&req.refresh_token)
            .await
            .map_err(ServiceError::Repo)?
        {
            return Err(ServiceError::Forbidden(
                "Refresh token has been revoked".to_string(),
            ));
        }

        let access_token = self.jwt.generate_token(user_id, "access")?;

        Ok(ApiResponse::success(
            "Token refreshed successfully",
            TokenResponse {
                access_token,
                refresh_token: req.refresh_token.clone(),
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::{
        AuthTokenCommandRepositoryTrait, AuthTokenQueryRepositoryTrait,
        RevokedTokenRepositoryTrait, UserQueryRepositoryTrait,
    };
    use chrono::Utc;
    use shared::abstract_trait::{HashingTrait, JwtServiceTrait};
    use shared::config::{Hashing, JwtConfig};
    use shared::errors::RepositoryError;
    use shared::model::AuthToken as AuthTokenModel;
    use std::collections::{HashMap, HashSet};
    use std::sync::{Arc, Mutex};

    struct MockUserRepo {
        user: UserModel,
    }

    #[async_trait]
    impl UserQueryRepositoryTrait for MockUserRepo {
        async fn find_by_username(
            &self,
            username: &str,
        ) -> Result<Option<UserModel>, RepositoryError> {
            Ok((username == self.user.username).then(|| self.user.clone()))
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<UserModel>, RepositoryError> {
            Ok((id == self.user.user_id).then(|| self.user.clone()))
        }
    }

    #[derive(Default)]
    struct MockTokenStore {
        by_user: Mutex<HashMap<i64, AuthTokenModel>>,
    }

    struct MockTokenQueryRepo(Arc<MockTokenStore>);

    #[async_trait]
    impl AuthTokenQueryRepositoryTrait for MockTokenQueryRepo {
        async fn find_by_key(
            &self,
            key: &str,
        ) -> Result<Option<AuthTokenModel>, RepositoryError> {
            Ok(self
                .0
                .by_user
                .lock()
                .unwrap()
                .values()
                .find(|t| t.token_key == key)
                .cloned())
        }

        async fn find_by_user(
            &self,
            user_id: i64,
        ) -> Result<Option<AuthTokenModel>, RepositoryError> {
            Ok(self.0.by_user.lock().unwrap().get(&user_id).cloned())
        }
    }

    struct MockTokenCommandRepo(Arc<MockTokenStore>);

    #[async_trait]
    impl AuthTokenCommandRepositoryTrait for MockTokenCommandRepo {
        async fn create(
            &self,
            user_id: i64,
            key: &str,
        ) -> Result<AuthTokenModel, RepositoryError> {
            let token = AuthTokenModel {
                token_key: key.to_string(),
                user_id,
                created_at: Utc::now(),
            };
            self.0
                .by_user
                .lock()
                .unwrap()
                .insert(user_id, token.clone());
            Ok(token)
        }

        async fn delete_by_key(&self, key: &str) -> Result<(), RepositoryError> {
            self.0
                .by_user
                .lock()
                .unwrap()
                .retain(|_, t| t.token_key != key);
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockRevokedRepo {
        revoked: Mutex<HashSet<String>>,
    }

    #[async_trait]
    impl RevokedTokenRepositoryTrait for MockRevokedRepo {
        async fn revoke(&self, token: &str) -> Result<(), RepositoryError> {
            self.revoked.lock().unwrap().insert(token.to_string());
            Ok(())
        }

        async fn is_revoked(&self, token: &str) -> Result<bool, RepositoryError> {
            Ok(self.revoked.lock().unwrap().contains(token))
        }
    }

    async fn service() -> (AuthService, Arc<JwtConfig>) {
        let hashing = Hashing::new();
        let password = hashing.hash_password("admin123").await.expect("hash");

        let user = UserModel {
            user_id: 1,
            username: "admin".into(),
            password,
            created_at: Utc::now(),
        };

        let jwt = Arc::new(JwtConfig::new("test-secret"));
        let tokens = Arc::new(MockTokenStore::default());

        let service = AuthService::new(AuthServiceDeps {
            users: Arc::new(MockUserRepo { user }),
            token_query: Arc::new(MockTokenQueryRepo(tokens.clone())),
            token_command: Arc::new(MockTokenCommandRepo(tokens)),
            revoked: Arc::new(MockRevokedRepo::default()),
            jwt: jwt.clone(),
            hash: Arc::new(hashing),
        });

        (service, jwt)
    }

    fn login(password: &str) -> LoginRequest {
        LoginRequest {
            username: "admin".into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn opaque_token_is_reused_across_logins() {
        let (service, _) = service().await;

        let first = service.login_token(&login("admin123")).await.expect("login");
        let second = service.login_token(&login("admin123")).await.expect("login");

        assert_eq!(first.data.token, second.data.token);
        assert_eq!(first.data.token.len(), TOKEN_KEY_LENGTH);
    }

    #[tokio::test]
    async fn bad_credentials_are_indistinguishable() {
        let (service, _) = service().await;

        let wrong_password = service.login_token(&login("nope")).await.unwrap_err();
        let unknown_user = service
            .login_token(&LoginRequest {
                username: "ghost".into(),
                password: "admin123".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, ServiceError::InvalidCredentials));
        assert!(matches!(unknown_user, ServiceError::InvalidCredentials));
    }

    #[tokio::test]
    async fn jwt_login_returns_a_verifiable_pair() {
        let (service, jwt) = service().await;

        let response = service.login_jwt(&login("admin123")).await.expect("login");

        assert_eq!(
            jwt.verify_token(&response.data.access_token, "access")
                .expect("access"),
            1
        );
        assert_eq!(
            jwt.verify_token(&response.data.refresh_token, "refresh")
                .expect("refresh"),
            1
        );
    }

    #[tokio::test]
    async fn revoked_refresh_tokens_cannot_be_used() {
        let (service, _) = service().await;

        let pair = service.login_jwt(&login("admin123")).await.expect("login");
        let refresh = pair.data.refresh_token;

        // refresh works before logout
        service
            .refresh_token(&RefreshTokenRequest {
                refresh_token: refresh.clone(),
            })
            .await
            .expect("refresh before logout");

        service
            .logout_jwt(&LogoutJwtRequest {
                refresh_token: refresh.clone(),
            })
            .await
            .expect("logout");

        let err = service
            .refresh_token(&RefreshTokenRequest {
                refresh_token: refresh,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[tokio::test]
    async fn garbage_refresh_token_fails_logout_jwt() {
        let (service, _) = service().await;

        let err = service
            .logout_jwt(&LogoutJwtRequest {
                refresh_token: "not-a-jwt".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
