use std::sync::Arc;

use models::User;
use tracing::{debug, info, instrument};

use super::domain::{AuthSession, LoginInput, RegisterInput};
use super::errors::AuthError;
use super::password::{hash_password, verify_password};
use super::repository::UserRepository;
use super::token::{strip_bearer, Claims, TokenKeys};
use crate::ids::new_id;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

/// Auth business service independent of web framework
pub struct AuthService<R: UserRepository> {
    repo: Arc<R>,
    tokens: TokenKeys,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self {
        Self { repo, tokens: TokenKeys::new(&cfg.jwt_secret, cfg.token_ttl_secs) }
    }

    /// Register a new user with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockUserRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockUserRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: "secret".into(), token_ttl_secs: 3600 });
    /// let input = RegisterInput { username: "alice".into(), password: "Secret123".into() };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.username, "alice");
    /// assert_ne!(user.password, "Secret123");
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn register(&self, input: RegisterInput) -> Result<User, AuthError> {
        if let Some(existing) = self.repo.find_by_username(&input.username).await? {
            debug!(user_id = %existing.id, "username taken");
            return Err(AuthError::Conflict);
        }

        let password = hash_password(&input.password)?;
        let user = self
            .repo
            .insert_unique(User::new(new_id(), input.username, password))
            .await?;
        info!(user_id = %user.id, username = %user.username, "user_registered");
        Ok(user)
    }

    /// Authenticate a user and issue a token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockUserRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockUserRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: "secret".into(), token_ttl_secs: 3600 });
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { username: "u".into(), password: "Passw0rd".into() }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { username: "u".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.username, "u");
    /// assert!(svc.verify_bearer(Some(&format!("Bearer {}", session.token))).is_ok());
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let user = self
            .repo
            .find_by_username(&input.username)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        if !verify_password(&input.password, &user.password)? {
            return Err(AuthError::Unauthorized);
        }

        let token = self.tokens.issue(&user.id, &user.username)?;
        info!(user_id = %user.id, "user_logged_in");
        Ok(AuthSession { user_id: user.id, username: user.username, token })
    }

    /// Verify the raw `Authorization` header value of a protected request.
    pub fn verify_bearer(&self, header: Option<&str>) -> Result<Claims, AuthError> {
        let header = header.ok_or(AuthError::MissingToken)?;
        self.tokens.verify(strip_bearer(header))
    }

    pub async fn user_count(&self) -> Result<usize, AuthError> {
        self.repo.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockUserRepository;

    fn svc() -> AuthService<MockUserRepository> {
        AuthService::new(
            Arc::new(MockUserRepository::default()),
            AuthConfig { jwt_secret: "test-secret".into(), token_ttl_secs: 3600 },
        )
    }

    fn creds(username: &str, password: &str) -> RegisterInput {
        RegisterInput { username: username.into(), password: password.into() }
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts_and_adds_one_user() -> Result<(), anyhow::Error> {
        let svc = svc();
        svc.register(creds("bob", "pw-1")).await?;
        let again = svc.register(creds("bob", "pw-2")).await;
        assert!(matches!(again, Err(AuthError::Conflict)));
        assert_eq!(svc.user_count().await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn login_rejects_unknown_user_and_wrong_password() -> Result<(), anyhow::Error> {
        let svc = svc();
        svc.register(creds("carol", "right")).await?;
        let wrong = svc.login(LoginInput { username: "carol".into(), password: "wrong".into() }).await;
        assert!(matches!(wrong, Err(AuthError::Unauthorized)));
        let ghost = svc.login(LoginInput { username: "ghost".into(), password: "right".into() }).await;
        assert!(matches!(ghost, Err(AuthError::Unauthorized)));
        Ok(())
    }

    #[tokio::test]
    async fn login_token_verifies_with_and_without_prefix() -> Result<(), anyhow::Error> {
        let svc = svc();
        let user = svc.register(creds("dave", "pw")).await?;
        let session = svc.login(LoginInput { username: "dave".into(), password: "pw".into() }).await?;
        assert_eq!(session.user_id, user.id);

        let claims = svc.verify_bearer(Some(&format!("Bearer {}", session.token)))?;
        assert_eq!(claims.id, user.id);
        assert_eq!(claims.username, "dave");
        assert!(svc.verify_bearer(Some(&session.token)).is_ok());
        Ok(())
    }

    #[test]
    fn missing_and_invalid_headers_are_distinguished() {
        let svc = svc();
        assert!(matches!(svc.verify_bearer(None), Err(AuthError::MissingToken)));
        assert!(matches!(svc.verify_bearer(Some("Bearer junk")), Err(AuthError::InvalidToken)));
    }
}
