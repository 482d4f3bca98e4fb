// Session provider trait and the login / current-user use cases
use crate::application::sensor_api::ApiError;
use crate::domain::user::{AccessToken, User};
use anyhow::Context;
use async_trait::async_trait;
use std::sync::Arc;

/// Where the bearer token lives between runs (cookie jar, file, memory)
pub trait SessionProvider: Send + Sync {
    fn get_token(&self) -> Option<String>;
    fn set_token(&self, token: &str) -> anyhow::Result<()>;
    fn clear_token(&self);
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn current_user(&self, token: &str) -> Result<User, ApiError>;

    async fn login(&self, username: &str, password: &str) -> Result<AccessToken, ApiError>;
}

#[derive(Clone)]
pub struct SessionService {
    auth: Arc<dyn AuthApi>,
    session: Arc<dyn SessionProvider>,
}

impl SessionService {
    pub fn new(auth: Arc<dyn AuthApi>, session: Arc<dyn SessionProvider>) -> Self {
        Self { auth, session }
    }

    /// Resolve the user behind the stored token. A rejected token is dropped
    /// so the next visit goes through login again.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        let token = self.session.get_token().ok_or(ApiError::Unauthenticated)?;

        match self.auth.current_user(&token).await {
            Ok(user) => {
                tracing::debug!("Session belongs to {}", user.username);
                Ok(user)
            }
            Err(e) => {
                tracing::warn!("Session check failed, clearing token: {}", e);
                self.session.clear_token();
                Err(e)
            }
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> anyhow::Result<()> {
        let token = self.auth.login(username, password).await?;
        if !token.token_type.eq_ignore_ascii_case("bearer") {
            anyhow::bail!("Unsupported token type '{}'", token.token_type);
        }

        self.session
            .set_token(&token.access_token)
            .context("Failed to store session token")?;
        tracing::info!("Logged in as {}", username);
        Ok(())
    }

    pub fn logout(&self) {
        self.session.clear_token();
    }
}


#[cfg(test)]
mod tests {
    use super::fake::FakeAuthApi;
    use super::*;
    use crate::infrastructure::token_store::{FileTokenStore, MemoryTokenStore};

    fn ana() -> User {
        User {
            username: "ana".to_string(),
        }
    }

    #[tokio::test]
    async fn test_current_user_with_valid_token() {
        let auth = Arc::new(FakeAuthApi::new(Ok(ana())));
        let store = Arc::new(MemoryTokenStore::with_token("abc"));
        let service = SessionService::new(auth.clone(), store.clone());

        assert_eq!(service.current_user().await, Ok(ana()));
        assert_eq!(store.get_token(), Some("abc".to_string()));
        assert_eq!(*auth.seen_tokens.lock().unwrap(), vec!["abc".to_string()]);
    }

    #[tokio::test]
    async fn test_current_user_without_token() {
        let auth = Arc::new(FakeAuthApi::new(Ok(ana())));
        let service = SessionService::new(auth.clone(), Arc::new(MemoryTokenStore::default()));

        assert_eq!(service.current_user().await, Err(ApiError::Unauthenticated));
        assert!(auth.seen_tokens.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_token_is_cleared() {
        let rejected = ApiError::Status {
            status: 401,
            status_text: "Unauthorized".to_string(),
        };
        let auth = Arc::new(FakeAuthApi::new(Err(rejected.clone())));
        let store = Arc::new(MemoryTokenStore::with_token("stale"));
        let service = SessionService::new(auth, store.clone());

        assert_eq!(service.current_user().await, Err(rejected));
        assert_eq!(store.get_token(), None);
    }

    #[tokio::test]
    async fn test_login_stores_token() {
        let auth = Arc::new(FakeAuthApi::new(Ok(ana())));
        let store = Arc::new(MemoryTokenStore::default());
        let service = SessionService::new(auth, store.clone());

        assert!(service.login("ana", "wrong").await.is_err());
        assert_eq!(store.get_token(), None);

        service.login("ana", "secret").await.unwrap();
        assert_eq!(store.get_token(), Some("fresh-token".to_string()));

        service.logout();
        assert_eq!(store.get_token(), None);
    }

    #[tokio::test]
    async fn test_login_rejects_non_bearer_token() {
        let mut auth = FakeAuthApi::new(Ok(ana()));
        auth.token_type = "mac";
        let store = Arc::new(MemoryTokenStore::default());
        let service = SessionService::new(Arc::new(auth), store.clone());

        assert!(service.login("ana", "secret").await.is_err());
        assert_eq!(store.get_token(), None);
    }

    #[tokio::test]
    async fn test_login_fails_when_token_cannot_be_stored() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileTokenStore::new(dir.path().join("missing").join("token")));
        let service = SessionService::new(Arc::new(FakeAuthApi::new(Ok(ana()))), store.clone());

        let err = service.login("ana", "secret").await.unwrap_err();

        assert!(err.to_string().contains("Failed to store session token"));
        assert_eq!(store.get_token(), None);
    }
}
