// Route guard - dashboard paths require a session token
use crate::application::session::SessionProvider;

const PROTECTED_PREFIX: &str = "/sensors";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(String),
}

#[derive(Debug, Clone)]
pub struct RouteGuard {
    login_path: String,
}

impl RouteGuard {
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn is_protected(path: &str) -> bool {
        path == PROTECTED_PREFIX
            || path
                .strip_prefix(PROTECTED_PREFIX)
                .is_some_and(|rest| rest.starts_with('/'))
    }

    pub fn check(&self, path: &str, session: &dyn SessionProvider) -> Access {
        if path == self.login_path || !Self::is_protected(path) {
            return Access::Allow;
        }

        if session.get_token().is_some() {
            Access::Allow
        } else {
            tracing::info!("No session for {}, redirecting to {}", path, self.login_path);
            Access::Redirect(self.login_path.clone())
        }
    }
}
