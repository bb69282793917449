use core::fmt;

/// Credentials attached to every API request.
///
/// Passed explicitly into [`ApiClient`](crate::ApiClient); nothing is read
/// from ambient state.
#[derive(Clone)]
pub struct AuthSession {
    token: String,
}

impl AuthSession {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("token", &"<redacted>")
            .finish()
    }
}
