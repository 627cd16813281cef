//! Credentials passed explicitly to every authenticated call.
//!
//! The client never stores a token itself: `APIClient::login` hands back an
//! [`AuthContext`] and callers thread it through each protected request.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::sync::Arc;

use crate::UserId;

#[derive(Clone)]
pub struct AuthContext {
    user_id: UserId,
    token: Arc<SecretString>,
}

impl AuthContext {
    pub fn new(user_id: UserId, token: impl Into<String>) -> Self {
        Self {
            user_id,
            token: Arc::new(SecretString::from(token.into())),
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Value for the `Authorization` header.
    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.token.expose_secret())
    }
}

impl PartialEq for AuthContext {
    fn eq(&self, other: &Self) -> bool {
        self.user_id == other.user_id
            && self.token.expose_secret() == other.token.expose_secret()
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("user_id", &self.user_id)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
