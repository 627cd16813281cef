use payloads::{AuthContext, responses::UserProfile};
use yewdux::prelude::*;

/// Who is using the app. Nothing is persisted, so every visit starts
/// logged out.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn {
        auth: AuthContext,
        profile: UserProfile,
    },
}

#[derive(Default, Clone, PartialEq, Store)]
pub struct State {
    pub error_message: Option<String>,
    pub session: SessionState,
}

impl State {
    pub fn is_authenticated(&self) -> bool {
        matches!(self.session, SessionState::LoggedIn { .. })
    }

    /// Credentials to pass to protected calls, if logged in.
    pub fn auth(&self) -> Option<&AuthContext> {
        match &self.session {
            SessionState::LoggedIn { auth, .. } => Some(auth),
            SessionState::LoggedOut => None,
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        match &self.session {
            SessionState::LoggedIn { profile, .. } => Some(profile),
            SessionState::LoggedOut => None,
        }
    }

    pub fn login(&mut self, auth: AuthContext, profile: UserProfile) {
        self.session = SessionState::LoggedIn { auth, profile };
        self.error_message = None;
    }

    pub fn logout(&mut self) {
        self.session = SessionState::LoggedOut;
    }
}
