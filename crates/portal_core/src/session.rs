use chrono::{DateTime, Utc};

/// Signed-in user, as handed out by the API at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub token: String,
    pub signed_in_at: DateTime<Utc>,
}

/// Explicit holder for the current session. Populated by `login`, emptied by
/// `logout`; nothing else writes it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionContext {
    current: Option<Session>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any previous session.
    pub fn login(&mut self, session: Session) {
        self.current = Some(session);
    }

    /// Clears the session and returns what was held.
    pub fn logout(&mut self) -> Option<Session> {
        self.current.take()
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.current.as_ref().map(|session| session.token.as_str())
    }
}
