//! # Session
//!
//! Who is signed in and with what credentials. Created from the resolved
//! config at startup, cleared on sign-out, and handed explicitly to every
//! API call. There is no global session.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    user: Option<String>,
}

impl Session {
    pub fn new(token: Option<String>, user: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
            user,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Drop credentials and identity.
    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }
}
