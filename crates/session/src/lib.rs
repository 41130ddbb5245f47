//! Login/logout view-state controller.
//!
//! Maps the latest control activation, the click counters and the submitted
//! credentials onto which page regions are visible. Stateless: every call
//! re-derives the view from its inputs alone.

use std::{fmt, sync::Arc};

use shared::domain::{ClickCounters, Credentials, TriggerEvent, ViewState};

pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "password";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

/// Decides whether a username/password pair is accepted.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

impl<F> CredentialVerifier for F
where
    F: Fn(&str, &str) -> bool + Send + Sync,
{
    fn verify(&self, username: &str, password: &str) -> bool {
        self(username, password)
    }
}

/// Accepts exactly one configured pair, compared as plain strings.
#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredentialVerifier {
    username: String,
    password: String,
}

impl StaticCredentialVerifier {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for StaticCredentialVerifier {
    fn default() -> Self {
        Self::new(DEFAULT_USERNAME, DEFAULT_PASSWORD)
    }
}

impl fmt::Debug for StaticCredentialVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentialVerifier")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl CredentialVerifier for StaticCredentialVerifier {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

/// Which branch of the decision table produced a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    LoginAccepted,
    LoginRejected,
    LoggedOut,
    Idle,
}

/// A view plus the message for the `login-output` slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOutcome {
    pub decision: Decision,
    pub view: ViewState,
    pub message: Option<String>,
}

#[derive(Clone)]
pub struct SessionViewController {
    verifier: Arc<dyn CredentialVerifier>,
}

impl SessionViewController {
    pub fn new(verifier: impl CredentialVerifier + 'static) -> Self {
        Self {
            verifier: Arc::new(verifier),
        }
    }

    pub fn evaluate(
        &self,
        trigger: Option<TriggerEvent>,
        counters: ClickCounters,
        credentials: &Credentials,
    ) -> ViewState {
        self.decide(trigger, counters, credentials).1
    }

    /// Same decision as [`evaluate`](Self::evaluate), also filling the error
    /// slot on a rejected login.
    pub fn respond(
        &self,
        trigger: Option<TriggerEvent>,
        counters: ClickCounters,
        credentials: &Credentials,
    ) -> ViewOutcome {
        let (decision, view) = self.decide(trigger, counters, credentials);
        let message = (decision == Decision::LoginRejected)
            .then(|| INVALID_CREDENTIALS_MESSAGE.to_string());
        ViewOutcome {
            decision,
            view,
            message,
        }
    }

    fn decide(
        &self,
        trigger: Option<TriggerEvent>,
        counters: ClickCounters,
        credentials: &Credentials,
    ) -> (Decision, ViewState) {
        match trigger {
            Some(TriggerEvent::LoginButtonPressed) if counters.login > 0 => {
                if self.accepts(credentials) {
                    (Decision::LoginAccepted, ViewState::DASHBOARD)
                } else {
                    (Decision::LoginRejected, ViewState::LOGIN)
                }
            }
            Some(TriggerEvent::LogoutButtonPressed) if counters.logout != 0 => {
                (Decision::LoggedOut, ViewState::LOGIN)
            }
            _ => (Decision::Idle, ViewState::initial()),
        }
    }

    // Unset fields never match, whatever the verifier would say about "".
    fn accepts(&self, credentials: &Credentials) -> bool {
        match (
            credentials.username.as_deref(),
            credentials.password.as_deref(),
        ) {
            (Some(username), Some(password)) => self.verifier.verify(username, password),
            _ => false,
        }
    }
}

impl Default for SessionViewController {
    fn default() -> Self {
        Self::new(StaticCredentialVerifier::default())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
