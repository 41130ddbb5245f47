use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const LOGIN_BUTTON_ID: &str = "login-button";
pub const LOGOUT_CONTROL_ID: &str = "user-menu";

/// Credentials submitted with a single login attempt. Either field may be unset.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Which control fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerEvent {
    LoginButtonPressed,
    LogoutButtonPressed,
}

impl TriggerEvent {
    pub fn control_id(self) -> &'static str {
        match self {
            Self::LoginButtonPressed => LOGIN_BUTTON_ID,
            Self::LogoutButtonPressed => LOGOUT_CONTROL_ID,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown trigger control id '{0}'")]
pub struct UnknownTrigger(pub String);

impl FromStr for TriggerEvent {
    type Err = UnknownTrigger;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            LOGIN_BUTTON_ID => Ok(Self::LoginButtonPressed),
            LOGOUT_CONTROL_ID => Ok(Self::LogoutButtonPressed),
            other => Err(UnknownTrigger(other.to_string())),
        }
    }
}

impl fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.control_id())
    }
}

/// Activations of each control since page load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickCounters {
    pub login: u64,
    pub logout: u64,
}

impl ClickCounters {
    pub fn new(login: u64, logout: u64) -> Self {
        Self { login, logout }
    }
}

/// The three page regions whose visibility is controlled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    DashboardContent,
    LoginScreen,
    UserMenu,
}

impl Region {
    pub fn element_id(self) -> &'static str {
        match self {
            Self::DashboardContent => "dashboard-content",
            Self::LoginScreen => "login-screen",
            Self::UserMenu => LOGOUT_CONTROL_ID,
        }
    }
}

/// CSS `display` directive for a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Display {
    #[serde(rename = "block")]
    Block,
    #[serde(rename = "none")]
    Hidden,
}

impl Display {
    pub fn from_visible(visible: bool) -> Self {
        if visible {
            Self::Block
        } else {
            Self::Hidden
        }
    }

    pub fn as_css(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Hidden => "none",
        }
    }
}

/// Region visibility derived from a single authenticated flag, so the
/// dashboard and logout control can never disagree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ViewState {
    authenticated: bool,
}

impl ViewState {
    pub const LOGIN: ViewState = ViewState {
        authenticated: false,
    };
    pub const DASHBOARD: ViewState = ViewState {
        authenticated: true,
    };

    pub fn initial() -> Self {
        Self::LOGIN
    }

    pub fn is_authenticated(self) -> bool {
        self.authenticated
    }

    pub fn dashboard_visible(self) -> bool {
        self.authenticated
    }

    pub fn login_visible(self) -> bool {
        !self.authenticated
    }

    pub fn logout_control_visible(self) -> bool {
        self.authenticated
    }

    pub fn display(self, region: Region) -> Display {
        let visible = match region {
            Region::DashboardContent => self.dashboard_visible(),
            Region::LoginScreen => self.login_visible(),
            Region::UserMenu => self.logout_control_visible(),
        };
        Display::from_visible(visible)
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
