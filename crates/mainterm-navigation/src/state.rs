//! Navigation state

use serde::{Deserialize, Serialize};

use mainterm_host::EditorHost;
use mainterm_session::SessionRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavState {
    /// Focus is on some buffer other than the marked session
    Elsewhere,
    /// Focus is on the marked session
    InSession,
}

impl NavState {
    /// Derive the state from what the host currently has focused
    pub fn observe(host: &dyn EditorHost, registry: &SessionRegistry) -> Self {
        if registry.is_marked(host, host.current_buffer()) {
            NavState::InSession
        } else {
            NavState::Elsewhere
        }
    }

    /// State a toggle moves to
    pub fn toggled(&self) -> NavState {
        match self {
            NavState::Elsewhere => NavState::InSession,
            NavState::InSession => NavState::Elsewhere,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NavState::Elsewhere => "elsewhere",
            NavState::InSession => "in_session",
        }
    }
}

impl std::fmt::Display for NavState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for NavState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "elsewhere" => Ok(NavState::Elsewhere),
            "in_session" => Ok(NavState::InSession),
            _ => Err(format!("Unknown navigation state: {}", s)),
        }
    }
}
