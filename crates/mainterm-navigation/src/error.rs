//! Navigation error types

use mainterm_host::BufferId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("No marked session")]
    NoMarkedSession,

    #[error("No valid origin buffer for session {0}")]
    NoValidOrigin(BufferId),

    #[error("Session error: {0}")]
    Session(#[from] mainterm_session::SessionError),

    #[error("Host error: {0}")]
    Host(#[from] mainterm_host::HostError),
}
