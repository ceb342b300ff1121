//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuardError {
    #[error("Host error: {0}")]
    Host(#[from] mainterm_host::HostError),

    #[error("Session error: {0}")]
    Session(#[from] mainterm_session::SessionError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] mainterm_navigation::NavigationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Startup already ran")]
    AlreadyStarted,
}
