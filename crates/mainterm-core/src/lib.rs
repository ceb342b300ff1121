//! mainterm Core
//!
//! Keeps one long-lived shell session inside the editor alive across the
//! editor's quit commands. `Guard` is the entry point: it opens the session
//! at startup, intercepts the quit family and toggles focus to and from
//! the session.

mod config;
mod error;
mod guard;
mod startup;

pub use config::GuardConfig;
pub use error::GuardError;
pub use guard::Guard;
pub use startup::{read_lastdir, SkipReason, StartupOutcome};

// Re-export the components
pub use mainterm_host::{
    BufferId, BufferInfo, BufferKind, EditorHost, HostError, HostEvent, MemoryHost,
    NativeCommand, QuitCommand, TabId, WindowId,
};
pub use mainterm_navigation::{NavOutcome, NavState, NavigationError, Navigator};
pub use mainterm_quit::{
    decide, ExCommand, QuitContext, QuitEngine, QuitOutcome, QuitPlan, QuitStep,
};
pub use mainterm_session::{SessionError, SessionRecord, SessionRegistry};
pub use mainterm_teardown::{
    collapse_to_single_window, LayoutSummary, ResourceCloser, TeardownError,
};

pub type Result<T> = std::result::Result<T, GuardError>;

/// Initialize logging
///
/// Logs go to stderr so command output on stdout stays clean.
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
