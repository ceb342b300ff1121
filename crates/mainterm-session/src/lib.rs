//! mainterm Session Registry
//!
//! Tracks which session buffer is the guarded "main" session and, for each
//! such buffer, the buffer the user came from before jumping into it.
//! - Records are owned here, not attached to host buffers
//! - A record dies with its buffer (see `SessionRegistry::prune`)
//! - At most one live main session can be marked

mod error;
mod record;
mod registry;

pub use error::SessionError;
pub use record::SessionRecord;
pub use registry::SessionRegistry;

pub type Result<T> = std::result::Result<T, SessionError>;
