//! Session registry error types

use mainterm_host::BufferId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No such buffer: {0}")]
    NoSuchBuffer(BufferId),

    #[error("Buffer {0} is not a session buffer")]
    NotASession(BufferId),

    #[error("Buffer {0} is already the main session")]
    AlreadyMarked(BufferId),

    #[error("Buffer {0} is not a marked session")]
    NotMarked(BufferId),
}
