//! Teardown error types

use mainterm_host::{BufferId, HostError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TeardownError {
    #[error("Failed to focus buffer {buffer}: {source}")]
    Focus {
        buffer: BufferId,
        #[source]
        source: HostError,
    },

    #[error("Failed to write buffer {buffer}: {source}")]
    Write {
        buffer: BufferId,
        #[source]
        source: HostError,
    },

    #[error("Failed to delete buffer {buffer}: {source}")]
    Delete {
        buffer: BufferId,
        #[source]
        source: HostError,
    },

    #[error("Buffer {0} is not loaded and belongs to no window being closed")]
    UnloadedBuffer(BufferId),

    #[error("Buffer {0} is not loaded, its changes cannot be checked (add ! to delete it)")]
    UnloadedNeedsForce(BufferId),
}

impl TeardownError {
    /// The buffer the failing step was working on
    pub fn buffer(&self) -> BufferId {
        match self {
            TeardownError::Focus { buffer, .. }
            | TeardownError::Write { buffer, .. }
            | TeardownError::Delete { buffer, .. } => *buffer,
            TeardownError::UnloadedBuffer(buffer) | TeardownError::UnloadedNeedsForce(buffer) => {
                *buffer
            }
        }
    }

    /// Refused by policy before any buffer was touched
    pub fn is_refusal(&self) -> bool {
        matches!(
            self,
            TeardownError::UnloadedBuffer(_) | TeardownError::UnloadedNeedsForce(_)
        )
    }
}
