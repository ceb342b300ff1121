//! Host error types

use thiserror::Error;

use crate::types::{BufferId, TabId, WindowId};

#[derive(Error, Debug)]
pub enum HostError {
    #[error("No such buffer: {0}")]
    NoSuchBuffer(BufferId),

    #[error("No such window: {0}")]
    NoSuchWindow(WindowId),

    #[error("No such tab page: {0}")]
    NoSuchTab(TabId),

    #[error("No write since last change for buffer {0} (add ! to override)")]
    Unsaved(BufferId),

    #[error("Buffer {0} cannot be written")]
    NotWritable(BufferId),

    #[error("Cannot close last window")]
    LastWindow,

    #[error("Cannot close last tab page")]
    LastTab,

    #[error("{op} rejected: {reason}")]
    Rejected { op: &'static str, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
