//! mainterm Host Surface
//!
//! Everything the guard needs from the editor it runs inside:
//! - Buffer / window / tab enumeration and attributes
//! - Focus, write, delete and close primitives
//! - The native quit-family commands used as fallback
//! - User-visible warnings
//!
//! `MemoryHost` is a small in-memory editor implementing the same surface.

mod error;
mod host;
mod memory;
mod types;

pub use error::HostError;
pub use host::EditorHost;
pub use memory::{HostEvent, MemoryHost};
pub use types::{BufferId, BufferInfo, BufferKind, NativeCommand, QuitCommand, TabId, WindowId};

pub type Result<T> = std::result::Result<T, HostError>;
