//! mainterm Teardown
//!
//! Mechanics of closing everything except the guarded session:
//! - Write modified buffers, stopping at the first failure
//! - Delete every buffer that is not the marked session
//! - Collapse the layout to a single window in a single tab
//!
//! None of this is transactional. A failure partway leaves the completed
//! steps in effect.

mod closer;
mod error;
mod layout;

pub use closer::ResourceCloser;
pub use error::TeardownError;
pub use layout::{collapse_to_single_window, LayoutSummary};

pub type Result<T> = std::result::Result<T, TeardownError>;
