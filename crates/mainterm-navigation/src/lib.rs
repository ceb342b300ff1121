//! mainterm Navigation
//!
//! Toggles focus between the guarded session and the buffer the user was
//! in before jumping to it:
//! ```text
//! Elsewhere --toggle--> InSession   (records origin, focuses session)
//! InSession --toggle--> Elsewhere   (focuses origin if still loaded)
//! ```

mod error;
mod navigator;
mod state;

pub use error::NavigationError;
pub use navigator::{NavOutcome, Navigator};
pub use state::NavState;

pub type Result<T> = std::result::Result<T, NavigationError>;
