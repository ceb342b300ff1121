//! mainterm Quit Decision Engine
//!
//! Intercepts the quit family (`quit`, `wq`, `qall`, `wqall`) and decides,
//! from the force flag and the current layout, whether to:
//! 1. Tear down everything except the guarded session
//! 2. Close the current buffer and return to the guarded session
//! 3. Step aside and run the native command
//!
//! The decision itself (`decide`) is a pure function; `QuitEngine` carries
//! it out against the host.

mod command;
mod decision;
mod engine;

pub use command::ExCommand;
pub use decision::{decide, QuitContext, QuitPlan};
pub use engine::{QuitEngine, QuitOutcome, QuitStep};
