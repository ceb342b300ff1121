//! Ex command parsing for the quit family
//!
//! Recognized forms (optional leading `:`, optional trailing `!`):
//! - `q`, `qu`, `qui`, `quit`
//! - `wq`, `x`, `xi`, `xit`, `exi`, `exit`
//! - `qa`, `qal`, `qall`, `quita`, `quital`, `quitall`
//! - `wqa`, `wqal`, `wqall`, `xa`, `xal`, `xall`

use serde::{Deserialize, Serialize};

use mainterm_host::{NativeCommand, QuitCommand};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExCommand {
    pub command: QuitCommand,
    /// Trailing `!`
    pub force: bool,
}

impl ExCommand {
    pub fn new(command: QuitCommand, force: bool) -> Self {
        Self { command, force }
    }

    /// Parse a command line; `None` means it is not a quit-family command
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let input = input.strip_prefix(':').unwrap_or(input).trim_start();

        let (name, force) = match input.strip_suffix('!') {
            Some(name) => (name, true),
            None => (input, false),
        };

        let command = match name {
            "q" | "qu" | "qui" | "quit" => QuitCommand::Quit,
            "wq" | "x" | "xi" | "xit" | "exi" | "exit" => QuitCommand::WriteQuit,
            "qa" | "qal" | "qall" | "quita" | "quital" | "quitall" => QuitCommand::QuitAll,
            "wqa" | "wqal" | "wqall" | "xa" | "xal" | "xall" => QuitCommand::WriteQuitAll,
            _ => return None,
        };

        Some(Self { command, force })
    }

    /// The built-in command this would run if not intercepted
    pub fn native(&self) -> NativeCommand {
        NativeCommand::new(self.command, self.force)
    }
}
