//! Identifiers and plain data exchanged with the host editor

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque buffer handle. Never reused within one editor process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BufferId(u32);

impl BufferId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(u32);

impl WindowId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(u32);

impl TabId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BufferKind {
    /// Ordinary text buffer, possibly backed by a file
    Normal,
    /// Interactive shell rather than file text
    Session,
}

impl BufferKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BufferKind::Normal => "normal",
            BufferKind::Session => "session",
        }
    }
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot of the buffer attributes the guard cares about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferInfo {
    pub id: BufferId,
    /// File name or session title; `None` for an unnamed buffer
    pub name: Option<String>,
    pub kind: BufferKind,
    pub loaded: bool,
    /// Only meaningful for normal buffers
    pub modified: bool,
}

impl BufferInfo {
    pub fn is_session(&self) -> bool {
        self.kind == BufferKind::Session
    }

    /// Loaded normal buffer with unsaved changes
    pub fn needs_write(&self) -> bool {
        self.loaded && self.kind == BufferKind::Normal && self.modified
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("[No Name]")
    }
}

/// The quit-family commands the guard intercepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuitCommand {
    Quit,
    WriteQuit,
    QuitAll,
    WriteQuitAll,
}

impl QuitCommand {
    /// Whether the command saves modified buffers first
    pub fn writes(&self) -> bool {
        matches!(self, QuitCommand::WriteQuit | QuitCommand::WriteQuitAll)
    }

    /// Whether the command targets every buffer rather than the current one
    pub fn is_all(&self) -> bool {
        matches!(self, QuitCommand::QuitAll | QuitCommand::WriteQuitAll)
    }

    /// Name of the built-in ex command
    pub fn native_name(&self) -> &'static str {
        match self {
            QuitCommand::Quit => "quit",
            QuitCommand::WriteQuit => "wq",
            QuitCommand::QuitAll => "qall",
            QuitCommand::WriteQuitAll => "wqall",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuitCommand::Quit => "quit",
            QuitCommand::WriteQuit => "write_quit",
            QuitCommand::QuitAll => "quit_all",
            QuitCommand::WriteQuitAll => "write_quit_all",
        }
    }
}

impl fmt::Display for QuitCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A built-in quit-family command, run unmodified when the guard steps aside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCommand {
    pub command: QuitCommand,
    pub force: bool,
}

impl NativeCommand {
    pub fn new(command: QuitCommand, force: bool) -> Self {
        Self { command, force }
    }
}

impl fmt::Display for NativeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bang = if self.force { "!" } else { "" };
        write!(f, "{}{}", self.command.native_name(), bang)
    }
}
