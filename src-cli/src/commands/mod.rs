//! Editor command line
//!
//! Each line typed at the prompt is one command. Quit-family commands go
//! through the guard; the rest shape the in-memory editor.

pub mod buffers;
pub mod navigation;
pub mod quit;

use serde::Serialize;
use std::fmt;

use mainterm_core::{BufferId, BufferInfo, NavOutcome, NavState, QuitOutcome, QuitStep};

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BufferSummary {
    pub id: BufferId,
    pub name: String,
    pub kind: String,
    pub loaded: bool,
    pub modified: bool,
    pub current: bool,
    pub main_session: bool,
}

impl BufferSummary {
    pub fn new(info: BufferInfo, current: bool, main_session: bool) -> Self {
        Self {
            id: info.id,
            name: info.display_name().to_string(),
            kind: info.kind.as_str().to_string(),
            loaded: info.loaded,
            modified: info.modified,
            current,
            main_session,
        }
    }
}

impl fmt::Display for BufferSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let current = if self.current { '%' } else { ' ' };
        let loaded = if self.loaded { 'a' } else { 'u' };
        let modified = if self.modified { '+' } else { ' ' };
        let session = if self.main_session {
            'M'
        } else if self.kind == "session" {
            'T'
        } else {
            ' '
        };
        write!(
            f,
            "{:>3} {}{}{}{} \"{}\"",
            self.id.get(),
            current,
            loaded,
            session,
            modified,
            self.name
        )
    }
}

/// What a command reports back
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Reply {
    Quit(QuitOutcome),
    Navigation {
        outcome: Option<NavOutcome>,
        state: NavState,
    },
    Buffer(BufferSummary),
    Buffers(Vec<BufferSummary>),
    Layout {
        tabs: usize,
        windows: usize,
    },
    Status {
        state: NavState,
        main_session: Option<BufferId>,
        cwd: Option<String>,
    },
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Quit(outcome) => match outcome {
                QuitOutcome::Native { command, failed } => {
                    write!(f, ":{}", command)?;
                    if *failed {
                        write!(f, " failed")?;
                    }
                    Ok(())
                }
                QuitOutcome::TornDown { deleted } => {
                    write!(f, "Closed {} buffer(s), main session kept", deleted)
                }
                QuitOutcome::ReturnedToSession { deleted, warnings } => {
                    write!(f, "Closed {} buffer(s), back in main session", deleted)?;
                    if *warnings > 0 {
                        write!(f, " ({} warning(s))", warnings)?;
                    }
                    Ok(())
                }
                QuitOutcome::Aborted { step } => {
                    let step = match step {
                        QuitStep::Write => "write",
                        QuitStep::Delete => "delete",
                    };
                    write!(f, "Quit stopped at {} step", step)
                }
            },
            Reply::Navigation { outcome, state } => match outcome {
                Some(NavOutcome::EnteredSession { session, origin }) => {
                    write!(f, "Buffer {} -> session {}", origin, session)
                }
                Some(NavOutcome::ReturnedToOrigin { session, origin }) => {
                    write!(f, "Session {} -> buffer {}", session, origin)
                }
                None => write!(f, "Still {}", state),
            },
            Reply::Buffer(summary) => write!(f, "{}", summary),
            Reply::Buffers(list) => {
                let lines: Vec<String> = list.iter().map(|b| b.to_string()).collect();
                write!(f, "{}", lines.join("\n"))
            }
            Reply::Layout { tabs, windows } => {
                write!(f, "{} tab page(s), {} window(s) in this tab", tabs, windows)
            }
            Reply::Status {
                state,
                main_session,
                cwd,
            } => {
                match main_session {
                    Some(id) => write!(f, "Main session {}, {}", id, state)?,
                    None => write!(f, "No main session")?,
                }
                if let Some(cwd) = cwd {
                    write!(f, ", cwd {}", cwd)?;
                }
                Ok(())
            }
        }
    }
}

/// Route one command line
pub fn dispatch(state: &AppState, line: &str) -> CommandResult<Reply> {
    if let Some(result) = quit::run_ex(state, line) {
        return result;
    }

    let input = line.trim();
    let input = input.strip_prefix(':').unwrap_or(input).trim_start();
    let (name, arg) = match input.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (input, ""),
    };

    tracing::debug!(command = name, arg, "Dispatching command");

    match name {
        "MainTerm" | "mt" => navigation::toggle_session(state),
        "status" => navigation::status(state),
        "e" | "edit" => buffers::edit(state, arg),
        "enew" => buffers::new_buffer(state),
        "modify" => buffers::modify(state),
        "unload" => buffers::unload(state, arg),
        "sp" | "split" => buffers::split(state),
        "tabnew" => buffers::tab_new(state),
        "b" | "buffer" => buffers::focus(state, arg),
        "ls" | "buffers" => buffers::list(state),
        _ => CommandResult::err(format!("Not an editor command: {}", input)),
    }
}

/// Parse a buffer number argument
fn parse_buffer(arg: &str) -> Result<BufferId, String> {
    arg.parse::<u32>()
        .map(BufferId::new)
        .map_err(|_| format!("Invalid buffer number: {:?}", arg))
}
