//! Startup Initializer

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use mainterm_host::{BufferId, EditorHost};
use mainterm_session::SessionRegistry;

use crate::config::GuardConfig;
use crate::guard::surface;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The editor was started on files
    FileArguments,
    /// `open_on_startup` is off
    Disabled,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::FileArguments => "file_arguments",
            SkipReason::Disabled => "disabled",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "startup", rename_all = "snake_case")]
pub enum StartupOutcome {
    Skipped {
        reason: SkipReason,
    },
    Opened {
        session: BufferId,
        /// Directory changed into from the lastdir file
        relocated_to: Option<PathBuf>,
        started_at: DateTime<Utc>,
    },
}

impl StartupOutcome {
    pub fn session(&self) -> Option<BufferId> {
        match self {
            StartupOutcome::Opened { session, .. } => Some(*session),
            StartupOutcome::Skipped { .. } => None,
        }
    }
}

impl fmt::Display for StartupOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupOutcome::Skipped { reason } => write!(f, "No main session ({})", reason),
            StartupOutcome::Opened {
                session,
                relocated_to,
                ..
            } => {
                write!(f, "Main session {}", session)?;
                if let Some(dir) = relocated_to {
                    write!(f, " in {}", dir.display())?;
                }
                Ok(())
            }
        }
    }
}

/// First line of the lastdir file, trimmed.
///
/// A missing file or a blank first line is `None`.
pub fn read_lastdir(path: &Path) -> Result<Option<PathBuf>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let line = content.lines().next().unwrap_or("").trim();
    if line.is_empty() {
        return Ok(None);
    }
    Ok(Some(PathBuf::from(line)))
}

pub(crate) fn initialize(
    host: &mut dyn EditorHost,
    registry: &SessionRegistry,
    config: &GuardConfig,
    file_args: &[String],
) -> Result<StartupOutcome> {
    if !file_args.is_empty() {
        tracing::debug!(files = file_args.len(), "Started on files, no session");
        return Ok(StartupOutcome::Skipped {
            reason: SkipReason::FileArguments,
        });
    }
    if !config.open_on_startup {
        return Ok(StartupOutcome::Skipped {
            reason: SkipReason::Disabled,
        });
    }

    let relocated_to = match (&config.lastdir_file, config.relocate_on_startup) {
        (Some(path), true) => relocate(host, path),
        _ => None,
    };

    let session = host.create_session_buffer()?;
    registry.mark_main_session(host, session)?;
    // The session exists and is marked from here on; focus is cosmetic
    if let Err(e) = host.focus_buffer(session) {
        surface(host, e);
    }

    tracing::info!(
        session = %session,
        relocated_to = ?relocated_to,
        "Opened main session"
    );

    Ok(StartupOutcome::Opened {
        session,
        relocated_to,
        started_at: Utc::now(),
    })
}

/// Change into the directory named by the lastdir file. Failures warn.
fn relocate(host: &mut dyn EditorHost, lastdir_file: &Path) -> Option<PathBuf> {
    let dir = match read_lastdir(lastdir_file) {
        Ok(Some(dir)) => dir,
        Ok(None) => {
            tracing::debug!(file = %lastdir_file.display(), "No last directory");
            return None;
        }
        Err(e) => {
            surface(
                host,
                format!("Cannot read {}: {}", lastdir_file.display(), e),
            );
            return None;
        }
    };

    match host.set_working_directory(&dir) {
        Ok(()) => {
            tracing::info!(dir = %dir.display(), "Relocated to last directory");
            Some(dir)
        }
        Err(e) => {
            surface(host, e);
            None
        }
    }
}
