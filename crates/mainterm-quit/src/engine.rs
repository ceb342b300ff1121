//! Quit execution
//!
//! Carries out a `QuitPlan`. Every failure becomes exactly one user-visible
//! warning; nothing here is fatal to the editor.

use serde::Serialize;
use std::fmt::Display;

use mainterm_host::{EditorHost, NativeCommand, QuitCommand};
use mainterm_navigation::Navigator;
use mainterm_session::SessionRegistry;
use mainterm_teardown::{collapse_to_single_window, ResourceCloser, TeardownError};

use crate::decision::{decide, QuitContext, QuitPlan};

/// Teardown step that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuitStep {
    Write,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum QuitOutcome {
    /// The native command ran; `failed` if the editor rejected it
    Native { command: NativeCommand, failed: bool },
    /// Everything but the session was closed and the layout collapsed
    TornDown { deleted: usize },
    /// The current buffer was closed, leaving the session
    ReturnedToSession { deleted: usize, warnings: usize },
    /// A teardown step failed; later steps did not run
    Aborted { step: QuitStep },
}

pub struct QuitEngine {
    registry: SessionRegistry,
    closer: ResourceCloser,
    navigator: Navigator,
}

impl QuitEngine {
    pub fn new(registry: SessionRegistry) -> Self {
        Self {
            closer: ResourceCloser::new(registry.clone()),
            navigator: Navigator::new(registry.clone()),
            registry,
        }
    }

    /// Decide what `command` means right now and do it
    pub fn execute(
        &self,
        host: &mut dyn EditorHost,
        command: QuitCommand,
        force: bool,
    ) -> QuitOutcome {
        let context = QuitContext::capture(host, &self.registry);
        let plan = decide(command, force, &context);

        tracing::debug!(
            command = %command,
            force,
            has_marked = context.has_marked,
            single_window = context.single_window,
            single_tab = context.single_tab,
            plan = ?plan,
            "Quit decision"
        );

        match plan {
            QuitPlan::Native { command } => self.run_native(host, command),
            QuitPlan::TeardownAll { write, force } => self.teardown_all(host, write, force),
            QuitPlan::CloseCurrent { force } => self.close_current(host, force),
            QuitPlan::WriteCloseCurrent { force } => self.write_close_current(host, force),
        }
    }

    fn run_native(&self, host: &mut dyn EditorHost, command: NativeCommand) -> QuitOutcome {
        tracing::info!(command = %command, "Running native command");

        let failed = match host.run_native(&command) {
            Ok(()) => false,
            Err(e) => {
                surface(host, e);
                true
            }
        };

        QuitOutcome::Native { command, failed }
    }

    fn teardown_all(&self, host: &mut dyn EditorHost, write: bool, force: bool) -> QuitOutcome {
        if write {
            if let Err(e) = self.closer.write_modified_non_session_buffers(host, force) {
                surface(host, e);
                return QuitOutcome::Aborted {
                    step: QuitStep::Write,
                };
            }
        }

        let deleted = match self.closer.delete_all_except_marked(host, force, true) {
            Ok(deleted) => deleted,
            Err(e) => {
                surface(host, e);
                return QuitOutcome::Aborted {
                    step: QuitStep::Delete,
                };
            }
        };

        collapse_to_single_window(host);
        self.registry.prune(host);

        tracing::info!(deleted = deleted.len(), write, force, "Tore down all but main session");

        QuitOutcome::TornDown {
            deleted: deleted.len(),
        }
    }

    fn close_current(&self, host: &mut dyn EditorHost, force: bool) -> QuitOutcome {
        match self.closer.delete_all_except_marked(host, force, false) {
            Ok(deleted) => {
                self.registry.prune(host);
                tracing::info!(deleted = deleted.len(), "Closed buffers, main session kept");
                QuitOutcome::ReturnedToSession {
                    deleted: deleted.len(),
                    warnings: 0,
                }
            }
            // An unloaded buffer may belong to a window the user isn't
            // closing: leave the decision to the editor.
            Err(e @ TeardownError::UnloadedBuffer(_)) => {
                surface(host, e);
                self.run_native(host, NativeCommand::new(QuitCommand::Quit, force))
            }
            Err(e) => {
                surface(host, e);
                QuitOutcome::Aborted {
                    step: QuitStep::Delete,
                }
            }
        }
    }

    fn write_close_current(&self, host: &mut dyn EditorHost, force: bool) -> QuitOutcome {
        let mut warnings = 0;

        let wrote_all = match self.closer.write_modified_non_session_buffers(host, force) {
            Ok(_) => true,
            Err(e) => {
                surface(host, e);
                warnings += 1;
                false
            }
        };

        // A buffer whose write failed must not be discarded
        let delete_force = force && wrote_all;
        let deleted = match self
            .closer
            .delete_all_except_marked(host, delete_force, false)
        {
            Ok(deleted) => deleted.len(),
            Err(e) => {
                surface(host, e);
                warnings += 1;
                0
            }
        };

        if let Err(e) = self.navigator.focus_session(host) {
            surface(host, e);
            warnings += 1;
        }
        self.registry.prune(host);

        tracing::info!(deleted, warnings, "Wrote and closed buffers, main session kept");

        QuitOutcome::ReturnedToSession { deleted, warnings }
    }
}

impl Clone for QuitEngine {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            closer: self.closer.clone(),
            navigator: self.navigator.clone(),
        }
    }
}

fn surface(host: &mut dyn EditorHost, error: impl Display) {
    let message = error.to_string();
    tracing::warn!("{}", message);
    host.warn(&message);
}
