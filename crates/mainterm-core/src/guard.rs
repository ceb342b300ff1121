//! Guard controller
//!
//! Constructed once per editor process and handed to every command handler.
//! Owns the session registry and the components built on it; there is no
//! teardown, the guard lives as long as the process.

use parking_lot::RwLock;
use std::fmt::Display;
use std::sync::Arc;

use mainterm_host::{BufferId, EditorHost, QuitCommand};
use mainterm_navigation::{NavOutcome, NavState, Navigator};
use mainterm_quit::{ExCommand, QuitEngine, QuitOutcome};
use mainterm_session::SessionRegistry;

use crate::config::GuardConfig;
use crate::error::GuardError;
use crate::startup::{self, StartupOutcome};
use crate::Result;

pub struct Guard {
    /// Configuration
    config: GuardConfig,
    /// Marker registry shared with every component below
    registry: SessionRegistry,
    navigator: Navigator,
    quit_engine: QuitEngine,
    /// Set once startup has run
    started: Arc<RwLock<Option<StartupOutcome>>>,
}

impl Guard {
    pub fn new(config: GuardConfig) -> Result<Self> {
        config.validate()?;

        let registry = SessionRegistry::new();

        Ok(Self {
            config,
            navigator: Navigator::new(registry.clone()),
            quit_engine: QuitEngine::new(registry.clone()),
            registry,
            started: Arc::new(RwLock::new(None)),
        })
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Handle the host's "fully started" event
    pub fn on_startup(
        &self,
        host: &mut dyn EditorHost,
        file_args: &[String],
    ) -> Result<StartupOutcome> {
        let mut started = self.started.write();
        if started.is_some() {
            return Err(GuardError::AlreadyStarted);
        }

        let outcome = startup::initialize(host, &self.registry, &self.config, file_args)?;
        *started = Some(outcome.clone());
        Ok(outcome)
    }

    pub fn startup_outcome(&self) -> Option<StartupOutcome> {
        self.started.read().clone()
    }

    pub fn quit(
        &self,
        host: &mut dyn EditorHost,
        command: QuitCommand,
        force: bool,
    ) -> QuitOutcome {
        self.quit_engine.execute(host, command, force)
    }

    /// Run `line` if it is a quit-family ex command
    pub fn execute_ex(&self, host: &mut dyn EditorHost, line: &str) -> Option<QuitOutcome> {
        let command = ExCommand::parse(line)?;
        Some(self.quit(host, command.command, command.force))
    }

    /// Jump to or from the main session. Failures become warnings.
    pub fn toggle_session(&self, host: &mut dyn EditorHost) -> Option<NavOutcome> {
        match self.navigator.toggle(host) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                surface(host, e);
                None
            }
        }
    }

    pub fn nav_state(&self, host: &dyn EditorHost) -> NavState {
        self.navigator.state(host)
    }

    pub fn main_session(&self, host: &dyn EditorHost) -> Option<BufferId> {
        self.registry.first_marked(host)
    }
}

impl Clone for Guard {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            registry: self.registry.clone(),
            navigator: self.navigator.clone(),
            quit_engine: self.quit_engine.clone(),
            started: self.started.clone(),
        }
    }
}

/// Report a failure to the user and the log
pub(crate) fn surface(host: &mut dyn EditorHost, error: impl Display) {
    let message = error.to_string();
    tracing::warn!("{}", message);
    host.warn(&message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use mainterm_host::{BufferKind, HostEvent, MemoryHost, NativeCommand};

    fn started_guard() -> (Guard, MemoryHost, BufferId) {
        let guard = Guard::new(GuardConfig::new(None)).unwrap();
        let mut host = MemoryHost::new();
        let session = guard.on_startup(&mut host, &[]).unwrap().session().unwrap();
        (guard, host, session)
    }

    #[test]
    fn test_startup_runs_once() {
        let (guard, mut host, session) = started_guard();

        assert!(matches!(
            guard.on_startup(&mut host, &[]),
            Err(GuardError::AlreadyStarted)
        ));
        assert_eq!(guard.main_session(&host), Some(session));
        assert_eq!(guard.startup_outcome().unwrap().session(), Some(session));
    }

    #[test]
    fn test_startup_focus_failure_is_recorded() {
        let guard = Guard::new(GuardConfig::new(None)).unwrap();
        let mut host = MemoryHost::new();
        host.fail_focus_on(BufferId::new(2));

        let outcome = guard.on_startup(&mut host, &[]).unwrap();
        assert_eq!(guard.startup_outcome(), Some(outcome));
        assert_eq!(host.warnings().len(), 1);

        // No second session on a retry
        assert!(matches!(
            guard.on_startup(&mut host, &[]),
            Err(GuardError::AlreadyStarted)
        ));
        assert_eq!(host.list_buffers().len(), 2);
    }

    #[test]
    fn test_inert_without_session() {
        let guard = Guard::new(GuardConfig::new(None)).unwrap();
        let mut host = MemoryHost::new();
        guard
            .on_startup(&mut host, &["a.txt".to_string()])
            .unwrap();
        host.edit("a.txt");

        let outcome = guard.execute_ex(&mut host, "qa!").unwrap();
        assert_eq!(
            outcome,
            QuitOutcome::Native {
                command: NativeCommand::new(QuitCommand::QuitAll, true),
                failed: false
            }
        );
        assert!(host.exited());

        assert!(guard.toggle_session(&mut host).is_none());
        assert_eq!(host.warnings().len(), 1);
    }

    #[test]
    fn test_quit_all_leaves_only_session() {
        let (guard, mut host, session) = started_guard();
        host.edit("a.txt");
        host.split();
        host.edit("b.txt");
        host.tab_new();
        host.split();

        guard.execute_ex(&mut host, ":qa").unwrap();

        assert_eq!(host.tab_count(), 1);
        assert_eq!(host.window_count(), 1);
        assert!(host.is_loaded(session));
        assert!(guard.registry().is_marked(&host, session));
        assert!(!host.exited());
    }

    #[test]
    fn test_quit_returns_to_session_instead_of_exiting() {
        let (guard, mut host, session) = started_guard();
        let a = host.edit("a.txt");

        let outcome = guard.quit(&mut host, QuitCommand::Quit, false);

        assert!(matches!(outcome, QuitOutcome::ReturnedToSession { .. }));
        assert!(host.buffer_info(a).is_none());
        assert_eq!(host.current_buffer(), session);
        assert!(!host.exited());
    }

    #[test]
    fn test_quit_in_split_is_native() {
        let (guard, mut host, _session) = started_guard();
        host.edit("a.txt");
        host.split();

        guard.execute_ex(&mut host, "q").unwrap();

        assert!(!host
            .journal()
            .iter()
            .any(|e| matches!(e, HostEvent::Deleted { .. })));
        assert_eq!(host.total_windows(), 1);
    }

    #[test]
    fn test_not_quit_family() {
        let (guard, mut host, _session) = started_guard();
        host.clear_journal();

        assert!(guard.execute_ex(&mut host, "w").is_none());
        assert!(host.journal().is_empty());
    }

    #[test]
    fn test_toggle_round_trip() {
        let (guard, mut host, session) = started_guard();
        let a = host.edit("a.txt");
        assert_eq!(guard.nav_state(&host), NavState::Elsewhere);

        guard.toggle_session(&mut host).unwrap();
        assert_eq!(host.current_buffer(), session);
        assert_eq!(guard.nav_state(&host), NavState::InSession);

        guard.toggle_session(&mut host).unwrap();
        assert_eq!(host.current_buffer(), a);
    }

    #[test]
    fn test_toggle_without_origin_warns() {
        let (guard, mut host, session) = started_guard();

        assert!(guard.toggle_session(&mut host).is_none());
        assert_eq!(host.current_buffer(), session);
        assert_eq!(host.warnings().len(), 1);
    }

    #[test]
    fn test_unloaded_buffers_need_force_for_quit_all() {
        let (guard, mut host, session) = started_guard();
        for name in ["x", "y", "z"] {
            host.add_buffer(Some(name.to_string()), BufferKind::Normal, false, false);
        }

        guard.execute_ex(&mut host, "qall").unwrap();
        assert_eq!(host.warnings().len(), 1);
        assert!(host.list_buffers().len() > 1);

        guard.execute_ex(&mut host, "qall!").unwrap();
        assert_eq!(host.list_buffers(), vec![session]);
    }

    #[test]
    fn test_clones_share_state() {
        let (guard, mut host, session) = started_guard();
        let other = guard.clone();
        host.edit("a.txt");

        other.toggle_session(&mut host).unwrap();
        assert_eq!(guard.nav_state(&host), NavState::InSession);
        assert!(guard.registry().origin(session).is_some());
        assert!(matches!(
            other.on_startup(&mut host, &[]),
            Err(GuardError::AlreadyStarted)
        ));
    }
}
