//! Navigation Controller

use serde::Serialize;

use mainterm_host::{BufferId, EditorHost};
use mainterm_session::SessionRegistry;

use crate::error::NavigationError;
use crate::state::NavState;
use crate::Result;

/// Result of a successful toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NavOutcome {
    /// Jumped into the session, remembering where from
    EnteredSession { session: BufferId, origin: BufferId },
    /// Jumped back out to the remembered buffer
    ReturnedToOrigin { session: BufferId, origin: BufferId },
}

impl NavOutcome {
    /// State after the toggle
    pub fn state(&self) -> NavState {
        match self {
            NavOutcome::EnteredSession { .. } => NavState::InSession,
            NavOutcome::ReturnedToOrigin { .. } => NavState::Elsewhere,
        }
    }
}

pub struct Navigator {
    registry: SessionRegistry,
}

impl Navigator {
    pub fn new(registry: SessionRegistry) -> Self {
        Self { registry }
    }

    pub fn state(&self, host: &dyn EditorHost) -> NavState {
        NavState::observe(host, &self.registry)
    }

    /// Jump into the marked session, or back out of it
    pub fn toggle(&self, host: &mut dyn EditorHost) -> Result<NavOutcome> {
        match self.state(host) {
            NavState::Elsewhere => self.enter(host),
            NavState::InSession => self.leave(host),
        }
    }

    /// Focus the first marked session without touching its origin link
    pub fn focus_session(&self, host: &mut dyn EditorHost) -> Result<BufferId> {
        let session = self
            .registry
            .first_marked(host)
            .ok_or(NavigationError::NoMarkedSession)?;
        host.focus_buffer(session)?;
        Ok(session)
    }

    fn enter(&self, host: &mut dyn EditorHost) -> Result<NavOutcome> {
        let session = self
            .registry
            .first_marked(host)
            .ok_or(NavigationError::NoMarkedSession)?;
        let origin = host.current_buffer();

        self.registry.set_origin(session, origin)?;
        host.focus_buffer(session)?;

        tracing::debug!(
            session = %session,
            origin = %origin,
            from = %NavState::Elsewhere,
            to = %NavState::InSession,
            "Navigation transition"
        );

        Ok(NavOutcome::EnteredSession { session, origin })
    }

    fn leave(&self, host: &mut dyn EditorHost) -> Result<NavOutcome> {
        let session = host.current_buffer();
        let origin = self
            .registry
            .origin(session)
            .filter(|origin| host.is_loaded(*origin))
            .ok_or(NavigationError::NoValidOrigin(session))?;

        host.focus_buffer(origin)?;

        tracing::debug!(
            session = %session,
            origin = %origin,
            from = %NavState::InSession,
            to = %NavState::Elsewhere,
            "Navigation transition"
        );

        Ok(NavOutcome::ReturnedToOrigin { session, origin })
    }
}

impl Clone for Navigator {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
        }
    }
}
