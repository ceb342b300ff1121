//! Application state management
use mainterm_core::{Guard, GuardConfig, MemoryHost, Result, StartupOutcome};
use parking_lot::RwLock;
use std::sync::Arc;

/// The guard plus the editor it guards
pub struct AppState {
    guard: Guard,
    host: Arc<RwLock<MemoryHost>>,
    /// Host warnings already printed
    warnings_seen: Arc<RwLock<usize>>,
    json: bool,
}

impl AppState {
    pub fn new(config: GuardConfig, json: bool) -> Result<Self> {
        Ok(Self {
            guard: Guard::new(config)?,
            host: Arc::new(RwLock::new(MemoryHost::new())),
            warnings_seen: Arc::new(RwLock::new(0)),
            json,
        })
    }

    /// Open `files`, then fire the startup event
    pub fn start(&self, files: &[String]) -> Result<StartupOutcome> {
        let mut host = self.host.write();
        for file in files {
            host.edit(file);
        }
        self.guard.on_startup(&mut *host, files)
    }

    pub fn with_host<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&Guard, &mut MemoryHost) -> T,
    {
        let mut host = self.host.write();
        f(&self.guard, &mut host)
    }

    /// Warnings raised since the last call
    pub fn take_warnings(&self) -> Vec<String> {
        let host = self.host.read();
        let mut seen = self.warnings_seen.write();
        let fresh = host.warnings().get(*seen..).unwrap_or_default().to_vec();
        *seen = host.warnings().len();
        fresh
    }

    /// Whether a native quit ended the editor
    pub fn exited(&self) -> bool {
        self.host.read().exited()
    }

    pub fn json(&self) -> bool {
        self.json
    }
}
