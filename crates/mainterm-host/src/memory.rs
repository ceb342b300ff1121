//! In-memory editor model
//!
//! Behaves like a small modal editor: buffers are listed in creation order,
//! every tab owns at least one window, and the last window of the last tab
//! cannot be closed. Every mutating call is journaled so callers can assert
//! on the exact sequence of host operations.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::error::HostError;
use crate::host::EditorHost;
use crate::types::{BufferId, BufferInfo, BufferKind, NativeCommand, QuitCommand, TabId, WindowId};
use crate::Result;

const FIRST_WINDOW_ID: u32 = 1000;

/// One journaled host operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    Focused { buffer: BufferId },
    Saved { buffer: BufferId, force: bool },
    Deleted { buffer: BufferId, force: bool },
    WindowClosed { window: WindowId },
    TabClosed { tab: TabId },
    Native { command: NativeCommand },
    SessionCreated { buffer: BufferId },
    DirectoryChanged { dir: PathBuf },
    Warned { message: String },
}

#[derive(Debug, Clone)]
struct TabEntry {
    id: TabId,
    windows: Vec<WindowId>,
    current: WindowId,
}

#[derive(Debug)]
pub struct MemoryHost {
    /// Listed buffers in creation order
    buffers: Vec<BufferInfo>,
    /// Buffer shown by each window
    windows: HashMap<WindowId, BufferId>,
    tabs: Vec<TabEntry>,
    current_tab: TabId,
    next_buffer: u32,
    next_window: u32,
    next_tab: u32,
    cwd: Option<PathBuf>,
    journal: Vec<HostEvent>,
    warnings: Vec<String>,
    fail_save: HashSet<BufferId>,
    fail_delete: HashSet<BufferId>,
    fail_focus: HashSet<BufferId>,
    exited: bool,
}

impl MemoryHost {
    /// One tab, one window, one empty unnamed buffer
    pub fn new() -> Self {
        let buffer = BufferId::new(1);
        let window = WindowId::new(FIRST_WINDOW_ID);
        let tab = TabId::new(1);

        let mut windows = HashMap::new();
        windows.insert(window, buffer);

        Self {
            buffers: vec![BufferInfo {
                id: buffer,
                name: None,
                kind: BufferKind::Normal,
                loaded: true,
                modified: false,
            }],
            windows,
            tabs: vec![TabEntry {
                id: tab,
                windows: vec![window],
                current: window,
            }],
            current_tab: tab,
            next_buffer: 2,
            next_window: FIRST_WINDOW_ID + 1,
            next_tab: 2,
            cwd: None,
            journal: Vec::new(),
            warnings: Vec::new(),
            fail_save: HashSet::new(),
            fail_delete: HashSet::new(),
            fail_focus: HashSet::new(),
            exited: false,
        }
    }

    // === Scenario building ===

    /// Open a named file buffer in the focused window, reusing an existing one
    pub fn edit(&mut self, name: &str) -> BufferId {
        if let Some(existing) = self
            .buffers
            .iter()
            .find(|b| b.name.as_deref() == Some(name))
            .map(|b| b.id)
        {
            self.show_in_current(existing);
            return existing;
        }

        let id = self.add_buffer(Some(name.to_string()), BufferKind::Normal, true, false);
        self.show_in_current(id);
        id
    }

    /// Open a new unnamed buffer in the focused window
    pub fn new_buffer(&mut self) -> BufferId {
        let id = self.add_buffer(None, BufferKind::Normal, true, false);
        self.show_in_current(id);
        id
    }

    /// Add a listed buffer without displaying it
    pub fn add_buffer(
        &mut self,
        name: Option<String>,
        kind: BufferKind,
        loaded: bool,
        modified: bool,
    ) -> BufferId {
        let id = BufferId::new(self.next_buffer);
        self.next_buffer += 1;
        self.buffers.push(BufferInfo {
            id,
            name,
            kind,
            loaded,
            modified: modified && loaded && kind == BufferKind::Normal,
        });
        id
    }

    pub fn set_modified(&mut self, buffer: BufferId, modified: bool) -> Result<()> {
        let entry = self.entry_mut(buffer)?;
        entry.modified = modified && entry.loaded && entry.kind == BufferKind::Normal;
        Ok(())
    }

    /// Unload a buffer's contents while keeping it listed
    pub fn unload(&mut self, buffer: BufferId) -> Result<()> {
        let entry = self.entry_mut(buffer)?;
        entry.loaded = false;
        entry.modified = false;
        self.detach_from_windows(buffer);
        Ok(())
    }

    /// Split the focused window; the new window shows the same buffer
    pub fn split(&mut self) -> WindowId {
        let buffer = self.current_buffer();
        let window = self.allocate_window(buffer);
        let tab = self.current_tab_entry_mut();
        tab.windows.push(window);
        tab.current = window;
        window
    }

    /// Open a new tab page holding one window on a new empty buffer
    pub fn tab_new(&mut self) -> TabId {
        let buffer = self.add_buffer(None, BufferKind::Normal, true, false);
        let window = self.allocate_window(buffer);
        let id = TabId::new(self.next_tab);
        self.next_tab += 1;
        self.tabs.push(TabEntry {
            id,
            windows: vec![window],
            current: window,
        });
        self.current_tab = id;
        id
    }

    pub fn fail_save_on(&mut self, buffer: BufferId) {
        self.fail_save.insert(buffer);
    }

    pub fn fail_delete_on(&mut self, buffer: BufferId) {
        self.fail_delete.insert(buffer);
    }

    pub fn fail_focus_on(&mut self, buffer: BufferId) {
        self.fail_focus.insert(buffer);
    }

    // === Inspection ===

    pub fn buffers(&self) -> &[BufferInfo] {
        &self.buffers
    }

    pub fn journal(&self) -> &[HostEvent] {
        &self.journal
    }

    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Whether a native command ended the editor process
    pub fn exited(&self) -> bool {
        self.exited
    }

    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Total number of windows across all tabs
    pub fn total_windows(&self) -> usize {
        self.windows.len()
    }

    // === Internals ===

    fn entry(&self, buffer: BufferId) -> Result<&BufferInfo> {
        self.buffers
            .iter()
            .find(|b| b.id == buffer)
            .ok_or(HostError::NoSuchBuffer(buffer))
    }

    fn entry_mut(&mut self, buffer: BufferId) -> Result<&mut BufferInfo> {
        self.buffers
            .iter_mut()
            .find(|b| b.id == buffer)
            .ok_or(HostError::NoSuchBuffer(buffer))
    }

    fn allocate_window(&mut self, buffer: BufferId) -> WindowId {
        let window = WindowId::new(self.next_window);
        self.next_window += 1;
        self.windows.insert(window, buffer);
        window
    }

    fn current_tab_entry(&self) -> &TabEntry {
        self.tabs
            .iter()
            .find(|t| t.id == self.current_tab)
            .unwrap_or(&self.tabs[0])
    }

    fn current_tab_entry_mut(&mut self) -> &mut TabEntry {
        let current = self.current_tab;
        let index = self.tabs.iter().position(|t| t.id == current).unwrap_or(0);
        &mut self.tabs[index]
    }

    fn show_in_current(&mut self, buffer: BufferId) {
        let window = self.current_window();
        if let Ok(entry) = self.entry_mut(buffer) {
            entry.loaded = true;
        }
        self.windows.insert(window, buffer);
    }

    /// Point every window showing `buffer` at some other loaded buffer
    fn detach_from_windows(&mut self, buffer: BufferId) {
        let showing: Vec<WindowId> = self
            .windows
            .iter()
            .filter(|(_, b)| **b == buffer)
            .map(|(w, _)| *w)
            .collect();
        if showing.is_empty() {
            return;
        }

        let replacement = match self
            .buffers
            .iter()
            .find(|b| b.id != buffer && b.loaded)
            .map(|b| b.id)
        {
            Some(id) => id,
            None => self.add_buffer(None, BufferKind::Normal, true, false),
        };

        for window in showing {
            self.windows.insert(window, replacement);
        }
    }

    fn write_buffer(&mut self, buffer: BufferId, force: bool) -> Result<()> {
        if self.fail_save.contains(&buffer) {
            return Err(HostError::Rejected {
                op: "write",
                reason: format!("cannot open buffer {} for writing", buffer),
            });
        }

        let entry = self.entry_mut(buffer)?;
        if entry.kind == BufferKind::Session || entry.name.is_none() {
            return Err(HostError::NotWritable(buffer));
        }
        entry.modified = false;

        self.journal.push(HostEvent::Saved { buffer, force });
        Ok(())
    }

    fn first_unsaved(&self) -> Option<BufferId> {
        self.buffers.iter().find(|b| b.needs_write()).map(|b| b.id)
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorHost for MemoryHost {
    fn list_buffers(&self) -> Vec<BufferId> {
        self.buffers.iter().map(|b| b.id).collect()
    }

    fn buffer_info(&self, buffer: BufferId) -> Option<BufferInfo> {
        self.entry(buffer).ok().cloned()
    }

    fn current_buffer(&self) -> BufferId {
        let window = self.current_window();
        self.windows
            .get(&window)
            .copied()
            .unwrap_or_else(|| self.buffers[0].id)
    }

    fn list_tabs(&self) -> Vec<TabId> {
        self.tabs.iter().map(|t| t.id).collect()
    }

    fn current_tab(&self) -> TabId {
        self.current_tab
    }

    fn tab_windows(&self, tab: TabId) -> Vec<WindowId> {
        self.tabs
            .iter()
            .find(|t| t.id == tab)
            .map(|t| t.windows.clone())
            .unwrap_or_default()
    }

    fn current_window(&self) -> WindowId {
        self.current_tab_entry().current
    }

    fn window_buffer(&self, window: WindowId) -> Option<BufferId> {
        self.windows.get(&window).copied()
    }

    fn focus_buffer(&mut self, buffer: BufferId) -> Result<()> {
        if self.fail_focus.contains(&buffer) {
            return Err(HostError::Rejected {
                op: "focus",
                reason: format!("buffer {} refused focus", buffer),
            });
        }
        self.entry(buffer)?;

        self.show_in_current(buffer);
        self.journal.push(HostEvent::Focused { buffer });
        Ok(())
    }

    fn save_current(&mut self, force: bool) -> Result<()> {
        let buffer = self.current_buffer();
        self.write_buffer(buffer, force)
    }

    fn delete_buffer(&mut self, buffer: BufferId, force: bool) -> Result<()> {
        if self.fail_delete.contains(&buffer) {
            return Err(HostError::Rejected {
                op: "delete",
                reason: format!("buffer {} is locked", buffer),
            });
        }
        if self.entry(buffer)?.modified && !force {
            return Err(HostError::Unsaved(buffer));
        }

        self.buffers.retain(|b| b.id != buffer);
        self.detach_from_windows(buffer);

        tracing::debug!(buffer = %buffer, force, "Deleted buffer");
        self.journal.push(HostEvent::Deleted { buffer, force });
        Ok(())
    }

    fn close_window(&mut self, window: WindowId, _force: bool) -> Result<()> {
        let tab_index = self
            .tabs
            .iter()
            .position(|t| t.windows.contains(&window))
            .ok_or(HostError::NoSuchWindow(window))?;

        if self.tabs[tab_index].windows.len() == 1 {
            if self.tabs.len() == 1 {
                return Err(HostError::LastWindow);
            }
            // Closing the only window of a tab closes the tab
            let tab = self.tabs[tab_index].id;
            return self.close_tab(tab, false);
        }

        let tab = &mut self.tabs[tab_index];
        tab.windows.retain(|w| *w != window);
        if tab.current == window {
            tab.current = tab.windows[0];
        }
        self.windows.remove(&window);

        self.journal.push(HostEvent::WindowClosed { window });
        Ok(())
    }

    fn close_tab(&mut self, tab: TabId, _force: bool) -> Result<()> {
        if self.tabs.len() == 1 {
            return Err(HostError::LastTab);
        }
        let index = self
            .tabs
            .iter()
            .position(|t| t.id == tab)
            .ok_or(HostError::NoSuchTab(tab))?;

        let removed = self.tabs.remove(index);
        for window in &removed.windows {
            self.windows.remove(window);
        }
        if self.current_tab == tab {
            self.current_tab = self.tabs[index.min(self.tabs.len() - 1)].id;
        }

        self.journal.push(HostEvent::TabClosed { tab });
        Ok(())
    }

    fn run_native(&mut self, command: &NativeCommand) -> Result<()> {
        self.journal.push(HostEvent::Native { command: *command });

        match command.command {
            QuitCommand::Quit | QuitCommand::WriteQuit => {
                let buffer = self.current_buffer();
                if command.command == QuitCommand::WriteQuit {
                    self.write_buffer(buffer, command.force)?;
                }

                if self.windows.len() > 1 {
                    let window = self.current_window();
                    return self.close_window(window, command.force);
                }
                if !command.force {
                    if let Some(unsaved) = self.first_unsaved() {
                        return Err(HostError::Unsaved(unsaved));
                    }
                }
                self.exited = true;
            }
            QuitCommand::QuitAll | QuitCommand::WriteQuitAll => {
                if command.command == QuitCommand::WriteQuitAll {
                    let pending: Vec<BufferId> = self
                        .buffers
                        .iter()
                        .filter(|b| b.needs_write())
                        .map(|b| b.id)
                        .collect();
                    for buffer in pending {
                        self.write_buffer(buffer, command.force)?;
                    }
                }
                if !command.force {
                    if let Some(unsaved) = self.first_unsaved() {
                        return Err(HostError::Unsaved(unsaved));
                    }
                }
                self.exited = true;
            }
        }

        Ok(())
    }

    fn create_session_buffer(&mut self) -> Result<BufferId> {
        let id = self.add_buffer(
            Some("term://shell".to_string()),
            BufferKind::Session,
            true,
            false,
        );
        self.show_in_current(id);
        self.journal.push(HostEvent::SessionCreated { buffer: id });
        Ok(id)
    }

    fn set_working_directory(&mut self, dir: &Path) -> Result<()> {
        if !dir.is_dir() {
            return Err(HostError::Rejected {
                op: "cd",
                reason: format!("{} is not a directory", dir.display()),
            });
        }

        self.cwd = Some(dir.to_path_buf());
        self.journal.push(HostEvent::DirectoryChanged {
            dir: dir.to_path_buf(),
        });
        Ok(())
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
        self.journal.push(HostEvent::Warned {
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_host_layout() {
        let host = MemoryHost::new();
        assert_eq!(host.list_buffers().len(), 1);
        assert_eq!(host.tab_count(), 1);
        assert_eq!(host.window_count(), 1);
        assert_eq!(host.current_buffer(), BufferId::new(1));
    }

    #[test]
    fn test_delete_switches_windows_to_remaining_buffer() {
        let mut host = MemoryHost::new();
        let a = host.edit("a.txt");
        host.split();
        let b = host.edit("b.txt");

        host.delete_buffer(b, false).unwrap();

        assert!(host.buffer_info(b).is_none());
        for window in host.tab_windows(host.current_tab()) {
            assert_ne!(host.window_buffer(window), Some(b));
        }
        assert!(host.buffer_info(a).is_some());
    }

    #[test]
    fn test_delete_modified_requires_force() {
        let mut host = MemoryHost::new();
        let a = host.edit("a.txt");
        host.set_modified(a, true).unwrap();

        assert!(matches!(
            host.delete_buffer(a, false),
            Err(HostError::Unsaved(_))
        ));
        host.delete_buffer(a, true).unwrap();
        assert!(host.buffer_info(a).is_none());
    }

    #[test]
    fn test_last_window_and_tab_refused() {
        let mut host = MemoryHost::new();
        let window = host.current_window();
        let tab = host.current_tab();

        assert!(matches!(
            host.close_window(window, true),
            Err(HostError::LastWindow)
        ));
        assert!(matches!(host.close_tab(tab, true), Err(HostError::LastTab)));
    }

    #[test]
    fn test_closing_only_window_of_tab_closes_tab() {
        let mut host = MemoryHost::new();
        let first = host.current_tab();
        let second = host.tab_new();
        let window = host.current_window();

        host.close_window(window, false).unwrap();

        assert_eq!(host.list_tabs(), vec![first]);
        assert_eq!(host.current_tab(), first);
        assert!(host.journal().contains(&HostEvent::TabClosed { tab: second }));
    }

    #[test]
    fn test_save_session_buffer_not_writable() {
        let mut host = MemoryHost::new();
        host.create_session_buffer().unwrap();
        assert!(matches!(
            host.save_current(false),
            Err(HostError::NotWritable(_))
        ));
    }

    #[test]
    fn test_native_quit_all_with_unsaved_changes() {
        let mut host = MemoryHost::new();
        let a = host.edit("a.txt");
        host.set_modified(a, true).unwrap();

        let result = host.run_native(&NativeCommand::new(QuitCommand::QuitAll, false));
        assert!(matches!(result, Err(HostError::Unsaved(_))));
        assert!(!host.exited());

        host.run_native(&NativeCommand::new(QuitCommand::QuitAll, true))
            .unwrap();
        assert!(host.exited());
    }

    #[test]
    fn test_native_quit_closes_window_before_exiting() {
        let mut host = MemoryHost::new();
        host.split();

        host.run_native(&NativeCommand::new(QuitCommand::Quit, false))
            .unwrap();
        assert!(!host.exited());
        assert_eq!(host.total_windows(), 1);

        host.run_native(&NativeCommand::new(QuitCommand::Quit, false))
            .unwrap();
        assert!(host.exited());
    }

    #[test]
    fn test_set_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = MemoryHost::new();

        host.set_working_directory(dir.path()).unwrap();
        assert_eq!(host.cwd(), Some(dir.path()));

        let missing = dir.path().join("missing");
        assert!(host.set_working_directory(&missing).is_err());
        assert_eq!(host.cwd(), Some(dir.path()));
    }

    #[test]
    fn test_injected_failures() {
        let mut host = MemoryHost::new();
        let a = host.edit("a.txt");
        host.set_modified(a, true).unwrap();
        host.fail_save_on(a);

        assert!(host.save_current(true).is_err());
        assert!(host.buffer_info(a).unwrap().modified);

        host.fail_focus_on(a);
        assert!(host.focus_buffer(a).is_err());
    }
}
