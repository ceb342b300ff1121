//! The editor capabilities the guard depends on

use std::path::Path;

use crate::types::{BufferId, BufferInfo, NativeCommand, TabId, WindowId};
use crate::Result;

/// Host editor surface.
///
/// All calls are synchronous and run on the editor's main thread. Queries
/// never fail: a freed handle simply yields `None` or an empty list.
pub trait EditorHost {
    /// All listed buffers, loaded or not, in the host's enumeration order
    fn list_buffers(&self) -> Vec<BufferId>;

    fn buffer_info(&self, buffer: BufferId) -> Option<BufferInfo>;

    /// Buffer shown in the focused window
    fn current_buffer(&self) -> BufferId;

    fn list_tabs(&self) -> Vec<TabId>;

    fn current_tab(&self) -> TabId;

    fn tab_windows(&self, tab: TabId) -> Vec<WindowId>;

    fn current_window(&self) -> WindowId;

    fn window_buffer(&self, window: WindowId) -> Option<BufferId>;

    /// Show `buffer` in the focused window, loading it if needed
    fn focus_buffer(&mut self, buffer: BufferId) -> Result<()>;

    /// Write the focused buffer; `force` overwrites without prompting
    fn save_current(&mut self, force: bool) -> Result<()>;

    /// Remove a buffer; `force` discards unsaved changes
    fn delete_buffer(&mut self, buffer: BufferId, force: bool) -> Result<()>;

    fn close_window(&mut self, window: WindowId, force: bool) -> Result<()>;

    fn close_tab(&mut self, tab: TabId, force: bool) -> Result<()>;

    /// Run the built-in, unintercepted quit-family command
    fn run_native(&mut self, command: &NativeCommand) -> Result<()>;

    /// Open a new interactive shell buffer in the focused window
    fn create_session_buffer(&mut self) -> Result<BufferId>;

    fn set_working_directory(&mut self, dir: &Path) -> Result<()>;

    /// Show a warning to the user
    fn warn(&mut self, message: &str);

    fn is_loaded(&self, buffer: BufferId) -> bool {
        self.buffer_info(buffer).is_some_and(|info| info.loaded)
    }

    /// Windows in the current tab
    fn window_count(&self) -> usize {
        self.tab_windows(self.current_tab()).len()
    }

    fn tab_count(&self) -> usize {
        self.list_tabs().len()
    }
}
