//! Layout Collapser

use mainterm_host::{EditorHost, HostError};

/// What a collapse actually closed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutSummary {
    pub tabs_closed: usize,
    pub windows_closed: usize,
}

/// Close every other tab, then every other window in the remaining tab.
///
/// Best-effort: the host refusing to close its last window or tab is the
/// expected end state, and any other refusal is logged and skipped.
pub fn collapse_to_single_window(host: &mut dyn EditorHost) -> LayoutSummary {
    let mut summary = LayoutSummary::default();

    let keep_tab = host.current_tab();
    for tab in host.list_tabs() {
        if tab == keep_tab {
            continue;
        }
        match host.close_tab(tab, false) {
            Ok(()) => summary.tabs_closed += 1,
            Err(HostError::LastTab) => break,
            Err(e) => tracing::debug!(tab = %tab, error = %e, "Tab not closed"),
        }
    }

    let keep_window = host.current_window();
    for window in host.tab_windows(host.current_tab()) {
        if window == keep_window {
            continue;
        }
        match host.close_window(window, false) {
            Ok(()) => summary.windows_closed += 1,
            Err(HostError::LastWindow) => break,
            Err(e) => tracing::debug!(window = %window, error = %e, "Window not closed"),
        }
    }

    tracing::debug!(
        tabs_closed = summary.tabs_closed,
        windows_closed = summary.windows_closed,
        "Collapsed layout"
    );

    summary
}
