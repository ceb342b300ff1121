//! Session navigation commands
use super::{CommandResult, Reply};
use crate::state::AppState;

pub fn toggle_session(state: &AppState) -> CommandResult<Reply> {
    let reply = state.with_host(|guard, host| {
        let outcome = guard.toggle_session(host);
        Reply::Navigation {
            outcome,
            state: guard.nav_state(host),
        }
    });
    CommandResult::ok(reply)
}

pub fn status(state: &AppState) -> CommandResult<Reply> {
    let reply = state.with_host(|guard, host| Reply::Status {
        state: guard.nav_state(host),
        main_session: guard.main_session(host),
        cwd: host.cwd().map(|p| p.display().to_string()),
    });
    CommandResult::ok(reply)
}
