//! Quit-family commands
use mainterm_core::ExCommand;

use super::{CommandResult, Reply};
use crate::state::AppState;

/// Run `line` through the guard if it is a quit-family command
pub fn run_ex(state: &AppState, line: &str) -> Option<CommandResult<Reply>> {
    let command = ExCommand::parse(line)?;

    let outcome =
        state.with_host(|guard, host| guard.quit(host, command.command, command.force));

    Some(CommandResult::ok(Reply::Quit(outcome)))
}
