//! Buffer, window and tab page commands
use mainterm_core::{BufferId, EditorHost, Guard, MemoryHost};

use super::{parse_buffer, BufferSummary, CommandResult, Reply};
use crate::state::AppState;

fn summary(guard: &Guard, host: &MemoryHost, buffer: BufferId) -> Option<BufferSummary> {
    let info = host.buffer_info(buffer)?;
    Some(BufferSummary::new(
        info,
        host.current_buffer() == buffer,
        guard.registry().is_marked(host, buffer),
    ))
}

fn buffer_reply(guard: &Guard, host: &MemoryHost, buffer: BufferId) -> CommandResult<Reply> {
    match summary(guard, host, buffer) {
        Some(summary) => CommandResult::ok(Reply::Buffer(summary)),
        None => CommandResult::err(format!("No such buffer: {}", buffer)),
    }
}

fn layout_reply(host: &MemoryHost) -> CommandResult<Reply> {
    CommandResult::ok(Reply::Layout {
        tabs: host.tab_count(),
        windows: host.window_count(),
    })
}

pub fn edit(state: &AppState, name: &str) -> CommandResult<Reply> {
    if name.is_empty() {
        return CommandResult::err("Argument required".to_string());
    }

    state.with_host(|guard, host| {
        let buffer = host.edit(name);
        buffer_reply(guard, host, buffer)
    })
}

pub fn new_buffer(state: &AppState) -> CommandResult<Reply> {
    state.with_host(|guard, host| {
        let buffer = host.new_buffer();
        buffer_reply(guard, host, buffer)
    })
}

/// Mark the current buffer as having unsaved changes
pub fn modify(state: &AppState) -> CommandResult<Reply> {
    state.with_host(|guard, host| {
        let buffer = host.current_buffer();
        match host.set_modified(buffer, true) {
            Ok(()) => buffer_reply(guard, host, buffer),
            Err(e) => CommandResult::err(e.to_string()),
        }
    })
}

pub fn unload(state: &AppState, arg: &str) -> CommandResult<Reply> {
    let buffer = match parse_buffer(arg) {
        Ok(buffer) => buffer,
        Err(e) => return CommandResult::err(e),
    };

    state.with_host(|guard, host| match host.unload(buffer) {
        Ok(()) => buffer_reply(guard, host, buffer),
        Err(e) => CommandResult::err(e.to_string()),
    })
}

pub fn focus(state: &AppState, arg: &str) -> CommandResult<Reply> {
    let buffer = match parse_buffer(arg) {
        Ok(buffer) => buffer,
        Err(e) => return CommandResult::err(e),
    };

    state.with_host(|guard, host| match host.focus_buffer(buffer) {
        Ok(()) => buffer_reply(guard, host, buffer),
        Err(e) => CommandResult::err(e.to_string()),
    })
}

pub fn split(state: &AppState) -> CommandResult<Reply> {
    state.with_host(|_, host| {
        host.split();
        layout_reply(host)
    })
}

pub fn tab_new(state: &AppState) -> CommandResult<Reply> {
    state.with_host(|_, host| {
        host.tab_new();
        layout_reply(host)
    })
}

pub fn list(state: &AppState) -> CommandResult<Reply> {
    state.with_host(|guard, host| {
        let buffers = host
            .list_buffers()
            .into_iter()
            .filter_map(|id| summary(guard, host, id))
            .collect();
        CommandResult::ok(Reply::Buffers(buffers))
    })
}
