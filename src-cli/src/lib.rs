//! mainterm - interactive editor command line
//!
//! Stands in for the host editor: reads one command per line from stdin,
//! runs it against an in-memory editor guarded by `mainterm_core::Guard`,
//! and prints the reply plus any warnings the editor raised.

mod cli;
mod commands;
mod state;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::fmt::Display;
use std::io::{self, BufRead, Write};

use cli::Args;
use commands::CommandResult;
use mainterm_core::StartupOutcome;
use state::AppState;

pub fn run() -> anyhow::Result<()> {
    // Initialize logging
    mainterm_core::init_logging();

    let args = Args::parse();
    let state = AppState::new(args.guard_config(), args.json)
        .context("invalid configuration")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    // The editor keeps running unguarded if the session could not be opened
    match state.start(&args.files) {
        Ok(startup) => {
            tracing::info!(startup = ?startup, "mainterm started");
            print(&mut out, state.json(), &startup)?;
        }
        Err(e) => {
            tracing::warn!(error = %e, "Main session not opened");
            let result = CommandResult::<StartupOutcome>::err(e.to_string());
            print_result(&mut out, state.json(), &result)?;
        }
    }
    flush_warnings(&mut out, &state)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }

        let result = commands::dispatch(&state, &line);
        print_result(&mut out, state.json(), &result)?;
        flush_warnings(&mut out, &state)?;

        if state.exited() {
            tracing::info!("Editor exited");
            break;
        }
    }

    Ok(())
}

fn print<T: Serialize + Display>(
    out: &mut impl Write,
    json: bool,
    value: &T,
) -> anyhow::Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(value)?)?;
    } else {
        writeln!(out, "{}", value)?;
    }
    Ok(())
}

fn print_result<T: Serialize + Display>(
    out: &mut impl Write,
    json: bool,
    result: &CommandResult<T>,
) -> anyhow::Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(result)?)?;
        return Ok(());
    }

    match (&result.data, &result.error) {
        (Some(data), _) => writeln!(out, "{}", data)?,
        (None, Some(error)) => writeln!(out, "E: {}", error)?,
        (None, None) => {}
    }
    Ok(())
}

fn flush_warnings(out: &mut impl Write, state: &AppState) -> anyhow::Result<()> {
    for warning in state.take_warnings() {
        if state.json() {
            let line = serde_json::json!({ "warning": warning });
            writeln!(out, "{}", line)?;
        } else {
            writeln!(out, "W: {}", warning)?;
        }
    }
    out.flush()?;
    Ok(())
}
