//! Command line arguments

use clap::Parser;
use std::path::PathBuf;

use mainterm_core::GuardConfig;

#[derive(Debug, Parser)]
#[command(name = "mainterm")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Editor session that keeps one main terminal alive across quit commands")]
#[command(long_about = None)]
pub struct Args {
    /// Files to open; when given, no main session is created
    #[arg(value_name = "FILES")]
    pub files: Vec<String>,

    /// File whose first line names the directory to start in
    #[arg(long = "lastdir-file", value_name = "PATH")]
    pub lastdir_file: Option<PathBuf>,

    /// Do not change into the last directory at startup
    #[arg(long = "no-relocate")]
    pub no_relocate: bool,

    /// Do not open the main session at startup
    #[arg(long = "no-session")]
    pub no_session: bool,

    /// Print replies as JSON, one object per line
    #[arg(long = "json")]
    pub json: bool,
}

impl Args {
    pub fn guard_config(&self) -> GuardConfig {
        let mut config = GuardConfig::default();
        if let Some(path) = &self.lastdir_file {
            config.lastdir_file = Some(path.clone());
        }
        config.relocate_on_startup = !self.no_relocate;
        config.open_on_startup = !self.no_session;
        config
    }
}
