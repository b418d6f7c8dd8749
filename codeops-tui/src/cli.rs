//! Command-line interface.

use clap::{Parser, Subcommand, ValueEnum};
use codeops_core::EngineMode;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "codeops")]
#[command(version, about = "Operator console for the CodeOps autonomous solver", long_about = None)]
pub struct Cli {
    /// Path to a TOML config file (falls back to CODEOPS_CONFIG)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run one mission without the console and print the result
    Run {
        /// Task for the agent
        task: String,

        /// Engine to use (defaults to the configured mode)
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// File to attach; repeat for several
        #[arg(short, long = "file")]
        files: Vec<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ModeArg {
    Cloud,
    Local,
}

impl From<ModeArg> for EngineMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Cloud => EngineMode::Cloud,
            ModeArg::Local => EngineMode::Local,
        }
    }
}
