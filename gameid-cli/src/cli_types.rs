//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use gameid_lib::Layout;

#[derive(Parser)]
#[command(name = "gameid")]
#[command(about = "Extract Game IDs from PlayStation disc images", long_about = None)]
pub(crate) struct Cli {
    /// Games root holding the DVD, CD and POPS folders (defaults to the saved
    /// root, then the current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// How catalog entries are printed.
#[derive(Args, Clone, Copy)]
pub(crate) struct OutputArgs {
    /// Print one JSON object per image instead of `GAME_ID|folder|filename`
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Extract the Game ID of individual image files
    Extract {
        /// Image files (.iso, .zso, .vcd)
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Extract Game IDs for every image under the games root
    Scan {
        /// Folder layout to scan: ps2 (DVD/CD) or ps1 (POPS)
        #[arg(short, long)]
        layout: Option<Layout>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Manage saved settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the settings file and the values in effect
    Show,
    /// Print the settings file path
    Path,
    /// Save the default games root (uses --root, or the given path)
    SetRoot {
        /// Directory to save; omit with --clear to remove the saved root
        path: Option<PathBuf>,

        /// Remove the saved games root
        #[arg(long, conflicts_with = "path")]
        clear: bool,
    },
}
