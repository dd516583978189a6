//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "livetagger")]
#[command(about = "Tag audio samples for the Ableton Live browser", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: $LIVETAGGER_CONFIG, then built-in defaults)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add tags to the selected sample files
    Add {
        /// Tags to add (e.g. "Drums|Kick")
        #[arg(required = true, value_name = "TAG")]
        tags: Vec<String>,

        #[command(flatten)]
        args: TagFileArgs,
    },

    /// Remove tags from the selected sample files
    Remove {
        /// Tags to remove
        #[arg(required = true, value_name = "TAG")]
        tags: Vec<String>,

        #[command(flatten)]
        args: TagFileArgs,
    },

    /// Remove every tag from the selected sample files
    RemoveAll {
        #[command(flatten)]
        args: TagFileArgs,
    },

    /// Show the tags of the selected sample files
    List {
        #[command(flatten)]
        select: SelectArgs,
    },
}

/// Which sample files a command applies to
#[derive(Args, Debug, Clone)]
pub struct SelectArgs {
    /// Glob matched against paths relative to the root (use "**/*" to recurse)
    #[arg(short, long, default_value = "*")]
    pub include: String,

    /// Directory to search for samples
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct TagFileArgs {
    #[command(flatten)]
    pub select: SelectArgs,

    /// Write the changes (without this, only show what would change)
    #[arg(short, long)]
    pub commit: bool,
}
