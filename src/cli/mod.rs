//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands, SelectArgs, TagFileArgs};
pub use output::{format_tag_listing, format_tag_report};
