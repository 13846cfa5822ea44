//! CLI argument definitions using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Smart Memo: personal memos kept in a local store.
#[derive(Parser, Debug)]
#[command(name = "smartmemo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// SQLite database holding the memo snapshot
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Absolute directory for rolling log files
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List memos, newest first
    List {
        /// Only show memos whose title or content contains this text
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Show one memo in full
    Show {
        id: String,
    },

    /// Create a memo
    Add {
        title: String,
        content: String,
    },

    /// Replace the title and content of a memo
    Edit {
        id: String,
        title: String,
        content: String,
    },

    /// Delete a memo
    #[command(alias = "delete")]
    Rm {
        id: String,
    },

    /// Toggle the important flag
    Star {
        id: String,
    },

    /// Print the application version
    Version,
}
