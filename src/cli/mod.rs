//! Command-line interface for shelfarr.

mod commands;

use crate::config::Config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Shelfarr - library snapshot backup & restore for media trackers
#[derive(Parser)]
#[command(name = "shelfarr")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Restore a snapshot file into the library database
    #[command(alias = "r")]
    Restore {
        /// Path to the gzip-compressed snapshot
        file: PathBuf,
        /// Database url override (defaults to the configured one)
        #[arg(long)]
        db: Option<String>,
    },

    /// Write the library database out as a snapshot file
    #[command(alias = "b")]
    Backup {
        /// Destination path for the snapshot
        file: PathBuf,
        /// Database url override (defaults to the configured one)
        #[arg(long)]
        db: Option<String>,
    },

    /// Show what a snapshot file contains without touching the database
    #[command(alias = "i")]
    Inspect {
        /// Path to the gzip-compressed snapshot
        file: PathBuf,
    },
}

pub async fn run_command(command: Commands, config: &Config) -> anyhow::Result<()> {
    match command {
        Commands::Restore { file, db } => {
            commands::restore::cmd_restore(config, &file, db.as_deref()).await
        }
        Commands::Backup { file, db } => {
            commands::backup::cmd_backup(config, &file, db.as_deref()).await
        }
        Commands::Inspect { file } => commands::inspect::cmd_inspect(&file).await,
    }
}
