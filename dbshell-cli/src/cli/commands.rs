// Copyright (c) 2024-2025 dbshell Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use dbshell::{OutputMode, SessionState};

/// Interactive SQL shell with sensitive-column masking
#[derive(Parser, Debug)]
#[command(name = "dbshell", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (overridden by --verbose)
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive SQL console
    Shell {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// Execute a single statement, dot-command or .sql file and exit
    Query {
        #[command(flatten)]
        session: SessionArgs,

        /// Statement to run; a path ending in .sql is run as a script
        #[arg(required_unless_present = "file")]
        sql: Option<String>,

        /// Run statements from this file
        #[arg(short, long, conflicts_with = "sql")]
        file: Option<PathBuf>,

        /// Answer yes to full-scan confirmations
        #[arg(short, long)]
        yes: bool,
    },

    /// Show version information
    Version,
}

/// Connection and initial session settings
#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    /// SQLite database file, or :memory:
    #[arg(short, long = "db", env = "DBSHELL_DATABASE", default_value = ":memory:")]
    pub database: String,

    /// Output mode: default, table, json, csv or markdown
    #[arg(short, long, default_value = "default")]
    pub mode: OutputMode,

    /// Show sensitive columns in clear
    #[arg(long)]
    pub no_mask: bool,

    /// Print how long each statement takes
    #[arg(long)]
    pub timing: bool,
}

impl SessionArgs {
    pub fn initial_state(&self) -> SessionState {
        SessionState::new(self.mode, !self.no_mask, self.timing)
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}
