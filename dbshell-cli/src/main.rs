// Copyright (c) 2024-2025 dbshell Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! dbshell CLI entry point

use clap::Parser;
use colored::Colorize;

mod cli;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        log::LevelFilter::Debug
    } else if let Some(level) = cli.log_level {
        level.to_level_filter()
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let outcome = match cli.command {
        Commands::Version => {
            println!("{} {}", "dbshell".bold().green(), dbshell::VERSION);
            println!("Interactive SQL shell");
            Ok(())
        }

        Commands::Shell { session } => cli::handle_shell(session),

        Commands::Query {
            session,
            sql,
            file,
            yes,
        } => cli::handle_query(session, sql, file, yes),
    };

    if let Err(e) = outcome {
        eprintln!("{}", error_line(e.as_ref()).red());
        std::process::exit(1);
    }
}

/// The one line printed for a failed command
fn error_line(error: &dyn std::error::Error) -> String {
    format!("Error: {}", error)
}
