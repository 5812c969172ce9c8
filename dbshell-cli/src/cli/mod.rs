// Copyright (c) 2024-2025 dbshell Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for dbshell
//!
//! Provides the interactive SQL console (REPL) and one-off statement or
//! script execution.

pub mod commands;
pub mod editor;
pub mod shell;

pub use commands::{Cli, Commands};
pub use shell::{handle_query, handle_shell};
