// Copyright (c) 2024-2025 dbshell Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Per-session display state

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Output encodings available to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputMode {
    #[default]
    Default,
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputMode {
    pub const ALL: [OutputMode; 5] = [
        OutputMode::Default,
        OutputMode::Table,
        OutputMode::Json,
        OutputMode::Csv,
        OutputMode::Markdown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Default => "default",
            OutputMode::Table => "table",
            OutputMode::Json => "json",
            OutputMode::Csv => "csv",
            OutputMode::Markdown => "markdown",
        }
    }

    /// Comma-separated list of every mode name
    pub fn names() -> String {
        Self::ALL
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("unknown output mode '{0}' (expected one of: {modes})", modes = OutputMode::names())]
pub struct ParseModeError(pub String);

impl FromStr for OutputMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        OutputMode::ALL
            .into_iter()
            .find(|m| m.as_str() == lower)
            .ok_or_else(|| ParseModeError(s.to_string()))
    }
}

/// Mutable state owned by one REPL run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub mode: OutputMode,
    pub masked: bool,
    pub timing: bool,
}

impl SessionState {
    pub fn new(mode: OutputMode, masked: bool, timing: bool) -> Self {
        Self {
            mode,
            masked,
            timing,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(OutputMode::Default, true, false)
    }
}
