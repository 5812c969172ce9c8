// Copyright (c) 2024-2025 dbshell Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Command history persistence
//!
//! History is read once when a session starts and rewritten in full when it
//! ends. Nothing is written mid-session, so a crash loses that session's lines.

use std::collections::VecDeque;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Most entries kept in memory and on disk
pub const MAX_HISTORY_ENTRIES: usize = 1000;

/// Environment variable naming the configuration directory
pub const CONFIG_DIR_ENV: &str = "XDG_CONFIG_HOME";

const HISTORY_SUBPATH: &str = "dbshell/history";

/// Bounded, oldest-first list of input lines
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryLog {
    entries: VecDeque<String>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = String>) -> Self {
        let mut history = Self::new();
        for entry in entries {
            history.push(entry);
        }
        history
    }

    /// Append a line, dropping the oldest entry once the cap is reached
    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push_back(line.into());
        while self.entries.len() > MAX_HISTORY_ENTRIES {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.entries.iter()
    }
}

/// File-backed history storage
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Locate the history file from `XDG_CONFIG_HOME`, falling back to
    /// `~/.config`, then to the working directory.
    pub fn from_env() -> Self {
        let config_dir = env::var_os(CONFIG_DIR_ENV)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs_next::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from(".dbshell"));
        Self::new(config_dir.join(HISTORY_SUBPATH))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read saved history. A missing or unreadable file yields an empty log.
    pub fn load(&self) -> HistoryLog {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let history = HistoryLog::from_entries(
                    contents
                        .lines()
                        .filter(|line| !line.trim().is_empty())
                        .map(String::from),
                );
                log::debug!(
                    "Loaded {} history entries from {}",
                    history.len(),
                    self.path.display()
                );
                history
            }
            Err(e) => {
                log::debug!("No history loaded from {}: {}", self.path.display(), e);
                HistoryLog::new()
            }
        }
    }

    /// Overwrite the history file with the most recent entries
    pub fn save(&self, history: &HistoryLog) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let skip = history.len().saturating_sub(MAX_HISTORY_ENTRIES);
        let mut contents = String::new();
        for entry in history.iter().skip(skip) {
            contents.push_str(entry);
            contents.push('\n');
        }

        fs::write(&self.path, contents)?;
        log::debug!(
            "Saved {} history entries to {}",
            history.len() - skip,
            self.path.display()
        );
        Ok(())
    }
}
