//! Test utilities for dbshell integration tests
//!
//! - MockDatabase: records every statement and answers from canned responses
//! - ScriptedInput: replays a fixed sequence of lines, interrupts and EOF

#![allow(dead_code)]

pub mod mock_db;
pub mod scripted_input;

use dbshell::{OutputMode, SessionState};

/// Strip ANSI escape sequences so assertions do not depend on colour support
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' && chars.peek() == Some(&'[') {
            chars.next();
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Session that renders as CSV so output is easy to compare
pub fn csv_session() -> SessionState {
    SessionState::new(OutputMode::Csv, true, false)
}

pub fn output_text(out: &[u8]) -> String {
    strip_ansi(&String::from_utf8_lossy(out))
}
