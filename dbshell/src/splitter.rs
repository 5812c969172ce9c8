// Copyright (c) 2024-2025 dbshell Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Statement splitting
//!
//! Splits raw SQL text into individual statements on `;`. Only single-quoted
//! string literals (with `''` escapes) and `--` line comments are understood;
//! double-quoted identifiers, dollar quoting and `/* */` block comments are
//! treated as ordinary text.

/// Split `text` into trimmed, non-empty statements without their terminators.
///
/// Never fails: unbalanced quotes produce a best-effort split.
pub fn split(text: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut in_string = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '-' if !in_string && chars.peek() == Some(&'-') => {
                // Drop the comment body but keep its line break.
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        current.push('\n');
                        break;
                    }
                }
            }
            '\'' if in_string && chars.peek() == Some(&'\'') => {
                chars.next();
                current.push_str("''");
            }
            '\'' => {
                in_string = !in_string;
                current.push(c);
            }
            ';' if !in_string => {
                push_statement(&mut statements, &current);
                current.clear();
            }
            _ => current.push(c),
        }
    }
    push_statement(&mut statements, &current);

    statements
}

fn push_statement(statements: &mut Vec<String>, buffer: &str) {
    let trimmed = buffer.trim();
    if !trimmed.is_empty() {
        statements.push(trimmed.to_string());
    }
}
