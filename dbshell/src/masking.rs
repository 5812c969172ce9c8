// Copyright (c) 2024-2025 dbshell Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Sensitive column masking
//!
//! A column's [`MaskType`] is derived from its name alone. Values are then
//! masked cell by cell, so one column never influences another.

use colored::{ColoredString, Colorize};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::database::Value;

/// Replacement shown for fully masked values
pub const MASK: &str = "********";

/// Filler placed between the revealed characters of an email local part
pub const EMAIL_FILLER: &str = "••••";

const MASKED_PREFIXES: &[&str] = &["encrypted_", "hashed_"];

static SENSITIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"password|passwd|pwd|secret|[a-z0-9]_token|^token$|api_?key|apikey|api-key|private_?key|access_?key|credit_?card|card_?number|cvv|ssn|social_security",
    )
    .expect("sensitive column pattern is valid")
});

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"e_?mail").expect("email column pattern is valid"));

/// How a column's values are displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskType {
    None,
    Full,
    Email,
}

/// Classify a column name. Case-insensitive; first matching rule wins.
pub fn classify(column: &str) -> MaskType {
    let name = column.to_lowercase();

    if MASKED_PREFIXES.iter().any(|p| name.starts_with(p)) || SENSITIVE.is_match(&name) {
        MaskType::Full
    } else if EMAIL.is_match(&name) {
        MaskType::Email
    } else {
        MaskType::None
    }
}

/// Resolve one mask per column; everything is `None` when masking is off.
pub fn column_masks(columns: &[String], masked: bool) -> Vec<MaskType> {
    if !masked {
        return vec![MaskType::None; columns.len()];
    }
    columns.iter().map(|c| classify(c)).collect()
}

/// Mask an email address, keeping the first and last character of the local
/// part and the whole domain. Anything without an `@` after the first
/// character is masked completely.
pub fn mask_email(value: &str) -> String {
    let at = match value.find('@') {
        Some(at) if at >= 1 => at,
        _ => return MASK.to_string(),
    };

    let (local, domain) = value.split_at(at);
    let mut chars = local.chars();
    let first = chars.next().unwrap_or_default();
    let last = chars.next_back();

    match last {
        Some(last) => format!("{}{}{}{}", first, EMAIL_FILLER, last, domain),
        None => format!("{}{}{}", first, EMAIL_FILLER, domain),
    }
}

/// A cell after masking has been applied
#[derive(Debug, Clone, PartialEq)]
pub enum Masked<'a> {
    /// The original value, to be formatted as usual
    Clear(&'a Value),
    /// Replacement text for a sensitive value
    Hidden(String),
}

impl Masked<'_> {
    /// Plain rendering for machine-readable outputs
    pub fn plain(&self) -> String {
        match self {
            Masked::Clear(value) => value.to_string(),
            Masked::Hidden(text) => text.clone(),
        }
    }

    /// Human rendering: masked text is dimmed
    pub fn styled(&self) -> ColoredString {
        match self {
            Masked::Clear(value) => value.to_string().normal(),
            Masked::Hidden(text) => text.as_str().dimmed(),
        }
    }
}

/// Apply a column's mask to one value. `NULL` is never masked.
pub fn apply(mask: MaskType, value: &Value) -> Masked<'_> {
    match (mask, value) {
        (_, Value::Null) | (MaskType::None, _) => Masked::Clear(value),
        (MaskType::Full, _) => Masked::Hidden(MASK.to_string()),
        (MaskType::Email, Value::Text(text)) => Masked::Hidden(mask_email(text)),
        (MaskType::Email, other) => Masked::Hidden(mask_email(&other.to_string())),
    }
}
