// Copyright (c) 2024-2025 dbshell Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Schema inspection commands

use std::io::Write;

use colored::Colorize;

use super::{quote_literal, CommandContext, DispatchOutcome};
use crate::database::Value;
use crate::error::Result;

/// Hides SQLite's own tables and the `_cf_` tables a hosted runtime keeps
pub(super) const USER_OBJECTS: &str =
    r"name NOT LIKE 'sqlite\_%' ESCAPE '\' AND name NOT LIKE '\_cf\_%' ESCAPE '\'";

pub(super) fn tables_query() -> String {
    format!(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND {} ORDER BY name",
        USER_OBJECTS
    )
}

pub(super) fn tables(ctx: &mut CommandContext<'_>, _args: &[&str]) -> Result<DispatchOutcome> {
    let result = ctx.query(&tables_query())?;
    ctx.show(&result)?;
    Ok(DispatchOutcome::Handled)
}

pub(super) fn schema(ctx: &mut CommandContext<'_>, args: &[&str]) -> Result<DispatchOutcome> {
    let table = args.first().copied();
    let result = ctx.query(&schema_query(table))?;

    if result.rows.is_empty() {
        if let Some(table) = table {
            writeln!(ctx.out, "{}", format!("No such table: {}", table).yellow())?;
        }
        return Ok(DispatchOutcome::Handled);
    }

    for row in &result.rows {
        if let Some(Value::Text(sql)) = row.first() {
            writeln!(ctx.out, "{};", sql)?;
        }
    }
    Ok(DispatchOutcome::Handled)
}

fn schema_query(table: Option<&str>) -> String {
    let filter = table
        .map(|t| format!(" AND tbl_name = {}", quote_literal(t)))
        .unwrap_or_default();
    format!(
        "SELECT sql FROM sqlite_master WHERE sql IS NOT NULL AND {}{} \
         ORDER BY CASE type WHEN 'table' THEN 0 WHEN 'index' THEN 1 ELSE 2 END, name",
        USER_OBJECTS, filter
    )
}

pub(super) fn indexes(ctx: &mut CommandContext<'_>, args: &[&str]) -> Result<DispatchOutcome> {
    let filter = args
        .first()
        .map(|t| format!(" AND tbl_name = {}", quote_literal(t)))
        .unwrap_or_default();
    let sql = format!(
        "SELECT name, tbl_name AS \"table\" FROM sqlite_master \
         WHERE type = 'index' AND {}{} ORDER BY tbl_name, name",
        USER_OBJECTS, filter
    );
    let result = ctx.query(&sql)?;
    ctx.show(&result)?;
    Ok(DispatchOutcome::Handled)
}
