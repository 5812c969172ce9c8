// Copyright (c) 2024-2025 dbshell Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Commands that read whole tables
//!
//! Each of these asks for confirmation first. A declined prompt sends no
//! query at all.

use std::io::Write;

use super::catalog::{tables_query, USER_OBJECTS};
use super::{quote_ident, quote_literal, CommandContext, DispatchOutcome};
use crate::database::{ResultSet, Value};
use crate::error::Result;
use crate::masking::{self, Masked};

pub(super) fn count(ctx: &mut CommandContext<'_>, args: &[&str]) -> Result<DispatchOutcome> {
    let Some(table) = args.first() else {
        return ctx.usage(".count");
    };

    if !ctx.confirm_scan(&format!("Counting rows in {}", table))? {
        return Ok(DispatchOutcome::Handled);
    }

    let result = ctx.query(&format!(
        "SELECT COUNT(*) AS count FROM {}",
        quote_ident(table)
    ))?;
    ctx.show(&result)?;
    Ok(DispatchOutcome::Handled)
}

pub(super) fn stats(ctx: &mut CommandContext<'_>, _args: &[&str]) -> Result<DispatchOutcome> {
    let tables = table_names(ctx)?;

    if !ctx.confirm_scan(&format!("Counting rows in {} tables", tables.len()))? {
        return Ok(DispatchOutcome::Handled);
    }

    let mut rows = Vec::with_capacity(tables.len());
    for table in tables {
        let counted = ctx.query(&format!("SELECT COUNT(*) FROM {}", quote_ident(&table)))?;
        let count = counted
            .rows
            .into_iter()
            .next()
            .and_then(|row| row.into_iter().next())
            .unwrap_or(Value::Null);
        rows.push(vec![Value::Text(table), count]);
    }

    let result = ResultSet::rows(vec!["table".into(), "rows".into()], rows)?;
    ctx.show(&result)?;
    Ok(DispatchOutcome::Handled)
}

pub(super) fn dump(ctx: &mut CommandContext<'_>, args: &[&str]) -> Result<DispatchOutcome> {
    let tables = match args.first() {
        Some(table) => {
            let known = table_names(ctx)?;
            match known.into_iter().find(|t| t.eq_ignore_ascii_case(table)) {
                Some(name) => vec![name],
                None => {
                    writeln!(ctx.out, "No such table: {}", table)?;
                    return Ok(DispatchOutcome::Handled);
                }
            }
        }
        None => table_names(ctx)?,
    };

    if !ctx.confirm_scan(&format!("Dumping {} tables", tables.len()))? {
        return Ok(DispatchOutcome::Handled);
    }

    if ctx.state.masked {
        writeln!(
            ctx.out,
            "-- sensitive columns are masked; run .unmask for a faithful dump"
        )?;
    }
    writeln!(ctx.out, "BEGIN TRANSACTION;")?;

    for table in &tables {
        let create = ctx.query(&format!(
            "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = {}",
            quote_literal(table)
        ))?;
        if let Some(Value::Text(sql)) = create.rows.first().and_then(|row| row.first()) {
            writeln!(ctx.out, "{};", sql)?;
        }

        let data = ctx.query(&format!("SELECT * FROM {}", quote_ident(table)))?;
        let masks = masking::column_masks(&data.columns, ctx.state.masked);
        for row in &data.rows {
            let values: Vec<String> = row
                .iter()
                .zip(&masks)
                .map(|(value, mask)| match masking::apply(*mask, value) {
                    Masked::Clear(value) => sql_literal(value),
                    Masked::Hidden(text) => quote_literal(&text),
                })
                .collect();
            writeln!(
                ctx.out,
                "INSERT INTO {} VALUES({});",
                quote_ident(table),
                values.join(",")
            )?;
        }
    }

    // Indexes, views and triggers follow the data.
    let single = if args.is_empty() {
        None
    } else {
        tables.first().map(String::as_str)
    };
    let objects = ctx.query(&dependent_objects_query(single))?;
    for row in &objects.rows {
        if let Some(Value::Text(sql)) = row.first() {
            writeln!(ctx.out, "{};", sql)?;
        }
    }

    writeln!(ctx.out, "COMMIT;")?;
    Ok(DispatchOutcome::Handled)
}

/// Schema rows other than the tables themselves, optionally for one table
fn dependent_objects_query(table: Option<&str>) -> String {
    let filter = table
        .map(|t| format!(" AND tbl_name = {}", quote_literal(t)))
        .unwrap_or_default();
    format!(
        "SELECT sql FROM sqlite_master WHERE sql IS NOT NULL AND type != 'table' AND {}{} \
         ORDER BY CASE type WHEN 'index' THEN 0 ELSE 1 END, name",
        USER_OBJECTS, filter
    )
}

fn table_names(ctx: &mut CommandContext<'_>) -> Result<Vec<String>> {
    let result = ctx.query(&tables_query())?;
    Ok(result
        .rows
        .into_iter()
        .filter_map(|row| match row.into_iter().next() {
            Some(Value::Text(name)) => Some(name),
            _ => None,
        })
        .collect())
}

/// Render a value as a SQL literal
fn sql_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Real(n) => format!("{:?}", n),
        Value::Text(s) => quote_literal(s),
        Value::Boolean(b) => u8::from(*b).to_string(),
        Value::Blob(bytes) => {
            let hex: String = bytes.iter().map(|b| format!("{:02X}", b)).collect();
            format!("X'{}'", hex)
        }
    }
}
