// Copyright (c) 2024-2025 dbshell Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Result formatting for shell output

use std::io::Write;

use colored::*;
use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::database::{ResultSet, Value};
use crate::masking::{self, MaskType, Masked};
use crate::session::OutputMode;

/// Render `result` in `mode` to `out`, masking sensitive columns when
/// `masked` is set.
pub fn render(
    result: &ResultSet,
    mode: OutputMode,
    masked: bool,
    out: &mut dyn Write,
) -> std::io::Result<()> {
    let text = ResultFormatter::format(result, mode, masked);
    out.write_all(text.as_bytes())?;
    out.flush()
}

/// Result formatter for the different output modes
pub struct ResultFormatter;

impl ResultFormatter {
    /// Format a result set in the specified mode
    pub fn format(result: &ResultSet, mode: OutputMode, masked: bool) -> String {
        if result.columns.is_empty() {
            return Self::format_no_columns(result, mode);
        }

        let masks = masking::column_masks(&result.columns, masked);
        match mode {
            OutputMode::Default => Self::format_grid(result, &masks, false),
            OutputMode::Table => Self::format_grid(result, &masks, true),
            OutputMode::Json => Self::format_json(result, &masks),
            OutputMode::Csv => Self::format_csv(result, &masks),
            OutputMode::Markdown => Self::format_markdown(result, &masks),
        }
    }

    /// DDL/DML results: only the human modes say anything
    fn format_no_columns(result: &ResultSet, mode: OutputMode) -> String {
        match mode {
            OutputMode::Default | OutputMode::Table if result.rows_affected > 0 => {
                format!("Rows affected: {}\n", result.rows_affected)
            }
            _ => String::new(),
        }
    }

    /// Format results as a grid using comfy-table; `bordered` selects the
    /// boxed `table` look over the borderless default.
    fn format_grid(result: &ResultSet, masks: &[MaskType], bordered: bool) -> String {
        let mut table = Table::new();
        if bordered {
            table.load_preset(presets::UTF8_FULL);
        } else {
            table.load_preset(presets::NOTHING);
        }
        table.set_content_arrangement(ContentArrangement::Disabled);

        let header_cells: Vec<Cell> = result
            .columns
            .iter()
            .map(|col| {
                let cell = Cell::new(col).add_attribute(Attribute::Bold);
                if bordered {
                    cell.fg(Color::Green)
                } else {
                    cell
                }
            })
            .collect();
        table.set_header(header_cells);

        for row in &result.rows {
            let cells: Vec<Cell> = row
                .iter()
                .zip(masks)
                .map(|(value, mask)| match masking::apply(*mask, value) {
                    Masked::Hidden(text) => Cell::new(text).add_attribute(Attribute::Dim),
                    Masked::Clear(Value::Null) => Cell::new("NULL").add_attribute(Attribute::Dim),
                    Masked::Clear(value) => Cell::new(value.to_string()),
                })
                .collect();
            table.add_row(cells);
        }

        let mut output = table.to_string();
        output.push('\n');

        let count = result.rows.len();
        let footer = format!("({} {})", count, if count == 1 { "row" } else { "rows" });
        output.push_str(&format!("{}\n", footer.dimmed()));
        output
    }

    /// Format results as a JSON array of objects, keys in column order
    fn format_json(result: &ResultSet, masks: &[MaskType]) -> String {
        let rows: Vec<JsonRow<'_>> = result
            .rows
            .iter()
            .map(|row| JsonRow {
                columns: &result.columns,
                cells: row
                    .iter()
                    .zip(masks)
                    .map(|(value, mask)| masking::apply(*mask, value))
                    .collect(),
            })
            .collect();

        let mut output = serde_json::to_string_pretty(&rows)
            .unwrap_or_else(|e| format!("{{\"error\": \"Could not serialize results: {}\"}}", e));
        output.push('\n');
        output
    }

    /// Format results as CSV; NULL is written as the literal `NULL`
    fn format_csv(result: &ResultSet, masks: &[MaskType]) -> String {
        let mut output = String::new();

        let header: Vec<String> = result.columns.iter().map(|c| csv_field(c)).collect();
        output.push_str(&header.join(","));
        output.push('\n');

        for row in &result.rows {
            let fields: Vec<String> = row
                .iter()
                .zip(masks)
                .map(|(value, mask)| csv_field(&masking::apply(*mask, value).plain()))
                .collect();
            output.push_str(&fields.join(","));
            output.push('\n');
        }

        output
    }

    /// Format results as a GitHub-flavoured pipe table
    fn format_markdown(result: &ResultSet, masks: &[MaskType]) -> String {
        let mut output = String::new();

        let header: Vec<String> = result.columns.iter().map(|c| markdown_cell(c)).collect();
        output.push_str(&format!("| {} |\n", header.join(" | ")));

        let separator = vec!["---"; result.columns.len()];
        output.push_str(&format!("| {} |\n", separator.join(" | ")));

        for row in &result.rows {
            let cells: Vec<String> = row
                .iter()
                .zip(masks)
                .map(|(value, mask)| markdown_cell(&masking::apply(*mask, value).plain()))
                .collect();
            output.push_str(&format!("| {} |\n", cells.join(" | ")));
        }

        output
    }
}

/// One JSON object per row. Entries are written positionally, so duplicate
/// column names each keep their own value.
struct JsonRow<'a> {
    columns: &'a [String],
    cells: Vec<Masked<'a>>,
}

impl Serialize for JsonRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, cell) in self.columns.iter().zip(&self.cells) {
            map.serialize_entry(column, cell)?;
        }
        map.end()
    }
}

impl Serialize for Masked<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Masked::Clear(value) => value.serialize(serializer),
            Masked::Hidden(text) => serializer.serialize_str(text),
        }
    }
}

/// Quote a CSV field when it contains a comma, quote or newline
pub fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn markdown_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> ResultSet {
        ResultSet::rows(
            vec!["id".into(), "password".into()],
            vec![vec![Value::Integer(1), Value::Text("hunter2".into())]],
        )
        .unwrap()
    }

    fn parse(text: &str) -> serde_json::Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn test_json_masked() {
        let out = ResultFormatter::format(&users(), OutputMode::Json, true);
        assert_eq!(parse(&out), serde_json::json!([{"id": 1, "password": "********"}]));
    }

    #[test]
    fn test_json_unmasked() {
        let out = ResultFormatter::format(&users(), OutputMode::Json, false);
        assert_eq!(parse(&out), serde_json::json!([{"id": 1, "password": "hunter2"}]));
    }

    #[test]
    fn test_json_keeps_column_order_and_types() {
        let result = ResultSet::rows(
            vec!["z".into(), "a".into(), "n".into(), "ok".into()],
            vec![vec![
                Value::Real(1.5),
                Value::Text("x".into()),
                Value::Null,
                Value::Boolean(false),
            ]],
        )
        .unwrap();
        let out = ResultFormatter::format(&result, OutputMode::Json, true);
        let z = out.find("\"z\"").unwrap();
        let a = out.find("\"a\"").unwrap();
        assert!(z < a);
        assert_eq!(
            parse(&out),
            serde_json::json!([{"z": 1.5, "a": "x", "n": null, "ok": false}])
        );
    }

    #[test]
    fn test_json_duplicate_columns_are_positional() {
        let result = ResultSet::rows(
            vec!["a".into(), "a".into()],
            vec![vec![Value::Integer(1), Value::Integer(2)]],
        )
        .unwrap();
        let out = ResultFormatter::format(&result, OutputMode::Json, false);
        assert!(out.contains("\"a\": 1"));
        assert!(out.contains("\"a\": 2"));
    }

    #[test]
    fn test_json_null_in_sensitive_column_stays_null() {
        let result = ResultSet::rows(vec!["secret".into()], vec![vec![Value::Null]]).unwrap();
        let out = ResultFormatter::format(&result, OutputMode::Json, true);
        assert_eq!(parse(&out), serde_json::json!([{"secret": null}]));
    }

    #[test]
    fn test_csv_escaping_and_null() {
        let result = ResultSet::rows(
            vec!["id".into(), "note".into()],
            vec![
                vec![Value::Integer(1), Value::Text("a,b".into())],
                vec![Value::Integer(2), Value::Text("say \"hi\"".into())],
                vec![Value::Integer(3), Value::Null],
            ],
        )
        .unwrap();
        let out = ResultFormatter::format(&result, OutputMode::Csv, true);
        assert_eq!(out, "id,note\n1,\"a,b\"\n2,\"say \"\"hi\"\"\"\n3,NULL\n");
    }

    #[test]
    fn test_csv_masks_email() {
        let result = ResultSet::rows(
            vec!["email".into()],
            vec![vec![Value::Text("alice@example.com".into())]],
        )
        .unwrap();
        let out = ResultFormatter::format(&result, OutputMode::Csv, true);
        assert_eq!(out, "email\na••••e@example.com\n");
    }

    #[test]
    fn test_markdown_escapes_pipes() {
        let result = ResultSet::rows(
            vec!["id".into(), "expr".into()],
            vec![vec![Value::Integer(1), Value::Text("a|b".into())]],
        )
        .unwrap();
        let out = ResultFormatter::format(&result, OutputMode::Markdown, false);
        assert_eq!(out, "| id | expr |\n| --- | --- |\n| 1 | a\\|b |\n");
    }

    #[test]
    fn test_machine_modes_have_no_ansi() {
        for mode in [OutputMode::Json, OutputMode::Csv, OutputMode::Markdown] {
            let out = ResultFormatter::format(&users(), mode, true);
            assert!(!out.contains('\u{1b}'), "{} output contains ANSI", mode);
        }
    }

    #[test]
    fn test_grid_modes_contain_values() {
        for mode in [OutputMode::Default, OutputMode::Table] {
            let out = ResultFormatter::format(&users(), mode, true);
            assert!(out.contains("id"));
            assert!(out.contains("********"));
            assert!(!out.contains("hunter2"));
            assert!(out.contains("(1 row)"));
        }
    }

    #[test]
    fn test_table_has_borders_default_does_not() {
        let table = ResultFormatter::format(&users(), OutputMode::Table, false);
        let plain = ResultFormatter::format(&users(), OutputMode::Default, false);
        assert!(table.contains('│'));
        assert!(!plain.contains('│'));
        assert!(plain.contains("hunter2"));
    }

    #[test]
    fn test_no_columns_rows_affected() {
        let result = ResultSet::affected(3);
        assert_eq!(
            ResultFormatter::format(&result, OutputMode::Default, true),
            "Rows affected: 3\n"
        );
        assert_eq!(
            ResultFormatter::format(&result, OutputMode::Table, true),
            "Rows affected: 3\n"
        );
        for mode in [OutputMode::Json, OutputMode::Csv, OutputMode::Markdown] {
            assert_eq!(ResultFormatter::format(&result, mode, true), "");
        }
    }

    #[test]
    fn test_no_columns_zero_affected_prints_nothing() {
        let result = ResultSet::affected(0);
        assert_eq!(ResultFormatter::format(&result, OutputMode::Default, true), "");
    }

    #[test]
    fn test_render_writes_to_sink() {
        let mut sink = Vec::new();
        render(&users(), OutputMode::Csv, false, &mut sink).unwrap();
        assert_eq!(String::from_utf8(sink).unwrap(), "id,password\n1,hunter2\n");
    }
}
