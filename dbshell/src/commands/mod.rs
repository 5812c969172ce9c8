// Copyright (c) 2024-2025 dbshell Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Dot-commands
//!
//! A dot-command is a shell-only instruction such as `.tables` or `.mode json`.
//! Commands live in the [`COMMANDS`] table; adding one means adding an entry
//! there with its handler.

mod catalog;
mod scan;
mod settings;

use std::io::Write;
use std::path::Path;

use colored::Colorize;

use crate::batch::run_file;
use crate::database::{Database, ResultSet};
use crate::error::{Result, ShellError};
use crate::input::LineSource;
use crate::render::render;
use crate::session::SessionState;

/// What the REPL should do after a dot-command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Handled,
    Unknown,
    Quit,
}

/// Everything a command handler may touch
pub struct CommandContext<'a> {
    pub db: &'a mut dyn Database,
    pub state: &'a mut SessionState,
    pub input: &'a mut dyn LineSource,
    pub out: &'a mut dyn Write,
}

impl CommandContext<'_> {
    fn query(&mut self, sql: &str) -> Result<ResultSet> {
        log::debug!("Dot-command query: {}", sql);
        Ok(self.db.execute(sql)?)
    }

    fn show(&mut self, result: &ResultSet) -> Result<()> {
        render(result, self.state.mode, self.state.masked, self.out)?;
        Ok(())
    }

    fn usage(&mut self, name: &str) -> Result<DispatchOutcome> {
        let synopsis = find_command(name)
            .map(|c| format!("{} {}", c.name, c.args))
            .unwrap_or_else(|| name.to_string());
        writeln!(
            self.out,
            "{}",
            format!("Usage: {}", synopsis.trim_end()).yellow()
        )?;
        Ok(DispatchOutcome::Handled)
    }

    /// Ask before running a query that reads every row of a table
    fn confirm_scan(&mut self, what: &str) -> Result<bool> {
        let question = format!(
            "{} scans every row and counts against the read quota. Continue?",
            what
        );
        let confirmed = self.input.confirm(&question)?;
        if !confirmed {
            log::debug!("Declined: {}", what);
        }
        Ok(confirmed)
    }
}

type Handler = fn(&mut CommandContext<'_>, &[&str]) -> Result<DispatchOutcome>;

/// A registered dot-command
pub struct DotCommand {
    pub name: &'static str,
    pub args: &'static str,
    pub help: &'static str,
    handler: Handler,
}

/// Every command the shell understands
pub static COMMANDS: &[DotCommand] = &[
    DotCommand {
        name: ".help",
        args: "",
        help: "Show this help message",
        handler: help,
    },
    DotCommand {
        name: ".quit",
        args: "",
        help: "Exit the shell",
        handler: quit,
    },
    DotCommand {
        name: ".exit",
        args: "",
        help: "Exit the shell",
        handler: quit,
    },
    DotCommand {
        name: ".tables",
        args: "",
        help: "List tables",
        handler: catalog::tables,
    },
    DotCommand {
        name: ".schema",
        args: "[TABLE]",
        help: "Show CREATE statements",
        handler: catalog::schema,
    },
    DotCommand {
        name: ".indexes",
        args: "[TABLE]",
        help: "List indexes",
        handler: catalog::indexes,
    },
    DotCommand {
        name: ".count",
        args: "TABLE",
        help: "Count rows in a table (full scan, asks first)",
        handler: scan::count,
    },
    DotCommand {
        name: ".stats",
        args: "",
        help: "Row counts for every table (full scan, asks first)",
        handler: scan::stats,
    },
    DotCommand {
        name: ".dump",
        args: "[TABLE]",
        help: "Dump schema and data as SQL (full scan, asks first)",
        handler: scan::dump,
    },
    DotCommand {
        name: ".mode",
        args: "[MODE]",
        help: "Set or show the output mode",
        handler: settings::mode,
    },
    DotCommand {
        name: ".mask",
        args: "",
        help: "Mask sensitive columns",
        handler: settings::mask,
    },
    DotCommand {
        name: ".unmask",
        args: "",
        help: "Show sensitive columns in clear",
        handler: settings::unmask,
    },
    DotCommand {
        name: ".timing",
        args: "[on|off]",
        help: "Toggle statement timing",
        handler: settings::timing,
    },
    DotCommand {
        name: ".read",
        args: "FILE",
        help: "Execute SQL statements from a file",
        handler: read,
    },
    DotCommand {
        name: ".clear",
        args: "",
        help: "Clear the screen",
        handler: clear,
    },
];

/// Look a command up by name, ignoring case
pub fn find_command(name: &str) -> Option<&'static DotCommand> {
    COMMANDS.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

/// Run one dot-command line.
///
/// Database and script failures are reported to `ctx.out` and count as
/// handled; only output and input failures are returned as errors.
pub fn dispatch(line: &str, ctx: &mut CommandContext<'_>) -> Result<DispatchOutcome> {
    let mut tokens = line.split_whitespace();
    let Some(name) = tokens.next() else {
        return Ok(DispatchOutcome::Unknown);
    };
    let args: Vec<&str> = tokens.collect();

    let Some(command) = find_command(name) else {
        log::debug!("Unknown dot-command: {}", name);
        return Ok(DispatchOutcome::Unknown);
    };

    log::debug!("Dispatching {} with {:?}", command.name, args);
    match (command.handler)(ctx, &args) {
        Ok(outcome) => Ok(outcome),
        Err(
            e @ (ShellError::Database(_) | ShellError::Batch { .. } | ShellError::ScriptFile { .. }),
        ) => {
            writeln!(ctx.out, "{}", format!("Error: {}", e).red())?;
            Ok(DispatchOutcome::Handled)
        }
        Err(e) => Err(e),
    }
}

fn help(ctx: &mut CommandContext<'_>, _args: &[&str]) -> Result<DispatchOutcome> {
    writeln!(ctx.out, "{}", "Available commands:".bold().green())?;
    for command in COMMANDS {
        let synopsis = format!("{} {}", command.name, command.args);
        writeln!(
            ctx.out,
            "  {:<18} {}",
            synopsis.trim_end().cyan(),
            command.help
        )?;
    }
    writeln!(ctx.out, "\n{}", "SQL:".bold().green())?;
    writeln!(ctx.out, "  Multi-line statements are supported")?;
    writeln!(ctx.out, "  Terminate statements with a semicolon (;)")?;
    Ok(DispatchOutcome::Handled)
}

fn quit(_ctx: &mut CommandContext<'_>, _args: &[&str]) -> Result<DispatchOutcome> {
    Ok(DispatchOutcome::Quit)
}

fn read(ctx: &mut CommandContext<'_>, args: &[&str]) -> Result<DispatchOutcome> {
    if args.is_empty() {
        return ctx.usage(".read");
    }
    let joined = args.join(" ");
    let path = unquote(&joined);

    let state = ctx.state.clone();
    let count = run_file(Path::new(path), ctx.db, &state, ctx.out)?;
    log::debug!("Read {} statements from {}", count, path);
    Ok(DispatchOutcome::Handled)
}

fn clear(ctx: &mut CommandContext<'_>, _args: &[&str]) -> Result<DispatchOutcome> {
    write!(ctx.out, "\x1B[2J\x1B[1;1H")?;
    ctx.out.flush()?;
    Ok(DispatchOutcome::Handled)
}

/// Strip one pair of matching surrounding quotes
fn unquote(s: &str) -> &str {
    let s = s.trim();
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// Double-quote an identifier for use in generated SQL
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Single-quote a string literal for use in generated SQL
pub(crate) fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
