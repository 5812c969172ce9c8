// Copyright (c) 2024-2025 dbshell Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Session setting commands

use std::io::Write;

use colored::Colorize;

use super::{CommandContext, DispatchOutcome};
use crate::error::Result;
use crate::session::OutputMode;

pub(super) fn mode(ctx: &mut CommandContext<'_>, args: &[&str]) -> Result<DispatchOutcome> {
    match args.first().map(|arg| arg.parse::<OutputMode>()) {
        Some(Ok(mode)) => {
            ctx.state.mode = mode;
            writeln!(ctx.out, "Output mode: {}", mode.to_string().cyan())?;
        }
        Some(Err(e)) => {
            writeln!(ctx.out, "{}", e.to_string().yellow())?;
            report_mode(ctx)?;
        }
        None => report_mode(ctx)?,
    }
    Ok(DispatchOutcome::Handled)
}

fn report_mode(ctx: &mut CommandContext<'_>) -> Result<()> {
    writeln!(ctx.out, "Current mode: {}", ctx.state.mode.to_string().cyan())?;
    writeln!(ctx.out, "Available modes: {}", OutputMode::names())?;
    Ok(())
}

pub(super) fn mask(ctx: &mut CommandContext<'_>, _args: &[&str]) -> Result<DispatchOutcome> {
    ctx.state.masked = true;
    writeln!(ctx.out, "Masking {}", "enabled".green())?;
    Ok(DispatchOutcome::Handled)
}

pub(super) fn unmask(ctx: &mut CommandContext<'_>, _args: &[&str]) -> Result<DispatchOutcome> {
    ctx.state.masked = false;
    writeln!(ctx.out, "Masking {}", "disabled".yellow())?;
    Ok(DispatchOutcome::Handled)
}

pub(super) fn timing(ctx: &mut CommandContext<'_>, args: &[&str]) -> Result<DispatchOutcome> {
    let enabled = match args.first().map(|arg| arg.to_lowercase()) {
        None => !ctx.state.timing,
        Some(arg) if arg == "on" => true,
        Some(arg) if arg == "off" => false,
        Some(_) => return ctx.usage(".timing"),
    };
    ctx.state.timing = enabled;
    writeln!(ctx.out, "Timing {}", if enabled { "on" } else { "off" })?;
    Ok(DispatchOutcome::Handled)
}
