//! Canary CLI - emit OS events for telemetry validation

use anyhow::Context;
use clap::Parser;
use canary::cli::Args;
use canary::{execute, InvocationContext, JsonLines};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // stdout carries the records, so diagnostics go to stderr only
    TermLogger::init(args.level_filter(), Config::default(), TerminalMode::Stderr, ColorChoice::Auto)
        .context("failed to initialize logging")?;

    let ctx = InvocationContext::from_env();
    let invocation = args.invocation();
    log::debug!("Running {:?} as {} (PID {})", invocation, ctx.username, ctx.process_id);

    let mut sink = JsonLines::new(std::io::stdout().lock());
    execute(&invocation, &ctx, &mut sink).with_context(|| format!("{} failed", ctx.command_line()))?;
    Ok(())
}
