//! Activity host CLI.
//!
//! # Responsibility
//! - Load an activity description file and bind it to an in-process element
//!   store.
//! - Print the bound tree with attributes read back from native state.

use activity_core::{
    default_log_level, init_logging, parse_descriptions, Activity, ElementStore, LogicalNode,
};
use clap::Parser;
use log::info;
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

/// Attributes the display firmware reads when composing a frame.
const DISPLAY_KEYS: &[&str] = &["value", "index", "x", "y", "width", "height"];

#[derive(Debug, Parser)]
#[command(
    name = "activity_cli",
    version,
    about = "Bind an activity description to an in-process element store"
)]
struct Cli {
    /// Activity description JSON (one node object or an array of nodes).
    description: PathBuf,
    /// Activity name used in logs and output.
    #[arg(long, default_value = "test.main")]
    name: String,
    /// Log level (trace|debug|info|warn|error).
    #[arg(long)]
    log_level: Option<String>,
    /// Absolute directory for rolling log files; logging is off when omitted.
    #[arg(long)]
    log_dir: Option<String>,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    let raw = std::fs::read_to_string(&cli.description).map_err(|err| {
        format!(
            "failed to read description `{}`: {err}",
            cli.description.display()
        )
    })?;
    let descriptions = parse_descriptions(&raw)?;
    info!(
        "event=cli_load module=cli status=ok path={} roots={}",
        cli.description.display(),
        descriptions.len()
    );

    let mut store = ElementStore::new();
    let mut activity = Activity::start(cli.name, store.root_handle().clone());
    // partial trees are printed too: they exist natively after a failure
    let outcome = activity.attach(&mut store, &descriptions);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(
        out,
        "activity {} root={} nodes={}",
        activity.name(),
        activity.root(),
        activity.node_count()
    )?;
    for child in activity.children() {
        print_node(&mut out, &mut store, child, 1)?;
    }

    activity.end(&mut store)?;
    outcome?;
    Ok(())
}

fn print_node(
    out: &mut impl Write,
    store: &mut ElementStore,
    node: &LogicalNode,
    depth: usize,
) -> Result<(), Box<dyn Error>> {
    let mut line = format!("{}{} {}", "  ".repeat(depth), node.type_tag(), node.handle());
    let mut view = node.attributes(store);
    for key in DISPLAY_KEYS {
        if let Some(value) = view.get(key)? {
            line.push_str(&format!(" {key}={value}"));
        }
    }
    writeln!(out, "{line}")?;

    for child in node.children() {
        print_node(out, store, child, depth + 1)?;
    }
    Ok(())
}
