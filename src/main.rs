//! Wizard Env CLI
//!
//! Loads the application configuration the same way the wizard does at
//! startup and prints the typed result or the resource index built from it.

use anyhow::{Result, bail};
use clap::Parser;
use tracing::{Level, info, warn};
use wizard_env::cli::resolve::ResolveArgs;
use wizard_env::cli::{Cli, Command, OutputFormat};
use wizard_env::config::{self, ConfigLoader, LoadReport};
use wizard_env::error::ErrorCode;
use wizard_env::format::{
    format_config_json, format_config_text, format_resources_json, format_resources_text,
};
use wizard_env::logging::{self, LogTarget, log_level_to_tracing};
use wizard_env::paths::Distribution;
use wizard_env::resources::ResourceIndex;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config is loaded before logging so LOG_LEVEL can pick the level;
    // load diagnostics are replayed once the subscriber exists.
    config::init_global(ConfigLoader::new(&cli.env_file));
    let report = config::global().report();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        report
            .config
            .log_level()
            .map(log_level_to_tracing)
            .unwrap_or(Level::INFO)
    };
    logging::init(&LogTarget::parse(&cli.log), level)?;
    log_load_report(report);

    match cli.command.unwrap_or(Command::Show) {
        Command::Show => run_show(report, cli.format)?,
        Command::Check => run_check(report)?,
        Command::Resources => {
            let index = build_index(report, &cli.resource_prefix)?;
            run_resources(&index, cli.format)?;
        }
        Command::Resolve(args) => {
            let index = build_index(report, &cli.resource_prefix)?;
            run_resolve(&index, &args, cli.format)?;
        }
    }

    Ok(())
}

fn log_load_report(report: &LoadReport) {
    match &report.source {
        Some(path) => info!(path = %path.display(), keys = report.config.len(), "Configuration loaded"),
        None => warn!(
            code = %ErrorCode::MissingConfigSource,
            keys = report.config.len(),
            "Configuration file not found; using environment only"
        ),
    }
    for err in &report.invalid {
        warn!(code = %err.code(), key = %err.field, "{}", err);
    }
}

fn build_index(report: &LoadReport, prefix: &str) -> Result<ResourceIndex> {
    let mut index = ResourceIndex::new(Distribution::current().clone()).with_prefix(prefix);
    index.initialize_from(&report.config)?;
    Ok(index)
}

fn run_show(report: &LoadReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", format_config_text(report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&format_config_json(report))?),
    }
    Ok(())
}

fn run_check(report: &LoadReport) -> Result<()> {
    let mut problems = Vec::new();
    if report.missing_source() {
        problems.push(format!("{}: no configuration file found", ErrorCode::MissingConfigSource));
    }
    for err in &report.invalid {
        problems.push(format!("{}: {}", err.code(), err));
    }

    if problems.is_empty() {
        println!("ok: {} keys", report.config.len());
        return Ok(());
    }
    for problem in &problems {
        eprintln!("{}", problem);
    }
    bail!("{} configuration problem(s)", problems.len())
}

fn run_resources(index: &ResourceIndex, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", format_resources_text(index)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&format_resources_json(index))?),
    }
    Ok(())
}

fn run_resolve(index: &ResourceIndex, args: &ResolveArgs, format: OutputFormat) -> Result<()> {
    let resolved = index.resolve(&args.category, &args.name, args.quiet)?;
    match (format, resolved) {
        (OutputFormat::Text, Some(path)) => println!("{}", path.display()),
        (OutputFormat::Text, None) => {}
        (OutputFormat::Json, path) => println!("{}", serde_json::json!({ "path": path })),
    }
    Ok(())
}
