//! Resolve subcommand for wizard-env CLI

use clap::Args;

/// Arguments for the resolve subcommand
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Resource category (lower-case, e.g. `icons`)
    pub category: String,

    /// File name, relative path, or absolute path to locate
    pub name: String,

    /// Print nothing instead of failing when the resource is missing
    #[arg(short, long)]
    pub quiet: bool,
}
