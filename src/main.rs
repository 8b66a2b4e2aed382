//! devkit - A command-line toolbox of small developer utilities
//!
//! devkit provides:
//! - Case conversion (camelCase, PascalCase, snake_case, kebab-case, Title Case, ...)
//! - SHA-1/SHA-256/SHA-512 (and XXH3) digests
//! - JSON ⟷ YAML conversion and JSON formatting
//! - UUID v4 generation
//! - A best-effort Markdown to HTML previewer
//! - Base64 and URL encoders
//! - Unified output format (jsonl/json/md/raw)

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

mod cli;
mod core;
mod tools;

fn main() -> Result<ExitCode> {
    let cli = cli::Cli::parse();
    crate::core::logging::init_tracing(cli.verbose, cli.quiet);
    cli::run(cli)
}
