//! # PourQuote CLI
//!
//! Prices a concrete pour from the terminal.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  argv ──► CliArgs ──► CliConfig (env + flags) ──► PricingConfig        │
//! │                                                        │                │
//! │  key=value pairs ──► input_from_query_pairs ──► calculate_quote         │
//! │  --project / --mix / --strength ──► bridge ─────────┘  │                │
//! │                                                        ▼                │
//! │                                              table or JSON on stdout    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=debug` to see engine events.

mod args;
mod config;
mod error;
mod render;

use std::env;
use std::process;

use pourquote_core::params::input_from_query_pairs;
use pourquote_core::{
    calculate_quote, infer_concrete_type, infer_strength_grade, PricingConfig, ProjectRecord,
    QuoteInput,
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::args::{CliArgs, HELP};
use crate::config::{load_project, CliConfig, OutputFormat};
use crate::error::CliError;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(err) = run() {
        warn!(error = %err, "Quote failed");
        eprintln!("error: {err}");
        process::exit(err.exit_code());
    }
}

fn run() -> Result<(), CliError> {
    let args = CliArgs::parse(env::args().skip(1))?;
    if args.help {
        println!("{HELP}");
        return Ok(());
    }

    let config = CliConfig::load(&args)?;
    let pricing = config.pricing()?;
    let project = args.project_file.as_deref().map(load_project).transpose()?;

    let input = build_input(&args, project.as_ref(), &pricing);
    debug!(?input, "Input resolved");

    let result = calculate_quote(&pricing, &input)?;
    println!("{}", render::render(&result, config.output)?);

    if let (Some(project), OutputFormat::Table) = (&project, config.output) {
        println!("{}", render::project_estimate(project, input.volume_m3));
    }
    Ok(())
}

/// Project prefill first, then `key=value` pairs, then free-text overrides.
fn build_input(
    args: &CliArgs,
    project: Option<&ProjectRecord>,
    pricing: &PricingConfig,
) -> QuoteInput {
    let prefill = project
        .map(ProjectRecord::calculator_prefill_pairs)
        .unwrap_or_default();
    let pairs = prefill
        .iter()
        .map(|(k, v)| (*k, v.as_str()))
        .chain(args.query_pairs());
    let mut input = input_from_query_pairs(pairs, pricing);

    if let Some(mix) = &args.mix {
        input.concrete_type = infer_concrete_type(mix);
    }
    if let Some(strength) = &args.strength {
        input.strength_mpa = Some(f64::from(infer_strength_grade(strength)));
    }

    input
}
