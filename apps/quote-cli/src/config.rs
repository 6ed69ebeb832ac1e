//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults; command-line flags win over the environment.

use std::env;
use std::fs;
use std::str::FromStr;

use pourquote_core::{PricingConfig, ProjectRecord};
use tracing::{debug, info};

use crate::args::CliArgs;
use crate::error::CliError;

/// How the quote is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(CliError::InvalidEnv("POURQUOTE_OUTPUT".to_string())),
        }
    }
}

/// Resolved CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// JSON rate card; the standard card when unset
    pub pricing_file: Option<String>,

    pub output: OutputFormat,
}

impl CliConfig {
    /// Load configuration from environment variables, then apply flags.
    pub fn load(args: &CliArgs) -> Result<Self, CliError> {
        Self::from_lookup(|key| env::var(key).ok(), args)
    }

    fn from_lookup<F>(lookup: F, args: &CliArgs) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = CliConfig {
            pricing_file: lookup("POURQUOTE_PRICING_FILE").filter(|path| !path.is_empty()),
            output: lookup("POURQUOTE_OUTPUT")
                .unwrap_or_else(|| "table".to_string())
                .parse()?,
        };

        if let Some(path) = &args.pricing_file {
            config.pricing_file = Some(path.clone());
        }
        if args.json {
            config.output = OutputFormat::Json;
        }

        Ok(config)
    }

    /// The rate card to price against.
    pub fn pricing(&self) -> Result<PricingConfig, CliError> {
        let Some(path) = &self.pricing_file else {
            debug!("Using standard rate card");
            return Ok(PricingConfig::standard());
        };

        let json = read_file(path)?;
        let pricing = PricingConfig::from_json_str(&json)?;
        info!(path = %path, "Rate card loaded");
        Ok(pricing)
    }
}

/// Loads a published project record to start the quote from.
pub fn load_project(path: &str) -> Result<ProjectRecord, CliError> {
    let json = read_file(path)?;
    let project: ProjectRecord =
        serde_json::from_str(&json).map_err(|source| CliError::InvalidProject {
            path: path.to_string(),
            source,
        })?;
    info!(path = %path, slug = %project.slug, "Project loaded");
    Ok(project)
}

fn read_file(path: &str) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.to_string(),
        source,
    })
}
