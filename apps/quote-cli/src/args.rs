//! Command-line parsing.
//!
//! ## Usage
//! ```bash
//! pourquote volumeM3=10 concreteType=Fiber needsPump=true pumpHours=6
//! pourquote --mix "Fiber-Reinforced Ready-Mix" --strength "5000 PSI / 34 MPa" volumeM3=420
//! pourquote --pricing ./rates.json --json volumeM3=25
//! pourquote --project ./projects/industrial-slab-warehouse.json needsPump=true
//! ```

use crate::error::CliError;

pub const HELP: &str = "\
PourQuote concrete estimator

Usage: pourquote [OPTIONS] [key=value ...]

Keys:
  volumeM3 concreteType strengthMPa deliveryDistanceKm needsPump pumpHours
  hasFiber hasAccelerator nightPour wasteFactorPercent discountPercent taxPercent

Options:
  -p, --pricing <FILE>   JSON rate card (env: POURQUOTE_PRICING_FILE)
      --project <FILE>   Start from a published project record (JSON)
      --json             Print the quote as JSON (env: POURQUOTE_OUTPUT=json)
      --mix <TEXT>       Infer the mix from free text, e.g. \"Fiber-Reinforced\"
      --strength <TEXT>  Infer the grade from free text, e.g. \"4000 PSI\"
  -h, --help             Show this help message";

/// Parsed command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub pricing_file: Option<String>,
    pub project_file: Option<String>,
    pub json: bool,
    pub mix: Option<String>,
    pub strength: Option<String>,
    pub help: bool,
    /// `key=value` pairs in the order given.
    pub pairs: Vec<(String, String)>,
}

impl CliArgs {
    /// Parses arguments, program name excluded.
    pub fn parse<I>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = CliArgs::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--pricing" | "-p" => parsed.pricing_file = Some(value_for(&arg, args.next())?),
                "--project" => parsed.project_file = Some(value_for(&arg, args.next())?),
                "--json" => parsed.json = true,
                "--mix" => parsed.mix = Some(value_for(&arg, args.next())?),
                "--strength" => parsed.strength = Some(value_for(&arg, args.next())?),
                "--help" | "-h" => parsed.help = true,
                _ => match arg.split_once('=') {
                    Some((key, value)) if !key.is_empty() && !key.starts_with('-') => {
                        parsed.pairs.push((key.to_string(), value.to_string()));
                    }
                    _ => return Err(CliError::InvalidArgument(arg.clone())),
                },
            }
        }

        Ok(parsed)
    }

    /// Pairs as borrowed `(key, value)` slices.
    pub fn query_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn value_for(flag: &str, value: Option<String>) -> Result<String, CliError> {
    value.ok_or_else(|| CliError::MissingValue(flag.to_string()))
}
