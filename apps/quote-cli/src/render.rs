//! Quote output.
//!
//! ## Table Layout
//! ```text
//! Base concrete (Standard)               $1,627.50  10.50 m³ × $155/m³
//! Strength upcharge (250 MPa)              $105.00  $10/m³
//! Waste allowance (5%)                      $77.50  +5% of volume
//! ------------------------------------------------------------------
//! Subtotal                               $1,810.00
//! Tax                                      $171.95
//! Total                                  $1,981.95
//! Cost per m³                              $188.76
//!
//! Calculator estimate: $1981.95 total, $188.76/m³
//! ```

use std::fmt::Write;

use pourquote_core::{Money, ProjectRecord, QuoteResult};

use crate::config::OutputFormat;
use crate::error::CliError;

const LABEL_WIDTH: usize = 32;
const AMOUNT_WIDTH: usize = 14;

pub fn render(result: &QuoteResult, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => Ok(render_table(result)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
    }
}

pub fn render_table(result: &QuoteResult) -> String {
    let mut out = String::new();

    for item in &result.line_items {
        let line = row(&item.label, item.amount);
        match &item.note {
            Some(note) => {
                let _ = writeln!(out, "{line}  {note}");
            }
            None => {
                let _ = writeln!(out, "{line}");
            }
        }
    }

    let _ = writeln!(out, "{}", "-".repeat(LABEL_WIDTH + AMOUNT_WIDTH + 20));
    let _ = writeln!(out, "{}", row("Subtotal", result.subtotal));
    let _ = writeln!(out, "{}", row("Tax", result.tax_amount));
    let _ = writeln!(out, "{}", row("Total", result.total));
    let _ = writeln!(out, "{}", row("Cost per m³", result.cost_per_m3));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", result.summary_note());

    out
}

/// Ballpark at the project's published per-m³ price, for comparison with
/// the itemized quote.
pub fn project_estimate(project: &ProjectRecord, volume_m3: f64) -> String {
    format!(
        "{} at the published {}/m³: {} for {} m³",
        project.title,
        Money::from_amount(project.price_per_m3),
        Money::from_amount(project.flat_estimate(volume_m3)),
        volume_m3
    )
}

fn row(label: &str, amount: f64) -> String {
    format!(
        "{:<label_w$} {:>amount_w$}",
        label,
        Money::from_amount(amount).to_string(),
        label_w = LABEL_WIDTH,
        amount_w = AMOUNT_WIDTH
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pourquote_core::{calculate_quote, ConcreteType, PricingConfig, QuoteInput};

    fn standard_quote(input: QuoteInput) -> QuoteResult {
        calculate_quote(&PricingConfig::standard(), &input).unwrap()
    }

    #[test]
    fn test_table_rows_and_totals() {
        let table = render_table(&standard_quote(QuoteInput::new(10.0, ConcreteType::Standard)));
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[0].starts_with("Base concrete (Standard)"));
        assert!(lines[0].contains("$1,627.50"));
        assert!(lines[0].ends_with("10.50 m³ × $155/m³"));
        assert!(lines[2].starts_with("Waste allowance (5%)"));
        assert!(table.contains("$1,981.95"));
        assert_eq!(
            lines.last(),
            Some(&"Calculator estimate: $1981.95 total, $188.76/m³")
        );
    }

    #[test]
    fn test_table_shows_negative_discount() {
        let input = QuoteInput {
            discount_percent: Some(10.0),
            ..QuoteInput::new(10.0, ConcreteType::Standard)
        };
        let table = render_table(&standard_quote(input));
        let discount = table
            .lines()
            .find(|line| line.starts_with("Discount (10%)"))
            .unwrap();
        assert!(discount.trim_end().ends_with("-$181.00"));
    }

    #[test]
    fn test_project_estimate_line() {
        let project = ProjectRecord {
            slug: "industrial-slab-warehouse".to_string(),
            title: "Industrial Slab Pour".to_string(),
            concrete_type: "Fiber-Reinforced Ready-Mix".to_string(),
            strength: "5000 PSI / 34 MPa".to_string(),
            volume_m3: 420.0,
            price_per_m3: 185.0,
        };
        assert_eq!(
            project_estimate(&project, 420.0),
            "Industrial Slab Pour at the published $185.00/m³: $77,700.00 for 420 m³"
        );
    }

    #[test]
    fn test_json_output() {
        let result = standard_quote(QuoteInput::new(10.0, ConcreteType::Standard));
        let json = render(&result, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total"], 1981.95);
        assert_eq!(value["lineItems"][0]["key"], "base");
    }
}
