//! # Project Bridge
//!
//! Maps the free-text fields on published project records onto the typed
//! values the quote engine expects.
//!
//! ## Inference Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  infer_concrete_type (lower-cased, first match wins)                   │
//! │    "self-level" | "self level" | "scc"   → SelfLeveling                 │
//! │    "high" | "high-perf" | "silica"       → HighStrength                 │
//! │    "fiber" | "fibre"                     → Fiber                        │
//! │    anything else                         → Standard                     │
//! │                                                                         │
//! │  infer_strength_grade                                                   │
//! │    "<n> MPa"  → n                                                       │
//! │    "<n> PSI"  → round(n × 0.00689)                                      │
//! │    neither    → 250                                                     │
//! │    then snap to {200, 250, 300, 350, 400}, ties → smaller              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Neither function fails; unknown text falls back to a default.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::types::{nearest_grade, ConcreteType, QuoteInput};
use crate::{DEFAULT_STRENGTH_MPA, PSI_TO_MPA, STRENGTH_GRADES};

static MPA_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([0-9]+)\s*MPa").expect("MPa pattern compiles"));

static PSI_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([0-9]+)\s*PSI").expect("PSI pattern compiles"));

/// Keyword groups checked in order.
const TYPE_KEYWORDS: [(ConcreteType, &[&str]); 3] = [
    (ConcreteType::SelfLeveling, &["self-level", "scc", "self level"]),
    (ConcreteType::HighStrength, &["high", "high-perf", "silica"]),
    (ConcreteType::Fiber, &["fiber", "fibre"]),
];

// =============================================================================
// Inference
// =============================================================================

/// Infers a mix type from a free-text description.
///
/// ## Example
/// ```rust
/// use pourquote_core::{infer_concrete_type, ConcreteType};
///
/// assert_eq!(infer_concrete_type("Fiber-Reinforced Ready-Mix"), ConcreteType::Fiber);
/// assert_eq!(infer_concrete_type("unrecognized material"), ConcreteType::Standard);
/// ```
pub fn infer_concrete_type(text: &str) -> ConcreteType {
    let lowered = text.to_lowercase();

    for (concrete_type, keywords) in TYPE_KEYWORDS {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return concrete_type;
        }
    }

    debug!(text, "No mix keyword matched, using Standard");
    ConcreteType::Standard
}

/// Infers a strength grade from text such as `"5000 PSI / 34 MPa"`.
///
/// ## Example
/// ```rust
/// use pourquote_core::infer_strength_grade;
///
/// assert_eq!(infer_strength_grade("325 MPa"), 300);
/// assert_eq!(infer_strength_grade("45000 PSI"), 300);
/// assert_eq!(infer_strength_grade("no numbers here"), 250);
/// ```
pub fn infer_strength_grade(text: &str) -> u32 {
    let mpa = if let Some(mpa) = first_number(&MPA_REGEX, text) {
        mpa
    } else if let Some(psi) = first_number(&PSI_REGEX, text) {
        (psi * PSI_TO_MPA).round()
    } else {
        debug!(text, "No strength found, using default grade");
        f64::from(DEFAULT_STRENGTH_MPA)
    };

    snap_to_grade(mpa)
}

/// Snaps any MPa value onto [`STRENGTH_GRADES`].
pub fn snap_to_grade(mpa: f64) -> u32 {
    nearest_grade(STRENGTH_GRADES, mpa).unwrap_or(DEFAULT_STRENGTH_MPA)
}

fn first_number(pattern: &Regex, text: &str) -> Option<f64> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}

// =============================================================================
// Project Records
// =============================================================================

/// A published project as shown in the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProjectRecord {
    pub slug: String,
    pub title: String,
    /// Free text, e.g. "Fiber-Reinforced Ready-Mix".
    pub concrete_type: String,
    /// Free text, e.g. "5000 PSI / 34 MPa".
    pub strength: String,
    pub volume_m3: f64,
    /// Published all-in price, USD per m³.
    pub price_per_m3: f64,
}

impl ProjectRecord {
    /// The quote input a visitor starts from when opening the calculator
    /// from this project.
    pub fn quote_input(&self) -> QuoteInput {
        QuoteInput {
            strength_mpa: Some(f64::from(infer_strength_grade(&self.strength))),
            ..QuoteInput::new(self.volume_m3, infer_concrete_type(&self.concrete_type))
        }
    }

    /// Query pairs for the calculator link on the project page.
    pub fn calculator_prefill_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("volumeM3", self.volume_m3.to_string()),
            (
                "concreteType",
                infer_concrete_type(&self.concrete_type).to_string(),
            ),
            (
                "strengthMPa",
                infer_strength_grade(&self.strength).to_string(),
            ),
            ("project", self.slug.clone()),
        ]
    }

    /// Ballpark total at the published per-m³ price.
    pub fn flat_estimate(&self, volume_m3: f64) -> f64 {
        volume_m3 * self.price_per_m3
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn warehouse() -> ProjectRecord {
        ProjectRecord {
            slug: "industrial-slab-warehouse".to_string(),
            title: "Industrial Slab Pour".to_string(),
            concrete_type: "Fiber-Reinforced Ready-Mix".to_string(),
            strength: "5000 PSI / 34 MPa".to_string(),
            volume_m3: 420.0,
            price_per_m3: 185.0,
        }
    }

    #[test]
    fn test_infer_concrete_type_keywords() {
        assert_eq!(infer_concrete_type("Self-Leveling Underlayment"), ConcreteType::SelfLeveling);
        assert_eq!(infer_concrete_type("SCC wall pour"), ConcreteType::SelfLeveling);
        assert_eq!(infer_concrete_type("self level topping"), ConcreteType::SelfLeveling);
        assert_eq!(
            infer_concrete_type("High-Performance Silica Fume Concrete"),
            ConcreteType::HighStrength
        );
        assert_eq!(infer_concrete_type("FIBRE mesh mix"), ConcreteType::Fiber);
        assert_eq!(
            infer_concrete_type("Post-Tensioned Structural Concrete"),
            ConcreteType::Standard
        );
    }

    #[test]
    fn test_infer_concrete_type_priority() {
        // both "fiber" and "high": the high-strength group is checked first
        assert_eq!(infer_concrete_type("high fiber blend"), ConcreteType::HighStrength);
        // both "scc" and "fiber": self-leveling wins
        assert_eq!(infer_concrete_type("fiber SCC"), ConcreteType::SelfLeveling);
    }

    #[test]
    fn test_infer_concrete_type_fallback() {
        assert_eq!(infer_concrete_type("unrecognized material"), ConcreteType::Standard);
        assert_eq!(infer_concrete_type(""), ConcreteType::Standard);
    }

    #[test]
    fn test_infer_strength_prefers_mpa() {
        // 34 MPa is far below the grade scale, so it snaps to the floor
        assert_eq!(infer_strength_grade("5000 PSI / 34 MPa"), 200);
        assert_eq!(infer_strength_grade("375 mpa"), 350);
        assert_eq!(infer_strength_grade("400MPa"), 400);
    }

    #[test]
    fn test_infer_strength_from_psi() {
        // 4000 × 0.00689 = 27.56 → 28
        assert_eq!(infer_strength_grade("4000 PSI"), 200);
        // 45000 × 0.00689 = 310.05 → 310
        assert_eq!(infer_strength_grade("45000 psi"), 300);
        // 60000 × 0.00689 = 413.4 → 413
        assert_eq!(infer_strength_grade("60000 PSI"), 400);
    }

    #[test]
    fn test_infer_strength_reads_ascii_digits_only() {
        // Arabic-Indic digits are not a strength value
        assert_eq!(infer_strength_grade("\u{0663}\u{0660} MPa, grade 400 MPa"), 400);
        assert_eq!(infer_strength_grade("\u{0664}\u{0660}\u{0660}\u{0660} PSI"), 250);
    }

    #[test]
    fn test_infer_strength_fallback() {
        assert_eq!(infer_strength_grade("no numbers here"), 250);
        assert_eq!(infer_strength_grade("3000"), 250);
        assert_eq!(infer_strength_grade(""), 250);
    }

    #[test]
    fn test_snap_to_grade_ties_go_to_smaller() {
        assert_eq!(snap_to_grade(275.0), 250);
        assert_eq!(snap_to_grade(325.0), 300);
        assert_eq!(snap_to_grade(226.0), 250);
    }

    #[test]
    fn test_project_quote_input() {
        let input = warehouse().quote_input();
        assert_eq!(input.volume_m3, 420.0);
        assert_eq!(input.concrete_type, ConcreteType::Fiber);
        assert_eq!(input.strength_mpa, Some(200.0));
        assert_eq!(input.needs_pump, None);
    }

    #[test]
    fn test_project_calculator_prefill_pairs() {
        let pairs = warehouse().calculator_prefill_pairs();
        assert_eq!(
            pairs,
            vec![
                ("volumeM3", "420".to_string()),
                ("concreteType", "Fiber".to_string()),
                ("strengthMPa", "200".to_string()),
                ("project", "industrial-slab-warehouse".to_string()),
            ]
        );
    }

    #[test]
    fn test_flat_estimate() {
        assert_eq!(warehouse().flat_estimate(10.0), 1850.0);
    }
}
