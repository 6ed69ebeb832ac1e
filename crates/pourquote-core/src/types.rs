//! # Domain Types
//!
//! Core domain types used throughout PourQuote.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   QuoteInput    │   │    LineItem     │   │   QuoteResult   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  volume_m3      │──►│  key            │──►│  line_items     │       │
//! │  │  concrete_type  │   │  label          │   │  subtotal       │       │
//! │  │  options...     │   │  amount (raw)   │   │  tax / total    │       │
//! │  └─────────────────┘   │  note?          │   │  cost_per_m3    │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │  ConcreteType   │   │  LineItemKey    │                              │
//! │  │  Standard       │   │  base … discount│                              │
//! │  │  HighStrength   │   │  (fixed order)  │                              │
//! │  │  Fiber          │   └─────────────────┘                              │
//! │  │  SelfLeveling   │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All serialized names are camelCase so the web calculator and the Rust
//! types agree on the wire.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Concrete Type
// =============================================================================

/// The mix formulation that drives the base rate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub enum ConcreteType {
    /// Normal ready-mix.
    #[default]
    Standard,
    /// High-strength / high-performance mixes.
    HighStrength,
    /// Fiber-reinforced mixes.
    Fiber,
    /// Self-leveling / self-consolidating concrete.
    SelfLeveling,
}

impl ConcreteType {
    /// Every mix type, in rate-card order.
    pub const ALL: [ConcreteType; 4] = [
        ConcreteType::Standard,
        ConcreteType::HighStrength,
        ConcreteType::Fiber,
        ConcreteType::SelfLeveling,
    ];

    /// The tag used on the wire and in query strings.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConcreteType::Standard => "Standard",
            ConcreteType::HighStrength => "HighStrength",
            ConcreteType::Fiber => "Fiber",
            ConcreteType::SelfLeveling => "SelfLeveling",
        }
    }

    /// Customer-facing name.
    pub const fn label(&self) -> &'static str {
        match self {
            ConcreteType::Standard => "Standard",
            ConcreteType::HighStrength => "High-Strength",
            ConcreteType::Fiber => "Fiber-Reinforced",
            ConcreteType::SelfLeveling => "Self-Leveling",
        }
    }
}

impl fmt::Display for ConcreteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the exact wire tag. Free text goes through
/// [`crate::bridge::infer_concrete_type`] instead.
impl FromStr for ConcreteType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConcreteType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "concreteType".to_string(),
                allowed: ConcreteType::ALL
                    .iter()
                    .map(|t| t.as_str().to_string())
                    .collect(),
            })
    }
}

// =============================================================================
// Strength Grades
// =============================================================================

/// Picks the grade closest to `target`.
///
/// Exact ties go to the smaller grade whatever order `grades` arrives in.
/// Returns `None` only when `grades` is empty.
///
/// ## Example
/// ```rust
/// use pourquote_core::types::nearest_grade;
///
/// let grades = [200, 250, 300, 350, 400];
/// assert_eq!(nearest_grade(grades, 274.0), Some(250));
/// assert_eq!(nearest_grade(grades, 275.0), Some(250)); // tie → smaller
/// assert_eq!(nearest_grade(grades, 276.0), Some(300));
/// ```
pub fn nearest_grade<I>(grades: I, target: f64) -> Option<u32>
where
    I: IntoIterator<Item = u32>,
{
    grades.into_iter().min_by(|a, b| {
        let da = (f64::from(*a) - target).abs();
        let db = (f64::from(*b) - target).abs();
        da.partial_cmp(&db).unwrap_or(Ordering::Equal).then(a.cmp(b))
    })
}

// =============================================================================
// Quote Input
// =============================================================================

/// One pour to be priced.
///
/// Only `volume_m3` and `concrete_type` are required; every `None` is filled
/// from the rate card or a fixed default by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuoteInput {
    /// Ordered volume in cubic metres. Must be > 0.
    pub volume_m3: f64,

    pub concrete_type: ConcreteType,

    /// Target strength; snapped to the nearest rate-card grade.
    #[serde(rename = "strengthMPa", default)]
    #[ts(optional)]
    pub strength_mpa: Option<f64>,

    /// Plant-to-site distance. 0 means pick-up (no delivery row).
    #[serde(default)]
    #[ts(optional)]
    pub delivery_distance_km: Option<f64>,

    #[serde(default)]
    #[ts(optional)]
    pub needs_pump: Option<bool>,

    /// Only read when `needs_pump` is true.
    #[serde(default)]
    #[ts(optional)]
    pub pump_hours: Option<f64>,

    #[serde(default)]
    #[ts(optional)]
    pub has_fiber: Option<bool>,

    #[serde(default)]
    #[ts(optional)]
    pub has_accelerator: Option<bool>,

    #[serde(default)]
    #[ts(optional)]
    pub night_pour: Option<bool>,

    #[serde(default)]
    #[ts(optional)]
    pub waste_factor_percent: Option<f64>,

    /// Clamped into `[0, maxDiscountPercent]`.
    #[serde(default)]
    #[ts(optional)]
    pub discount_percent: Option<f64>,

    #[serde(default)]
    #[ts(optional)]
    pub tax_percent: Option<f64>,
}

impl QuoteInput {
    /// Creates an input with every optional field left to its default.
    pub fn new(volume_m3: f64, concrete_type: ConcreteType) -> Self {
        QuoteInput {
            volume_m3,
            concrete_type,
            strength_mpa: None,
            delivery_distance_km: None,
            needs_pump: None,
            pump_hours: None,
            has_fiber: None,
            has_accelerator: None,
            night_pour: None,
            waste_factor_percent: None,
            discount_percent: None,
            tax_percent: None,
        }
    }
}

// =============================================================================
// Line Items
// =============================================================================

/// Stable identifier of a quote row.
///
/// Declaration order is output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum LineItemKey {
    Base,
    Strength,
    Delivery,
    Pump,
    Fiber,
    Accelerator,
    NightPour,
    Waste,
    Discount,
}

impl LineItemKey {
    /// Every key, in output order.
    pub const ALL: [LineItemKey; 9] = [
        LineItemKey::Base,
        LineItemKey::Strength,
        LineItemKey::Delivery,
        LineItemKey::Pump,
        LineItemKey::Fiber,
        LineItemKey::Accelerator,
        LineItemKey::NightPour,
        LineItemKey::Waste,
        LineItemKey::Discount,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            LineItemKey::Base => "base",
            LineItemKey::Strength => "strength",
            LineItemKey::Delivery => "delivery",
            LineItemKey::Pump => "pump",
            LineItemKey::Fiber => "fiber",
            LineItemKey::Accelerator => "accelerator",
            LineItemKey::NightPour => "nightpour",
            LineItemKey::Waste => "waste",
            LineItemKey::Discount => "discount",
        }
    }
}

impl fmt::Display for LineItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One priced component of a quote.
///
/// `amount` is unrounded. Only the discount row is ever negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    pub key: LineItemKey,
    pub label: String,
    pub amount: f64,
    pub note: Option<String>,
}

impl LineItem {
    pub fn new(key: LineItemKey, label: impl Into<String>, amount: f64) -> Self {
        LineItem {
            key,
            label: label.into(),
            amount,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

// =============================================================================
// Quote Result
// =============================================================================

/// The itemized quote.
///
/// `subtotal` and `tax_amount` are full precision; `total` and
/// `cost_per_m3` are rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuoteResult {
    pub line_items: Vec<LineItem>,
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total: f64,
    /// `total` over the waste-inflated volume.
    pub cost_per_m3: f64,
}

impl QuoteResult {
    /// Returns the row with `key`, if the quote has one.
    pub fn item(&self, key: LineItemKey) -> Option<&LineItem> {
        self.line_items.iter().find(|item| item.key == key)
    }

    pub fn has_item(&self, key: LineItemKey) -> bool {
        self.item(key).is_some()
    }

    /// Row keys in output order.
    pub fn keys(&self) -> Vec<LineItemKey> {
        self.line_items.iter().map(|item| item.key).collect()
    }

    /// One-line summary carried into the quote-request form's notes.
    ///
    /// Amounts are written as plain numbers, exactly as the web calculator
    /// sends them to the intake endpoint (no grouping, no trailing zeros).
    ///
    /// ## Example
    /// ```text
    /// Calculator estimate: $49219.43 total, $234.38/m³
    /// Calculator estimate: $1981.9 total, $188.75/m³
    /// ```
    pub fn summary_note(&self) -> String {
        format!(
            "Calculator estimate: ${} total, ${}/m³",
            self.total, self.cost_per_m3
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
