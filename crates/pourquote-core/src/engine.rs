//! # Quote Engine
//!
//! Turns a [`QuoteInput`] into an itemized [`QuoteResult`] against an
//! injected [`PricingConfig`].
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  volume_m3 <= 0 ? ──────────────────────────────► Err(InvalidVolume)    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  effective = volume × (1 + waste% / 100)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  rows, each conditional, always in this order:                         │
//! │    base → strength → delivery → pump → fiber → accelerator →           │
//! │    nightpour → waste → discount                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  subtotal = Σ rows       tax = subtotal × tax% / 100                    │
//! │  total = round2(subtotal + tax)                                        │
//! │  cost_per_m3 = round2(total / effective)                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Waste Row
//! Per-m³ rates are charged on the *effective* volume, so the base row
//! already bills the wasted material. The `waste` row re-states that share
//! of the base row for the customer and is summed into the subtotal like
//! every other row. Changing that would move every published total.

use tracing::debug;

use crate::config::PricingConfig;
use crate::error::{EngineResult, QuoteError};
use crate::money::round2;
use crate::types::{LineItem, LineItemKey, QuoteInput, QuoteResult};

// =============================================================================
// Quote Engine
// =============================================================================

/// A quote calculator bound to one rate card.
///
/// ## Example
/// ```rust
/// use pourquote_core::{ConcreteType, QuoteEngine, QuoteInput};
///
/// let engine = QuoteEngine::default();
/// let quote = engine.calculate(&QuoteInput::new(10.0, ConcreteType::Standard)).unwrap();
/// assert_eq!(quote.total, 1981.95);
/// ```
#[derive(Debug, Clone, Default)]
pub struct QuoteEngine {
    config: PricingConfig,
}

impl QuoteEngine {
    pub fn new(config: PricingConfig) -> Self {
        QuoteEngine { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    pub fn calculate(&self, input: &QuoteInput) -> EngineResult<QuoteResult> {
        calculate_quote(&self.config, input)
    }
}

// =============================================================================
// Core Function
// =============================================================================

/// Prices one pour.
///
/// ## Errors
/// [`QuoteError::InvalidVolume`] when `volume_m3` is not a finite number
/// greater than zero. Every other field is defaulted or clamped.
pub fn calculate_quote(config: &PricingConfig, input: &QuoteInput) -> EngineResult<QuoteResult> {
    let volume_m3 = input.volume_m3;
    if !(volume_m3.is_finite() && volume_m3 > 0.0) {
        return Err(QuoteError::InvalidVolume { volume_m3 });
    }

    let delivery_km = input.delivery_distance_km.unwrap_or(0.0);
    let needs_pump = input.needs_pump.unwrap_or(false);
    let pump_hours = input.pump_hours.unwrap_or(0.0);
    let waste_percent = input
        .waste_factor_percent
        .unwrap_or(config.default_waste_factor_percent);
    let discount_percent = config.clamp_discount(input.discount_percent.unwrap_or(0.0));
    let tax_percent = input.tax_percent.unwrap_or(config.default_tax_percent);

    let effective_volume = volume_m3 * (1.0 + waste_percent / 100.0);
    let mut items: Vec<LineItem> = Vec::with_capacity(LineItemKey::ALL.len());

    // 1. Base concrete
    let base_rate = config.base_per_m3.rate(input.concrete_type);
    items.push(
        LineItem::new(
            LineItemKey::Base,
            format!("Base concrete ({})", input.concrete_type.label()),
            effective_volume * base_rate,
        )
        .with_note(format!("{:.2} m³ × ${}/m³", effective_volume, base_rate)),
    );

    // 2. Strength upcharge
    let grade = config.resolve_strength_grade(input.strength_mpa);
    let strength_rate = config.strength_upcharge(grade);
    if strength_rate > 0.0 {
        items.push(
            LineItem::new(
                LineItemKey::Strength,
                format!("Strength upcharge ({} MPa)", grade),
                effective_volume * strength_rate,
            )
            .with_note(format!("${}/m³", strength_rate)),
        );
    }

    // 3. Delivery
    if delivery_km > 0.0 {
        items.push(
            LineItem::new(
                LineItemKey::Delivery,
                "Delivery",
                config.delivery_base + delivery_km * config.delivery_per_km,
            )
            .with_note(format!(
                "Base ${} + {} km × ${}/km",
                config.delivery_base, delivery_km, config.delivery_per_km
            )),
        );
    }

    // 4. Pump (hours are taken as given, even 0 or negative)
    if needs_pump {
        items.push(
            LineItem::new(
                LineItemKey::Pump,
                "Concrete pump",
                config.pump_mobilization + pump_hours * config.pump_per_hour,
            )
            .with_note(format!(
                "Mobilization ${} + {}h × ${}/h",
                config.pump_mobilization, pump_hours, config.pump_per_hour
            )),
        );
    }

    // 5-7. Per-m³ add-ons
    let add_ons = [
        (
            input.has_fiber,
            LineItemKey::Fiber,
            "Fiber additive",
            config.fiber_additive_per_m3,
        ),
        (
            input.has_accelerator,
            LineItemKey::Accelerator,
            "Accelerating admixture",
            config.accelerator_per_m3,
        ),
        (
            input.night_pour,
            LineItemKey::NightPour,
            "Night pour surcharge",
            config.night_pour_surcharge_per_m3,
        ),
    ];
    for (requested, key, label, rate) in add_ons {
        if requested.unwrap_or(false) {
            items.push(
                LineItem::new(key, label, effective_volume * rate)
                    .with_note(format!("${}/m³", rate)),
            );
        }
    }

    // 8. Waste allowance (already inside the base row, see module docs)
    if waste_percent > 0.0 {
        items.push(
            LineItem::new(
                LineItemKey::Waste,
                format!("Waste allowance ({}%)", waste_percent),
                (effective_volume - volume_m3) * base_rate,
            )
            .with_note(format!("+{}% of volume", waste_percent)),
        );
    }

    // 9. Discount on everything above
    if discount_percent > 0.0 {
        let gross: f64 = items.iter().map(|item| item.amount).sum();
        items.push(LineItem::new(
            LineItemKey::Discount,
            format!("Discount ({}%)", discount_percent),
            -(gross * discount_percent / 100.0),
        ));
    }

    let subtotal: f64 = items.iter().map(|item| item.amount).sum();
    let tax_amount = subtotal * (tax_percent / 100.0);
    let total = round2(subtotal + tax_amount);
    let cost_per_m3 = round2(total / effective_volume);

    debug!(
        volume_m3,
        effective_volume,
        concrete_type = %input.concrete_type,
        strength_grade = grade,
        rows = items.len(),
        total,
        "Quote calculated"
    );

    Ok(QuoteResult {
        line_items: items,
        subtotal,
        tax_amount,
        total,
        cost_per_m3,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ConcreteType;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn quote(input: &QuoteInput) -> QuoteResult {
        calculate_quote(&PricingConfig::standard(), input).unwrap()
    }

    #[test]
    fn test_rejects_non_positive_volume() {
        let config = PricingConfig::standard();
        for volume in [0.0, -0.0, -10.0, f64::NAN, f64::INFINITY] {
            let err = calculate_quote(&config, &QuoteInput::new(volume, ConcreteType::Standard))
                .unwrap_err();
            assert!(matches!(err, QuoteError::InvalidVolume { .. }));
        }
    }

    #[test]
    fn test_minimal_quote_uses_defaults() {
        let result = quote(&QuoteInput::new(10.0, ConcreteType::Standard));

        // 5% waste → 10.5 m³; default strength 250 → $10/m³; 9.5% tax
        assert_eq!(
            result.keys(),
            vec![LineItemKey::Base, LineItemKey::Strength, LineItemKey::Waste]
        );
        assert!(approx(result.line_items[0].amount, 1627.5));
        assert!(approx(result.line_items[1].amount, 105.0));
        assert!(approx(result.line_items[2].amount, 77.5));
        assert!(approx(result.subtotal, 1810.0));
        assert!(approx(result.tax_amount, 171.95));
        assert_eq!(result.total, 1981.95);
        assert_eq!(result.cost_per_m3, 188.76);
    }

    #[test]
    fn test_labels_and_notes() {
        let input = QuoteInput {
            delivery_distance_km: Some(25.0),
            needs_pump: Some(true),
            pump_hours: Some(8.0),
            discount_percent: Some(5.0),
            ..QuoteInput::new(200.0, ConcreteType::Fiber)
        };
        let result = quote(&input);

        let base = result.item(LineItemKey::Base).unwrap();
        assert_eq!(base.label, "Base concrete (Fiber-Reinforced)");
        assert_eq!(base.note.as_deref(), Some("210.00 m³ × $175/m³"));

        let delivery = result.item(LineItemKey::Delivery).unwrap();
        assert_eq!(delivery.note.as_deref(), Some("Base $95 + 25 km × $2.8/km"));

        let pump = result.item(LineItemKey::Pump).unwrap();
        assert_eq!(pump.note.as_deref(), Some("Mobilization $450 + 8h × $185/h"));

        let waste = result.item(LineItemKey::Waste).unwrap();
        assert_eq!(waste.label, "Waste allowance (5%)");

        let discount = result.item(LineItemKey::Discount).unwrap();
        assert_eq!(discount.label, "Discount (5%)");
        assert_eq!(discount.note, None);
    }

    #[test]
    fn test_zero_waste_suppresses_waste_row() {
        let input = QuoteInput {
            waste_factor_percent: Some(0.0),
            ..QuoteInput::new(10.0, ConcreteType::Standard)
        };
        let result = quote(&input);
        assert!(!result.has_item(LineItemKey::Waste));
        assert!(approx(result.line_items[0].amount, 1550.0));
    }

    #[test]
    fn test_waste_row_restates_part_of_base() {
        let input = QuoteInput {
            waste_factor_percent: Some(10.0),
            tax_percent: Some(0.0),
            strength_mpa: Some(200.0),
            ..QuoteInput::new(100.0, ConcreteType::Standard)
        };
        let result = quote(&input);

        // base bills 110 m³; waste shows the 10 m³ share again
        assert!(approx(result.item(LineItemKey::Base).unwrap().amount, 17_050.0));
        assert!(approx(result.item(LineItemKey::Waste).unwrap().amount, 1_550.0));
        assert!(approx(result.subtotal, 18_600.0));
    }

    #[test]
    fn test_lowest_grade_has_no_strength_row() {
        let input = QuoteInput {
            strength_mpa: Some(210.0),
            ..QuoteInput::new(10.0, ConcreteType::Standard)
        };
        assert!(!quote(&input).has_item(LineItemKey::Strength));
    }

    #[test]
    fn test_pump_row_ignores_hours_when_not_requested() {
        let input = QuoteInput {
            pump_hours: Some(6.0),
            ..QuoteInput::new(10.0, ConcreteType::Standard)
        };
        assert!(!quote(&input).has_item(LineItemKey::Pump));
    }

    #[test]
    fn test_negative_pump_hours_are_not_validated() {
        let input = QuoteInput {
            needs_pump: Some(true),
            pump_hours: Some(-2.0),
            ..QuoteInput::new(10.0, ConcreteType::Standard)
        };
        let result = quote(&input);
        assert!(approx(result.item(LineItemKey::Pump).unwrap().amount, 80.0));
    }

    #[test]
    fn test_negative_discount_is_ignored() {
        let input = QuoteInput {
            discount_percent: Some(-15.0),
            ..QuoteInput::new(10.0, ConcreteType::Standard)
        };
        let result = quote(&input);
        assert!(!result.has_item(LineItemKey::Discount));
        assert_eq!(result.total, 1981.95);
    }

    #[test]
    fn test_discount_applies_to_gross_of_all_rows() {
        let input = QuoteInput {
            discount_percent: Some(10.0),
            tax_percent: Some(0.0),
            ..QuoteInput::new(10.0, ConcreteType::Standard)
        };
        let result = quote(&input);
        let discount = result.item(LineItemKey::Discount).unwrap();
        assert!(approx(discount.amount, -181.0));
        assert!(approx(result.subtotal, 1629.0));
        assert_eq!(result.keys().last(), Some(&LineItemKey::Discount));
    }

    #[test]
    fn test_engine_uses_injected_card() {
        let mut config = PricingConfig::standard();
        config.base_per_m3.standard = 100.0;
        config.default_waste_factor_percent = 0.0;
        config.default_tax_percent = 0.0;
        config.strength_upcharge_per_m3.clear();

        let engine = QuoteEngine::new(config);
        let result = engine
            .calculate(&QuoteInput::new(3.0, ConcreteType::Standard))
            .unwrap();
        assert_eq!(result.keys(), vec![LineItemKey::Base]);
        assert_eq!(result.total, 300.0);
        assert_eq!(result.cost_per_m3, 100.0);
        assert_eq!(engine.config().base_per_m3.standard, 100.0);
    }
}
