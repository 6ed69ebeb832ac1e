//! # Query Parameters
//!
//! Maps calculator state to and from URL query pairs, so a quote can be
//! shared as a link or handed to the quote-request form.
//!
//! Percent-encoding is the caller's job; this module works on decoded
//! `(key, value)` pairs.
//!
//! ## Parsing Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Start from calculator_defaults(), then for each recognised key:       │
//! │                                                                         │
//! │  numbers       parse as f64; unparseable → keep the default            │
//! │  booleans      exactly "true" → true, anything else → false            │
//! │  concreteType  exact tag; unknown → keep the default mix               │
//! │  unknown keys  ignored                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::config::PricingConfig;
use crate::types::{ConcreteType, QuoteInput, QuoteResult};
use crate::DEFAULT_STRENGTH_MPA;

/// Calculator starting point.
const DEFAULT_VOLUME_M3: f64 = 20.0;
const DEFAULT_DELIVERY_KM: f64 = 10.0;
const DEFAULT_PUMP_HOURS: f64 = 4.0;

// =============================================================================
// Defaults
// =============================================================================

/// The input the calculator shows before the visitor touches anything.
///
/// Every optional field is filled so the result is also a complete share
/// link.
pub fn calculator_defaults(config: &PricingConfig) -> QuoteInput {
    QuoteInput {
        volume_m3: DEFAULT_VOLUME_M3,
        concrete_type: ConcreteType::Standard,
        strength_mpa: Some(f64::from(DEFAULT_STRENGTH_MPA)),
        delivery_distance_km: Some(DEFAULT_DELIVERY_KM),
        needs_pump: Some(false),
        pump_hours: Some(DEFAULT_PUMP_HOURS),
        has_fiber: Some(false),
        has_accelerator: Some(false),
        night_pour: Some(false),
        waste_factor_percent: Some(config.default_waste_factor_percent),
        discount_percent: Some(0.0),
        tax_percent: Some(config.default_tax_percent),
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// Builds an input from query pairs on top of [`calculator_defaults`].
///
/// ## Example
/// ```rust
/// use pourquote_core::params::input_from_query_pairs;
/// use pourquote_core::{ConcreteType, PricingConfig};
///
/// let pairs = [("volumeM3", "35"), ("concreteType", "Fiber"), ("needsPump", "true")];
/// let input = input_from_query_pairs(pairs, &PricingConfig::standard());
///
/// assert_eq!(input.volume_m3, 35.0);
/// assert_eq!(input.concrete_type, ConcreteType::Fiber);
/// assert_eq!(input.needs_pump, Some(true));
/// assert_eq!(input.pump_hours, Some(4.0));
/// ```
pub fn input_from_query_pairs<'a, I>(pairs: I, config: &PricingConfig) -> QuoteInput
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut input = calculator_defaults(config);

    for (key, value) in pairs {
        match key {
            "volumeM3" => {
                if let Some(v) = parse_number(value) {
                    input.volume_m3 = v;
                }
            }
            "concreteType" => {
                if let Ok(concrete_type) = value.parse() {
                    input.concrete_type = concrete_type;
                }
            }
            "strengthMPa" => set_number(&mut input.strength_mpa, value),
            "deliveryDistanceKm" => set_number(&mut input.delivery_distance_km, value),
            "needsPump" => input.needs_pump = Some(parse_flag(value)),
            "pumpHours" => set_number(&mut input.pump_hours, value),
            "hasFiber" => input.has_fiber = Some(parse_flag(value)),
            "hasAccelerator" => input.has_accelerator = Some(parse_flag(value)),
            "nightPour" => input.night_pour = Some(parse_flag(value)),
            "wasteFactorPercent" => set_number(&mut input.waste_factor_percent, value),
            "discountPercent" => set_number(&mut input.discount_percent, value),
            "taxPercent" => set_number(&mut input.tax_percent, value),
            _ => {}
        }
    }

    input
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse().ok()
}

fn parse_flag(value: &str) -> bool {
    value == "true"
}

fn set_number(slot: &mut Option<f64>, value: &str) {
    if let Some(v) = parse_number(value) {
        *slot = Some(v);
    }
}

// =============================================================================
// Encoding
// =============================================================================

/// Encodes an input as query pairs (share link). `None` fields are omitted.
pub fn input_to_query_pairs(input: &QuoteInput) -> Vec<(&'static str, String)> {
    let mut pairs = vec![
        ("volumeM3", input.volume_m3.to_string()),
        ("concreteType", input.concrete_type.to_string()),
    ];

    let numbers = [
        ("strengthMPa", input.strength_mpa),
        ("deliveryDistanceKm", input.delivery_distance_km),
    ];
    pairs.extend(numbers.into_iter().filter_map(|(k, v)| v.map(|v| (k, v.to_string()))));

    if let Some(needs_pump) = input.needs_pump {
        pairs.push(("needsPump", needs_pump.to_string()));
    }
    if let Some(pump_hours) = input.pump_hours {
        pairs.push(("pumpHours", pump_hours.to_string()));
    }

    let flags = [
        ("hasFiber", input.has_fiber),
        ("hasAccelerator", input.has_accelerator),
        ("nightPour", input.night_pour),
    ];
    pairs.extend(flags.into_iter().filter_map(|(k, v)| v.map(|v| (k, v.to_string()))));

    let percents = [
        ("wasteFactorPercent", input.waste_factor_percent),
        ("discountPercent", input.discount_percent),
        ("taxPercent", input.tax_percent),
    ];
    pairs.extend(percents.into_iter().filter_map(|(k, v)| v.map(|v| (k, v.to_string()))));

    pairs
}

/// Query pairs for the hand-off from the calculator to the quote-request
/// form, with the quote summary as the form's notes.
pub fn quote_request_pairs(input: &QuoteInput, result: &QuoteResult) -> Vec<(&'static str, String)> {
    vec![
        ("volumeM3", input.volume_m3.to_string()),
        ("concreteType", input.concrete_type.to_string()),
        (
            "strengthMPa",
            input
                .strength_mpa
                .unwrap_or(f64::from(DEFAULT_STRENGTH_MPA))
                .to_string(),
        ),
        ("hasFiber", input.has_fiber.unwrap_or(false).to_string()),
        ("hasAccelerator", input.has_accelerator.unwrap_or(false).to_string()),
        ("nightPour", input.night_pour.unwrap_or(false).to_string()),
        ("notes", result.summary_note()),
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::calculate_quote;

    #[test]
    fn test_defaults_follow_rate_card() {
        let mut config = PricingConfig::standard();
        config.default_tax_percent = 7.25;
        let input = calculator_defaults(&config);
        assert_eq!(input.volume_m3, 20.0);
        assert_eq!(input.strength_mpa, Some(250.0));
        assert_eq!(input.delivery_distance_km, Some(10.0));
        assert_eq!(input.waste_factor_percent, Some(5.0));
        assert_eq!(input.tax_percent, Some(7.25));
    }

    #[test]
    fn test_empty_query_gives_defaults() {
        let config = PricingConfig::standard();
        let input = input_from_query_pairs(std::iter::empty(), &config);
        assert_eq!(input, calculator_defaults(&config));
    }

    #[test]
    fn test_bad_values_keep_defaults() {
        let config = PricingConfig::standard();
        let pairs = [
            ("volumeM3", "lots"),
            ("concreteType", "Granite"),
            ("taxPercent", ""),
            ("utm_source", "newsletter"),
        ];
        let input = input_from_query_pairs(pairs, &config);
        assert_eq!(input, calculator_defaults(&config));
    }

    #[test]
    fn test_flags_are_exactly_true() {
        let config = PricingConfig::standard();
        let input = input_from_query_pairs(
            [("hasFiber", "true"), ("nightPour", "1"), ("hasAccelerator", "TRUE")],
            &config,
        );
        assert_eq!(input.has_fiber, Some(true));
        assert_eq!(input.night_pour, Some(false));
        assert_eq!(input.has_accelerator, Some(false));
    }

    #[test]
    fn test_share_link_round_trip() {
        let config = PricingConfig::standard();
        let mut shared = calculator_defaults(&config);
        shared.volume_m3 = 42.5;
        shared.concrete_type = ConcreteType::SelfLeveling;
        shared.needs_pump = Some(true);
        shared.discount_percent = Some(12.0);

        let pairs = input_to_query_pairs(&shared);
        assert_eq!(pairs[0], ("volumeM3", "42.5".to_string()));
        assert!(pairs.contains(&("taxPercent", "9.5".to_string())));

        let decoded = input_from_query_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())), &config);
        assert_eq!(decoded, shared);
    }

    #[test]
    fn test_share_link_omits_unset_fields() {
        let pairs = input_to_query_pairs(&QuoteInput::new(5.0, ConcreteType::Fiber));
        assert_eq!(
            pairs,
            vec![
                ("volumeM3", "5".to_string()),
                ("concreteType", "Fiber".to_string()),
            ]
        );
    }

    #[test]
    fn test_quote_request_pairs_carry_summary() {
        let config = PricingConfig::standard();
        let input = QuoteInput::new(10.0, ConcreteType::Standard);
        let result = calculate_quote(&config, &input).unwrap();

        let pairs = quote_request_pairs(&input, &result);
        assert_eq!(pairs[2], ("strengthMPa", "250".to_string()));
        assert_eq!(pairs[3], ("hasFiber", "false".to_string()));
        assert_eq!(
            pairs.last(),
            Some(&(
                "notes",
                "Calculator estimate: $1981.95 total, $188.76/m³".to_string()
            ))
        );
    }
}
