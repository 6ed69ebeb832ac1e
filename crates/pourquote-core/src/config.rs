//! # Pricing Configuration
//!
//! The rate card every quote is priced against.
//!
//! ## Rate Card Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PricingConfig (read-only, injected into the engine)                    │
//! │                                                                         │
//! │  basePerM3               Standard / HighStrength / Fiber / SelfLeveling │
//! │  strengthUpchargePerM3   {200: 0, 250: 10, 300: 20, 350: 35, 400: 55}   │
//! │  delivery                base + per km                                  │
//! │  pump                    mobilization + per hour                        │
//! │  add-ons (per m³)        fiber, accelerator, night pour                 │
//! │  defaults                waste %, tax %                                 │
//! │  guard rail              max discount %                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Changing prices means shipping a new rate card (a new
//! [`PricingConfig::standard`] or a JSON document loaded by the caller);
//! nothing mutates a rate card at runtime.
//!
//! ## JSON Format
//! ```json
//! {
//!   "basePerM3": { "Standard": 155, "HighStrength": 195, "Fiber": 175, "SelfLeveling": 215 },
//!   "strengthUpchargePerM3": { "200": 0, "250": 10, "300": 20, "350": 35, "400": 55 },
//!   "deliveryBase": 95, "deliveryPerKm": 2.8,
//!   "pumpMobilization": 450, "pumpPerHour": 185,
//!   "fiberAdditivePerM3": 12, "acceleratorPerM3": 8, "nightPourSurchargePerM3": 18,
//!   "defaultWasteFactorPercent": 5, "defaultTaxPercent": 9.5, "maxDiscountPercent": 25
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::error::{ConfigError, ValidationResult};
use crate::types::{nearest_grade, ConcreteType};
use crate::validation::{validate_percent, validate_rate};
use crate::DEFAULT_STRENGTH_MPA;

// =============================================================================
// Base Rates
// =============================================================================

/// Base price per m³ for each mix type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export)]
pub struct BaseRates {
    pub standard: f64,
    pub high_strength: f64,
    pub fiber: f64,
    pub self_leveling: f64,
}

impl BaseRates {
    /// Rate for one mix type.
    pub fn rate(&self, concrete_type: ConcreteType) -> f64 {
        match concrete_type {
            ConcreteType::Standard => self.standard,
            ConcreteType::HighStrength => self.high_strength,
            ConcreteType::Fiber => self.fiber,
            ConcreteType::SelfLeveling => self.self_leveling,
        }
    }
}

// =============================================================================
// Pricing Config
// =============================================================================

/// The full rate card. All amounts are in USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PricingConfig {
    pub base_per_m3: BaseRates,

    /// Surcharge per m³ keyed by strength grade (MPa scale).
    pub strength_upcharge_per_m3: BTreeMap<u32, f64>,

    /// Flat trip fee.
    pub delivery_base: f64,
    pub delivery_per_km: f64,

    /// One-time pump setup fee.
    pub pump_mobilization: f64,
    pub pump_per_hour: f64,

    pub fiber_additive_per_m3: f64,
    pub accelerator_per_m3: f64,
    pub night_pour_surcharge_per_m3: f64,

    pub default_waste_factor_percent: f64,
    pub default_tax_percent: f64,

    /// Hard ceiling for any requested discount.
    pub max_discount_percent: f64,
}

impl PricingConfig {
    /// The published rate card.
    pub fn standard() -> Self {
        PricingConfig {
            base_per_m3: BaseRates {
                standard: 155.0,
                high_strength: 195.0, // ≥ 5000 PSI
                fiber: 175.0,
                self_leveling: 215.0, // SCC
            },
            strength_upcharge_per_m3: BTreeMap::from([
                (200, 0.0),
                (250, 10.0),
                (300, 20.0),
                (350, 35.0),
                (400, 55.0),
            ]),
            delivery_base: 95.0,
            delivery_per_km: 2.8,
            pump_mobilization: 450.0,
            pump_per_hour: 185.0,
            fiber_additive_per_m3: 12.0,
            accelerator_per_m3: 8.0,
            night_pour_surcharge_per_m3: 18.0,
            default_waste_factor_percent: 5.0,
            default_tax_percent: 9.5, // sales tax on materials
            max_discount_percent: 25.0,
        }
    }

    /// Parses a rate card from JSON and validates it.
    ///
    /// ## Example
    /// ```rust
    /// use pourquote_core::PricingConfig;
    ///
    /// let json = serde_json::to_string(&PricingConfig::standard()).unwrap();
    /// let loaded = PricingConfig::from_json_str(&json).unwrap();
    /// assert_eq!(loaded, PricingConfig::standard());
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: PricingConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every rate is finite and non-negative and the discount ceiling
    /// is a real percentage.
    pub fn validate(&self) -> ValidationResult<()> {
        for concrete_type in ConcreteType::ALL {
            validate_rate(
                &format!("basePerM3.{}", concrete_type),
                self.base_per_m3.rate(concrete_type),
            )?;
        }

        for (grade, rate) in &self.strength_upcharge_per_m3 {
            validate_rate(&format!("strengthUpchargePerM3.{}", grade), *rate)?;
        }

        validate_rate("deliveryBase", self.delivery_base)?;
        validate_rate("deliveryPerKm", self.delivery_per_km)?;
        validate_rate("pumpMobilization", self.pump_mobilization)?;
        validate_rate("pumpPerHour", self.pump_per_hour)?;
        validate_rate("fiberAdditivePerM3", self.fiber_additive_per_m3)?;
        validate_rate("acceleratorPerM3", self.accelerator_per_m3)?;
        validate_rate("nightPourSurchargePerM3", self.night_pour_surcharge_per_m3)?;
        validate_rate("defaultWasteFactorPercent", self.default_waste_factor_percent)?;
        validate_rate("defaultTaxPercent", self.default_tax_percent)?;
        validate_percent("maxDiscountPercent", self.max_discount_percent)?;

        Ok(())
    }

    /// Resolves a requested strength to a grade on this rate card.
    ///
    /// ## Resolution Rules
    /// ```text
    /// None / 0 / NaN         → 250 (DEFAULT_STRENGTH_MPA)
    /// anything else          → nearest key, ties → smaller key
    /// empty upcharge table   → 250
    /// ```
    pub fn resolve_strength_grade(&self, strength_mpa: Option<f64>) -> u32 {
        match strength_mpa {
            Some(mpa) if mpa != 0.0 && !mpa.is_nan() => {
                nearest_grade(self.strength_upcharge_per_m3.keys().copied(), mpa)
                    .unwrap_or(DEFAULT_STRENGTH_MPA)
            }
            _ => DEFAULT_STRENGTH_MPA,
        }
    }

    /// Upcharge per m³ for a grade; 0 when the grade is not on the card.
    pub fn strength_upcharge(&self, grade: u32) -> f64 {
        self.strength_upcharge_per_m3
            .get(&grade)
            .copied()
            .unwrap_or(0.0)
    }

    /// Clamps a requested discount into `[0, max_discount_percent]`.
    ///
    /// NaN clamps to 0.
    pub fn clamp_discount(&self, discount_percent: f64) -> f64 {
        discount_percent.max(0.0).min(self.max_discount_percent)
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig::standard()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
