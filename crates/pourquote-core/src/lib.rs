//! # pourquote-core: Pure Pricing Logic for PourQuote
//!
//! This crate is the **heart** of the PourQuote estimator. It turns a
//! description of a concrete pour into an itemized, taxed quote, as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       PourQuote Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │        Web calculator / quote form / `pourquote` CLI            │   │
//! │  │    query params ──► QuoteInput      QuoteResult ──► breakdown   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ pourquote-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐   │   │
//! │  │   │  config  │  │  engine  │  │  bridge  │  │ params/request│  │   │
//! │  │   │ rate card│─►│ calculate│◄─│ free text│  │ query + form │   │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PERSISTENCE • NO NETWORK • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - The rate card (`PricingConfig`)
//! - [`engine`] - `calculate_quote` and the injectable `QuoteEngine`
//! - [`bridge`] - Free-text project fields → typed quote inputs
//! - [`params`] - Query-string mapping for calculator links
//! - [`request`] - Quote-request form model and validation
//! - [`types`] - Domain types (QuoteInput, LineItem, QuoteResult, ...)
//! - [`money`] - Final rounding and currency display
//! - [`validation`] - Field validation rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use pourquote_core::{calculate_quote, ConcreteType, LineItemKey, PricingConfig, QuoteInput};
//!
//! let config = PricingConfig::standard();
//! let input = QuoteInput::new(10.0, ConcreteType::Standard);
//!
//! let quote = calculate_quote(&config, &input).unwrap();
//! assert!(quote.has_item(LineItemKey::Base));
//! assert!(!quote.has_item(LineItemKey::Pump));
//! assert!(quote.total > 0.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bridge;
pub mod config;
pub mod engine;
pub mod error;
pub mod money;
pub mod params;
pub mod request;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use bridge::{infer_concrete_type, infer_strength_grade, ProjectRecord};
pub use config::{BaseRates, PricingConfig};
pub use engine::{calculate_quote, QuoteEngine};
pub use error::{ConfigError, EngineResult, QuoteError, ValidationError};
pub use money::{round2, Money};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Strength grade used when a quote does not name one.
pub const DEFAULT_STRENGTH_MPA: u32 = 250;

/// The discrete strength grades offered to customers, ascending.
///
/// The bridge snaps parsed project strengths onto this set; the engine snaps
/// onto whatever keys the injected rate card carries.
pub const STRENGTH_GRADES: [u32; 5] = [200, 250, 300, 350, 400];

/// Multiplier from pounds per square inch to the MPa grade scale.
pub const PSI_TO_MPA: f64 = 0.00689;
