//! # Validation Module
//!
//! Field validation rules shared by the rate card and the quote-request form.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Rate card (PricingConfig::validate)                                   │
//! │  ├── every rate finite and >= 0                                        │
//! │  └── max discount within 0..=100                                       │
//! │                                                                         │
//! │  Quote request (QuoteRequest::validate_all)                            │
//! │  ├── contact fields present                                            │
//! │  ├── email shape                                                        │
//! │  └── desired volume > 0                                                 │
//! │                                                                         │
//! │  Quote engine: NOT here. The engine defaults and clamps instead of     │
//! │  rejecting, apart from non-positive volume.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pourquote_core::validation::{validate_email, validate_required};
//!
//! assert!(validate_required("name", "Dana").is_ok());
//! assert!(validate_email("dana@example.com").is_ok());
//! assert!(validate_email("dana@example").is_err());
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ValidationError, ValidationResult};

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a text field is not blank.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates an email address shape (`local@domain.tld`, no whitespace).
///
/// ## Rules
/// - Must not be blank
/// - Exactly the loose shape check the web form applies; deliverability is
///   not checked
pub fn validate_email(email: &str) -> ValidationResult<()> {
    validate_required("email", email)?;

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@example.com".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a strictly positive, finite quantity.
pub fn validate_positive(field: &str, value: f64) -> ValidationResult<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a rate-card amount: finite and zero or greater.
pub fn validate_rate(field: &str, value: f64) -> ValidationResult<()> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a percentage in `0..=100`.
pub fn validate_percent(field: &str, value: f64) -> ValidationResult<()> {
    if !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0.0,
            max: 100.0,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
