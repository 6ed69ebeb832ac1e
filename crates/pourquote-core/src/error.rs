//! # Error Types
//!
//! Domain-specific error types for pourquote-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  QuoteError       - The engine's only failure (non-positive volume)    │
//! │  ValidationError  - Field rule failures (rate cards, quote requests)   │
//! │  ConfigError      - Loading a rate card from JSON                       │
//! │                                                                         │
//! │  Everything else the engine sees is defaulted or clamped, never an     │
//! │  error.                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending field or value in the message
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Quote Error
// =============================================================================

/// Errors returned by [`crate::engine::calculate_quote`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuoteError {
    /// Ordered volume is zero, negative, or not a finite number.
    ///
    /// ## User Workflow
    /// ```text
    /// Calculator: volume field cleared to 0
    ///      │
    ///      ▼
    /// calculate_quote → InvalidVolume { volume_m3: 0.0 }
    ///      │
    ///      ▼
    /// UI shows: "Enter a volume greater than 0"
    /// ```
    #[error("Volume must be greater than 0 m³ (got {volume_m3})")]
    InvalidVolume { volume_m3: f64 },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for rate-card sanity checks and for the quote-request form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Config Error
// =============================================================================

/// Errors raised while loading a rate card.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not a valid rate card shape.
    #[error("Invalid pricing document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but a rate breaks a rule.
    #[error("Invalid pricing value: {0}")]
    Invalid(#[from] ValidationError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for engine results.
pub type EngineResult<T> = Result<T, QuoteError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
