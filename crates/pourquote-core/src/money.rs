//! # Money Module
//!
//! Final rounding and currency display for quotes.
//!
//! ## Where Rounding Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ROUND ONCE, AT THE END                                                 │
//! │                                                                         │
//! │  Line items, subtotal, tax      full f64 precision (never rounded)      │
//! │             │                                                           │
//! │             ▼                                                           │
//! │  total, cost per m³             round2() → 2 decimal places             │
//! │             │                                                           │
//! │             ▼                                                           │
//! │  Display                        Money (integer cents) → "$1,234.56"     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pourquote_core::money::{round2, Money};
//!
//! assert_eq!(round2(49_219.428_75), 49_219.43);
//! assert_eq!(Money::from_amount(49_219.428_75).to_string(), "$49,219.43");
//! ```

use std::fmt;

// =============================================================================
// Rounding
// =============================================================================

/// Rounds to 2 decimal places, half up, with an epsilon bias.
///
/// The `f64::EPSILON` nudge pushes values such as `x.xx4999999…` that are
/// really `x.xx5` in decimal over the half-way mark before scaling. Halves
/// go toward positive infinity (`-0.125` → `-0.12`).
///
/// ## Example
/// ```rust
/// use pourquote_core::money::round2;
///
/// assert_eq!(round2(0.125), 0.13);
/// assert_eq!(round2(12.0), 12.0);
/// ```
pub fn round2(value: f64) -> f64 {
    round_half_up((value + f64::EPSILON) * 100.0) / 100.0
}

/// Nearest integer, halves up. Compares the exact fractional part instead of
/// adding 0.5, which can itself round up to the next integer.
fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// A display amount in cents, produced from an already-computed quote value.
///
/// The engine keeps working in `f64`; `Money` is only for printed breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from a currency amount, rounding with [`round2`].
    ///
    /// ## Example
    /// ```rust
    /// use pourquote_core::money::Money;
    ///
    /// assert_eq!(Money::from_amount(188.757).cents(), 18876);
    /// assert_eq!(Money::from_amount(-2365.75).cents(), -236575);
    /// ```
    pub fn from_amount(amount: f64) -> Self {
        Money((round2(amount) * 100.0).round() as i64)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$1,234.56`, with a leading `-` for negative amounts.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.dollars().unsigned_abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        write!(f, "{}${}.{:02}", sign, grouped, self.cents_part())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
