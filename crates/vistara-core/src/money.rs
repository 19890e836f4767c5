//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹0.10 + ₹0.20 = 10 + 20 paise = 30 paise                            │
//! │    GST is computed in basis points on paise, rounded once              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vistara_core::money::Money;
//!
//! let camera = Money::parse_major("100").unwrap();
//! let lens = Money::from_paise(5_000);
//! assert_eq!((camera + lens).to_string(), "₹150.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use thiserror::Error;
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in paise (1/100 of a rupee).
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic never has to special-case subtraction
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serialized as paise**: the form UI divides by 100 for display
///
/// ## Where Money Flows
/// ```text
/// LineItem.amount ──► Σ ──► Invoice.subtotal ──► GST ──► Invoice.total
///                                                           │
///                           PresentationRow.amount ◄────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ```rust
    /// use vistara_core::money::Money;
    ///
    /// let fee = Money::from_paise(1099); // ₹10.99
    /// assert_eq!(fee.paise(), 1099);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Parses a decimal amount written in rupees.
    ///
    /// ## Accepted Input
    /// - Optional sign, digits, optional `.` fraction, optional `e`/`E`
    ///   exponent (the form JSON may carry amounts like `1e3`)
    /// - Surrounding whitespace is ignored
    /// - Anything finer than a paisa is rounded half-up
    ///
    /// ```rust
    /// use vistara_core::money::Money;
    ///
    /// assert_eq!(Money::parse_major("99.5").unwrap().paise(), 9950);
    /// assert_eq!(Money::parse_major("12.05").unwrap().paise(), 1205);
    /// assert_eq!(Money::parse_major("12.345").unwrap().paise(), 1235);
    /// assert_eq!(Money::parse_major("1.5e3").unwrap().paise(), 150_000);
    /// assert!(Money::parse_major("abc").is_err());
    /// ```
    pub fn parse_major(text: &str) -> Result<Money, ParseMoneyError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ParseMoneyError::Empty);
        }

        let (negative, unsigned) = split_sign(text);
        let (mantissa, exponent) = match unsigned.find(|c: char| c == 'e' || c == 'E') {
            Some(at) => (&unsigned[..at], parse_exponent(&unsigned[at + 1..])?),
            None => (unsigned, 0),
        };

        let (whole, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(ParseMoneyError::NotANumber);
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(ParseMoneyError::NotANumber);
        }

        let joined = format!("{whole}{frac}");
        let digits = joined.trim_start_matches('0');
        // places the decimal point moves right to land on paise
        let shift = exponent
            .saturating_add(2)
            .saturating_sub(frac.len() as i64);

        let paise = if digits.is_empty() {
            0
        } else if shift >= 0 {
            if (digits.len() as i64).saturating_add(shift) > 19 {
                return Err(ParseMoneyError::Overflow);
            }
            let scaled: i64 = digits.parse().map_err(|_| ParseMoneyError::Overflow)?;
            scaled
                .checked_mul(10i64.pow(shift as u32))
                .ok_or(ParseMoneyError::Overflow)?
        } else {
            let dropped = usize::try_from(shift.unsigned_abs()).unwrap_or(usize::MAX);
            if dropped > digits.len() {
                0
            } else {
                let (kept, rest) = digits.split_at(digits.len() - dropped);
                let kept: i64 = if kept.is_empty() {
                    0
                } else {
                    kept.parse().map_err(|_| ParseMoneyError::Overflow)?
                };
                let round_up = rest.as_bytes()[0] >= b'5';
                kept.checked_add(i64::from(round_up))
                    .ok_or(ParseMoneyError::Overflow)?
            }
        };

        Ok(Money(if negative { -paise } else { paise }))
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax on this amount, rounded half-up to the nearest paisa.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`. The +5000 is the half
    /// in basis-point space.
    ///
    /// ```rust
    /// use vistara_core::money::Money;
    /// use vistara_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_rupees(150);
    /// let gst = subtotal.calculate_tax(TaxRate::from_bps(1800));
    /// assert_eq!(gst, Money::from_rupees(27));
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 so huge subtotals cannot overflow mid-calculation
        let tax = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_paise(tax as i64)
    }

    /// Amount without the currency symbol, e.g. `150.00`.
    ///
    /// Used where only ASCII can be drawn (the raster renderer).
    pub fn to_plain_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

fn split_sign(text: &str) -> (bool, &str) {
    match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    }
}

/// Exponent digits after `e`; magnitudes past i64 saturate.
fn parse_exponent(text: &str) -> Result<i64, ParseMoneyError> {
    let (negative, digits) = split_sign(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseMoneyError::NotANumber);
    }
    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Ok(if negative { -magnitude } else { magnitude })
}

// =============================================================================
// Parse Error
// =============================================================================

/// Why a decimal amount could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseMoneyError {
    #[error("amount is empty")]
    Empty,

    #[error("must be a number")]
    NotANumber,

    #[error("amount is too large")]
    Overflow,
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
