//! Prices in Bulgarian lev and their euro equivalents.
//!
//! Prices are stored in BGN. The euro figure is derived with the fixed
//! currency-board rate and rounded to whole cents.

use serde::{Deserialize, Serialize};

/// Fixed conversion rate: one euro buys this many lev.
pub const BGN_PER_EUR: f64 = 1.95583;

/// Round a monetary amount to two decimal places.
///
/// # Examples
/// ```
/// use storefront::domain::round_to_cents;
///
/// assert_eq!(round_to_cents(12.345_6), 12.35);
/// ```
#[must_use]
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Why a raw number cannot become a [`Price`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PriceError {
    #[error("price must be a finite number")]
    NotFinite,
    #[error("price must not be negative")]
    Negative,
}

/// Non-negative, finite amount in BGN.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    pub const ZERO: Self = Self(0.0);

    /// Validate a raw BGN amount.
    ///
    /// # Examples
    /// ```
    /// use storefront::domain::Price;
    ///
    /// let price = Price::new(195.583).expect("valid price");
    /// assert_eq!(price.eur(), 100.0);
    /// assert!(Price::new(-1.0).is_err());
    /// ```
    pub fn new(bgn: f64) -> Result<Self, PriceError> {
        if !bgn.is_finite() {
            return Err(PriceError::NotFinite);
        }
        if bgn < 0.0 {
            return Err(PriceError::Negative);
        }
        Ok(Self(bgn))
    }

    #[must_use]
    pub const fn bgn(self) -> f64 {
        self.0
    }

    /// Euro equivalent rounded to cents.
    #[must_use]
    pub fn eur(self) -> f64 {
        round_to_cents(self.0 / BGN_PER_EUR)
    }
}

impl TryFrom<f64> for Price {
    type Error = PriceError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for f64 {
    fn from(value: Price) -> Self {
        value.0
    }
}
