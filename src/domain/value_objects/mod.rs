//! Value Objects for the storefront

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Result, StorefrontError};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Money value object
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money { amount: Decimal, currency: String }

impl Money {
    pub fn new(amount: Decimal, currency: &str) -> Self { Self { amount, currency: currency.to_uppercase() } }
    pub fn zero(currency: &str) -> Self { Self::new(Decimal::ZERO, currency) }
    pub fn amount(&self) -> Decimal { self.amount }
    pub fn currency(&self) -> &str { &self.currency }

    pub fn add(&self, other: &Money) -> Result<Money> {
        if self.currency != other.currency {
            return Err(StorefrontError::CurrencyMismatch(self.currency.clone(), other.currency.clone()));
        }
        Ok(Money::new(self.amount + other.amount, &self.currency))
    }

    pub fn multiply(&self, qty: u32) -> Money { Money::new(self.amount * Decimal::from(qty), &self.currency) }

    /// Price after `discount`, rounded to cents.
    pub fn discounted(&self, discount: Discount) -> Money { Money::new(discount.apply(self.amount), &self.currency) }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{} {:.2}", self.currency, self.amount) }
}

/// Percentage discount, always within 0..=100.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Decimal", into = "Decimal")]
pub struct Discount(Decimal);

impl Discount {
    pub const NONE: Discount = Discount(Decimal::ZERO);

    pub fn percent(value: Decimal) -> Self { Self(value.clamp(Decimal::ZERO, HUNDRED)) }
    pub fn value(&self) -> Decimal { self.0 }
    pub fn is_zero(&self) -> bool { self.0.is_zero() }

    pub fn apply(&self, price: Decimal) -> Decimal {
        (price * (HUNDRED - self.0) / HUNDRED).round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
    }
}

impl From<Decimal> for Discount {
    fn from(value: Decimal) -> Self { Self::percent(value) }
}

impl From<Discount> for Decimal {
    fn from(value: Discount) -> Self { value.0 }
}

/// 1-based page number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PageNumber(u32);

impl PageNumber {
    pub const FIRST: PageNumber = PageNumber(1);

    /// Zero clamps to the first page.
    pub fn new(value: u32) -> Self { Self(value.max(1)) }
    pub fn get(&self) -> u32 { self.0 }
    pub fn next(&self) -> Self { Self(self.0.saturating_add(1)) }
}

impl Default for PageNumber { fn default() -> Self { Self::FIRST } }

/// Items per page, never zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageSize(u32);

impl PageSize {
    pub const DEFAULT: PageSize = PageSize(12);

    pub fn new(value: u32) -> Self { Self(value.max(1)) }
    pub fn get(&self) -> u32 { self.0 }
}

impl Default for PageSize { fn default() -> Self { Self::DEFAULT } }

/// Selected `[min, max]` price bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    pub fn new(min: Decimal, max: Decimal) -> Self { Self { min, max } }
}
