//! Dual-handle price slider.

use rust_decimal::Decimal;

use crate::domain::value_objects::PriceRange;
use crate::{Result, StorefrontError};

/// Two handles within `[min, max]`, always at least `step` apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceSlider {
    min: Decimal,
    max: Decimal,
    step: Decimal,
    lower: Decimal,
    upper: Decimal,
}

impl PriceSlider {
    pub fn new(min: Decimal, max: Decimal, step: Decimal) -> Result<Self> {
        if step <= Decimal::ZERO {
            return Err(StorefrontError::InvalidPriceRange(format!("step must be positive, got {step}")));
        }
        if max - min < step {
            return Err(StorefrontError::InvalidPriceRange(format!("[{min}, {max}] is narrower than step {step}")));
        }
        Ok(Self { min, max, step, lower: min, upper: max })
    }

    pub fn lower(&self) -> Decimal { self.lower }
    pub fn upper(&self) -> Decimal { self.upper }
    pub fn step(&self) -> Decimal { self.step }
    pub fn bounds(&self) -> PriceRange { PriceRange::new(self.min, self.max) }
    pub fn selection(&self) -> PriceRange { PriceRange::new(self.lower, self.upper) }

    /// True when both handles sit on the outer bounds.
    pub fn is_full_range(&self) -> bool { self.lower == self.min && self.upper == self.max }

    pub fn move_lower(&mut self, value: Decimal) -> PriceRange {
        self.lower = value.clamp(self.min, self.upper - self.step);
        self.selection()
    }

    pub fn move_upper(&mut self, value: Decimal) -> PriceRange {
        self.upper = value.clamp(self.lower + self.step, self.max);
        self.selection()
    }

    /// Restores a previously selected range, e.g. from filter state.
    pub fn select(&mut self, range: PriceRange) -> PriceRange {
        self.upper = range.max.clamp(self.min + self.step, self.max);
        self.lower = range.min.clamp(self.min, self.upper - self.step);
        self.selection()
    }

    pub fn reset(&mut self) -> PriceRange {
        self.lower = self.min;
        self.upper = self.max;
        self.selection()
    }
}
