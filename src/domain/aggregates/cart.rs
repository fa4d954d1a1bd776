//! Client-side cart

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::aggregates::{ProductSummary, Variant};
use crate::domain::value_objects::{Discount, Money};
use crate::{Result, StorefrontError};

#[derive(Clone, Debug)]
pub struct Cart {
    id: String,
    lines: Vec<CartLine>,
    subtotal: Money,
    currency: String,
    updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CartLine {
    pub product_id: String,
    pub variant: Option<Variant>,
    pub title: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub discount: Discount,
}

impl CartLine {
    pub fn from_product(product: &ProductSummary, variant: Option<Variant>, quantity: u32, currency: &str) -> Self {
        Self {
            product_id: product.id.clone(), variant, title: product.title.clone(), quantity,
            unit_price: product.price_in(currency), discount: product.discount,
        }
    }

    pub fn line_total(&self) -> Money { self.unit_price.discounted(self.discount).multiply(self.quantity) }

    fn same_item(&self, product_id: &str, variant: Option<&Variant>) -> bool {
        self.product_id == product_id && self.variant.as_ref() == variant
    }
}

impl Cart {
    pub fn new(currency: &str) -> Self {
        let currency = currency.to_uppercase();
        Self {
            id: Uuid::new_v4().to_string(), lines: vec![], subtotal: Money::zero(&currency),
            currency, updated_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn lines(&self) -> &[CartLine] { &self.lines }
    pub fn subtotal(&self) -> &Money { &self.subtotal }
    pub fn updated_at(&self) -> DateTime<Utc> { self.updated_at }
    pub fn item_count(&self) -> u32 { self.lines.iter().fold(0u32, |acc, l| acc.saturating_add(l.quantity)) }
    pub fn is_empty(&self) -> bool { self.lines.is_empty() }

    /// Adds a line, merging with an existing one for the same product and variant.
    pub fn add(&mut self, line: CartLine) -> Result<()> {
        if line.unit_price.currency() != self.currency {
            return Err(StorefrontError::CurrencyMismatch(self.currency.clone(), line.unit_price.currency().to_string()));
        }
        if line.quantity == 0 { return Ok(()); }
        match self.lines.iter_mut().find(|l| l.same_item(&line.product_id, line.variant.as_ref())) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
            None => self.lines.push(line),
        }
        self.recalculate()
    }

    /// Zero removes the line.
    pub fn set_quantity(&mut self, product_id: &str, variant: Option<&Variant>, quantity: u32) -> Result<()> {
        let line = self.lines.iter_mut().find(|l| l.same_item(product_id, variant)).ok_or(StorefrontError::CartLineNotFound)?;
        if quantity == 0 {
            self.lines.retain(|l| !l.same_item(product_id, variant));
        } else {
            line.quantity = quantity;
        }
        self.recalculate()
    }

    pub fn remove(&mut self, product_id: &str, variant: Option<&Variant>) -> Result<()> {
        let before = self.lines.len();
        self.lines.retain(|l| !l.same_item(product_id, variant));
        if self.lines.len() == before { return Err(StorefrontError::CartLineNotFound); }
        self.recalculate()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.subtotal = Money::zero(&self.currency);
        self.updated_at = Utc::now();
    }

    fn recalculate(&mut self) -> Result<()> {
        let mut subtotal = Money::zero(&self.currency);
        for line in &self.lines {
            subtotal = subtotal.add(&line.line_total())?;
        }
        self.subtotal = subtotal;
        self.updated_at = Utc::now();
        Ok(())
    }
}
