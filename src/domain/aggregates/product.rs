//! Product listing projections

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Discount, Money};

/// Read-only product projection returned by the listing endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(alias = "name")]
    pub title: String,
    pub price: Decimal,
    #[serde(default)]
    pub discount: Discount,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variant {
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
}

impl ProductSummary {
    pub fn is_on_sale(&self) -> bool { !self.discount.is_zero() }
    pub fn sale_price(&self) -> Decimal { self.discount.apply(self.price) }
    pub fn price_in(&self, currency: &str) -> Money { Money::new(self.price, currency) }
    pub fn primary_image(&self) -> Option<&str> { self.images.first().map(String::as_str) }

    /// Distinct colors in variant order.
    pub fn colors(&self) -> Vec<&str> {
        let mut colors: Vec<&str> = Vec::new();
        for color in self.variants.iter().filter_map(|v| v.color.as_deref()) {
            if !colors.contains(&color) { colors.push(color); }
        }
        colors
    }

    pub fn has_variant(&self, color: &str, size: &str) -> bool {
        self.variants.iter().any(|v| v.color.as_deref() == Some(color) && v.size.as_deref() == Some(size))
    }
}

/// One page of the listing response: `{ products, total, pages }`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    #[serde(default)]
    pub products: Vec<ProductSummary>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pages: u32,
}
