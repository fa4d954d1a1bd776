//! OpenSASE Storefront
//!
//! Client-side query and listing state for the OpenSASE storefront and
//! back-office screens.
//!
//! ## Features
//! - Canonical listing query strings
//! - Page-number controls with ellipsis collapsing
//! - Product list store with replace and infinite-scroll fetch modes
//! - Order tracking timeline
//! - Price range slider, banner carousel and row action descriptors
//! - Client-side cart with sale pricing

pub mod api;
pub mod config;
pub mod controls;
pub mod domain;
pub mod pagination;
pub mod query;
pub mod store;

pub use api::{CredentialProvider, HttpCatalog, NoCredentials, ProductCatalog, StaticToken};
pub use config::StorefrontConfig;
pub use domain::aggregates::{
    derive_steps, derive_steps_now, Cart, CartLine, OrderStatus, OrderTracking, ProductPage,
    ProductSummary, TrackingStep, Variant,
};
pub use domain::events::StoreEvent;
pub use domain::value_objects::{Discount, Money, PageNumber, PageSize, PriceRange};
pub use pagination::{render_page_list, PageItem, PaginationMeta};
pub use query::{build_query, QueryParams, QueryValue};
pub use store::{FetchOutcome, FilterKey, FilterState, FilterValue, ListDisplay, ListStatus, ProductListStore};

use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid price range: {0}")]
    InvalidPriceRange(String),

    #[error("Cart line not found")]
    CartLineNotFound,

    #[error("Currency mismatch: {0} vs {1}")]
    CurrencyMismatch(String, String),
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
