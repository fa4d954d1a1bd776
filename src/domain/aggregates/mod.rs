//! Aggregates module
pub mod cart;
pub mod order;
pub mod product;

pub use cart::{Cart, CartLine};
pub use order::{derive_steps, derive_steps_now, OrderStatus, OrderTracking, TrackingStep};
pub use product::{ProductPage, ProductSummary, Variant};
