//! Widget state behind individual storefront controls.
pub mod actions;
pub mod carousel;
pub mod price_range;

pub use actions::{Capability, RowAction, RowActions};
pub use carousel::Carousel;
pub use price_range::PriceSlider;
