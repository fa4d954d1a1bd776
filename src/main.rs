//! OpenSASE Storefront - listing smoke check against a storefront API
//!
//! Usage: `opensase-storefront [key=value ...]` with listing query keys,
//! e.g. `opensase-storefront category=men sort=price page=2`.

use std::sync::Arc;

use anyhow::{bail, Result};
use opensase_storefront::pagination::{has_next, has_previous};
use opensase_storefront::{FilterKey, HttpCatalog, PageItem, PaginationMeta, ProductListStore, StorefrontConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer()).init();

    let config = StorefrontConfig::from_env()?;
    let catalog = Arc::new(HttpCatalog::from_config(&config)?);
    tracing::info!("🛍️ OpenSASE Storefront querying {}", catalog.base_url());
    let store = ProductListStore::new(catalog, config.page_size());

    for arg in std::env::args().skip(1) {
        let Some((key, value)) = arg.split_once('=') else { bail!("expected key=value, got {arg:?}") };
        let Some(filter) = FilterKey::from_query_key(key) else { bail!("unknown filter key {key:?}") };
        store.set_filter(filter, value);
    }

    store.fetch_products(false).await?;
    for product in store.products() {
        let price = if product.is_on_sale() {
            format!("{} (was {}, -{}%)", product.sale_price(), product.price, product.discount.value())
        } else {
            product.price.to_string()
        };
        tracing::info!(id = %product.id, "{} - {}", product.title, price);
    }
    match store.meta() {
        Some(meta) if meta.total > 0 => tracing::info!("{} products | {}", meta.total, page_control(&meta)),
        _ => tracing::info!("no records"),
    }
    Ok(())
}

fn page_control(meta: &PaginationMeta) -> String {
    let mut parts = vec![if has_previous(meta.current_page) { "‹".to_string() } else { " ".to_string() }];
    parts.extend(meta.items().into_iter().map(|item| match item {
        PageItem::Page(n) if n == meta.current_page => format!("[{n}]"),
        PageItem::Page(n) => n.to_string(),
        PageItem::StartEllipsis | PageItem::EndEllipsis => "…".to_string(),
    }));
    parts.push(if has_next(meta.current_page, meta.pages) { "›".to_string() } else { " ".to_string() });
    parts.join(" ")
}
