//! Product list store.
//!
//! Holds the listing filters, the fetched products and their pagination, and
//! drives the [`ProductCatalog`] collaborator. Every list request is tagged
//! with a sequence number; a response that arrives after a newer request was
//! issued is dropped, so the list always reflects the latest filters.
//!
//! State sits behind a mutex that is never held across an `.await`, so fetches
//! take `&self` and may overlap.

use std::sync::Arc;

use parking_lot::Mutex;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::api::ProductCatalog;
use crate::domain::aggregates::{ProductPage, ProductSummary};
use crate::domain::events::StoreEvent;
use crate::domain::value_objects::{PageNumber, PageSize, PriceRange};
use crate::pagination::{PageItem, PaginationMeta};
use crate::query::{build_query, QueryParams};
use crate::Result;

// =============================================================================
// Filters
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterState {
    pub category: Option<String>,
    pub gender: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub search_text: Option<String>,
    pub sort: Option<String>,
    pub page: PageNumber,
    pub limit: PageSize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterKey {
    Category,
    Gender,
    Size,
    Color,
    MinPrice,
    MaxPrice,
    SearchText,
    Sort,
    Page,
    Limit,
}

impl FilterKey {
    /// Canonical query order.
    pub const ALL: [FilterKey; 10] = [
        Self::Category, Self::Gender, Self::Size, Self::Color, Self::MinPrice,
        Self::MaxPrice, Self::SearchText, Self::Sort, Self::Page, Self::Limit,
    ];

    pub fn query_key(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Gender => "gender",
            Self::Size => "size",
            Self::Color => "color",
            Self::MinPrice => "minPrice",
            Self::MaxPrice => "maxPrice",
            Self::SearchText => "q",
            Self::Sort => "sort",
            Self::Page => "page",
            Self::Limit => "limit",
        }
    }

    pub fn from_query_key(key: &str) -> Option<Self> { Self::ALL.into_iter().find(|k| k.query_key() == key) }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FilterValue {
    Text(String),
    Amount(Decimal),
    Count(u32),
    Clear,
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self { Self::Text(value.to_string()) }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self { Self::Text(value) }
}

impl From<Decimal> for FilterValue {
    fn from(value: Decimal) -> Self { Self::Amount(value) }
}

impl From<u32> for FilterValue {
    fn from(value: u32) -> Self { Self::Count(value) }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self { value.map_or(Self::Clear, Into::into) }
}

impl FilterValue {
    fn into_text(self) -> Option<String> {
        match self {
            Self::Text(s) if s.trim().is_empty() => None,
            Self::Text(s) => Some(s),
            Self::Amount(d) => Some(d.normalize().to_string()),
            Self::Count(n) => Some(n.to_string()),
            Self::Clear => None,
        }
    }

    fn into_amount(self) -> Option<Decimal> {
        match self {
            Self::Text(s) => s.trim().parse().ok(),
            Self::Amount(d) => Some(d),
            Self::Count(n) => Some(Decimal::from(n)),
            Self::Clear => None,
        }
    }

    fn into_count(self) -> Option<u32> {
        match self {
            Self::Text(s) => s.trim().parse().ok(),
            Self::Amount(d) => u32::try_from(d.trunc()).ok(),
            Self::Count(n) => Some(n),
            Self::Clear => None,
        }
    }
}

impl FilterState {
    pub fn new(limit: PageSize) -> Self { Self { limit, ..Self::default() } }

    /// Sets one field. Unparseable page or limit values leave the field as is;
    /// `Clear` restores the defaults.
    pub fn apply(&mut self, key: FilterKey, value: FilterValue) {
        match key {
            FilterKey::Category => self.category = value.into_text(),
            FilterKey::Gender => self.gender = value.into_text(),
            FilterKey::Size => self.size = value.into_text(),
            FilterKey::Color => self.color = value.into_text(),
            FilterKey::SearchText => self.search_text = value.into_text(),
            FilterKey::Sort => self.sort = value.into_text(),
            FilterKey::MinPrice => self.min_price = value.into_amount(),
            FilterKey::MaxPrice => self.max_price = value.into_amount(),
            FilterKey::Page => match value {
                FilterValue::Clear => self.page = PageNumber::FIRST,
                other => match other.into_count() {
                    Some(n) => self.page = PageNumber::new(n),
                    None => warn!(key = key.query_key(), "ignoring unparseable filter value"),
                },
            },
            FilterKey::Limit => match value {
                FilterValue::Clear => self.limit = PageSize::DEFAULT,
                other => match other.into_count() {
                    Some(n) => self.limit = PageSize::new(n),
                    None => warn!(key = key.query_key(), "ignoring unparseable filter value"),
                },
            },
        }
    }

    pub fn set_price_range(&mut self, range: PriceRange) {
        self.min_price = Some(range.min);
        self.max_price = Some(range.max);
    }

    pub fn to_query_params(&self) -> QueryParams {
        QueryParams::new()
            .with(FilterKey::Category.query_key(), self.category.clone())
            .with(FilterKey::Gender.query_key(), self.gender.clone())
            .with(FilterKey::Size.query_key(), self.size.clone())
            .with(FilterKey::Color.query_key(), self.color.clone())
            .with(FilterKey::MinPrice.query_key(), self.min_price)
            .with(FilterKey::MaxPrice.query_key(), self.max_price)
            .with(FilterKey::SearchText.query_key(), self.search_text.clone())
            .with(FilterKey::Sort.query_key(), self.sort.clone())
            .with(FilterKey::Page.query_key(), self.page.get())
            .with(FilterKey::Limit.query_key(), self.limit.get())
    }

    pub fn to_query(&self) -> String { build_query(&self.to_query_params()) }
}

// =============================================================================
// Store
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Errored,
}

/// What a list screen should render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListDisplay {
    Loading,
    /// The last fetch failed and there is nothing older to show.
    Errored,
    Empty,
    Items(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied { received: usize },
    /// A newer request was issued before this one resolved.
    Discarded,
    /// Nothing left to load.
    Skipped,
}

#[derive(Debug, Default)]
struct ListState {
    filters: FilterState,
    status: ListStatus,
    products: Vec<ProductSummary>,
    meta: Option<PaginationMeta>,
    last_error: Option<String>,
    latest_sequence: u64,
    events: Vec<StoreEvent>,
}

#[derive(Debug, Default)]
struct DetailState {
    loading: bool,
    latest_sequence: u64,
    product: Option<ProductSummary>,
    last_error: Option<String>,
}

pub struct ProductListStore {
    catalog: Arc<dyn ProductCatalog>,
    list: Mutex<ListState>,
    detail: Mutex<DetailState>,
}

impl ProductListStore {
    pub fn new(catalog: Arc<dyn ProductCatalog>, page_size: PageSize) -> Self {
        let list = ListState { filters: FilterState::new(page_size), ..ListState::default() };
        Self { catalog, list: Mutex::new(list), detail: Mutex::new(DetailState::default()) }
    }

    pub fn status(&self) -> ListStatus { self.list.lock().status }
    pub fn filters(&self) -> FilterState { self.list.lock().filters.clone() }
    pub fn products(&self) -> Vec<ProductSummary> { self.list.lock().products.clone() }
    pub fn meta(&self) -> Option<PaginationMeta> { self.list.lock().meta }
    pub fn last_error(&self) -> Option<String> { self.list.lock().last_error.clone() }
    pub fn latest_sequence(&self) -> u64 { self.list.lock().latest_sequence }
    pub fn take_events(&self) -> Vec<StoreEvent> { std::mem::take(&mut self.list.lock().events) }

    pub fn page_items(&self) -> Vec<PageItem> { self.meta().map(|m| m.items()).unwrap_or_default() }

    pub fn list_display(&self) -> ListDisplay {
        let state = self.list.lock();
        match (state.status, state.products.len()) {
            (ListStatus::Loading, 0) => ListDisplay::Loading,
            (ListStatus::Errored, 0) => ListDisplay::Errored,
            (_, 0) => ListDisplay::Empty,
            (_, n) => ListDisplay::Items(n),
        }
    }

    /// Updates one filter. Does not fetch.
    pub fn set_filter(&self, key: FilterKey, value: impl Into<FilterValue>) {
        self.list.lock().filters.apply(key, value.into());
    }

    pub fn set_price_range(&self, range: PriceRange) { self.list.lock().filters.set_price_range(range); }

    /// Clears the products and returns to page 1. Any in-flight list request is
    /// superseded and its response will be dropped.
    pub fn reset_products(&self) {
        let mut state = self.list.lock();
        state.products.clear();
        state.meta = None;
        state.filters.page = PageNumber::FIRST;
        state.latest_sequence += 1;
        if state.status == ListStatus::Loading {
            state.status = ListStatus::Idle;
        }
        state.events.push(StoreEvent::ProductsReset);
    }

    /// Fetches the page the filters point at, replacing the products or, with
    /// `append`, adding to them. On failure the previous products stay.
    pub async fn fetch_products(&self, append: bool) -> Result<FetchOutcome> {
        let (sequence, query, page) = {
            let mut state = self.list.lock();
            state.latest_sequence += 1;
            state.status = ListStatus::Loading;
            let sequence = state.latest_sequence;
            let query = state.filters.to_query();
            state.events.push(StoreEvent::FetchStarted { sequence, query: query.clone(), append });
            (sequence, query, state.filters.page.get())
        };
        debug!(sequence, %query, append, "fetching products");

        let response = self.catalog.list_products(&query).await;

        let mut state = self.list.lock();
        if sequence != state.latest_sequence {
            let latest = state.latest_sequence;
            debug!(sequence, latest, "discarding stale product response");
            state.events.push(StoreEvent::StaleResponseDiscarded { sequence, latest });
            return Ok(FetchOutcome::Discarded);
        }
        match response {
            Ok(page_data) => Ok(Self::apply_page(&mut state, sequence, page, page_data, append)),
            Err(e) => {
                warn!(sequence, %query, error = %e, "product fetch failed");
                state.status = ListStatus::Errored;
                state.last_error = Some(e.to_string());
                state.events.push(StoreEvent::FetchFailed { sequence, message: e.to_string() });
                Err(e)
            }
        }
    }

    fn apply_page(state: &mut ListState, sequence: u64, page: u32, data: ProductPage, append: bool) -> FetchOutcome {
        let received = data.products.len();
        if append {
            state.products.extend(data.products);
        } else {
            state.products = data.products;
        }
        state.meta = Some(PaginationMeta::new(data.total, data.pages, page));
        state.status = ListStatus::Ready;
        state.last_error = None;
        state.events.push(StoreEvent::FetchSucceeded { sequence, received, total: data.total });
        info!(sequence, received, total = data.total, pages = data.pages, "products loaded");
        FetchOutcome::Applied { received }
    }

    /// Appends the page after the last loaded one. No-op once the last page is
    /// loaded or before anything was fetched.
    pub async fn load_more_products(&self) -> Result<FetchOutcome> {
        {
            let mut state = self.list.lock();
            let Some(meta) = state.meta.filter(PaginationMeta::has_more) else {
                debug!("no more products to load");
                return Ok(FetchOutcome::Skipped);
            };
            // From the last loaded page so a failed load-more retries the same page.
            state.filters.page = PageNumber::new(meta.current_page).next();
        }
        self.fetch_products(true).await
    }

    pub fn is_detail_loading(&self) -> bool { self.detail.lock().loading }
    pub fn selected_product(&self) -> Option<ProductSummary> { self.detail.lock().product.clone() }
    pub fn detail_error(&self) -> Option<String> { self.detail.lock().last_error.clone() }

    /// Loads a single product. Independent of the list state.
    ///
    /// Only the most recent request updates the selected product and the
    /// loading flag; older ones still return their result to the caller.
    pub async fn fetch_product_by_id(&self, id: &str) -> Result<ProductSummary> {
        let sequence = {
            let mut detail = self.detail.lock();
            detail.latest_sequence += 1;
            detail.loading = true;
            detail.latest_sequence
        };
        let result = self.catalog.get_product(id).await;
        let mut detail = self.detail.lock();
        if sequence != detail.latest_sequence {
            debug!(id, sequence, latest = detail.latest_sequence, "discarding stale product detail");
            return result;
        }
        detail.loading = false;
        match &result {
            Ok(product) => {
                detail.product = Some(product.clone());
                detail.last_error = None;
            }
            Err(e) => {
                warn!(id, error = %e, "product detail fetch failed");
                detail.last_error = Some(e.to_string());
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::PriceSlider;
    use crate::StorefrontError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tokio::sync::oneshot;

    enum Reply {
        Page(ProductPage),
        Fail(u16),
        Gated(oneshot::Receiver<ProductPage>),
    }

    #[derive(Default)]
    struct FakeCatalog {
        replies: Mutex<HashMap<String, Reply>>,
        calls: Mutex<Vec<String>>,
        detail_gates: Mutex<HashMap<String, oneshot::Receiver<ProductSummary>>>,
        detail_calls: Mutex<Vec<String>>,
    }

    impl FakeCatalog {
        fn reply(&self, query: &str, reply: Reply) { self.replies.lock().insert(query.to_string(), reply); }
        fn calls(&self) -> Vec<String> { self.calls.lock().clone() }
        fn gate_detail(&self, id: &str, rx: oneshot::Receiver<ProductSummary>) { self.detail_gates.lock().insert(id.to_string(), rx); }
        fn detail_calls(&self) -> usize { self.detail_calls.lock().len() }
    }

    #[async_trait]
    impl ProductCatalog for FakeCatalog {
        async fn list_products(&self, query: &str) -> Result<ProductPage> {
            self.calls.lock().push(query.to_string());
            let reply = self.replies.lock().remove(query);
            match reply {
                Some(Reply::Page(page)) => Ok(page),
                Some(Reply::Fail(status)) => Err(StorefrontError::Api { status, message: "boom".into() }),
                Some(Reply::Gated(rx)) => rx.await.map_err(|_| StorefrontError::Api { status: 499, message: "dropped".into() }),
                None => Err(StorefrontError::NotFound(query.to_string())),
            }
        }

        async fn get_product(&self, id: &str) -> Result<ProductSummary> {
            self.detail_calls.lock().push(id.to_string());
            let gate = self.detail_gates.lock().remove(id);
            if let Some(rx) = gate {
                return rx.await.map_err(|_| StorefrontError::NotFound(id.to_string()));
            }
            if id == "missing" {
                return Err(StorefrontError::NotFound(id.to_string()));
            }
            Ok(product(id))
        }
    }

    fn product(id: &str) -> ProductSummary {
        ProductSummary {
            id: id.into(), title: format!("Product {id}"), price: Decimal::new(25, 0),
            discount: Default::default(), variants: vec![], images: vec![],
        }
    }

    fn page(ids: &[&str], total: u64, pages: u32) -> ProductPage {
        ProductPage { products: ids.iter().map(|id| product(id)).collect(), total, pages }
    }

    fn ids(store: &ProductListStore) -> Vec<String> { store.products().into_iter().map(|p| p.id).collect() }

    fn store(catalog: &Arc<FakeCatalog>) -> ProductListStore { ProductListStore::new(catalog.clone(), PageSize::new(2)) }

    async fn until(cond: impl Fn() -> bool) {
        while !cond() {
            tokio::task::yield_now().await;
        }
    }

    #[test]
    fn test_filter_query_is_canonical() {
        let mut filters = FilterState::default();
        filters.apply(FilterKey::Sort, "price".into());
        filters.apply(FilterKey::Category, "men".into());
        filters.apply(FilterKey::MinPrice, "".into());
        filters.apply(FilterKey::MaxPrice, Decimal::new(100, 0).into());
        filters.apply(FilterKey::SearchText, "linen shirt".into());
        assert_eq!(filters.to_query(), "category=men&maxPrice=100&q=linen+shirt&sort=price&page=1&limit=12");
    }

    #[test]
    fn test_page_and_limit_never_zero() {
        let mut filters = FilterState::default();
        filters.apply(FilterKey::Page, 0u32.into());
        filters.apply(FilterKey::Limit, "0".into());
        assert_eq!(filters.page.get(), 1);
        assert_eq!(filters.limit.get(), 1);
        filters.apply(FilterKey::Page, "abc".into());
        assert_eq!(filters.page.get(), 1);
        filters.apply(FilterKey::Limit, FilterValue::Clear);
        assert_eq!(filters.limit, PageSize::DEFAULT);
    }

    #[test]
    fn test_query_key_lookup() {
        assert_eq!(FilterKey::from_query_key("q"), Some(FilterKey::SearchText));
        assert_eq!(FilterKey::from_query_key("minPrice"), Some(FilterKey::MinPrice));
        assert_eq!(FilterKey::from_query_key("brand"), None);
    }

    #[tokio::test]
    async fn test_set_filter_does_not_fetch() {
        let catalog = Arc::new(FakeCatalog::default());
        let store = store(&catalog);
        store.set_filter(FilterKey::Color, "red");
        assert_eq!(store.status(), ListStatus::Idle);
        assert!(catalog.calls().is_empty());
        assert_eq!(store.filters().color.as_deref(), Some("red"));
    }

    #[tokio::test]
    async fn test_replace_then_replace() {
        let catalog = Arc::new(FakeCatalog::default());
        catalog.reply("category=men&page=1&limit=2", Reply::Page(page(&["m1", "m2"], 4, 2)));
        catalog.reply("category=women&page=1&limit=2", Reply::Page(page(&["w1"], 1, 1)));
        let store = store(&catalog);

        store.set_filter(FilterKey::Category, "men");
        assert_eq!(store.fetch_products(false).await.unwrap(), FetchOutcome::Applied { received: 2 });
        store.set_filter(FilterKey::Category, "women");
        store.fetch_products(false).await.unwrap();

        assert_eq!(ids(&store), vec!["w1"]);
        assert_eq!(store.meta(), Some(PaginationMeta::new(1, 1, 1)));
        assert_eq!(store.status(), ListStatus::Ready);
    }

    #[tokio::test]
    async fn test_load_more_appends_until_last_page() {
        let catalog = Arc::new(FakeCatalog::default());
        catalog.reply("page=1&limit=2", Reply::Page(page(&["a", "b"], 3, 2)));
        catalog.reply("page=2&limit=2", Reply::Page(page(&["c"], 3, 2)));
        let store = store(&catalog);

        assert_eq!(store.load_more_products().await.unwrap(), FetchOutcome::Skipped);
        store.fetch_products(false).await.unwrap();
        assert_eq!(store.load_more_products().await.unwrap(), FetchOutcome::Applied { received: 1 });
        assert_eq!(ids(&store), vec!["a", "b", "c"]);
        assert_eq!(store.meta().map(|m| m.current_page), Some(2));

        assert_eq!(store.load_more_products().await.unwrap(), FetchOutcome::Skipped);
        assert_eq!(catalog.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_products() {
        let catalog = Arc::new(FakeCatalog::default());
        catalog.reply("page=1&limit=2", Reply::Page(page(&["a", "b"], 6, 3)));
        catalog.reply("page=2&limit=2", Reply::Fail(503));
        let store = store(&catalog);

        store.fetch_products(false).await.unwrap();
        let err = store.load_more_products().await.unwrap_err();
        assert!(matches!(err, StorefrontError::Api { status: 503, .. }));
        assert_eq!(store.status(), ListStatus::Errored);
        assert_eq!(ids(&store), vec!["a", "b"]);
        assert!(store.last_error().is_some());
        assert_eq!(store.list_display(), ListDisplay::Items(2));
        assert!(matches!(store.take_events().last(), Some(StoreEvent::FetchFailed { sequence: 2, .. })));

        // Retry asks for the same page again.
        catalog.reply("page=2&limit=2", Reply::Page(page(&["c", "d"], 6, 3)));
        store.load_more_products().await.unwrap();
        assert_eq!(ids(&store), vec!["a", "b", "c", "d"]);
        assert!(store.last_error().is_none());
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let catalog = Arc::new(FakeCatalog::default());
        let (slow_tx, slow_rx) = oneshot::channel();
        catalog.reply("category=men&page=1&limit=2", Reply::Gated(slow_rx));
        catalog.reply("category=women&page=1&limit=2", Reply::Page(page(&["w1", "w2"], 2, 1)));
        let store = Arc::new(store(&catalog));

        store.set_filter(FilterKey::Category, "men");
        let slow = tokio::spawn({
            let store = store.clone();
            async move { store.fetch_products(false).await }
        });
        while catalog.calls().is_empty() {
            tokio::task::yield_now().await;
        }

        store.set_filter(FilterKey::Category, "women");
        store.fetch_products(false).await.unwrap();
        slow_tx.send(page(&["m1"], 1, 1)).unwrap();

        assert_eq!(slow.await.unwrap().unwrap(), FetchOutcome::Discarded);
        assert_eq!(ids(&store), vec!["w1", "w2"]);
        assert_eq!(store.status(), ListStatus::Ready);
        assert!(store.take_events().contains(&StoreEvent::StaleResponseDiscarded { sequence: 1, latest: 2 }));
    }

    #[tokio::test]
    async fn test_reset_clears_and_supersedes() {
        let catalog = Arc::new(FakeCatalog::default());
        catalog.reply("page=1&limit=2", Reply::Page(page(&["a", "b"], 4, 2)));
        catalog.reply("page=2&limit=2", Reply::Page(page(&["c", "d"], 4, 2)));
        let store = store(&catalog);

        store.fetch_products(false).await.unwrap();
        store.load_more_products().await.unwrap();
        assert_eq!(store.filters().page.get(), 2);

        store.reset_products();
        assert!(store.products().is_empty());
        assert_eq!(store.filters().page.get(), 1);
        assert_eq!(store.meta(), None);
        assert_eq!(store.list_display(), ListDisplay::Empty);
    }

    #[tokio::test]
    async fn test_empty_result_is_not_loading() {
        let catalog = Arc::new(FakeCatalog::default());
        catalog.reply("q=nothing&page=1&limit=2", Reply::Page(page(&[], 0, 0)));
        let store = store(&catalog);
        store.set_filter(FilterKey::SearchText, "nothing");
        store.fetch_products(false).await.unwrap();
        assert_eq!(store.list_display(), ListDisplay::Empty);
        assert_eq!(store.status(), ListStatus::Ready);
        assert!(store.page_items().is_empty());
    }

    #[tokio::test]
    async fn test_product_detail_is_independent() {
        let catalog = Arc::new(FakeCatalog::default());
        let store = store(&catalog);
        let p = store.fetch_product_by_id("p7").await.unwrap();
        assert_eq!(p.id, "p7");
        assert_eq!(store.selected_product().map(|p| p.id), Some("p7".into()));
        assert!(!store.is_detail_loading());
        assert!(store.fetch_product_by_id("missing").await.is_err());
        assert!(store.detail_error().is_some());
        assert_eq!(store.status(), ListStatus::Idle);
        assert!(catalog.calls().is_empty());
    }

    #[tokio::test]
    async fn test_slider_moves_write_price_filters() {
        let catalog = Arc::new(FakeCatalog::default());
        catalog.reply("minPrice=20&maxPrice=80&page=1&limit=2", Reply::Page(page(&["a"], 1, 1)));
        let store = store(&catalog);
        let mut slider = PriceSlider::new(Decimal::ZERO, Decimal::from(100), Decimal::from(10)).unwrap();

        store.set_price_range(slider.move_lower(Decimal::from(20)));
        store.set_price_range(slider.move_upper(Decimal::from(80)));
        let filters = store.filters();
        assert_eq!(filters.min_price, Some(Decimal::from(20)));
        assert_eq!(filters.max_price, Some(Decimal::from(80)));
        assert_eq!(filters.to_query(), "minPrice=20&maxPrice=80&page=1&limit=2");

        // Dragging the lower handle past the upper one stops a step short.
        store.set_price_range(slider.move_lower(Decimal::from(95)));
        assert_eq!(store.filters().min_price, Some(Decimal::from(70)));
        assert_eq!(store.filters().max_price, Some(Decimal::from(80)));

        store.set_price_range(slider.move_lower(Decimal::from(20)));
        assert!(catalog.calls().is_empty());
        store.fetch_products(false).await.unwrap();
        assert_eq!(catalog.calls(), vec!["minPrice=20&maxPrice=80&page=1&limit=2"]);
        assert_eq!(ids(&store), vec!["a"]);
    }

    #[tokio::test]
    async fn test_error_without_data_is_not_empty() {
        let catalog = Arc::new(FakeCatalog::default());
        catalog.reply("page=1&limit=2", Reply::Fail(502));
        let store = store(&catalog);
        assert!(store.fetch_products(false).await.is_err());
        assert_eq!(store.list_display(), ListDisplay::Errored);

        catalog.reply("page=1&limit=2", Reply::Page(page(&[], 0, 0)));
        store.fetch_products(false).await.unwrap();
        assert_eq!(store.list_display(), ListDisplay::Empty);
    }

    #[tokio::test]
    async fn test_older_detail_response_does_not_overwrite_newer() {
        let catalog = Arc::new(FakeCatalog::default());
        let (slow_tx, slow_rx) = oneshot::channel();
        catalog.gate_detail("p1", slow_rx);
        let store = Arc::new(store(&catalog));

        let slow = tokio::spawn({
            let store = store.clone();
            async move { store.fetch_product_by_id("p1").await }
        });
        until(|| catalog.detail_calls() == 1).await;

        store.fetch_product_by_id("p2").await.unwrap();
        assert!(!store.is_detail_loading());
        slow_tx.send(product("p1")).unwrap();

        assert_eq!(slow.await.unwrap().unwrap().id, "p1");
        assert_eq!(store.selected_product().map(|p| p.id), Some("p2".into()));
        assert!(!store.is_detail_loading());
    }

    #[tokio::test]
    async fn test_detail_stays_loading_until_latest_resolves() {
        let catalog = Arc::new(FakeCatalog::default());
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        catalog.gate_detail("p1", first_rx);
        catalog.gate_detail("p2", second_rx);
        let store = Arc::new(store(&catalog));

        let first = tokio::spawn({
            let store = store.clone();
            async move { store.fetch_product_by_id("p1").await }
        });
        until(|| catalog.detail_calls() == 1).await;
        let second = tokio::spawn({
            let store = store.clone();
            async move { store.fetch_product_by_id("p2").await }
        });
        until(|| catalog.detail_calls() == 2).await;

        first_tx.send(product("p1")).unwrap();
        first.await.unwrap().unwrap();
        assert!(store.is_detail_loading());
        assert!(store.selected_product().is_none());

        second_tx.send(product("p2")).unwrap();
        second.await.unwrap().unwrap();
        assert!(!store.is_detail_loading());
        assert_eq!(store.selected_product().map(|p| p.id), Some("p2".into()));
    }
}
