//! Catalog page controller.

use rust_decimal::Decimal;
use storefront_core::{derive_catalog_view, CatalogSnapshot, CatalogView, FilterSpec, SortKey};
use storefront_provider::{normalize_products, ContentProvider, ProviderError};

use crate::state::{FetchOutcome, FetchRequest, FetchSlot, FetchState, FetchTicket};

/// Fetches one collection's products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRequest {
    pub collection_handle: String,
    pub limit: u32,
}

impl FetchRequest for CatalogRequest {
    type Output = CatalogSnapshot;

    fn describe(&self) -> String {
        format!("collection:{}", self.collection_handle)
    }

    async fn run<P: ContentProvider>(&self, provider: &P) -> Result<CatalogSnapshot, ProviderError> {
        let raws = provider
            .fetch_products_by_collection(&self.collection_handle, self.limit)
            .await?;
        let fetched = raws.len();
        let products = normalize_products(raws);
        tracing::debug!(
            collection = %self.collection_handle,
            fetched,
            kept = products.len(),
            "normalized collection products"
        );
        Ok(CatalogSnapshot::new(products))
    }
}

/// Owns one collection's snapshot and the shopper's filter.
///
/// Filter changes never re-fetch: [`CatalogController::view`] re-derives the
/// list from the snapshot on every call.
#[derive(Debug)]
pub struct CatalogController {
    request: CatalogRequest,
    slot: FetchSlot<CatalogSnapshot>,
    filter: FilterSpec,
}

impl CatalogController {
    #[must_use]
    pub fn new(collection_handle: impl Into<String>, limit: u32) -> Self {
        Self {
            request: CatalogRequest {
                collection_handle: collection_handle.into(),
                limit,
            },
            slot: FetchSlot::default(),
            filter: FilterSpec::default(),
        }
    }

    #[must_use]
    pub fn collection_handle(&self) -> &str {
        &self.request.collection_handle
    }

    #[must_use]
    pub fn state(&self) -> &FetchState<CatalogSnapshot> {
        self.slot.state()
    }

    /// Starts the initial fetch. Returns `None` while a fetch is in flight.
    pub fn mount(&mut self) -> Option<FetchTicket<CatalogRequest>> {
        self.slot.begin(self.request.clone())
    }

    /// Applies a finished fetch. Returns `false` for a stale outcome.
    pub fn resolve(&mut self, outcome: FetchOutcome<CatalogSnapshot>) -> bool {
        self.slot.resolve(outcome)
    }

    /// Drops the snapshot and supersedes any in-flight fetch.
    pub fn unmount(&mut self) {
        self.slot.reset();
    }

    /// Mounts, fetches and resolves in one step.
    pub async fn load<P: ContentProvider>(&mut self, provider: &P) -> &FetchState<CatalogSnapshot> {
        if let Some(ticket) = self.mount() {
            let outcome = ticket.fetch(provider).await;
            self.resolve(outcome);
        }
        self.state()
    }

    #[must_use]
    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: FilterSpec) {
        self.filter = filter;
    }

    pub fn set_sort_key(&mut self, sort_key: SortKey) {
        self.filter.sort_key = sort_key;
    }

    /// Sets the price window with slider semantics (see
    /// [`FilterSpec::clamp_price_range`]).
    pub fn set_price_range(&mut self, min: Decimal, max: Decimal) {
        self.filter.clamp_price_range(min, max);
    }

    pub fn set_only_in_stock(&mut self, only_in_stock: bool) {
        self.filter.only_in_stock = only_in_stock;
    }

    /// Restores the default filter.
    pub fn clear_filters(&mut self) {
        self.filter.reset();
    }

    /// Products to display for the current snapshot and filter. `None`
    /// until the snapshot has loaded.
    #[must_use]
    pub fn view(&self) -> Option<CatalogView> {
        self.slot
            .state()
            .loaded()
            .map(|snapshot| derive_catalog_view(snapshot, &self.filter))
    }
}
