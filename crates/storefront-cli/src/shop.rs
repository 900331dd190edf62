//! `shop` command: fetch a collection and print the filtered catalog.

use std::fmt::Write as _;

use rust_decimal::Decimal;
use storefront_core::{CatalogView, FilterSpec, PriceRange, SortKey};
use storefront_provider::ContentProvider;
use storefront_views::{CatalogController, FetchState};

#[derive(Debug, Clone)]
pub(crate) struct ShopArgs {
    pub collection: String,
    pub limit: u32,
    pub sort: SortKey,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub in_stock: bool,
    pub json: bool,
}

/// Builds the `FilterSpec` for `args`, starting from the session defaults.
///
/// # Errors
///
/// Returns an error if the resulting price window is negative or inverted.
pub(crate) fn filter_from_args(args: &ShopArgs) -> anyhow::Result<FilterSpec> {
    let defaults = PriceRange::default();
    let price_range = PriceRange::new(
        args.min_price.unwrap_or(defaults.min),
        args.max_price.unwrap_or(defaults.max),
    )?;
    Ok(FilterSpec {
        sort_key: args.sort,
        price_range,
        only_in_stock: args.in_stock,
    })
}

/// Fetch the collection, apply the filters and print the result.
///
/// # Errors
///
/// Returns an error if the filter arguments are invalid or the provider call
/// fails.
pub(crate) async fn run_shop<P: ContentProvider>(
    provider: &P,
    args: &ShopArgs,
) -> anyhow::Result<()> {
    let filter = filter_from_args(args)?;

    let mut controller = CatalogController::new(args.collection.clone(), args.limit);
    controller.set_filter(filter);
    if let FetchState::Failed(message) = controller.load(provider).await {
        anyhow::bail!("failed to load collection '{}': {message}", args.collection);
    }

    let Some(view) = controller.view() else {
        anyhow::bail!("collection '{}' did not finish loading", args.collection);
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render_catalog(&args.collection, &view, &filter));
    }
    Ok(())
}

/// Plain-text catalog table.
pub(crate) fn render_catalog(collection: &str, view: &CatalogView, filter: &FilterSpec) -> String {
    let mut out = String::new();

    if view.products.is_empty() {
        if view.total == 0 {
            let _ = writeln!(out, "no products in collection '{collection}'");
        } else {
            let _ = writeln!(
                out,
                "no products match the current filters ({} hidden); try clearing filters",
                view.total
            );
        }
        return out;
    }

    let _ = writeln!(
        out,
        "{:<12}{:<7}{:<40}HANDLE",
        "PRICE", "STOCK", "TITLE"
    );
    for product in &view.products {
        let price = match product.currency_code.as_deref() {
            Some(code) => format!("{} {code}", product.min_price),
            None => product.min_price.to_string(),
        };
        let stock = if product.in_stock { "yes" } else { "no" };
        let title = if product.title.chars().count() > 38 {
            format!("{}...", product.title.chars().take(35).collect::<String>())
        } else {
            product.title.clone()
        };
        let _ = writeln!(out, "{price:<12}{stock:<7}{title:<40}{}", product.handle);
    }

    let _ = write!(
        out,
        "\n{} of {} products, sorted by {}",
        view.products.len(),
        view.total,
        filter.sort_key
    );
    if filter.has_active_filters() {
        let _ = write!(
            out,
            " (price {}-{}{})",
            filter.price_range.min,
            filter.price_range.max,
            if filter.only_in_stock { ", in stock only" } else { "" }
        );
    }
    out.push('\n');
    out
}
