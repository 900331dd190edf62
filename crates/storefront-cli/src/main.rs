mod blog;
mod shop;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use storefront_core::SortKey;
use storefront_provider::{DefaultSanitizer, Sanitizer, StorefrontClient};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(about = "Browse a storefront's catalog and blog from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List products in a collection
    Shop {
        /// Collection handle (defaults to `STOREFRONT_DEFAULT_COLLECTION`)
        #[arg(long)]
        collection: Option<String>,
        /// Maximum number of products to fetch
        #[arg(long)]
        limit: Option<u32>,
        /// Sort order: featured, price-asc, price-desc, title-asc, title-desc
        #[arg(long, default_value = "featured")]
        sort: SortKey,
        /// Lowest price to show
        #[arg(long)]
        min_price: Option<Decimal>,
        /// Highest price to show
        #[arg(long)]
        max_price: Option<Decimal>,
        /// Only show products that can be bought now
        #[arg(long)]
        in_stock: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List recent blog articles, newest first
    Blog {
        /// Maximum number of articles to fetch
        #[arg(long)]
        limit: Option<u32>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one article
    Article {
        /// Blog handle (e.g., journal)
        blog: String,
        /// Article handle (e.g., period-care-101)
        article: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = storefront_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let client = StorefrontClient::from_config(&config)
        .map_err(|e| anyhow::anyhow!("failed to build storefront client: {e}"))?;
    let sanitizer: Arc<dyn Sanitizer> = Arc::new(DefaultSanitizer);
    tracing::debug!(endpoint = %client.endpoint(), "storefront client ready");

    match cli.command {
        Commands::Shop {
            collection,
            limit,
            sort,
            min_price,
            max_price,
            in_stock,
            json,
        } => {
            let args = shop::ShopArgs {
                collection: collection.unwrap_or_else(|| config.default_collection.clone()),
                limit: limit.unwrap_or(config.product_limit),
                sort,
                min_price,
                max_price,
                in_stock,
                json,
            };
            shop::run_shop(&client, &args).await?;
        }
        Commands::Blog { limit, json } => {
            blog::run_blog(
                &client,
                sanitizer,
                limit.unwrap_or(config.article_limit),
                json,
            )
            .await?;
        }
        Commands::Article {
            blog,
            article,
            json,
        } => {
            blog::run_article(&client, sanitizer, &config.site_name, &blog, &article, json)
                .await?;
        }
    }

    Ok(())
}
