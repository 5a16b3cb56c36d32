use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use client_core::{CatalogBrowser, CatalogClient, FilterPatch};
use shared::domain::{Product, ProductId, ProductSummary};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Browse the product catalog from the terminal")]
struct Cli {
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List products matching the filters, scrolling through `--pages` pages.
    List(ListArgs),
    /// Show one product in full.
    Show { id: i64 },
}

#[derive(Args, Debug)]
struct ListArgs {
    #[arg(long)]
    min_price: Option<f64>,
    #[arg(long)]
    max_price: Option<f64>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    name: Option<String>,
    /// Earliest listing date, YYYY-MM-DD.
    #[arg(long)]
    start_date: Option<NaiveDate>,
    /// Latest listing date, YYYY-MM-DD.
    #[arg(long)]
    end_date: Option<NaiveDate>,
    #[arg(long, default_value_t = 10)]
    per_page: u64,
    #[arg(long, default_value_t = 1)]
    pages: u32,
}

impl ListArgs {
    fn patch(&self) -> FilterPatch {
        FilterPatch {
            min_price: self.min_price,
            max_price: self.max_price,
            category: self.category.clone(),
            name: self.name.clone(),
            start_date: self.start_date.map(Some),
            end_date: self.end_date.map(Some),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
    let cli = Cli::parse();
    let client = CatalogClient::new(cli.server_url);

    match cli.command {
        Command::List(args) => list(client, args).await,
        Command::Show { id } => {
            let product = client
                .product(ProductId(id))
                .await
                .with_context(|| format!("failed to load product {id}"))?;
            print_product(&product);
            Ok(())
        }
    }
}

async fn list(client: CatalogClient, args: ListArgs) -> Result<()> {
    let mut browser = CatalogBrowser::new(client).with_per_page(args.per_page);
    browser.update_filters(args.patch());

    let mut printed = 0;
    for _ in 0..args.pages.max(1) {
        if !browser.load_next_page().await? {
            break;
        }
        for item in &browser.items()[printed..] {
            print_summary(item);
        }
        printed = browser.items().len();
    }

    info!(shown = printed, "listing done");
    match browser.feed().total() {
        Some(total) if browser.feed().has_more() => {
            println!("-- {printed} of {total} shown, use --pages to see more");
        }
        Some(total) => println!("-- {total} products"),
        None => println!("-- no products"),
    }
    Ok(())
}

fn print_summary(item: &ProductSummary) {
    println!(
        "{:>5}  {:<40}  {:>10.2}  {}",
        item.id.0, item.title, item.price, item.category
    );
}

fn print_product(product: &Product) {
    println!("{} (#{})", product.title, product.id.0);
    if let Some(brand) = &product.brand {
        println!("brand:    {brand}");
    }
    println!("category: {}", product.category);
    println!("price:    {:.2}", product.price);
    if let Some(rating) = product.rating {
        println!("rating:   {rating:.2} / 5");
    }
    let availability = match (&product.availability_status, product.in_stock()) {
        (Some(status), _) => status.as_str(),
        (None, true) => "In Stock",
        (None, false) => "Out of Stock",
    };
    println!("stock:    {availability}");
    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }
    if let Some(image) = product.images.first() {
        println!();
        println!("image:    {image}");
    }
}
