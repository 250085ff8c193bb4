//! Product CLI commands
//!
//! Implements CLI commands for listing, searching and editing products.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::product::{format_product_details, format_product_table};
use crate::error::{InventoryError, InventoryResult};
use crate::models::{NewProduct, Price, ProductId, ProductUpdate};
use crate::storage::Inventory;

/// Product subcommands
#[derive(Subcommand)]
pub enum ProductCommands {
    /// List all products
    #[command(alias = "ls")]
    List,

    /// Show one product
    Show {
        /// Product ID
        id: ProductId,
    },

    /// Search products by name (substring) or category
    Search {
        /// Text to look for
        query: String,
        /// Match the category exactly instead of searching names
        #[arg(short, long)]
        category: bool,
    },

    /// List products at or below a stock threshold
    #[command(name = "low-stock")]
    LowStock {
        /// Threshold (defaults to the configured one)
        #[arg(short, long, allow_negative_numbers = true)]
        threshold: Option<i64>,
    },

    /// Add a new product
    Add {
        /// Product name
        name: String,
        /// Category
        #[arg(short, long)]
        category: String,
        /// Unit price (e.g., "9.99")
        #[arg(short, long, allow_negative_numbers = true)]
        price: String,
        /// Units in stock
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Edit a product; only the given fields change
    Edit {
        /// Product ID
        id: ProductId,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New unit price
        #[arg(short, long, allow_negative_numbers = true)]
        price: Option<String>,
        /// New stock quantity
        #[arg(short, long, allow_negative_numbers = true)]
        quantity: Option<i64>,
    },

    /// Delete a product
    Delete {
        /// Product ID
        id: ProductId,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a product command
pub fn handle_product_command(
    inventory: &Inventory,
    settings: &Settings,
    cmd: ProductCommands,
) -> InventoryResult<()> {
    let repo = &inventory.products;
    let currency = settings.currency_symbol.as_str();

    match cmd {
        ProductCommands::List => {
            let products = repo.list_all()?;
            print!("{}", format_product_table(&products, currency));
        }

        ProductCommands::Show { id } => {
            let product = repo.find_by_id(id)?;
            print!("{}", format_product_details(&product, currency));
        }

        ProductCommands::Search { query, category } => {
            let products = if category {
                repo.find_by_category(&query)?
            } else {
                repo.find_by_name_contains(&query)?
            };
            print!("{}", format_product_table(&products, currency));
        }

        ProductCommands::LowStock { threshold } => {
            let threshold = threshold.unwrap_or(settings.low_stock_threshold);
            let products = repo.find_by_stock_at_most(threshold)?;
            println!("Products with stock <= {}:", threshold);
            print!("{}", format_product_table(&products, currency));
        }

        ProductCommands::Add {
            name,
            category,
            price,
            quantity,
        } => {
            let price = parse_price(&price)?;
            let product = repo.create(NewProduct::new(name, category, price, quantity))?;

            println!("Created product: {}", product.name);
            println!("  ID: {}", product.id);
        }

        ProductCommands::Edit {
            id,
            name,
            category,
            price,
            quantity,
        } => {
            let update = ProductUpdate {
                name,
                category,
                price: price.as_deref().map(parse_price).transpose()?,
                quantity,
            };
            if update.is_empty() {
                println!("No changes specified. Use --name, --category, --price or --quantity.");
                return Ok(());
            }

            let updated = repo.update(id, &update)?;
            println!("Updated product #{}: {}", updated.id, updated.name);
        }

        ProductCommands::Delete { id, force } => {
            if !force {
                let product = repo.find_by_id(id)?;
                print!("{}", format_product_details(&product, currency));
                println!();
                println!("To delete this product, run again with --force flag:");
                println!("  inventory product delete {} --force", id);
                return Ok(());
            }

            let removed = repo.delete(id)?;
            println!("Deleted product #{}: {}", removed.id, removed.name);
        }
    }

    Ok(())
}

fn parse_price(input: &str) -> InventoryResult<Price> {
    Price::parse(input).map_err(|e| InventoryError::Validation(e.to_string()))
}
