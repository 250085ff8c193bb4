//! Product display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::Product;
use crate::storage::InventoryStats;

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Stock")]
    stock: i64,
}

/// Format products as a table, in the order given
pub fn format_product_table(products: &[Product], currency: &str) -> String {
    if products.is_empty() {
        return "No products found.\n".to_string();
    }

    let rows = products.iter().map(|p| ProductRow {
        id: p.id.get(),
        name: p.name.clone(),
        category: p.category.clone(),
        price: p.price.format_with_symbol(currency),
        stock: p.quantity,
    });

    let mut table = Table::new(rows);
    table
        .with(Style::sharp())
        .modify(Columns::new(3..), Alignment::right());

    format!("{}\n{} product(s)\n", table, products.len())
}

/// Format a single product
pub fn format_product_details(product: &Product, currency: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Product #{}\n", product.id));
    output.push_str(&format!("  Name:     {}\n", product.name));
    output.push_str(&format!("  Category: {}\n", product.category));
    output.push_str(&format!(
        "  Price:    {}\n",
        product.price.format_with_symbol(currency)
    ));
    output.push_str(&format!("  Stock:    {}\n", product.quantity));
    let value = product
        .stock_value()
        .map(|v| v.format_with_symbol(currency))
        .unwrap_or_else(|| "out of range".to_string());
    output.push_str(&format!("  Value:    {}\n", value));
    output
}

pub fn format_stats(stats: &InventoryStats, currency: &str) -> String {
    let mut output = String::new();
    output.push_str("Inventory Statistics\n");
    output.push_str("====================\n");
    output.push_str(&format!("Products:    {}\n", stats.product_count));
    output.push_str(&format!("Categories:  {}\n", stats.category_count));
    output.push_str(&format!("Total stock: {}\n", stats.total_stock));
    output.push_str(&format!(
        "Total value: {}\n",
        stats.total_value.format_with_symbol(currency)
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Price, ProductId};

    fn widget() -> Product {
        Product::new(ProductId::FIRST, "Widget", "Tools", Price::from_cents(999), 5)
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_product_table(&[], "€"), "No products found.\n");
    }

    #[test]
    fn test_table_contains_rows() {
        let output = format_product_table(&[widget()], "€");
        assert!(output.contains("Widget"));
        assert!(output.contains("9.99€"));
        assert!(output.contains("Category"));
        assert!(output.ends_with("1 product(s)\n"));
    }

    #[test]
    fn test_details_show_stock_value() {
        let output = format_product_details(&widget(), "€");
        assert!(output.contains("Product #1"));
        assert!(output.contains("49.95€"));
    }

    #[test]
    fn test_details_with_unrepresentable_value() {
        let mut product = widget();
        product.price = Price::from_cents(i64::MAX);
        let output = format_product_details(&product, "€");
        assert!(output.contains("Value:    out of range"));
    }

    #[test]
    fn test_stats() {
        let stats = InventoryStats {
            product_count: 2,
            total_stock: 205,
            total_value: Price::from_cents(14995),
            category_count: 2,
        };
        let output = format_stats(&stats, "€");
        assert!(output.contains("Products:    2"));
        assert!(output.contains("Total value: 149.95€"));
    }
}
