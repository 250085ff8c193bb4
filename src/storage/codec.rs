//! Line codec for the inventory file
//!
//! One product per line, fields in the order `id;name;category;price;quantity`.
//! Text fields are written verbatim: a name or category containing the
//! separator produces a row that no longer decodes.

use crate::error::InventoryError;
use crate::models::{Price, Product, ProductId};

/// Field separator
pub const SEPARATOR: char = ';';

/// First line of every inventory file
pub const HEADER: &str = "id_producto;nombre;categoria;precio;stock";

const FIELD_COUNT: usize = 5;

/// Render a product as one line (without the trailing newline)
pub fn encode_line(product: &Product) -> String {
    format!(
        "{id}{sep}{name}{sep}{category}{sep}{price}{sep}{quantity}",
        id = product.id,
        name = product.name,
        category = product.category,
        price = product.price,
        quantity = product.quantity,
        sep = SEPARATOR,
    )
}

/// Parse one line into a product
///
/// Fields are trimmed. Any failure is reported as `MalformedLine` carrying
/// the offending line; loaders skip such lines.
pub fn decode_line(line: &str) -> Result<Product, InventoryError> {
    let malformed = |reason: String| InventoryError::MalformedLine {
        line: line.to_string(),
        reason,
    };

    let fields: Vec<&str> = line.split(SEPARATOR).map(str::trim).collect();
    if fields.len() != FIELD_COUNT {
        return Err(malformed(format!(
            "expected {} fields, found {}",
            FIELD_COUNT,
            fields.len()
        )));
    }

    let id: ProductId = fields[0]
        .parse()
        .map_err(|_| malformed(format!("invalid id '{}'", fields[0])))?;

    let price = Price::parse(fields[3]).map_err(|e| malformed(e.to_string()))?;

    let quantity: i64 = fields[4]
        .parse()
        .map_err(|_| malformed(format!("invalid quantity '{}'", fields[4])))?;

    let product = Product::new(id, fields[1], fields[2], price, quantity);
    product.validate().map_err(|e| malformed(e.to_string()))?;

    Ok(product)
}

/// True if `text` would break the row it is written into
pub fn contains_separator(text: &str) -> bool {
    text.contains(SEPARATOR) || text.contains(['\n', '\r'])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Product {
        Product::new(ProductId::FIRST, "Widget", "Tools", Price::from_cents(999), 5)
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode_line(&widget()), "1;Widget;Tools;9.99;5");

        let bolt = Product::new(
            ProductId::new(2).unwrap(),
            "Bolt",
            "Hardware",
            Price::from_cents(50),
            200,
        );
        assert_eq!(encode_line(&bolt), "2;Bolt;Hardware;0.50;200");
    }

    #[test]
    fn test_decode() {
        let product = decode_line("1;Widget;Tools;9.99;5").unwrap();
        assert_eq!(product, widget());
    }

    #[test]
    fn test_decode_trims_fields() {
        let product = decode_line(" 1 ; Widget ;Tools ; 9.99 ; 5 ").unwrap();
        assert_eq!(product, widget());
    }

    #[test]
    fn test_decode_encode_is_identity() {
        for line in ["1;Widget;Tools;9.99;5", "17;Caja grande;Embalaje;0.05;0"] {
            assert_eq!(encode_line(&decode_line(line).unwrap()), line);
        }
        assert_eq!(decode_line(&encode_line(&widget())).unwrap(), widget());
    }

    #[test]
    fn test_encode_decode_edge_values() {
        let ids = [1, 2, 999, u32::MAX];
        let names = ["Widget", "Caja grande", "Ñandú azul", "  padded  ", "x"];
        let prices = [0, 1, 10, 99, 100, 999_999, i64::MAX];
        let quantities = [0, 1, 200, i64::MAX];

        for (i, &id) in ids.iter().enumerate() {
            for (j, &name) in names.iter().enumerate() {
                let product = Product::new(
                    ProductId::new(id).unwrap(),
                    name.trim(),
                    format!("Categoría {}", j),
                    Price::from_cents(prices[(i + j) % prices.len()]),
                    quantities[(i * names.len() + j) % quantities.len()],
                );
                let decoded = decode_line(&encode_line(&product)).unwrap();
                assert_eq!(decoded, product, "{}", encode_line(&product));
            }
        }
    }

    #[test]
    fn test_zero_price_and_quantity_render_plainly() {
        let product = Product::new(ProductId::FIRST, "Free sample", "Promo", Price::zero(), 0);
        assert_eq!(encode_line(&product), "1;Free sample;Promo;0.00;0");
    }

    #[test]
    fn test_decode_normalizes_price_scale() {
        let product = decode_line("3;Nut;Hardware;12.5;1").unwrap();
        assert_eq!(encode_line(&product), "3;Nut;Hardware;12.50;1");
    }

    #[test]
    fn test_decode_rejects_wrong_field_count() {
        let err = decode_line("1;Widget;9.99;5").unwrap_err();
        match err {
            InventoryError::MalformedLine { line, reason } => {
                assert_eq!(line, "1;Widget;9.99;5");
                assert!(reason.contains("found 4"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_rejects_bad_numbers() {
        assert!(decode_line("x;Widget;Tools;9.99;5").is_err());
        assert!(decode_line("0;Widget;Tools;9.99;5").is_err());
        assert!(decode_line("1;Widget;Tools;cheap;5").is_err());
        assert!(decode_line("1;Widget;Tools;-1.00;5").is_err());
        assert!(decode_line("1;Widget;Tools;9.99;many").is_err());
        assert!(decode_line("1;Widget;Tools;9.99;-3").is_err());
    }

    #[test]
    fn test_decode_rejects_empty_text() {
        assert!(decode_line("1; ;Tools;9.99;5").is_err());
        assert!(decode_line("1;Widget;;9.99;5").is_err());
    }

    #[test]
    fn test_separator_in_name_corrupts_row() {
        let mut product = widget();
        product.name = "Widget; deluxe".into();
        assert!(contains_separator(&product.name));

        let line = encode_line(&product);
        assert!(matches!(
            decode_line(&line),
            Err(InventoryError::MalformedLine { .. })
        ));
    }

    #[test]
    fn test_header_is_not_a_product() {
        assert!(decode_line(HEADER).is_err());
    }
}
