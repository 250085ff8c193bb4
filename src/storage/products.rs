//! Product repository for the inventory text file
//!
//! Every operation reads the file from disk; there is no in-memory cache, so
//! the file is always the single source of truth. Creation appends one line,
//! update and delete rewrite the whole file.
//!
//! Single-writer access is assumed: two processes mutating the same file
//! concurrently can lose updates. No lock file is used.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::audit::{AuditLogger, Operation};
use crate::config::settings::WriteMode;
use crate::error::{InventoryError, InventoryResult};
use crate::models::{NewProduct, Price, Product, ProductId, ProductUpdate};

use super::codec::{self, HEADER};
use super::file_io::{append_line, write_file};

/// Aggregate figures over the whole inventory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryStats {
    /// Number of products
    pub product_count: usize,
    /// Sum of all quantities
    pub total_stock: i64,
    /// Sum of price x quantity over all products
    pub total_value: Price,
    /// Number of distinct categories (case-insensitive)
    pub category_count: usize,
}

/// Repository for product persistence
pub struct ProductRepository {
    path: PathBuf,
    audit: AuditLogger,
    write_mode: WriteMode,
}

impl ProductRepository {
    /// Create a repository without touching the disk
    pub fn new(path: PathBuf, audit: AuditLogger, write_mode: WriteMode) -> Self {
        Self {
            path,
            audit,
            write_mode,
        }
    }

    /// Create a repository, creating a header-only file if none exists
    pub fn open(path: PathBuf, audit: AuditLogger, write_mode: WriteMode) -> InventoryResult<Self> {
        let repo = Self::new(path, audit, write_mode);
        repo.ensure_file()?;
        Ok(repo)
    }

    /// Create the inventory file with only the header if it is missing
    ///
    /// Returns true when the file was created.
    pub fn ensure_file(&self) -> InventoryResult<bool> {
        if self.path.exists() {
            return Ok(false);
        }

        write_file(&self.path, format!("{}\n", HEADER).as_bytes(), self.write_mode)?;
        self.audit.record(
            Operation::Initialize,
            format!("Inventory file created: {}", self.path.display()),
        );
        Ok(true)
    }

    /// Get the path to the inventory file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite strategy used by update and delete
    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    /// Read every product in file order
    ///
    /// Malformed lines are skipped with a warning. A missing file is an
    /// error; callers that only display data may treat it as empty.
    pub fn list_all(&self) -> InventoryResult<Vec<Product>> {
        let products = self.load()?;
        self.audit.record(
            Operation::List,
            format!("Listed {} products", products.len()),
        );
        Ok(products)
    }

    /// Get a product by ID
    pub fn find_by_id(&self, id: ProductId) -> InventoryResult<Product> {
        let found = self.load()?.into_iter().find(|p| p.id == id);
        self.record_search(&format!("ID={}", id), usize::from(found.is_some()));
        found.ok_or_else(|| InventoryError::product_not_found(id.to_string()))
    }

    /// Products whose name contains `text` (case-insensitive)
    pub fn find_by_name_contains(&self, text: &str) -> InventoryResult<Vec<Product>> {
        let needle = text.to_lowercase();
        let results: Vec<Product> = self
            .load()?
            .into_iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect();

        self.record_search(&format!("Name contains '{}'", text), results.len());
        Ok(results)
    }

    /// Products in `category` (case-insensitive exact match)
    pub fn find_by_category(&self, category: &str) -> InventoryResult<Vec<Product>> {
        let wanted = category.trim().to_lowercase();
        let results: Vec<Product> = self
            .load()?
            .into_iter()
            .filter(|p| p.category.to_lowercase() == wanted)
            .collect();

        self.record_search(&format!("Category={}", category), results.len());
        Ok(results)
    }

    /// Products with `quantity <= threshold`
    pub fn find_by_stock_at_most(&self, threshold: i64) -> InventoryResult<Vec<Product>> {
        let results: Vec<Product> = self
            .load()?
            .into_iter()
            .filter(|p| p.quantity <= threshold)
            .collect();

        self.record_search(&format!("Stock <= {}", threshold), results.len());
        Ok(results)
    }

    /// The id the next created product would get
    ///
    /// Nothing is reserved: two calls without a create in between return
    /// the same id.
    pub fn next_id(&self) -> InventoryResult<ProductId> {
        next_id_after(&self.load()?)
    }

    /// Create a product, assigning it the next free id
    pub fn create(&self, input: NewProduct) -> InventoryResult<Product> {
        let input = input
            .validated()
            .map_err(|e| InventoryError::Validation(e.to_string()))?;
        warn_on_separator(&input.name, &input.category);

        let existing = self.load()?;
        let id = next_id_after(&existing)?;
        if existing.iter().any(|p| p.id == id) {
            return Err(InventoryError::Duplicate {
                entity_type: "Product",
                identifier: id.to_string(),
            });
        }

        let product = input.into_product(id);
        append_line(&self.path, &codec::encode_line(&product))?;

        self.audit.record(
            Operation::Create,
            format!("Product ID={}, Name='{}'", product.id, product.name),
        );

        Ok(product)
    }

    /// Replace the supplied fields of product `id`
    ///
    /// The audit entry lists exactly the fields whose value changed.
    pub fn update(&self, id: ProductId, update: &ProductUpdate) -> InventoryResult<Product> {
        update
            .validate()
            .map_err(|e| InventoryError::Validation(e.to_string()))?;

        let mut products = self.load()?;
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| InventoryError::product_not_found(id.to_string()))?;

        let changes = product.apply(update);
        let updated = product.clone();

        if !changes.is_empty() {
            warn_on_separator(&updated.name, &updated.category);
            self.rewrite(&products)?;
        }

        let summary = if changes.is_empty() {
            "no changes".to_string()
        } else {
            changes
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        };
        self.audit.record(
            Operation::Update,
            format!("Product ID={} - Changes: {}", id, summary),
        );

        Ok(updated)
    }

    /// Remove product `id`, returning it
    pub fn delete(&self, id: ProductId) -> InventoryResult<Product> {
        let mut products = self.load()?;
        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| InventoryError::product_not_found(id.to_string()))?;

        let removed = products.remove(index);
        self.rewrite(&products)?;

        self.audit.record(
            Operation::Delete,
            format!("Product ID={}, Name='{}'", removed.id, removed.name),
        );

        Ok(removed)
    }

    /// Aggregate figures over the whole inventory
    ///
    /// Totals that do not fit in an `i64` are a `Validation` error.
    pub fn stats(&self) -> InventoryResult<InventoryStats> {
        let products = self.load()?;
        let categories: BTreeSet<String> =
            products.iter().map(|p| p.category.to_lowercase()).collect();

        let mut total_stock: i64 = 0;
        let mut total_value = Price::zero();
        for product in &products {
            total_stock = total_stock
                .checked_add(product.quantity)
                .ok_or_else(|| totals_overflow("stock"))?;
            total_value = product
                .stock_value()
                .and_then(|value| total_value.checked_add(value))
                .ok_or_else(|| totals_overflow("value"))?;
        }

        Ok(InventoryStats {
            product_count: products.len(),
            total_stock,
            total_value,
            category_count: categories.len(),
        })
    }

    /// Read and decode the file without touching the audit log
    fn load(&self) -> InventoryResult<Vec<Product>> {
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            InventoryError::Io(format!(
                "Failed to read inventory file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let mut lines = contents.lines().enumerate();
        if let Some((_, header)) = lines.next() {
            if header.trim() != HEADER {
                tracing::warn!(found = header, "unexpected inventory header, skipping it anyway");
            }
        }

        let mut products = Vec::new();
        for (index, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            match codec::decode_line(line) {
                Ok(product) => products.push(product),
                Err(e) => tracing::warn!(
                    path = %self.path.display(),
                    line = index + 1,
                    error = %e,
                    "skipping malformed inventory line"
                ),
            }
        }

        Ok(products)
    }

    /// Replace the file with the header followed by `products`
    ///
    /// Lines that failed to decode on load are not written back.
    fn rewrite(&self, products: &[Product]) -> InventoryResult<()> {
        let mut contents = String::with_capacity(HEADER.len() + 1 + products.len() * 32);
        contents.push_str(HEADER);
        contents.push('\n');
        for product in products {
            contents.push_str(&codec::encode_line(product));
            contents.push('\n');
        }

        write_file(&self.path, contents.as_bytes(), self.write_mode)
    }

    fn record_search(&self, criterion: &str, results: usize) {
        self.audit.record(
            Operation::Search,
            format!("Criterion='{}', Results={}", criterion, results),
        );
    }
}

fn next_id_after(products: &[Product]) -> InventoryResult<ProductId> {
    match products.iter().map(|p| p.id).max() {
        None => Ok(ProductId::FIRST),
        Some(max) => max
            .next()
            .ok_or_else(|| InventoryError::Validation("Product id space exhausted".into())),
    }
}

fn totals_overflow(what: &str) -> InventoryError {
    InventoryError::Validation(format!("Total inventory {} is out of range", what))
}

fn warn_on_separator(name: &str, category: &str) {
    if codec::contains_separator(name) || codec::contains_separator(category) {
        tracing::warn!(
            name,
            category,
            "field contains the separator; the stored row will not load back"
        );
    }
}
