//! Product model
//!
//! Represents one inventory entry together with the input shapes used to
//! create and partially update it.

use std::fmt;

use super::ids::ProductId;
use super::price::Price;

/// A product stored in the inventory file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Unique identifier, assigned by the store
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Category, compared case-insensitively when filtering
    pub category: String,

    /// Unit price
    pub price: Price,

    /// Units in stock
    pub quantity: i64,
}

impl Product {
    /// Create a product with all fields given
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Price,
        quantity: i64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            price,
            quantity,
        }
    }

    /// Stock value of this product (price x quantity), `None` on overflow
    pub fn stock_value(&self) -> Option<Price> {
        self.price.checked_times(self.quantity)
    }

    /// Validate the product
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        validate_name(&self.name)?;
        validate_category(&self.category)?;
        validate_price(self.price)?;
        validate_quantity(self.quantity)
    }

    /// Apply the supplied fields of `update`, returning the list of changes
    ///
    /// Fields that are absent, or present but equal to the current value,
    /// produce no change entry.
    pub fn apply(&mut self, update: &ProductUpdate) -> Vec<FieldChange> {
        let mut changes = Vec::new();

        if let Some(name) = update.name.as_deref().map(str::trim) {
            if name != self.name {
                changes.push(FieldChange::quoted(Field::Name, &self.name, name));
                self.name = name.to_string();
            }
        }

        if let Some(category) = update.category.as_deref().map(str::trim) {
            if category != self.category {
                changes.push(FieldChange::quoted(Field::Category, &self.category, category));
                self.category = category.to_string();
            }
        }

        if let Some(price) = update.price {
            if price != self.price {
                changes.push(FieldChange::plain(Field::Price, self.price, price));
                self.price = price;
            }
        }

        if let Some(quantity) = update.quantity {
            if quantity != self.quantity {
                changes.push(FieldChange::plain(Field::Quantity, self.quantity, quantity));
                self.quantity = quantity;
            }
        }

        changes
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} [{}] {} x{}",
            self.id, self.name, self.category, self.price, self.quantity
        )
    }
}

/// Input for creating a product; the id is assigned by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: Price,
    pub quantity: i64,
}

impl NewProduct {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: Price,
        quantity: i64,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price,
            quantity,
        }
    }

    /// Validate and normalize (trim) the input
    pub fn validated(self) -> Result<Self, ProductValidationError> {
        let name = self.name.trim().to_string();
        let category = self.category.trim().to_string();
        validate_name(&name)?;
        validate_category(&category)?;
        validate_price(self.price)?;
        validate_quantity(self.quantity)?;
        Ok(Self {
            name,
            category,
            ..self
        })
    }

    /// Build the stored product under `id`
    pub fn into_product(self, id: ProductId) -> Product {
        Product::new(id, self.name, self.category, self.price, self.quantity)
    }
}

/// Partial update of a product; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Price>,
    pub quantity: Option<i64>,
}

impl ProductUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// True when no field is supplied
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category.is_none() && self.price.is_none() && self.quantity.is_none()
    }

    /// Validate every supplied field
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(category) = &self.category {
            validate_category(category)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        if let Some(quantity) = self.quantity {
            validate_quantity(quantity)?;
        }
        Ok(())
    }
}

/// Product fields, labelled after the columns of the inventory file header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Category,
    Price,
    Quantity,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Nombre",
            Self::Category => "Categoria",
            Self::Price => "Precio",
            Self::Quantity => "Stock",
        }
    }
}

/// One changed field with its rendered before/after values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: Field,
    pub before: String,
    pub after: String,
}

impl FieldChange {
    fn quoted(field: Field, before: &str, after: &str) -> Self {
        Self {
            field,
            before: format!("'{}'", before),
            after: format!("'{}'", after),
        }
    }

    fn plain(field: Field, before: impl fmt::Display, after: impl fmt::Display) -> Self {
        Self {
            field,
            before: before.to_string(),
            after: after.to_string(),
        }
    }
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.field.label(), self.before, self.after)
    }
}

fn validate_name(name: &str) -> Result<(), ProductValidationError> {
    if name.trim().is_empty() {
        return Err(ProductValidationError::EmptyName);
    }
    Ok(())
}

fn validate_category(category: &str) -> Result<(), ProductValidationError> {
    if category.trim().is_empty() {
        return Err(ProductValidationError::EmptyCategory);
    }
    Ok(())
}

fn validate_price(price: Price) -> Result<(), ProductValidationError> {
    if price.is_negative() {
        return Err(ProductValidationError::NegativePrice(price));
    }
    Ok(())
}

fn validate_quantity(quantity: i64) -> Result<(), ProductValidationError> {
    if quantity < 0 {
        return Err(ProductValidationError::NegativeQuantity(quantity));
    }
    Ok(())
}

/// Validation errors for products
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductValidationError {
    EmptyName,
    EmptyCategory,
    NegativePrice(Price),
    NegativeQuantity(i64),
}

impl fmt::Display for ProductValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Product name cannot be empty"),
            Self::EmptyCategory => write!(f, "Product category cannot be empty"),
            Self::NegativePrice(price) => write!(f, "Price cannot be negative: {}", price),
            Self::NegativeQuantity(qty) => write!(f, "Quantity cannot be negative: {}", qty),
        }
    }
}

impl std::error::Error for ProductValidationError {}
