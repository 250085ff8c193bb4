//! Core data models for the inventory
//!
//! Products, their identifiers and prices, and the input shapes used to
//! create and update them.

pub mod ids;
pub mod price;
pub mod product;

pub use ids::ProductId;
pub use price::Price;
pub use product::{
    Field, FieldChange, NewProduct, Product, ProductUpdate, ProductValidationError,
};
