use crate::money::Money;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    /// Required quote data is missing or out of range
    #[error("Validation error: {0}")]
    Validation(String),
    /// An asset or text field could not be painted
    #[error("Render error: {0}")]
    Render(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, QuoteError>;

/// One product entry in a quote.
///
/// The line total is always derived from quantity and unit price; a `total`
/// key in incoming JSON is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "productoId", alias = "product_id")]
    pub product_id: i64,
    #[serde(rename = "nombre", alias = "name")]
    pub name: String,
    #[serde(rename = "cantidad", alias = "quantity")]
    pub quantity: u32,
    #[serde(rename = "precioUnitario", alias = "unit_price")]
    pub unit_price: Money,
}

impl LineItem {
    pub fn new(product_id: i64, name: impl Into<String>, quantity: u32, unit_price: Money) -> Self {
        Self {
            product_id,
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    pub fn line_total(&self) -> Money {
        &self.unit_price * self.quantity
    }
}

/// A fully validated quote, ready for layout and rendering.
///
/// Only [`assemble`](crate::assemble) builds one, so every record has a
/// client and a date and every item has a positive quantity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteRecord {
    pub(crate) client: String,
    pub(crate) budget_label: String,
    pub(crate) date: NaiveDate,
    pub(crate) description: String,
    pub(crate) labor_cost: Money,
    pub(crate) items: Vec<LineItem>,
}

impl QuoteRecord {
    pub fn client(&self) -> &str {
        &self.client
    }

    pub fn budget_label(&self) -> &str {
        &self.budget_label
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn labor_cost(&self) -> &Money {
        &self.labor_cost
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Sum of every line total
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Subtotal plus labor cost
    pub fn total(&self) -> Money {
        self.subtotal() + self.labor_cost.clone()
    }
}

/// Product category as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "nombre", alias = "name")]
    pub name: String,
}

/// Catalog entry from the backend's product listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(rename = "nombre", alias = "name")]
    pub name: String,
    #[serde(rename = "precio", alias = "price")]
    pub price: Money,
    #[serde(rename = "cantidadStock", alias = "stock", default)]
    pub stock: i64,
    #[serde(rename = "descripcion", alias = "description", default)]
    pub description: Option<String>,
    #[serde(rename = "medidas", alias = "measures", default)]
    pub measures: Option<String>,
    #[serde(rename = "categoria", alias = "category", default)]
    pub category: Option<Category>,
}
