use crate::assemble::assemble;
use crate::input::QuoteInput;
use crate::money::Money;
use crate::types::{LineItem, Product, QuoteError, QuoteRecord, Result};
use chrono::NaiveDate;

/// Editable quote state behind a quote form.
///
/// Items are added from catalog products and their quantities edited in
/// place; line totals are never stored, so they cannot drift from
/// quantity × unit price.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteDraft {
    pub client: String,
    pub budget_label: String,
    pub date: Option<NaiveDate>,
    pub description: String,
    pub labor_cost: Money,
    items: Vec<LineItem>,
}

impl QuoteDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a product with quantity 1 at its catalog price
    pub fn add_product(&mut self, product: &Product) -> &LineItem {
        self.items.push(LineItem::new(
            product.id,
            product.name.clone(),
            1,
            product.price.clone(),
        ));
        &self.items[self.items.len() - 1]
    }

    pub fn set_quantity(&mut self, index: usize, quantity: u32) -> Result<()> {
        if quantity == 0 {
            return Err(QuoteError::Validation(
                "quantity must be at least 1".to_string(),
            ));
        }
        let len = self.items.len();
        let item = self.items.get_mut(index).ok_or_else(|| {
            QuoteError::Validation(format!("no item at position {index} (quote has {len})"))
        })?;
        item.quantity = quantity;
        Ok(())
    }

    pub fn remove_item(&mut self, index: usize) -> Result<LineItem> {
        if index >= self.items.len() {
            return Err(QuoteError::Validation(format!(
                "no item at position {index} (quote has {})",
                self.items.len()
            )));
        }
        Ok(self.items.remove(index))
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Running subtotal for display while editing
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    pub fn into_input(self) -> QuoteInput {
        let non_empty = |s: String| if s.trim().is_empty() { None } else { Some(s) };
        QuoteInput {
            client: non_empty(self.client),
            budget_label: non_empty(self.budget_label),
            date: self.date,
            description: non_empty(self.description),
            labor_cost: Some(self.labor_cost),
            items: self.items,
        }
    }

    /// Validate the draft and freeze it into a [`QuoteRecord`]
    pub fn submit(self) -> Result<QuoteRecord> {
        assemble(self.into_input())
    }
}
