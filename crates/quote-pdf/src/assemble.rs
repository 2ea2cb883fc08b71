use crate::input::QuoteInput;
use crate::money::Money;
use crate::types::{QuoteError, QuoteRecord, Result};

/// Gather the raw quote fields into an immutable [`QuoteRecord`].
///
/// Labor cost defaults to zero and an empty item list is allowed. Fails
/// with [`QuoteError::Validation`] when the client or the date is missing,
/// or when an amount or quantity is out of range.
pub fn assemble(input: QuoteInput) -> Result<QuoteRecord> {
    let client = input
        .client
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .ok_or_else(|| QuoteError::Validation("client is required".to_string()))?;

    let date = input
        .date
        .ok_or_else(|| QuoteError::Validation("date is required".to_string()))?;

    let labor_cost = input.labor_cost.unwrap_or_else(Money::zero);
    if labor_cost.is_negative() {
        return Err(QuoteError::Validation(format!(
            "labor cost cannot be negative ({})",
            labor_cost
        )));
    }

    for (i, item) in input.items.iter().enumerate() {
        if item.quantity == 0 {
            return Err(QuoteError::Validation(format!(
                "item {} ({}) must have a quantity of at least 1",
                i + 1,
                item.name
            )));
        }
        if item.unit_price.is_negative() {
            return Err(QuoteError::Validation(format!(
                "item {} ({}) has a negative unit price",
                i + 1,
                item.name
            )));
        }
    }

    let record = QuoteRecord {
        client,
        budget_label: input.budget_label.unwrap_or_default(),
        date,
        description: input.description.unwrap_or_default(),
        labor_cost,
        items: input.items,
    };

    log::debug!(
        "Assembled quote for {} with {} items, total {}",
        record.client,
        record.items.len(),
        record.total()
    );

    Ok(record)
}
