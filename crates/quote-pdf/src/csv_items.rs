use crate::money::Money;
use crate::types::{LineItem, QuoteError, Result};
use std::path::Path;

/// Load line items from a CSV file.
///
/// Expects a header row followed by `product_id,name,quantity,unit_price`
/// records.
pub async fn load_items_from_csv(path: impl AsRef<Path>) -> Result<Vec<LineItem>> {
    let path = path.as_ref().to_owned();

    let contents = tokio::fs::read_to_string(&path).await?;

    let items = tokio::task::spawn_blocking(move || parse_items(&contents)).await??;

    log::debug!("Loaded {} items from {}", items.len(), path.display());
    Ok(items)
}

fn parse_items(contents: &str) -> Result<Vec<LineItem>> {
    let mut reader = csv::Reader::from_reader(contents.as_bytes());
    let mut items = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let record = result?;
        // Header is line 1
        let line = row + 2;
        if record.len() < 4 {
            return Err(QuoteError::Validation(format!(
                "line {line}: expected 4 columns, found {}",
                record.len()
            )));
        }

        let product_id = record[0].trim().parse::<i64>().map_err(|e| {
            QuoteError::Validation(format!("line {line}: invalid product id: {e}"))
        })?;
        let quantity = record[2].trim().parse::<u32>().map_err(|e| {
            QuoteError::Validation(format!("line {line}: invalid quantity: {e}"))
        })?;
        let unit_price = record[3].parse::<Money>().map_err(|e| {
            QuoteError::Validation(format!("line {line}: invalid unit price: {e}"))
        })?;

        items.push(LineItem::new(
            product_id,
            record[1].trim(),
            quantity,
            unit_price,
        ));
    }

    Ok(items)
}
