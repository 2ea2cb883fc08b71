use crate::types::{Product, QuoteError, Result};
use std::path::Path;

/// Load the product listing exported from the backend (a JSON array)
pub async fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<Product>> {
    let path = path.as_ref().to_owned();

    let bytes = tokio::fs::read(&path).await?;

    let products = tokio::task::spawn_blocking(move || {
        serde_json::from_slice::<Vec<Product>>(&bytes).map_err(QuoteError::from)
    })
    .await??;

    log::info!("Loaded {} products from {}", products.len(), path.display());
    Ok(products)
}

/// Products whose name contains `term`, ignoring case.
///
/// An empty term yields no suggestions.
pub fn search<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return Vec::new();
    }
    products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&term))
        .collect()
}
