use crate::QuoteUpdate;
use quote_pdf::{Product, QuoteOptions, QuoteRecord};
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Products loaded by the last successful `LoadCatalog`
#[derive(Default)]
pub struct CatalogStore {
    products: Vec<Product>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

pub async fn handle_load_quote(
    quote_path: PathBuf,
    items_path: Option<PathBuf>,
    update_tx: &mpsc::UnboundedSender<QuoteUpdate>,
) {
    let result: quote_pdf::Result<QuoteRecord> = async {
        let mut input = quote_pdf::load_quote_input(&quote_path).await?;
        if let Some(items_path) = items_path {
            input.items = quote_pdf::load_items_from_csv(&items_path).await?;
        }
        quote_pdf::assemble(input)
    }
    .await;

    match result {
        Ok(record) => {
            let _ = update_tx.send(QuoteUpdate::QuoteLoaded { record });
        }
        Err(e) => {
            let _ = update_tx.send(QuoteUpdate::Error {
                message: format!("Failed to load quote: {e}"),
            });
        }
    }
}

pub async fn handle_load_catalog(
    path: PathBuf,
    store: &mut CatalogStore,
    update_tx: &mpsc::UnboundedSender<QuoteUpdate>,
) {
    match quote_pdf::load_catalog(&path).await {
        Ok(products) => {
            let product_count = products.len();
            store.products = products;
            let _ = update_tx.send(QuoteUpdate::CatalogLoaded { product_count });
        }
        Err(e) => {
            let _ = update_tx.send(QuoteUpdate::Error {
                message: format!("Failed to load catalog: {e}"),
            });
        }
    }
}

pub fn handle_search(
    term: String,
    store: &CatalogStore,
    update_tx: &mpsc::UnboundedSender<QuoteUpdate>,
) {
    let products = quote_pdf::search(&store.products, &term)
        .into_iter()
        .cloned()
        .collect();
    let _ = update_tx.send(QuoteUpdate::SearchResults { term, products });
}

pub async fn handle_export(
    record: QuoteRecord,
    options: QuoteOptions,
    output_path: PathBuf,
    update_tx: &mpsc::UnboundedSender<QuoteUpdate>,
) {
    match quote_pdf::export_quote(&record, &options, &output_path).await {
        Ok(report) => {
            let _ = update_tx.send(QuoteUpdate::ExportComplete { report });
        }
        Err(e) => {
            let _ = update_tx.send(QuoteUpdate::Error {
                message: format!("Failed to generate PDF: {e}"),
            });
        }
    }
}
