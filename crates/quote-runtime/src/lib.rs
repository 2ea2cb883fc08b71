use std::path::PathBuf;

mod handlers;
mod worker;

// Re-export types from library crates
pub use quote_pdf::{ExportReport, Product, QuoteOptions, QuoteRecord};
pub use worker::worker_task;

/// Commands sent from a front-end to the worker
#[derive(Debug)]
pub enum QuoteCommand {
    /// Read a quote JSON (optionally replacing its items from a CSV) and
    /// assemble it
    LoadQuote {
        quote_path: PathBuf,
        items_path: Option<PathBuf>,
    },
    /// Read the product listing used for suggestions
    LoadCatalog {
        path: PathBuf,
    },
    /// Suggest catalog products whose name contains `term`
    SearchCatalog {
        term: String,
    },
    /// Render a quote and write it to disk
    Export {
        record: QuoteRecord,
        options: QuoteOptions,
        output_path: PathBuf,
    },
}

/// Updates sent from the worker back to the front-end
#[derive(Debug, Clone)]
pub enum QuoteUpdate {
    QuoteLoaded {
        record: QuoteRecord,
    },
    CatalogLoaded {
        product_count: usize,
    },
    SearchResults {
        term: String,
        products: Vec<Product>,
    },
    ExportComplete {
        report: ExportReport,
    },
    Error {
        message: String,
    },
}
