mod assemble;
mod catalog;
pub mod constants;
mod csv_items;
mod draft;
mod export;
mod input;
mod layout;
mod metrics;
mod money;
mod options;
mod render;
mod stats;
mod types;

pub use assemble::assemble;
pub use catalog::{load_catalog, search};
pub use csv_items::load_items_from_csv;
pub use draft::QuoteDraft;
pub use export::{ExportReport, default_output_path, export_quote, render_quote_bytes};
pub use input::{QuoteInput, load_quote_input, parse_quote_date};
pub use layout::{PageDescription, layout, page_count};
pub use money::Money;
pub use options::*;
pub use render::{ImageAssets, render, table_row};
pub use stats::{LayoutSummary, summarize, summary_lines};
pub use types::*;
