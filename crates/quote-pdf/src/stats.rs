use crate::layout::layout;
use crate::money::Money;
use crate::options::PageGeometry;
use crate::types::QuoteRecord;

/// Pagination and totals of a quote, without rendering it
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSummary {
    pub item_count: usize,
    pub pages: usize,
    /// Number of items on each page, in order
    pub items_per_page: Vec<usize>,
    pub subtotal: Money,
    pub labor_cost: Money,
    pub total: Money,
}

/// Calculate pagination and totals for a quote
pub fn summarize(record: &QuoteRecord, geometry: &PageGeometry) -> LayoutSummary {
    let pages = layout(record, geometry);

    LayoutSummary {
        item_count: record.items().len(),
        pages: pages.len(),
        items_per_page: pages.iter().map(|p| p.items.len()).collect(),
        subtotal: record.subtotal(),
        labor_cost: record.labor_cost().clone(),
        total: record.total(),
    }
}

/// The three right-aligned lines printed after the last table
pub fn summary_lines(record: &QuoteRecord, currency_symbol: &str) -> [String; 3] {
    use crate::constants::{LABOR_LABEL, SUBTOTAL_LABEL, TOTAL_LABEL};

    [
        format!(
            "{}: {}",
            SUBTOTAL_LABEL,
            record.subtotal().display_with(currency_symbol)
        ),
        format!(
            "{}: {}",
            LABOR_LABEL,
            record.labor_cost().display_with(currency_symbol)
        ),
        format!(
            "{}: {}",
            TOTAL_LABEL,
            record.total().display_with(currency_symbol)
        ),
    ]
}
