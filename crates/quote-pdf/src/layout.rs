//! Pagination of quote line items
//!
//! Items are split into contiguous fixed-size chunks of at most
//! `max_items_per_page`. Row heights are assumed constant, so a page full
//! of long product names is not re-balanced; cell text is clipped instead.

use crate::options::PageGeometry;
use crate::types::{LineItem, QuoteRecord};
use std::num::NonZeroUsize;

/// One output page of a quote, borrowing its slice of the record's items
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageDescription<'a> {
    pub index: usize,
    pub items: &'a [LineItem],
    /// Top of the item table, measured from the top edge of the page
    pub start_offset_mm: f32,
    pub is_first_page: bool,
    pub is_last_page: bool,
}

/// Number of pages needed for `item_count` items; never zero
pub fn page_count(item_count: usize, max_items_per_page: NonZeroUsize) -> usize {
    item_count.div_ceil(max_items_per_page.get()).max(1)
}

/// Split a quote into page descriptions.
///
/// An empty quote still yields one page so the letterhead, footer and
/// summary are rendered.
pub fn layout<'a>(record: &'a QuoteRecord, geometry: &PageGeometry) -> Vec<PageDescription<'a>> {
    let items = record.items();

    let chunks: Vec<&'a [LineItem]> = if items.is_empty() {
        vec![items]
    } else {
        items.chunks(geometry.max_items_per_page.get()).collect()
    };

    let last = chunks.len() - 1;
    chunks
        .into_iter()
        .enumerate()
        .map(|(index, items)| PageDescription {
            index,
            items,
            start_offset_mm: if index == 0 {
                geometry.first_page_start_mm()
            } else {
                geometry.continuation_start_mm()
            },
            is_first_page: index == 0,
            is_last_page: index == last,
        })
        .collect()
}
