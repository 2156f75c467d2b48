//! Pages and sheets produced by a print run.
//!
//! Both are transient views borrowing the orders being printed; they are
//! rebuilt on every print request and never stored.

use std::ops::Range;

use receiptdesk_core::OrderId;
use receiptdesk_sales::{LineItem, Order};

use crate::geometry::SLOTS_PER_SHEET;

/// One order's contiguous slice of line items laid out for a single slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    order: &'a Order,
    range: Range<usize>,
    start_index: usize,
    is_continuation: bool,
    is_last_page: bool,
}

impl<'a> Page<'a> {
    pub(crate) fn new(
        order: &'a Order,
        range: Range<usize>,
        start_index: usize,
        is_continuation: bool,
        is_last_page: bool,
    ) -> Self {
        Self {
            order,
            range,
            start_index,
            is_continuation,
            is_last_page,
        }
    }

    pub fn order(&self) -> &'a Order {
        self.order
    }

    pub fn order_id(&self) -> OrderId {
        self.order.id_typed()
    }

    pub fn items(&self) -> &'a [LineItem] {
        &self.order.items()[self.range.clone()]
    }

    /// Position of this page's items within the order.
    pub fn item_range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Zero-based number of the first item on this page.
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn is_continuation(&self) -> bool {
        self.is_continuation
    }

    /// Whether the total and signature block belong on this page.
    pub fn is_last_page(&self) -> bool {
        self.is_last_page
    }

    /// Items paired with their printed (1-based, order-wide) row number.
    pub fn numbered_items(&self) -> impl Iterator<Item = (usize, &'a LineItem)> + 'a {
        let first = self.start_index + 1;
        self.items()
            .iter()
            .enumerate()
            .map(move |(i, item)| (first + i, item))
    }
}

/// One physical sheet: four slots in row-major order, unfilled slots empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet<'a> {
    slots: [Option<Page<'a>>; SLOTS_PER_SHEET],
}

impl<'a> Sheet<'a> {
    pub fn slots(&self) -> &[Option<Page<'a>>; SLOTS_PER_SHEET] {
        &self.slots
    }

    pub fn pages(&self) -> impl Iterator<Item = &Page<'a>> {
        self.slots.iter().flatten()
    }

    pub fn filled(&self) -> usize {
        self.pages().count()
    }
}

/// Chunk a flat page list into sheets of four, keeping page order. A final
/// partial sheet has empty trailing slots.
pub fn into_sheets(pages: Vec<Page<'_>>) -> Vec<Sheet<'_>> {
    let mut sheets = Vec::with_capacity(pages.len().div_ceil(SLOTS_PER_SHEET));
    let mut pages = pages.into_iter().peekable();

    while pages.peek().is_some() {
        let slots = std::array::from_fn(|_| pages.next());
        sheets.push(Sheet { slots });
    }

    sheets
}
