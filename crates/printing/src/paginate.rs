//! Greedy slot-filling pagination.
//!
//! Pages are grown one item at a time. After every growth the candidate page
//! is measured; the first candidate that overflows the slot ends the page at
//! the previous size. An item that overflows on its own is placed alone.

use tracing::{debug, warn};

use receiptdesk_sales::Order;

use crate::error::{PrintError, PrintResult};
use crate::geometry::SlotBox;
use crate::page::Page;

/// Upper bound on items a single page may hold. Reaching it means the
/// measurement surface is not reporting overflow.
pub const MAX_ITEMS_PER_PAGE: usize = 5000;

/// Answers "how tall does this page render at this width?".
///
/// Implementations lay out the full receipt page (header, info block, item
/// rows and, on the last page, total and signature) and return its natural
/// height in CSS pixels. A surface is used by one pagination run at a time.
pub trait MeasureSurface {
    fn measure(&mut self, page: &Page<'_>, width: f32) -> PrintResult<f32>;
}

impl<S: MeasureSurface + ?Sized> MeasureSurface for &mut S {
    fn measure(&mut self, page: &Page<'_>, width: f32) -> PrintResult<f32> {
        (**self).measure(page, width)
    }
}

/// Splits orders into slot-sized pages using a measurement surface.
#[derive(Debug)]
pub struct Paginator<S> {
    surface: S,
    slot: SlotBox,
}

impl<S: MeasureSurface> Paginator<S> {
    pub fn new(surface: S, slot: SlotBox) -> Self {
        Self { surface, slot }
    }

    pub fn slot(&self) -> SlotBox {
        self.slot
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Lay out one order.
    ///
    /// The returned pages partition the order's items in order; exactly one is
    /// marked last; numbering runs `0..N` across them. An order without items
    /// still gets one (last) page so the total and signature are printed.
    pub fn paginate_order<'o>(&mut self, order: &'o Order) -> PrintResult<Vec<Page<'o>>> {
        let n = order.items().len();
        if n == 0 {
            return Ok(vec![Page::new(order, 0..0, 0, false, true)]);
        }

        let mut pages = Vec::new();
        let mut start = 0usize;
        let mut start_index = 0usize;

        while start < n {
            let is_continuation = start != 0;
            let mut end = start;

            while end < n {
                let candidate = end + 1;
                if candidate - start > MAX_ITEMS_PER_PAGE {
                    return Err(PrintError::SafetyLimit {
                        receipt_number: order.receipt_number().to_string(),
                        limit: MAX_ITEMS_PER_PAGE,
                    });
                }

                let trial = Page::new(
                    order,
                    start..candidate,
                    start_index,
                    is_continuation,
                    candidate == n,
                );
                if !self.fits(&trial)? {
                    break;
                }
                end = candidate;
            }

            if end == start {
                warn!(
                    receipt = order.receipt_number(),
                    item = start,
                    "line item overflows an empty slot; placing it alone"
                );
                end = start + 1;
            }

            let page = Page::new(order, start..end, start_index, is_continuation, end >= n);
            debug!(
                receipt = order.receipt_number(),
                first = start_index,
                items = end - start,
                last = page.is_last_page(),
                "page committed"
            );
            pages.push(page);

            let placed = end - start;
            start += placed;
            start_index += placed;
        }

        Ok(pages)
    }

    fn fits(&mut self, page: &Page<'_>) -> PrintResult<bool> {
        let height = self.surface.measure(page, self.slot.width)?;
        if !height.is_finite() || height < 0.0 {
            return Err(PrintError::measurement(format!(
                "surface reported unusable height {height}"
            )));
        }
        Ok(height <= self.slot.height)
    }
}
