//! `receiptdesk-printing`: delivery receipt print layout.
//!
//! Orders are laid out onto A4 sheets holding four quarter-page slots. Each
//! order is split into pages that fit one slot, with running item numbers and
//! the total/signature block only on the order's last page.
//!
//! The fitting algorithm ([`Paginator`]) only asks a [`MeasureSurface`] how
//! tall a candidate page renders; [`TextMetricsSurface`] answers that from
//! static glyph metrics, tests plug in their own.

pub mod config;
pub mod content;
pub mod error;
pub mod geometry;
pub mod job;
pub mod metrics;
pub mod page;
pub mod paginate;
pub mod render;

pub use config::{PrintConfig, StoreHeader};
pub use content::{COLUMN_HEADERS, ReceiptContent, RowContent};
pub use error::{PrintError, PrintResult};
pub use geometry::{SLOT_COLUMNS, SLOT_ROWS, SLOTS_PER_SHEET, SheetTemplate, SlotBox};
pub use job::{
    HtmlFileSink, MemorySink, PrintDocument, PrintJob, PrintSink, render_all_pages,
};
pub use metrics::TextMetricsSurface;
pub use page::{Page, Sheet, into_sheets};
pub use paginate::{MAX_ITEMS_PER_PAGE, MeasureSurface, Paginator};
pub use render::render_document;
