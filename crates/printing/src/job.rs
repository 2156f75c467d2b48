//! Print runs: lay orders out, render the document, hand it to a sink.

use std::path::{Path, PathBuf};

use tracing::info;

use receiptdesk_sales::Order;

use crate::config::PrintConfig;
use crate::error::PrintResult;
use crate::geometry::SheetTemplate;
use crate::metrics::TextMetricsSurface;
use crate::page::{Sheet, into_sheets};
use crate::paginate::{MeasureSurface, Paginator};
use crate::render::{DOCUMENT_TITLE, render_document};

/// Lay out every order, in input order, and pack the pages onto sheets.
///
/// The slot is measured once before any order is touched, so a degenerate
/// template fails even for an empty order list. Pages of consecutive orders
/// share sheets; any error aborts the whole run.
pub fn render_all_pages<'o, S: MeasureSurface>(
    orders: &'o [Order],
    template: &SheetTemplate,
    surface: S,
) -> PrintResult<Vec<Sheet<'o>>> {
    let slot = template.measure_slot()?;
    let mut paginator = Paginator::new(surface, slot);

    let mut pages = Vec::new();
    for order in orders {
        pages.extend(paginator.paginate_order(order)?);
    }

    let page_count = pages.len();
    let sheets = into_sheets(pages);
    info!(
        orders = orders.len(),
        pages = page_count,
        sheets = sheets.len(),
        slot_width = slot.width,
        slot_height = slot.height,
        "orders laid out"
    );

    Ok(sheets)
}

/// A rendered, printable document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintDocument {
    pub title: String,
    pub html: String,
    pub sheet_count: usize,
    pub page_count: usize,
}

/// Destination for rendered documents (a file, a print dialog, a test buffer).
pub trait PrintSink {
    fn submit(&mut self, document: &PrintDocument) -> PrintResult<()>;
}

/// Writes the document as an HTML file for the host browser to print.
#[derive(Debug, Clone)]
pub struct HtmlFileSink {
    path: PathBuf,
}

impl HtmlFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PrintSink for HtmlFileSink {
    fn submit(&mut self, document: &PrintDocument) -> PrintResult<()> {
        std::fs::write(&self.path, &document.html)?;
        info!(path = %self.path.display(), sheets = document.sheet_count, "print document written");
        Ok(())
    }
}

/// Keeps submitted documents in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub documents: Vec<PrintDocument>,
}

impl PrintSink for MemorySink {
    fn submit(&mut self, document: &PrintDocument) -> PrintResult<()> {
        self.documents.push(document.clone());
        Ok(())
    }
}

/// One configured print service. Each run builds a fresh measurement surface,
/// so concurrent jobs never share layout state.
#[derive(Debug, Clone, Default)]
pub struct PrintJob {
    config: PrintConfig,
}

impl PrintJob {
    pub fn new(config: PrintConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PrintConfig {
        &self.config
    }

    pub fn render_all_pages<'o>(&self, orders: &'o [Order]) -> PrintResult<Vec<Sheet<'o>>> {
        render_all_pages(
            orders,
            &self.config.sheet,
            TextMetricsSurface::new(&self.config),
        )
    }

    /// Lay out and render without submitting.
    pub fn prepare(&self, orders: &[Order]) -> PrintResult<PrintDocument> {
        let sheets = self.render_all_pages(orders)?;
        let page_count = sheets.iter().map(Sheet::filled).sum();

        Ok(PrintDocument {
            title: DOCUMENT_TITLE.to_string(),
            html: render_document(&sheets, &self.config),
            sheet_count: sheets.len(),
            page_count,
        })
    }

    pub fn run(&self, orders: &[Order], sink: &mut dyn PrintSink) -> PrintResult<PrintDocument> {
        let document = self.prepare(orders)?;
        sink.submit(&document)?;
        Ok(document)
    }
}
