//! Static text metrics measurement surface.
//!
//! Lays a receipt page out the way the print stylesheet does (block flow,
//! greedy word wrap, fixed table column shares) using per-glyph width
//! estimates in em units. The estimates are for a sans-serif face at the
//! stylesheet's sizes; they are deliberately a little generous so pages that
//! measure as fitting also fit when printed.

use crate::config::{PrintConfig, StoreHeader};
use crate::content::{COLUMN_HEADERS, ReceiptContent, SIGNATURE_LINE, SIGNATURE_NOTE};
use crate::error::{PrintError, PrintResult};
use crate::page::Page;
use crate::paginate::MeasureSurface;

// Stylesheet values, CSS px.
pub(crate) const RECEIPT_BORDER: f32 = 1.0;
pub(crate) const RECEIPT_PADDING: f32 = 6.0;
pub(crate) const BASE_FONT: f32 = 10.0;
pub(crate) const SMALL_FONT: f32 = 9.0;
const TITLE_FONT: f32 = BASE_FONT * 0.83;
const TOTAL_FONT: f32 = BASE_FONT * 1.17;
const LINE_HEIGHT: f32 = 1.2;
const BLOCK_GAP: f32 = 6.0;
const RULE: f32 = 1.0;
const CELL_PAD_Y: f32 = 2.0;
const CELL_PAD_X: f32 = 4.0;
pub(crate) const SIGNATURE_RULE_WIDTH: f32 = 120.0;
const SIGNATURE_RULE_GAP: f32 = 10.0;
/// Blank lines between the signature note and the signature rule.
const SIGNATURE_BLANK_LINES: usize = 3;

/// Share of the table width per column (`#`, description, qty, price, amount).
pub(crate) const COLUMN_SHARES: [f32; 5] = [0.08, 0.44, 0.16, 0.16, 0.16];

const BOLD_FACTOR: f32 = 1.06;

/// Measurement surface backed by static glyph metrics.
///
/// Holds the store header and currency so measured pages carry the same text
/// as printed ones. Not shared between print runs.
#[derive(Debug, Clone)]
pub struct TextMetricsSurface {
    store: StoreHeader,
    currency: String,
    trials: u64,
}

impl TextMetricsSurface {
    pub fn new(config: &PrintConfig) -> Self {
        Self {
            store: config.store.clone(),
            currency: config.currency_symbol.clone(),
            trials: 0,
        }
    }

    /// Number of pages measured so far.
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Natural height of fully built page content at the given outer width.
    pub fn content_height(&self, content: &ReceiptContent, width: f32) -> PrintResult<f32> {
        if !width.is_finite() || width <= 0.0 {
            return Err(PrintError::measurement(format!(
                "surface width {width} is not a usable size"
            )));
        }

        let chrome = 2.0 * (RECEIPT_BORDER + RECEIPT_PADDING);
        let inner = width - chrome;
        if inner <= 0.0 {
            return Err(PrintError::measurement(format!(
                "surface width {width} leaves no room inside the receipt border"
            )));
        }

        let mut height = chrome;
        height += header_height(content, inner);
        height += info_height(content, inner);
        height += table_height(content, inner);
        height += match content.total_line() {
            Some(total) => footer_height(&total, inner),
            None => BLOCK_GAP,
        };

        Ok(height)
    }
}

impl MeasureSurface for TextMetricsSurface {
    fn measure(&mut self, page: &Page<'_>, width: f32) -> PrintResult<f32> {
        self.trials += 1;
        let content = ReceiptContent::build(page, &self.store, &self.currency);
        self.content_height(&content, width)
    }
}

fn line_px(font: f32) -> f32 {
    font * LINE_HEIGHT
}

fn header_height(c: &ReceiptContent, inner: f32) -> f32 {
    let base = line_px(BASE_FONT);
    let mut h = 0.0;
    h += wrapped_lines(&c.store_name, inner, BASE_FONT, true) as f32 * base;
    h += wrapped_lines(&c.phone_line(), inner, BASE_FONT, false) as f32 * base;
    h += wrapped_lines(&c.store_address, inner, BASE_FONT, false) as f32 * base;
    h += wrapped_lines(&c.title, inner, TITLE_FONT, true) as f32 * line_px(TITLE_FONT);
    h + RULE + BLOCK_GAP
}

fn info_height(c: &ReceiptContent, inner: f32) -> f32 {
    let column = inner / 2.0;
    let left = wrapped_lines(&c.customer_line(), column, SMALL_FONT, false)
        + wrapped_lines(&c.address, column, SMALL_FONT, false);
    let right = wrapped_lines(&c.reference_line(), column, SMALL_FONT, false)
        + wrapped_lines(&c.date_line(), column, SMALL_FONT, false);
    left.max(right) as f32 * line_px(SMALL_FONT) + BLOCK_GAP
}

fn table_height(c: &ReceiptContent, inner: f32) -> f32 {
    let mut h = row_height(&COLUMN_HEADERS, inner, true);
    for row in &c.rows {
        h += row_height(&row.cells(), inner, false);
    }
    // closing border of the collapsed table
    h + RULE
}

fn row_height(cells: &[&str; 5], inner: f32, bold: bool) -> f32 {
    let lines = cells
        .iter()
        .zip(COLUMN_SHARES)
        .map(|(text, share)| {
            let width = (inner * share - 2.0 * CELL_PAD_X - RULE).max(1.0);
            wrapped_lines(text, width, SMALL_FONT, bold).max(1)
        })
        .max()
        .unwrap_or(1);
    lines as f32 * line_px(SMALL_FONT) + 2.0 * CELL_PAD_Y + RULE
}

fn footer_height(total_line: &str, inner: f32) -> f32 {
    // total heading: gap above, heading line, default heading margins
    let total = BLOCK_GAP
        + wrapped_lines(total_line, inner, TOTAL_FONT, true) as f32 * line_px(TOTAL_FONT)
        + 2.0 * TOTAL_FONT;

    let small = line_px(SMALL_FONT);
    let signature = wrapped_lines(SIGNATURE_NOTE, inner, SMALL_FONT, false) as f32 * small
        + SIGNATURE_BLANK_LINES as f32 * small
        + SIGNATURE_RULE_GAP
        + RULE
        + wrapped_lines(SIGNATURE_LINE, SIGNATURE_RULE_WIDTH, SMALL_FONT, false) as f32 * small;

    total + signature
}

/// Estimated advance width of a glyph, in em.
fn glyph_em(c: char) -> f32 {
    match c {
        ' ' => 0.28,
        'i' | 'j' | 'l' | 'I' | '.' | ',' | ':' | ';' | '\'' | '|' | '!' => 0.28,
        '(' | ')' | '[' | ']' | 'f' | 't' | 'r' | '-' | '/' => 0.34,
        'm' | 'w' => 0.84,
        'M' | 'W' => 0.9,
        '#' | '$' | '0'..='9' => 0.56,
        'A'..='Z' => 0.68,
        'a'..='z' => 0.54,
        c if c.is_ascii() => 0.6,
        // currency signs, accented letters
        c if (c as u32) < 0x2000 => 0.62,
        '₱' => 0.62,
        // emoji and other wide symbols
        _ => 1.0,
    }
}

pub(crate) fn text_width(text: &str, font: f32, bold: bool) -> f32 {
    let em: f32 = text.chars().map(glyph_em).sum();
    let scale = if bold { BOLD_FACTOR } else { 1.0 };
    em * font * scale
}

/// Greedy word wrap line count. Blank text takes no lines; a word wider than
/// the box stays on one line (it overflows sideways, as in the browser).
pub(crate) fn wrapped_lines(text: &str, width: f32, font: f32, bold: bool) -> usize {
    let space = text_width(" ", font, bold);
    let mut lines = 0usize;
    let mut current = 0.0f32;

    for word in text.split_whitespace() {
        let w = text_width(word, font, bold);
        if lines == 0 {
            lines = 1;
            current = w;
        } else if current + space + w > width {
            lines += 1;
            current = w;
        } else {
            current += space + w;
        }
    }

    lines
}
