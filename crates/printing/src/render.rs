//! HTML rendering of laid-out sheets.
//!
//! The document is self-contained: inline stylesheet sized from the sheet
//! template, one `.sheet` per physical page, four `.slot` cells each. The
//! stylesheet mirrors the values [`crate::metrics`] measures with.

use std::fmt::Write as _;

use crate::config::PrintConfig;
use crate::content::{COLUMN_HEADERS, ReceiptContent, SIGNATURE_LINE, SIGNATURE_NOTE};
use crate::geometry::{SLOT_COLUMNS, SLOT_ROWS};
use crate::metrics::{
    BASE_FONT, COLUMN_SHARES, RECEIPT_BORDER, RECEIPT_PADDING, SIGNATURE_RULE_WIDTH, SMALL_FONT,
};
use crate::page::{Page, Sheet};

pub const DOCUMENT_TITLE: &str = "Delivery Receipts";

/// Render sheets into a printable HTML document.
pub fn render_document(sheets: &[Sheet<'_>], config: &PrintConfig) -> String {
    let mut out = String::with_capacity(4096 + sheets.len() * 8192);

    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", esc(DOCUMENT_TITLE));
    out.push_str("<style>\n");
    write_styles(&mut out, config);
    out.push_str("</style>\n</head>\n<body>\n");

    for sheet in sheets {
        out.push_str("<div class=\"sheet\">\n");
        for slot in sheet.slots() {
            match slot {
                Some(page) => {
                    out.push_str("<div class=\"slot\">");
                    write_receipt(&mut out, page, config);
                    out.push_str("</div>\n");
                }
                None => out.push_str("<div class=\"slot\"></div>\n"),
            }
        }
        out.push_str("</div>\n");
    }

    if config.auto_print {
        out.push_str("<script>window.addEventListener('load', () => window.print());</script>\n");
    }
    out.push_str("</body>\n</html>\n");
    out
}

fn write_styles(out: &mut String, config: &PrintConfig) {
    let t = &config.sheet;
    let col = |i: usize| COLUMN_SHARES[i] * 100.0;

    let _ = write!(
        out,
        "@page {{ size: A4; margin: {margin}mm; }}\n\
         * {{ box-sizing: border-box; }}\n\
         body {{ margin: 0; font-family: Arial, Helvetica, sans-serif; font-size: {base}px; line-height: 1.2; }}\n\
         .sheet {{ width: {w}mm; height: {h}mm; display: grid; \
         grid-template-columns: repeat({cols}, 1fr); grid-template-rows: repeat({rows}, 1fr); \
         page-break-after: always; break-after: page; }}\n\
         .sheet:last-child {{ page-break-after: auto; break-after: auto; }}\n\
         .slot {{ padding: {pad}mm; overflow: hidden; }}\n\
         .receipt {{ border: {border}px solid #000; padding: {rpad}px; }}\n\
         .header {{ text-align: center; border-bottom: 1px solid #000; margin-bottom: 6px; }}\n\
         .header .store {{ font-weight: bold; }}\n\
         .header h5 {{ margin: 0; font-size: 0.83em; }}\n\
         .info {{ display: flex; font-size: {small}px; margin-bottom: 6px; }}\n\
         .info > div {{ width: 50%; }}\n\
         table {{ width: 100%; border-collapse: collapse; table-layout: fixed; font-size: {small}px; }}\n\
         th, td {{ border: 1px solid #000; padding: 2px 4px; text-align: left; vertical-align: top; overflow-wrap: normal; }}\n\
         col.num {{ width: {c0}%; }} col.desc {{ width: {c1}%; }} col.qty {{ width: {c2}%; }} \
         col.price {{ width: {c3}%; }} col.amount {{ width: {c4}%; }}\n\
         .total {{ text-align: right; margin-top: 6px; }}\n\
         .total h4 {{ margin: 1em 0; font-size: 1.17em; }}\n\
         .spacer {{ height: 6px; }}\n\
         .signature {{ font-size: {small}px; }}\n\
         .signature p {{ margin: 0; }}\n\
         .signature-line {{ width: {sig}px; margin-top: 10px; border-top: 1px solid #000; text-align: center; }}\n",
        margin = t.page_margin_mm,
        base = BASE_FONT,
        small = SMALL_FONT,
        w = t.width_mm,
        h = t.height_mm,
        cols = SLOT_COLUMNS,
        rows = SLOT_ROWS,
        pad = t.slot_padding_mm,
        border = RECEIPT_BORDER,
        rpad = RECEIPT_PADDING,
        c0 = col(0),
        c1 = col(1),
        c2 = col(2),
        c3 = col(3),
        c4 = col(4),
        sig = SIGNATURE_RULE_WIDTH,
    );
}

fn write_receipt(out: &mut String, page: &Page<'_>, config: &PrintConfig) {
    let c = ReceiptContent::build(page, &config.store, &config.currency_symbol);

    out.push_str("<div class=\"receipt\">\n<div class=\"header\">\n");
    let _ = writeln!(out, "<div class=\"store\">{}</div>", esc(&c.store_name));
    let _ = writeln!(out, "<div>{}</div>", esc(&c.phone_line()));
    let _ = writeln!(out, "<div>{}</div>", esc(&c.store_address));
    let _ = writeln!(out, "<h5>{}</h5>", esc(&c.title));
    out.push_str("</div>\n");

    out.push_str("<div class=\"info\">\n");
    let _ = writeln!(
        out,
        "<div><div>{}</div><div>{}</div></div>",
        esc(&c.customer_line()),
        esc(&c.address)
    );
    let _ = writeln!(
        out,
        "<div><div>{}</div><div>{}</div></div>",
        esc(&c.reference_line()),
        esc(&c.date_line())
    );
    out.push_str("</div>\n");

    out.push_str("<table>\n<colgroup><col class=\"num\"><col class=\"desc\"><col class=\"qty\"><col class=\"price\"><col class=\"amount\"></colgroup>\n<thead><tr>");
    for header in COLUMN_HEADERS {
        let _ = write!(out, "<th>{}</th>", esc(header));
    }
    out.push_str("</tr></thead>\n<tbody>\n");
    for row in &c.rows {
        out.push_str("<tr>");
        for cell in row.cells() {
            let _ = write!(out, "<td>{}</td>", esc(cell));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");

    match c.total_line() {
        Some(total) => {
            let _ = writeln!(out, "<div class=\"total\"><h4>{}</h4></div>", esc(&total));
            let _ = writeln!(
                out,
                "<div class=\"signature\"><p>{}</p><br><br><br><div class=\"signature-line\">{}</div></div>",
                esc(SIGNATURE_NOTE),
                esc(SIGNATURE_LINE)
            );
        }
        None => out.push_str("<div class=\"spacer\"></div>\n"),
    }

    out.push_str("</div>");
}

/// Escape text for HTML element content and attribute values.
fn esc(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
