//! Sheet and slot geometry.
//!
//! A sheet is split into a 2×2 grid of equal slots. Each slot is padded, and
//! the padded inner box is the content area every receipt page must fit into.
//! All layout measurements are CSS pixels.

use serde::{Deserialize, Serialize};

use crate::error::{PrintError, PrintResult};

pub const SLOT_COLUMNS: usize = 2;
pub const SLOT_ROWS: usize = 2;
pub const SLOTS_PER_SHEET: usize = SLOT_COLUMNS * SLOT_ROWS;

const MM_PER_INCH: f32 = 25.4;

/// Physical sheet description (millimetres) plus the rendering resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetTemplate {
    pub width_mm: f32,
    pub height_mm: f32,
    /// Padding inside each slot, all four sides.
    pub slot_padding_mm: f32,
    /// `@page` margin used by the printed document.
    pub page_margin_mm: f32,
    /// CSS pixels per inch.
    pub dpi: f32,
}

impl SheetTemplate {
    /// A4 portrait, 6 mm slot padding, 8 mm page margin, 96 dpi.
    pub const fn a4() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            slot_padding_mm: 6.0,
            page_margin_mm: 8.0,
            dpi: 96.0,
        }
    }

    pub fn mm_to_px(&self, mm: f32) -> f32 {
        mm / MM_PER_INCH * self.dpi
    }

    /// Resolve the content box of one slot: the slot's outer box (an equal
    /// share of the sheet) minus its padding.
    ///
    /// Fails when the result is not a positive, finite size, since nothing can
    /// be paginated against it.
    pub fn measure_slot(&self) -> PrintResult<SlotBox> {
        let outer_w = self.mm_to_px(self.width_mm) / SLOT_COLUMNS as f32;
        let outer_h = self.mm_to_px(self.height_mm) / SLOT_ROWS as f32;
        let pad = self.mm_to_px(self.slot_padding_mm);

        SlotBox::new(outer_w - 2.0 * pad, outer_h - 2.0 * pad)
    }
}

impl Default for SheetTemplate {
    fn default() -> Self {
        Self::a4()
    }
}

/// Content area of one slot, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotBox {
    pub width: f32,
    pub height: f32,
}

impl SlotBox {
    pub fn new(width: f32, height: f32) -> PrintResult<Self> {
        let usable = |v: f32| v.is_finite() && v > 0.0;
        if !usable(width) || !usable(height) {
            return Err(PrintError::DegenerateSlot { width, height });
        }
        Ok(Self { width, height })
    }
}
