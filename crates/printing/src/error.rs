//! Print pipeline errors.

use thiserror::Error;

/// Result type used across the print pipeline.
pub type PrintResult<T> = Result<T, PrintError>;

/// Failure of a print request. Any of these aborts the whole request; no
/// partial document is produced.
#[derive(Debug, Error)]
pub enum PrintError {
    /// The slot content box resolved to unusable dimensions.
    #[error("degenerate print slot: {width}x{height}px")]
    DegenerateSlot { width: f32, height: f32 },

    /// The measurement surface could not lay out a page.
    #[error("measurement failed: {0}")]
    Measurement(String),

    /// A single page would need more items than the pagination safety bound.
    #[error("receipt {receipt_number}: a single page would hold more than {limit} items")]
    SafetyLimit { receipt_number: String, limit: usize },

    /// Handing the document to the print sink failed.
    #[error("print sink io error: {0}")]
    Io(#[from] std::io::Error),
}

impl PrintError {
    pub fn measurement(msg: impl Into<String>) -> Self {
        Self::Measurement(msg.into())
    }
}
