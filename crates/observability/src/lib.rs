//! Process-wide tracing setup shared by the binaries.

/// Install the tracing subscriber in the given format.
///
/// Safe to call more than once; later calls are no-ops and return `false`.
pub fn init(format: LogFormat) -> bool {
    tracing::init(format)
}

/// Subscriber configuration (filters, output format).
pub mod tracing;

pub use self::tracing::LogFormat;
