//! Tracing/logging setup shared by the binaries.

use serde::Deserialize;

/// Initialize process-wide logging with the given output format.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(format: LogFormat) {
    tracing::init(format);
}

/// Log output format.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines (default for the interactive demo).
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Tracing configuration (filters, layers).
pub mod tracing;
