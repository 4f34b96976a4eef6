//! File size reporting

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Format a byte count for display, e.g. `2048` -> `"2.00 KB"`
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in UNITS {
        if value < 1024.0 {
            return format!("{value:.2} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.2} TB")
}

/// Size reduction in percent, truncated: `100 - floor(output * 100 / original)`.
///
/// Returns `None` for an empty original, where no ratio exists.
pub fn compression_percent(output: u64, original: u64) -> Option<i64> {
    if original == 0 {
        return None;
    }
    let kept = u128::from(output) * 100 / u128::from(original);
    Some(100 - i64::try_from(kept).unwrap_or(i64::MAX))
}

/// A byte count together with its display form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeReport {
    pub bytes: u64,
    pub formatted: String,
}

impl SizeReport {
    pub fn from_bytes(bytes: u64) -> Self {
        Self {
            bytes,
            formatted: format_size(bytes),
        }
    }

    /// Size of the file at `path`
    pub fn of(path: &Path) -> io::Result<Self> {
        Ok(Self::from_bytes(fs::metadata(path)?.len()))
    }

    /// Reduction relative to `original`, rendered as `"85%"` or `"n/a"`
    pub fn compression_against(&self, original: &SizeReport) -> String {
        match compression_percent(self.bytes, original.bytes) {
            Some(percent) => format!("{percent}%"),
            None => "n/a".to_string(),
        }
    }
}

impl fmt::Display for SizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted)
    }
}
