//! Error types for fontsub

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for fontsub
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    MissingInput(#[from] MissingInputError),

    #[error(transparent)]
    Subset(#[from] SubsetError),

    #[error(transparent)]
    Compress(#[from] CompressError),

    #[error("Character file is not valid UTF-8: {}", .path.display())]
    InvalidUtf8 {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("Interrupted by user")]
    Interrupted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Inputs that must exist before anything is written
#[derive(Debug, Error)]
pub enum MissingInputError {
    #[error("Font file not found: {}", .0.display())]
    Font(PathBuf),

    #[error(
        "Character file not found: {}\nPlease run: node scripts/extract-chars.js",
        .0.display()
    )]
    CharFile(PathBuf),
}

/// Failures of the external subsetting tool
#[derive(Debug, Error)]
pub enum SubsetError {
    #[error("{0} not found")]
    ToolNotFound(String),

    #[error("could not start {tool}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}: {stderr}")]
    Exit {
        tool: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("TTF file was not generated: {}", .0.display())]
    OutputMissing(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of the external WOFF2 compressor
#[derive(Debug, Error)]
pub enum CompressError {
    #[error("{0} not found")]
    ToolNotFound(String),

    #[error("could not start {tool}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}: {stderr}")]
    Exit {
        tool: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("WOFF2 file was not generated: {}", .0.display())]
    OutputMissing(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompressError {
    /// True when the compressor could not be located at all
    pub fn is_missing_tool(&self) -> bool {
        matches!(self, Self::ToolNotFound(_))
    }
}
