//! Fontsub Core: the pieces behind the `fontsub` command
//!
//! Subsetting a font for a known character list is mostly plumbing. The
//! glyph work happens in an external subsetter and WOFF2 encoding in an
//! external compressor; this crate holds what sits around them:
//!
//! - [`charset`] - reading the character list and handing it to the subsetter
//! - [`size`] - human-readable sizes and compression ratios
//! - [`paths`] - where the TTF and WOFF2 outputs go
//! - [`tools`] - the [`Subsetter`] and [`Compressor`] seams and their
//!   command-line implementations
//! - [`config`] - which programs to run
//! - [`interrupt`] - cooperative Ctrl-C handling

pub mod charset;
pub mod config;
pub mod error;
pub mod interrupt;
pub mod paths;
pub mod size;
pub mod tools;

pub use charset::CharSet;
pub use config::ToolConfig;
pub use error::{CompressError, Error, MissingInputError, Result, SubsetError};
pub use paths::{OutputFormat, OutputPlan};
pub use size::{compression_percent, format_size, SizeReport};
pub use tools::{Compressor, PyftsubsetSubsetter, Subsetter, Woff2Compressor};
