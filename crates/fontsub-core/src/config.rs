//! External tool configuration
//!
//! Defaults to fontTools' `pyftsubset` and Google's `woff2_compress`, both
//! looked up on `PATH`. Either can be replaced through the environment:
//!
//! ```bash
//! FONTSUB_SUBSETTER=/opt/fonttools/bin/pyftsubset \
//! FONTSUB_COMPRESSOR=woff2_compress fontsub NotoSerifSC.ttf
//! ```
//!
//! Command-line flags take precedence over both.

use std::ffi::OsString;
use std::path::PathBuf;

pub const DEFAULT_SUBSETTER: &str = "pyftsubset";
pub const DEFAULT_COMPRESSOR: &str = "woff2_compress";

pub const SUBSETTER_ENV: &str = "FONTSUB_SUBSETTER";
pub const COMPRESSOR_ENV: &str = "FONTSUB_COMPRESSOR";

/// Programs used for the two external steps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    pub subsetter: PathBuf,
    pub compressor: PathBuf,
    /// Extra arguments appended to every subsetter invocation
    pub subsetter_args: Vec<String>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            subsetter: PathBuf::from(DEFAULT_SUBSETTER),
            compressor: PathBuf::from(DEFAULT_COMPRESSOR),
            subsetter_args: Vec::new(),
        }
    }
}

impl ToolConfig {
    /// Defaults overridden by `FONTSUB_SUBSETTER` / `FONTSUB_COMPRESSOR`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        let mut config = Self::default();
        if let Some(program) = non_empty(lookup(SUBSETTER_ENV)) {
            log::info!("Subsetter set via {SUBSETTER_ENV}: {}", program.to_string_lossy());
            config.subsetter = PathBuf::from(program);
        }
        if let Some(program) = non_empty(lookup(COMPRESSOR_ENV)) {
            log::info!("Compressor set via {COMPRESSOR_ENV}: {}", program.to_string_lossy());
            config.compressor = PathBuf::from(program);
        }
        config
    }

    pub fn with_subsetter(mut self, program: Option<PathBuf>) -> Self {
        if let Some(program) = program {
            self.subsetter = program;
        }
        self
    }

    pub fn with_compressor(mut self, program: Option<PathBuf>) -> Self {
        if let Some(program) = program {
            self.compressor = program;
        }
        self
    }

    pub fn with_subsetter_args(mut self, args: Vec<String>) -> Self {
        self.subsetter_args = args;
        self
    }
}

fn non_empty(value: Option<OsString>) -> Option<OsString> {
    value.filter(|v| !v.is_empty())
}
