//! Output path planning

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Which font files a run should produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Ttf,
    Woff2,
    Both,
}

impl OutputFormat {
    pub fn wants_ttf(self) -> bool {
        matches!(self, Self::Ttf | Self::Both)
    }

    pub fn wants_woff2(self) -> bool {
        matches!(self, Self::Woff2 | Self::Both)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ttf => "ttf",
            Self::Woff2 => "woff2",
            Self::Both => "both",
        }
    }
}

/// Destination paths derived from `--output`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPlan {
    pub format: OutputFormat,
    pub ttf: PathBuf,
    pub woff2: PathBuf,
}

impl OutputPlan {
    /// A `.woff2` output names the WOFF2 file and implies a sibling `.ttf`;
    /// anything else names the TTF file and implies a sibling `.woff2`.
    pub fn new(output: &Path, format: OutputFormat) -> Self {
        let (ttf, woff2) = if has_extension(output, "woff2") {
            (output.with_extension("ttf"), output.to_path_buf())
        } else {
            (output.to_path_buf(), output.with_extension("woff2"))
        };
        Self { format, ttf, woff2 }
    }

    /// Files this plan will try to write
    pub fn targets(&self) -> Vec<&Path> {
        let mut targets = Vec::new();
        if self.format.wants_ttf() {
            targets.push(self.ttf.as_path());
        }
        if self.format.wants_woff2() {
            targets.push(self.woff2.as_path());
        }
        targets
    }

    /// Create the parent directories of every target that lacks one
    pub fn ensure_parent_dirs(&self) -> io::Result<()> {
        for target in self.targets() {
            if let Some(dir) = target.parent() {
                if !dir.as_os_str().is_empty() && !dir.exists() {
                    log::debug!("Creating output directory {}", dir.display());
                    fs::create_dir_all(dir)?;
                }
            }
        }
        Ok(())
    }
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .is_some_and(|found| found.eq_ignore_ascii_case(ext))
}
