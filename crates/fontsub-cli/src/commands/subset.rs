//! Subset command implementation
//!
//! A straight line: validate, read characters, subset, compress, report.
//! Failures of the external tools are printed and the run moves on; only
//! missing inputs, interrupts and unexpected IO errors end it early.

use std::error::Error as StdError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fontsub_core::{
    interrupt, CharSet, CompressError, Compressor, Error, MissingInputError, OutputFormat,
    OutputPlan, PyftsubsetSubsetter, SizeReport, Subsetter, ToolConfig, Woff2Compressor,
};

use crate::cli::Cli;

/// What a run left behind
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Font files written by this run
    pub outputs: Vec<PathBuf>,
    /// Non-fatal failures that were reported
    pub warnings: usize,
}

pub fn run(args: &Cli) -> Result<RunSummary> {
    // 1. Validate inputs before anything is written
    if !args.font_file.exists() {
        return Err(Error::from(MissingInputError::Font(args.font_file.clone())).into());
    }
    if !args.chars.exists() {
        return Err(Error::from(MissingInputError::CharFile(args.chars.clone())).into());
    }

    // 2. Read the character list
    let chars = CharSet::from_file(&args.chars)?;

    println!("Starting font subsetting...");
    println!("Source font: {}", args.font_file.display());
    let original = SizeReport::of(&args.font_file)
        .with_context(|| format!("Failed to read {}", args.font_file.display()))?;
    println!("Original file size: {original}");
    println!("Character count: {}", chars.len());
    if chars.is_empty() {
        log::warn!("Character file {} is empty", args.chars.display());
    }
    interrupt::check()?;

    let plan = OutputPlan::new(&args.output, args.format.into());
    plan.ensure_parent_dirs()
        .context("Failed to create output directory")?;
    log::debug!("Output plan: {plan:?}");
    println!("Output format: {}", plan.format.as_str());

    let tools = ToolConfig::from_env()
        .with_subsetter(args.subsetter.clone())
        .with_compressor(args.compressor.clone())
        .with_subsetter_args(args.subsetter_args.clone());

    let mut run = Run {
        source: &args.font_file,
        chars: &chars,
        original,
        tools,
        verbose: args.verbose,
        summary: RunSummary::default(),
    };

    // 3. Subset and compress
    match plan.format {
        OutputFormat::Ttf => {
            if run.ttf_step(&plan.ttf, "Generating TTF file")? {
                run.summary.outputs.push(plan.ttf.clone());
            }
        },
        OutputFormat::Both => {
            if run.ttf_step(&plan.ttf, "Generating TTF file")? {
                run.summary.outputs.push(plan.ttf.clone());
                run.woff2_step(&plan.ttf, &plan.woff2)?;
            } else {
                run.warn("no TTF intermediate, skipping WOFF2 generation");
            }
        },
        OutputFormat::Woff2 => run.woff2_only(&plan)?,
    }
    interrupt::check()?;

    // 4. Report
    run.print_next_steps();
    Ok(run.summary)
}

/// Move the compressor's output to `dest`.
///
/// `dest` may differ from the produced file only in letter case (`OUT.WOFF2`
/// next to `OUT.woff2`), which is the same file on case-insensitive file
/// systems, so this renames rather than copies.
fn move_into_place(produced: &Path, dest: &Path) -> io::Result<()> {
    if produced == dest {
        return Ok(());
    }
    log::debug!("Moving {} to {}", produced.display(), dest.display());
    if fs::rename(produced, dest).is_ok() {
        return Ok(());
    }
    // Different file systems, e.g. out of the scratch directory
    fs::copy(produced, dest)?;
    fs::remove_file(produced)
}

/// State shared by the steps of one run
struct Run<'a> {
    source: &'a Path,
    chars: &'a CharSet,
    original: SizeReport,
    tools: ToolConfig,
    verbose: bool,
    summary: RunSummary,
}

impl Run<'_> {
    /// Subset into `dest`. Returns whether `dest` now holds the subset font.
    fn ttf_step(&mut self, dest: &Path, title: &str) -> Result<bool> {
        println!("\n{title}... ({})", dest.display());

        match self.subset_into(dest) {
            Ok(()) => {
                self.report_output("TTF", dest)?;
                Ok(true)
            },
            Err(Error::Interrupted) => Err(Error::Interrupted.into()),
            Err(err) => {
                self.summary.warnings += 1;
                eprintln!("ERROR: TTF generation failed: {err}");
                self.print_causes(&err);
                Ok(false)
            },
        }
    }

    fn subset_into(&self, dest: &Path) -> fontsub_core::Result<()> {
        let subsetter = PyftsubsetSubsetter::locate(&self.tools)?;
        println!("  Subsetter: {}", subsetter.name());
        // Removed when dropped, whatever the subsetter did
        let text_file = self.chars.write_temp_file()?;

        let result = subsetter.subset(self.source, text_file.path(), dest);
        interrupt::check()?;
        result.map_err(Into::into)
    }

    /// Compress the TTF produced earlier in this run
    fn woff2_step(&mut self, ttf: &Path, dest: &Path) -> Result<()> {
        if let Some(compressor) = self.locate_compressor(dest) {
            self.compress_with(&compressor, ttf, dest)?;
        }
        Ok(())
    }

    /// WOFF2 without a TTF output: subset into a scratch directory first
    fn woff2_only(&mut self, plan: &OutputPlan) -> Result<()> {
        // No point subsetting if there is nothing to compress with
        let Some(compressor) = self.locate_compressor(&plan.woff2) else {
            return Ok(());
        };

        let workdir = tempfile::Builder::new()
            .prefix("fontsub-")
            .tempdir()
            .context("Failed to create a temporary directory")?;
        let file_name = plan
            .ttf
            .file_name()
            .map_or_else(|| PathBuf::from("subset.ttf"), PathBuf::from);
        let intermediate = workdir.path().join(file_name);

        if self.ttf_step(&intermediate, "Generating intermediate TTF file")? {
            self.compress_with(&compressor, &intermediate, &plan.woff2)?;
        } else {
            self.warn("no TTF intermediate, skipping WOFF2 generation");
        }
        Ok(())
    }

    fn locate_compressor(&mut self, dest: &Path) -> Option<Woff2Compressor> {
        match Woff2Compressor::locate(&self.tools) {
            Ok(compressor) => Some(compressor),
            Err(err) => {
                println!("\nConverting to WOFF2 format... ({})", dest.display());
                self.compress_failure(&err);
                None
            },
        }
    }

    fn compress_with(&mut self, compressor: &impl Compressor, ttf: &Path, dest: &Path) -> Result<()> {
        println!("\nConverting to WOFF2 format... ({})", dest.display());
        println!("  Compressor: {}", compressor.name());

        let result = compressor
            .compress(ttf)
            .and_then(|produced| move_into_place(&produced, dest).map_err(CompressError::from));
        interrupt::check()?;

        match result {
            Ok(()) => {
                self.report_output("WOFF2", dest)?;
                self.summary.outputs.push(dest.to_path_buf());
            },
            Err(err) => self.compress_failure(&err),
        }
        Ok(())
    }

    fn compress_failure(&mut self, err: &CompressError) {
        self.summary.warnings += 1;
        if err.is_missing_tool() {
            eprintln!("WARNING: {err}, skipping WOFF2 generation");
            eprintln!("  Install: brew install woff2 (macOS) or apt install woff2 (Debian/Ubuntu)");
        } else {
            eprintln!("WARNING: WOFF2 generation failed: {err}");
            self.print_causes(err);
        }
    }

    fn report_output(&self, kind: &str, path: &Path) -> Result<()> {
        let size = SizeReport::of(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        println!("✓ {kind} generated!");
        println!("  File size: {size}");
        println!("  Compression: {}", size.compression_against(&self.original));
        Ok(())
    }

    fn warn(&mut self, message: &str) {
        self.summary.warnings += 1;
        eprintln!("WARNING: {message}");
    }

    fn print_causes(&self, err: &dyn StdError) {
        if !self.verbose {
            return;
        }
        let mut source = err.source();
        while let Some(cause) = source {
            eprintln!("  Caused by: {cause}");
            source = cause.source();
        }
    }

    fn print_next_steps(&self) {
        if self.summary.outputs.is_empty() {
            println!("\nNo font files were generated");
        } else {
            println!("\nNext steps:");
            println!("1. Check output files:");
            for output in &self.summary.outputs {
                println!("   - {}", output.display());
            }
            println!("2. Bundle the font files with your app's assets");
        }

        match self.summary.warnings {
            0 => println!("\nFont subsetting completed!"),
            1 => println!("\nFont subsetting completed with 1 warning"),
            n => println!("\nFont subsetting completed with {n} warnings"),
        }
    }
}
