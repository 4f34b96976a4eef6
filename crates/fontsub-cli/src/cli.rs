//! CLI argument definitions using Clap v4

use clap::{ArgAction, Parser, ValueEnum};
use fontsub_core::OutputFormat;
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  fontsub ~/Downloads/NotoSerifSC-Regular.ttf
  fontsub ~/Downloads/font.ttf --output custom.ttf --format ttf
  FONTSUB_COMPRESSOR=/opt/woff2/woff2_compress fontsub font.ttf -f woff2";

/// Subset a font to the characters in a character list, then convert it to WOFF2
#[derive(Parser, Debug)]
#[command(name = "fontsub")]
#[command(version, about, long_about = None, after_help = EXAMPLES)]
pub struct Cli {
    /// Path to the source font file
    pub font_file: PathBuf,

    /// Output file path
    #[arg(short = 'o', long = "output", default_value = "assets/poetry-font.ttf")]
    pub output: PathBuf,

    /// Character list file (produced by the character extraction script)
    #[arg(long = "chars", default_value = "assets/chars-all.txt")]
    pub chars: PathBuf,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "both")]
    pub format: FormatArg,

    /// Show debug logs and full error chains (set RUST_BACKTRACE=1 for backtraces)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Subsetting program [env: FONTSUB_SUBSETTER] [default: pyftsubset]
    #[arg(long = "subsetter", value_name = "PROGRAM")]
    pub subsetter: Option<PathBuf>,

    /// WOFF2 compressor program [env: FONTSUB_COMPRESSOR] [default: woff2_compress]
    #[arg(long = "compressor", value_name = "PROGRAM")]
    pub compressor: Option<PathBuf>,

    /// Extra argument passed to the subsetter (repeatable)
    #[arg(
        long = "subsetter-arg",
        value_name = "ARG",
        action = ArgAction::Append,
        allow_hyphen_values = true
    )]
    pub subsetter_args: Vec<String>,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum FormatArg {
    /// Subset TrueType only
    Ttf,
    /// WOFF2 only (the intermediate TTF is discarded)
    Woff2,
    /// Both TTF and WOFF2
    Both,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Ttf => Self::Ttf,
            FormatArg::Woff2 => Self::Woff2,
            FormatArg::Both => Self::Both,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["fontsub", "font.ttf"]).unwrap();
        assert_eq!(cli.font_file, PathBuf::from("font.ttf"));
        assert_eq!(cli.output, PathBuf::from("assets/poetry-font.ttf"));
        assert_eq!(cli.chars, PathBuf::from("assets/chars-all.txt"));
        assert_eq!(cli.format, FormatArg::Both);
        assert!(!cli.verbose);
        assert!(cli.subsetter.is_none());
        assert!(cli.subsetter_args.is_empty());
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from(["fontsub", "in.otf", "-o", "out.woff2", "-f", "woff2", "-v"])
            .unwrap();
        assert_eq!(cli.output, PathBuf::from("out.woff2"));
        assert_eq!(cli.format, FormatArg::Woff2);
        assert!(cli.verbose);
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["fontsub", "font.ttf", "--format", "otf"]).is_err());
    }

    #[test]
    fn test_font_file_is_required() {
        assert!(Cli::try_parse_from(["fontsub"]).is_err());
    }

    #[test]
    fn test_subsetter_args_accept_flags() {
        let cli = Cli::try_parse_from([
            "fontsub",
            "font.ttf",
            "--subsetter-arg",
            "--no-hinting",
            "--subsetter-arg=--layout-features=*",
        ])
        .unwrap();
        assert_eq!(cli.subsetter_args, vec!["--no-hinting", "--layout-features=*"]);
    }

    #[test]
    fn test_format_conversion() {
        assert_eq!(OutputFormat::from(FormatArg::Ttf), OutputFormat::Ttf);
        assert_eq!(OutputFormat::from(FormatArg::Woff2), OutputFormat::Woff2);
        assert_eq!(OutputFormat::from(FormatArg::Both), OutputFormat::Both);
    }
}
