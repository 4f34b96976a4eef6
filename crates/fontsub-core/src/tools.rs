// this_file: crates/fontsub-core/src/tools.rs

//! The two external tools a run delegates to
//!
//! - [`Subsetter`] - prunes a font down to the glyphs a text needs
//! - [`Compressor`] - turns a TTF into a WOFF2 file next to it
//!
//! Both default to command-line programs found on `PATH`. Invocations block
//! until the program exits; there is no timeout.

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::config::ToolConfig;
use crate::error::{CompressError, SubsetError};

/// Produces a subset font from a source font and a file of characters
pub trait Subsetter {
    /// Tool name for messages
    fn name(&self) -> &str;

    /// Write `font` restricted to the characters in `text_file` to `output`
    fn subset(&self, font: &Path, text_file: &Path, output: &Path) -> Result<(), SubsetError>;
}

/// Converts a TTF into a compressed web font
pub trait Compressor {
    /// Tool name for messages
    fn name(&self) -> &str;

    /// Compress `ttf` and return the path of the file produced
    fn compress(&self, ttf: &Path) -> Result<PathBuf, CompressError>;
}

/// fontTools' `pyftsubset` command
#[derive(Debug, Clone)]
pub struct PyftsubsetSubsetter {
    name: String,
    program: PathBuf,
    extra_args: Vec<String>,
}

impl PyftsubsetSubsetter {
    pub fn new(program: PathBuf, extra_args: Vec<String>) -> Self {
        Self {
            name: tool_name(&program),
            program,
            extra_args,
        }
    }

    /// Resolve the configured subsetter on `PATH`
    pub fn locate(config: &ToolConfig) -> Result<Self, SubsetError> {
        let program = find_executable(&config.subsetter)
            .ok_or_else(|| SubsetError::ToolNotFound(tool_name(&config.subsetter)))?;
        log::debug!("Using subsetter {}", program.display());
        Ok(Self::new(program, config.subsetter_args.clone()))
    }

    fn command(&self, font: &Path, text_file: &Path, output: &Path) -> Command {
        let mut text_arg = std::ffi::OsString::from("--text-file=");
        text_arg.push(text_file);
        let mut output_arg = std::ffi::OsString::from("--output-file=");
        output_arg.push(output);

        let mut command = Command::new(&self.program);
        command
            .arg(font)
            .arg(text_arg)
            .arg(output_arg)
            .args(&self.extra_args);
        command
    }
}

impl Subsetter for PyftsubsetSubsetter {
    fn name(&self) -> &str {
        &self.name
    }

    fn subset(&self, font: &Path, text_file: &Path, output: &Path) -> Result<(), SubsetError> {
        let mut command = self.command(font, text_file, output);
        log::debug!("Running {command:?}");

        let result = command.output().map_err(|source| SubsetError::Spawn {
            tool: self.name.clone(),
            source,
        })?;
        if !result.status.success() {
            return Err(SubsetError::Exit {
                tool: self.name.clone(),
                status: result.status,
                stderr: stderr_text(&result),
            });
        }
        if !output.exists() {
            return Err(SubsetError::OutputMissing(output.to_path_buf()));
        }
        Ok(())
    }
}

/// Google's `woff2_compress` command
#[derive(Debug, Clone)]
pub struct Woff2Compressor {
    name: String,
    program: PathBuf,
}

impl Woff2Compressor {
    pub fn new(program: PathBuf) -> Self {
        Self {
            name: tool_name(&program),
            program,
        }
    }

    /// Resolve the configured compressor on `PATH`
    pub fn locate(config: &ToolConfig) -> Result<Self, CompressError> {
        let program = find_executable(&config.compressor)
            .ok_or_else(|| CompressError::ToolNotFound(tool_name(&config.compressor)))?;
        log::debug!("Using compressor {}", program.display());
        Ok(Self::new(program))
    }
}

impl Compressor for Woff2Compressor {
    fn name(&self) -> &str {
        &self.name
    }

    fn compress(&self, ttf: &Path) -> Result<PathBuf, CompressError> {
        let mut command = Command::new(&self.program);
        command.arg(ttf);
        log::debug!("Running {command:?}");

        let result = command.output().map_err(|source| CompressError::Spawn {
            tool: self.name.clone(),
            source,
        })?;
        if !result.status.success() {
            return Err(CompressError::Exit {
                tool: self.name.clone(),
                status: result.status,
                stderr: stderr_text(&result),
            });
        }

        // woff2_compress always writes next to its input
        let woff2 = ttf.with_extension("woff2");
        if !woff2.exists() {
            return Err(CompressError::OutputMissing(woff2));
        }
        Ok(woff2)
    }
}

/// Look `program` up the way a shell would.
///
/// A program with a directory component is checked as given; a bare name is
/// searched for in every `PATH` entry.
pub fn find_executable(program: &Path) -> Option<PathBuf> {
    find_executable_in(program, env::var_os("PATH").as_deref())
}

fn find_executable_in(program: &Path, path_var: Option<&OsStr>) -> Option<PathBuf> {
    if program.as_os_str().is_empty() {
        return None;
    }
    if program.components().count() > 1 || program.is_absolute() {
        return candidates(program).into_iter().find(|p| is_executable(p));
    }

    env::split_paths(path_var?)
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| candidates(&dir.join(program)))
        .find(|p| is_executable(p))
}

#[cfg(windows)]
fn candidates(path: &Path) -> Vec<PathBuf> {
    if path.extension().is_some() {
        vec![path.to_path_buf()]
    } else {
        vec![path.with_extension("exe"), path.to_path_buf()]
    }
}

#[cfg(not(windows))]
fn candidates(path: &Path) -> Vec<PathBuf> {
    vec![path.to_path_buf()]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

fn tool_name(program: &Path) -> String {
    program
        .file_name()
        .unwrap_or(program.as_os_str())
        .to_string_lossy()
        .into_owned()
}

fn stderr_text(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        "(no output)".to_string()
    } else {
        stderr.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_name_uses_file_name() {
        assert_eq!(tool_name(Path::new("/usr/local/bin/woff2_compress")), "woff2_compress");
        assert_eq!(tool_name(Path::new("pyftsubset")), "pyftsubset");
    }

    #[test]
    fn test_empty_program_is_never_found() {
        assert_eq!(find_executable_in(Path::new(""), Some(OsStr::new("/bin"))), None);
    }

    #[test]
    fn test_bare_name_without_path_is_not_found() {
        assert_eq!(find_executable_in(Path::new("woff2_compress"), None), None);
    }

    #[test]
    fn test_locate_reports_missing_tool_by_name() {
        let config = ToolConfig::default()
            .with_compressor(Some(PathBuf::from("/nonexistent/dir/woff2_compress")));
        let err = Woff2Compressor::locate(&config).unwrap_err();
        assert!(err.is_missing_tool());
        assert_eq!(err.to_string(), "woff2_compress not found");
    }

    #[cfg(unix)]
    mod unix {
        use super::super::*;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
            let path = dir.join(name);
            fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        const FAKE_SUBSETTER: &str = r#"
for arg in "$@"; do
  case "$arg" in
    --text-file=*) text="${arg#--text-file=}" ;;
    --output-file=*) out="${arg#--output-file=}" ;;
    -*) ;;
    *) font="$arg" ;;
  esac
done
cp "$text" "$out.chars"
cp "$font" "$out""#;

        #[test]
        fn test_find_executable_searches_path_entries() {
            let first = tempfile::tempdir().unwrap();
            let second = tempfile::tempdir().unwrap();
            let script = write_script(second.path(), "woff2_compress", "exit 0");
            let path_var = env::join_paths([first.path(), second.path()]).unwrap();

            let found = find_executable_in(Path::new("woff2_compress"), Some(&path_var));
            assert_eq!(found, Some(script));
        }

        #[test]
        fn test_find_executable_skips_non_executable_files() {
            let dir = tempfile::tempdir().unwrap();
            fs::write(dir.path().join("pyftsubset"), "not a program").unwrap();

            let found = find_executable_in(Path::new("pyftsubset"), Some(dir.path().as_os_str()));
            assert_eq!(found, None);
        }

        #[test]
        fn test_find_executable_accepts_explicit_path() {
            let dir = tempfile::tempdir().unwrap();
            let script = write_script(dir.path(), "my-subsetter", "exit 0");

            assert_eq!(find_executable_in(&script, None), Some(script.clone()));
        }

        #[test]
        fn test_subsetter_passes_text_file_and_output() {
            let dir = tempfile::tempdir().unwrap();
            let program = write_script(dir.path(), "pyftsubset", FAKE_SUBSETTER);
            let font = dir.path().join("source.ttf");
            fs::write(&font, b"font bytes").unwrap();
            let chars = dir.path().join("chars.txt");
            fs::write(&chars, "abc").unwrap();
            let output = dir.path().join("subset.ttf");

            let subsetter = PyftsubsetSubsetter::new(program, Vec::new());
            subsetter.subset(&font, &chars, &output).unwrap();

            assert_eq!(subsetter.name(), "pyftsubset");
            assert_eq!(fs::read(&output).unwrap(), b"font bytes");
            assert_eq!(
                fs::read_to_string(dir.path().join("subset.ttf.chars")).unwrap(),
                "abc"
            );
        }

        #[test]
        fn test_subsetter_reports_exit_status_and_stderr() {
            let dir = tempfile::tempdir().unwrap();
            let program = write_script(dir.path(), "pyftsubset", "echo 'bad font' >&2\nexit 3");
            let output = dir.path().join("subset.ttf");

            let err = PyftsubsetSubsetter::new(program, Vec::new())
                .subset(Path::new("in.ttf"), Path::new("chars.txt"), &output)
                .unwrap_err();
            match err {
                SubsetError::Exit { stderr, status, .. } => {
                    assert_eq!(stderr, "bad font");
                    assert_eq!(status.code(), Some(3));
                },
                other => panic!("unexpected error: {other:?}"),
            }
        }

        #[test]
        fn test_subsetter_detects_missing_output() {
            let dir = tempfile::tempdir().unwrap();
            let program = write_script(dir.path(), "pyftsubset", "exit 0");
            let output = dir.path().join("subset.ttf");

            let err = PyftsubsetSubsetter::new(program, Vec::new())
                .subset(Path::new("in.ttf"), Path::new("chars.txt"), &output)
                .unwrap_err();
            assert!(matches!(err, SubsetError::OutputMissing(p) if p == output));
        }

        #[test]
        fn test_subsetter_appends_extra_args() {
            let dir = tempfile::tempdir().unwrap();
            let program = write_script(
                dir.path(),
                "pyftsubset",
                "for last in \"$@\"; do :; done\n[ \"$last\" = \"--no-hinting\" ] || exit 9\nfor arg in \"$@\"; do case \"$arg\" in --output-file=*) : > \"${arg#--output-file=}\" ;; esac; done",
            );
            let output = dir.path().join("subset.ttf");

            PyftsubsetSubsetter::new(program, vec!["--no-hinting".to_string()])
                .subset(Path::new("in.ttf"), Path::new("chars.txt"), &output)
                .unwrap();
            assert!(output.exists());
        }

        #[test]
        fn test_compressor_returns_sibling_woff2() {
            let dir = tempfile::tempdir().unwrap();
            let program = write_script(
                dir.path(),
                "woff2_compress",
                "head -c 10 \"$1\" > \"${1%.ttf}.woff2\"",
            );
            let ttf = dir.path().join("font.ttf");
            fs::write(&ttf, vec![7_u8; 100]).unwrap();

            let woff2 = Woff2Compressor::new(program).compress(&ttf).unwrap();
            assert_eq!(woff2, dir.path().join("font.woff2"));
            assert_eq!(fs::metadata(&woff2).unwrap().len(), 10);
        }

        #[test]
        fn test_compressor_failure_keeps_status() {
            let dir = tempfile::tempdir().unwrap();
            let program = write_script(dir.path(), "woff2_compress", "exit 1");
            let ttf = dir.path().join("font.ttf");
            fs::write(&ttf, b"ttf").unwrap();

            let err = Woff2Compressor::new(program).compress(&ttf).unwrap_err();
            assert!(matches!(err, CompressError::Exit { .. }));
            assert!(!err.is_missing_tool());
        }

        #[test]
        fn test_compressor_without_output_is_an_error() {
            let dir = tempfile::tempdir().unwrap();
            let program = write_script(dir.path(), "woff2_compress", "exit 0");
            let ttf = dir.path().join("font.ttf");
            fs::write(&ttf, b"ttf").unwrap();

            let err = Woff2Compressor::new(program).compress(&ttf).unwrap_err();
            assert!(matches!(err, CompressError::OutputMissing(_)));
        }
    }
}
