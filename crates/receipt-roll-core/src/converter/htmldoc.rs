use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info, warn};

use crate::config::ReceiptOptions;
use crate::error::{Error, Result};
use super::traits::{ConverterInfo, HtmlConverter};

/// Oldest htmldoc release with continuous-page output we rely on (major, minor).
/// Only the 1.x series is accepted.
pub const MIN_HTMLDOC_VERSION: (u32, u32) = (1, 9);

#[cfg(windows)]
const EXECUTABLE: &str = "htmldoc.exe";
#[cfg(not(windows))]
const EXECUTABLE: &str = "htmldoc";

/// The htmldoc command line converter
#[derive(Debug, Clone)]
pub struct Htmldoc {
    /// Path to the executable
    pub path: PathBuf,
    /// Version string printed by `--version`
    pub version: String,
}

impl Htmldoc {
    /// Use `explicit` if given, otherwise look htmldoc up on `PATH`, then
    /// check that its version is supported.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) if path.is_file() => path.to_path_buf(),
            Some(path) => {
                return Err(Error::DependencyNotFound(format!(
                    "Provided htmldoc path {} is invalid",
                    path.display()
                )));
            }
            None => which::which(EXECUTABLE).map_err(|e| {
                Error::DependencyNotFound(format!("{EXECUTABLE} not provided and not present in PATH: {e}"))
            })?,
        };

        let output = Command::new(&path).arg("--version").output().map_err(|e| {
            Error::DependencyNotFound(format!("Failed to run {}: {e}", path.display()))
        })?;
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();

        match parse_version(&version) {
            Some((major, minor)) if major == MIN_HTMLDOC_VERSION.0 && minor >= MIN_HTMLDOC_VERSION.1 => {}
            _ => {
                return Err(Error::UnsupportedDependencyVersion(format!(
                    "htmldoc {version:?} at {}; ^{}.{} is supported",
                    path.display(),
                    MIN_HTMLDOC_VERSION.0,
                    MIN_HTMLDOC_VERSION.1
                )));
            }
        }

        info!("Using htmldoc {} at {}", version, path.display());
        Ok(Self { path, version })
    }
}

impl HtmlConverter for Htmldoc {
    fn info(&self) -> ConverterInfo {
        ConverterInfo {
            name: "htmldoc",
            version: Some(self.version.clone()),
        }
    }

    fn convert(&self, html: &Path, output: &Path, options: &ReceiptOptions) -> Result<()> {
        let args = htmldoc_args(html, output, options);
        debug!("Running {} {:?}", self.path.display(), args);

        let result = Command::new(&self.path)
            .args(&args)
            .output()
            .map_err(|e| Error::Conversion(format!("Failed to run htmldoc: {e}")))?;

        let produced = std::fs::metadata(output).is_ok_and(|m| m.len() > 0);
        let stderr = String::from_utf8_lossy(&result.stderr);

        match (result.status.success(), produced) {
            (_, false) => Err(Error::Conversion(format!(
                "htmldoc produced no output ({}): {}",
                result.status,
                stderr.trim()
            ))),
            // htmldoc exits non-zero for recoverable issues such as missing images
            (false, true) => {
                warn!("htmldoc exited with {}: {}", result.status, stderr.trim());
                Ok(())
            }
            (true, true) => Ok(()),
        }
    }
}

/// Command line for a continuous, margin-less page of the roll's size.
pub fn htmldoc_args(html: &Path, output: &Path, options: &ReceiptOptions) -> Vec<OsString> {
    let mut args: Vec<OsString> = [
        "--continuous",
        "--header",
        ".",
        "--footer",
        ".",
        "--top",
        "0mm",
        "--bottom",
        "0mm",
        "--left",
        "0mm",
        "--right",
        "0mm",
    ]
    .into_iter()
    .map(OsString::from)
    .collect();

    args.push("--size".into());
    args.push(format!("{}x{}mm", options.width_mm, options.height_mm).into());
    args.push("--pscommands".into());
    args.push("--fontsize".into());
    args.push(options.font_size.to_string().into());
    args.push("--embedfonts".into());
    args.push("--textfont".into());
    args.push(options.font.htmldoc_name().into());
    if options.gray {
        args.push("--gray".into());
    }
    args.push("--charset".into());
    args.push("utf-8".into());
    args.push("-f".into());
    args.push(output.into());
    args.push(html.into());

    args
}

/// Parse the leading `major.minor` of a version string such as `1.9.18`.
pub fn parse_version(version: &str) -> Option<(u32, u32)> {
    let mut parts = version.trim().split('.');
    let major = parts.next()?.trim().parse().ok()?;
    let minor: String = parts
        .next()?
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    Some((major, minor.parse().ok()?))
}
