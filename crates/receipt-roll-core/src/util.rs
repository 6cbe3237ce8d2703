//! Utility functions shared across the crate.

use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Get the user's config directory following XDG conventions.
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise `$HOME/.config`.
pub fn config_dir() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
}

/// An intermediate file owned by one pipeline call.
///
/// Removed when dropped. [`TempArtifact::discard`] removes it explicitly and
/// logs a failure instead of returning it, so cleanup never masks the result
/// of the stage that used the file.
#[derive(Debug)]
pub struct TempArtifact {
    file: NamedTempFile,
    label: &'static str,
}

impl TempArtifact {
    /// Create an empty file in the system temp directory.
    pub fn create(label: &'static str, suffix: &str) -> Result<Self> {
        Self::create_in(std::env::temp_dir(), label, suffix)
    }

    /// Create an empty file in `dir`.
    pub fn create_in(dir: impl AsRef<Path>, label: &'static str, suffix: &str) -> Result<Self> {
        let file = tempfile::Builder::new()
            .prefix("receipt-roll-")
            .suffix(suffix)
            .tempfile_in(dir)?;
        tracing::trace!("Created {} file {}", label, file.path().display());
        Ok(Self { file, label })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Remove the file, reporting failure.
    pub fn close(self) -> Result<()> {
        let path = self.file.path().to_path_buf();
        self.file
            .close()
            .map_err(|source| Error::ResourceCleanup { path, source })
    }

    /// Remove the file, logging failure.
    pub fn discard(self) {
        let label = self.label;
        if let Err(e) = self.close() {
            tracing::warn!("Leaving {} file behind: {}", label, e);
        }
    }
}
