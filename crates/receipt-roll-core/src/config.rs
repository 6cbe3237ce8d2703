use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Error;

/// Narrowest roll the converter is allowed to lay out, in millimetres
pub const MIN_WIDTH_MM: u32 = 10;
/// Shortest page the converter is allowed to produce, in millimetres
pub const MIN_HEIGHT_MM: u32 = 200;

/// Body fonts the HTML converter can embed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptFont {
    #[default]
    Arial,
    Courier,
    Helvetica,
    Monospace,
    Sans,
    Serif,
    Times,
}

impl ReceiptFont {
    /// Name passed to htmldoc's `--textfont`
    pub const fn htmldoc_name(self) -> &'static str {
        match self {
            Self::Arial => "Arial",
            Self::Courier => "Courier",
            Self::Helvetica => "Helvetica",
            Self::Monospace => "Monospace",
            Self::Sans => "Sans",
            Self::Serif => "Serif",
            Self::Times => "Times",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "arial" => Some(Self::Arial),
            "courier" => Some(Self::Courier),
            "helvetica" => Some(Self::Helvetica),
            "monospace" | "mono" => Some(Self::Monospace),
            "sans" => Some(Self::Sans),
            "serif" => Some(Self::Serif),
            "times" => Some(Self::Times),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReceiptFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.htmldoc_name())
    }
}

/// Layout of a receipt, handed to the HTML converter and the trimmer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptOptions {
    /// Roll width in millimetres (48mm is the common thermal roll)
    #[serde(default = "default_width_mm")]
    pub width_mm: u32,

    /// Page height in millimetres. Long enough for a whole receipt is best;
    /// anything the converter splits over several pages gets combined anyway.
    #[serde(default = "default_height_mm")]
    pub height_mm: u32,

    /// Blank space kept under the content after trimming
    #[serde(default)]
    pub bottom_margin: u32,

    /// Body font size in points
    #[serde(default = "default_font_size")]
    pub font_size: u32,

    #[serde(default)]
    pub font: ReceiptFont,

    /// Render in grayscale
    #[serde(default = "default_true")]
    pub gray: bool,
}

const fn default_width_mm() -> u32 {
    48
}

const fn default_height_mm() -> u32 {
    1000
}

const fn default_font_size() -> u32 {
    10
}

const fn default_true() -> bool {
    true
}

impl Default for ReceiptOptions {
    fn default() -> Self {
        Self {
            width_mm: default_width_mm(),
            height_mm: default_height_mm(),
            bottom_margin: 0,
            font_size: default_font_size(),
            font: ReceiptFont::default(),
            gray: true,
        }
    }
}

impl ReceiptOptions {
    /// Reject sizes the converter cannot lay a receipt out on.
    pub fn validate(&self) -> Result<(), Error> {
        if self.width_mm < MIN_WIDTH_MM {
            return Err(Error::InvalidOptions {
                field: "width_mm",
                reason: format!("{}mm is narrower than {MIN_WIDTH_MM}mm", self.width_mm),
            });
        }

        if self.height_mm < MIN_HEIGHT_MM {
            return Err(Error::InvalidOptions {
                field: "height_mm",
                reason: format!(
                    "{}mm is shorter than {MIN_HEIGHT_MM}mm; pages must hold at least one screen of content",
                    self.height_mm
                ),
            });
        }

        if self.font_size == 0 {
            return Err(Error::InvalidOptions {
                field: "font_size",
                reason: "must be positive".to_string(),
            });
        }

        Ok(())
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Receipt layout
    #[serde(default)]
    pub receipt: ReceiptOptions,

    /// Explicit htmldoc executable (defaults to a PATH lookup)
    #[serde(default)]
    pub htmldoc_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::ConfigLoad(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        toml::from_str(&content)
            .map_err(|e| Error::ConfigLoad(format!("Failed to parse config: {e}")))
    }

    /// Load from default locations (~/.config/receipt-roll/config.toml, ./config.toml)
    pub fn load() -> Self {
        if let Some(config_dir) = crate::util::config_dir() {
            let user_config = config_dir.join("receipt-roll").join("config.toml");
            if user_config.exists() {
                match Self::from_file(&user_config) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {}", user_config.display());
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        let local_config = PathBuf::from("config.toml");
        if local_config.exists() {
            match Self::from_file(&local_config) {
                Ok(config) => {
                    tracing::debug!("Loaded config from ./config.toml");
                    return config;
                }
                Err(e) => {
                    tracing::warn!("Failed to load ./config.toml: {}", e);
                }
            }
        }

        tracing::debug!("No config file found, using defaults");
        Self::default()
    }
}
