use crate::charset::DEFAULT_CHARACTERS;
use crate::error::{GlyphtoneError, Result};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// Environment variable consulted when no font path is configured
pub const FONT_ENV_VAR: &str = "GLYPHTONE_FONT";

/// Monospace faces tried, in order, when neither config nor environment name one
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu-sans-mono-fonts/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/opentype/source-code-pro/SourceCodePro-Regular.otf",
    "/System/Library/Fonts/Menlo.ttc",
    "/Library/Fonts/Courier New.ttf",
    "C:\\Windows\\Fonts\\consola.ttf",
    "C:\\Windows\\Fonts\\cour.ttf",
];

/// Configuration for ASCII art conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsciiConfig {
    /// Allowed characters, in tie-break order; may be empty
    pub characters: String,
    /// Font size in points, default 8
    pub font_size: u32,
    /// TrueType/OpenType face to render with
    pub font_path: Option<PathBuf>,
}

impl Default for AsciiConfig {
    fn default() -> Self {
        Self {
            characters: DEFAULT_CHARACTERS.to_string(),
            font_size: 8,
            font_path: None,
        }
    }
}

impl AsciiConfig {
    /// Sizes accepted by `validate`
    pub const FONT_SIZE_RANGE: RangeInclusive<u32> = 1..=72;
    /// Sizes offered by the interactive slider
    pub const FONT_SIZE_RANGE_GUI: RangeInclusive<u32> = 1..=12;

    /// Validates the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !Self::FONT_SIZE_RANGE.contains(&self.font_size) {
            return Err(GlyphtoneError::Config(format!(
                "font_size must be between {} and {}, got {}",
                Self::FONT_SIZE_RANGE.start(),
                Self::FONT_SIZE_RANGE.end(),
                self.font_size
            )));
        }
        if let Some(path) = &self.font_path
            && path.as_os_str().is_empty()
        {
            return Err(GlyphtoneError::Config("font_path must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Font to use: the configured path, then `$GLYPHTONE_FONT`, then the
    /// first system candidate that exists
    pub fn resolve_font_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.font_path {
            return Some(path.clone());
        }
        if let Some(path) = std::env::var_os(FONT_ENV_VAR).filter(|v| !v.is_empty()) {
            return Some(PathBuf::from(path));
        }
        SYSTEM_FONT_CANDIDATES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.is_file())
    }
}
