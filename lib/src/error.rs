use thiserror::Error;

/// Errors that terminate a conversion attempt.
///
/// Arithmetic edge cases (flat brightness ranges, empty character sets,
/// partial edge cells) are not errors; they are resolved inside the pipeline
/// and reported as [`crate::ConversionWarning`]s instead.
#[derive(Error, Debug)]
pub enum GlyphtoneError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Font error: {0}")]
    Font(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Font produced an unusable cell of {width}x{height} pixels")]
    InvalidCellGeometry { width: u32, height: u32 },
    #[error("No characters available to draw with")]
    NoCharactersAvailable,
    #[error("Conversion cancelled")]
    Cancelled,
}

impl GlyphtoneError {
    /// True for the superseded-request outcome, which callers should drop
    /// silently rather than report.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, GlyphtoneError::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, GlyphtoneError>;
