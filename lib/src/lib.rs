//! glyphtone - photograph to ASCII-art raster converter
//!
//! Every cell of the source is replaced by the character, drawn in a
//! monospace font, whose measured brightness best matches the cell after the
//! source's brightness range has been leveled onto the range the character
//! set can actually show.
//!
//! # Example
//! ```no_run
//! use glyphtone::{CancellationToken, ConversionRequest, FontSpec, FontdueRasterizer, convert};
//! use std::sync::Arc;
//!
//! let face = Arc::new(FontdueRasterizer::from_path("DejaVuSansMono.ttf").unwrap());
//! let font = FontSpec::new(face, 8).unwrap();
//! let source = Arc::new(image::open("photo.jpg").unwrap().to_rgb8());
//! let request = ConversionRequest::new(" .:-=+*#%@", font, source);
//! let result = convert(&request, &CancellationToken::new()).unwrap();
//! result.image.save("ascii_art.png").unwrap();
//! ```

pub mod ascii;
pub mod cancel;
pub mod charset;
pub mod config;
pub mod error;
pub mod font;
pub mod grid;
pub mod job;
pub mod levels;
pub mod luminance;
pub mod processor;
pub mod profile;
pub mod select;

#[cfg(test)]
mod testing;

// Re-export main types for convenience
pub use cancel::CancellationToken;
pub use charset::{CharacterSet, DEFAULT_CHARACTERS};
pub use config::AsciiConfig;
pub use error::{GlyphtoneError, Result};
pub use font::{CellGeometry, FontMetrics, FontSpec, FontdueRasterizer, GlyphRasterizer};
pub use job::{JobEvent, Recomputer};
pub use processor::{AsciiConversion, ConversionRequest, ConversionWarning, convert};
pub use profile::GlyphProfile;
