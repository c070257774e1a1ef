use crate::ascii::render_ascii;
use crate::cancel::CancellationToken;
use crate::charset::CharacterSet;
use crate::error::{GlyphtoneError, Result};
use crate::font::{CellGeometry, FontSpec};
use crate::grid::build_cell_grid;
use crate::levels::{BrightnessRange, analyze_source, level_image};
use crate::profile::{GlyphProfile, profile_glyphs};
use image::{GrayImage, RgbImage};
use std::sync::Arc;

/// Everything one conversion depends on
///
/// A new request is built for every parameter change; nothing in it is
/// mutated while a conversion runs.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub characters: CharacterSet,
    pub font: FontSpec,
    pub source: Arc<RgbImage>,
}

impl ConversionRequest {
    pub fn new(characters: impl Into<CharacterSet>, font: FontSpec, source: Arc<RgbImage>) -> Self {
        Self {
            characters: characters.into(),
            font,
            source,
        }
    }
}

/// Edge cases resolved during a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionWarning {
    /// The font gave an empty text box; every glyph was profiled as 0
    DegenerateFont,
    /// Every source pixel has the same brightness; all map to the darkest glyph
    FlatSourceBrightness,
    /// Every glyph has the same brightness
    FlatGlyphBrightness,
    /// The character set is empty; the output is blank
    NoCharactersAvailable,
}

/// Result of a completed conversion
#[derive(Debug, Clone)]
pub struct AsciiConversion {
    pub image: GrayImage,
    /// Selected characters, one line per row
    pub text: String,
    pub geometry: CellGeometry,
    pub profile: GlyphProfile,
    pub columns: u32,
    pub rows: u32,
    pub warnings: Vec<ConversionWarning>,
}

/// Converts a photograph into an ASCII-art raster
///
/// This implements the full pipeline:
/// 1. Profile glyph brightness and analyse the source, concurrently
/// 2. Level source luminance onto the glyph brightness range
/// 3. Average the leveled image over glyph-sized cells
/// 4. Select and draw the closest glyph for every cell
///
/// `cancel` is checked between phases and between output rows.
///
/// # Errors
/// `Cancelled` when `cancel` fires, `InvalidCellGeometry` when the font
/// reports a zero-sized cell. Flat ranges and an empty character set are not
/// errors; they are listed in [`AsciiConversion::warnings`].
pub fn convert(request: &ConversionRequest, cancel: &CancellationToken) -> Result<AsciiConversion> {
    let characters = &request.characters;
    let font = &request.font;
    let mut warnings = Vec::new();

    cancel.check()?;
    let metrics = font.metrics();
    let geometry = CellGeometry::from_metrics(&metrics);
    if geometry.is_empty() {
        return Err(GlyphtoneError::InvalidCellGeometry {
            width: geometry.width,
            height: geometry.height,
        });
    }

    // Step 1: glyph profile and source analysis are independent
    let (profile, analysis) = rayon::join(
        || profile_glyphs(characters, font, &metrics),
        || analyze_source(&request.source),
    );
    log::debug!(
        "Profiled {} glyphs of '{}' at {}pt, cell {}x{}, source range {}..={}",
        profile.len(),
        font.family(),
        font.point_size(),
        geometry.width,
        geometry.height,
        analysis.range.min,
        analysis.range.max
    );
    cancel.check()?;

    if profile.is_degenerate() && !characters.is_empty() {
        warnings.push(ConversionWarning::DegenerateFont);
    }
    if characters.is_empty() {
        log::warn!("No characters available, output will be blank");
        warnings.push(ConversionWarning::NoCharactersAvailable);
    }

    // Step 2: level onto what the glyphs can show
    let glyph_range = BrightnessRange::new(profile.min(), profile.max());
    if analysis.range.is_flat() {
        log::warn!(
            "Source brightness is flat at {}, every cell maps to the darkest glyph",
            analysis.range.min
        );
        warnings.push(ConversionWarning::FlatSourceBrightness);
    }
    if !characters.is_empty() && glyph_range.is_flat() {
        log::warn!("Glyph brightness is flat at {}", glyph_range.min);
        warnings.push(ConversionWarning::FlatGlyphBrightness);
    }
    let leveled = level_image(&analysis.luminance, analysis.range, glyph_range);
    cancel.check()?;

    // Step 3: cell averages
    let grid = build_cell_grid(&leveled, geometry);
    log::debug!("Built {}x{} cell grid", grid.columns(), grid.rows());
    cancel.check()?;

    // Step 4: select and draw
    let render = render_ascii(characters, font, &metrics, &grid, &profile, cancel)?;
    log::debug!(
        "Rendered {}x{} ascii image",
        render.image.width(),
        render.image.height()
    );

    Ok(AsciiConversion {
        image: render.image,
        text: render.text,
        geometry,
        profile,
        columns: grid.columns(),
        rows: grid.rows(),
        warnings,
    })
}
