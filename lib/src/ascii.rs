use crate::cancel::CancellationToken;
use crate::charset::CharacterSet;
use crate::error::Result;
use crate::font::{CellGeometry, FontMetrics, FontSpec};
use crate::grid::CellGrid;
use crate::profile::GlyphProfile;
use crate::select::select_glyph;
use image::GrayImage;
use rayon::prelude::*;

/// Output raster plus the characters drawn into it
#[derive(Debug, Clone)]
pub struct AsciiRender {
    pub image: GrayImage,
    /// One line per grid row; lines are empty when nothing was drawn
    pub text: String,
}

/// Select a character for every cell of `grid`, row-major
///
/// An empty character set selects nothing and returns an empty list.
pub fn select_ascii_chars(
    characters: &CharacterSet,
    profile: &GlyphProfile,
    grid: &CellGrid,
) -> Result<Vec<char>> {
    if characters.is_empty() {
        return Ok(Vec::new());
    }

    grid.cells()
        .par_iter()
        .map(|&target| select_glyph(characters, profile, target))
        .collect()
}

/// Draw the best glyph for every cell into a fresh raster
///
/// The raster is exactly `columns * cell width` by `rows * cell height`,
/// black where nothing is drawn. Each glyph sits at the left edge of its
/// cell with its baseline `descent` pixels above the cell's bottom edge.
/// Selection runs in parallel; drawing is sequential and checks `cancel`
/// after each row.
///
/// # Arguments
/// * `characters` - Allowed characters, in tie-break order
/// * `font` - Face and point size to draw with
/// * `metrics` - Metrics of `font`; cell size and baseline come from here
/// * `grid` - Leveled cell brightness to match
/// * `profile` - Brightness of every character in `characters`
/// * `cancel` - Checked once per output row
///
/// # Returns
/// The drawn raster and the selected characters, or `Cancelled`
pub fn render_ascii(
    characters: &CharacterSet,
    font: &FontSpec,
    metrics: &FontMetrics,
    grid: &CellGrid,
    profile: &GlyphProfile,
    cancel: &CancellationToken,
) -> Result<AsciiRender> {
    let cell = CellGeometry::from_metrics(metrics);
    let (columns, rows) = (grid.columns(), grid.rows());
    let mut image = GrayImage::new(columns * cell.width, rows * cell.height);

    let chars = select_ascii_chars(characters, profile, grid)?;
    if chars.is_empty() {
        let text = vec![""; rows as usize].join("\n");
        return Ok(AsciiRender { image, text });
    }

    let mut lines = Vec::with_capacity(rows as usize);
    for (row, row_chars) in chars.chunks(columns as usize).enumerate() {
        cancel.check()?;

        let baseline = ((row as u32 + 1) * cell.height) as i32 - metrics.descent as i32;
        for (column, &ch) in row_chars.iter().enumerate() {
            let x = (column as u32 * cell.width) as i32;
            font.face().draw_char(&mut image, ch, x, baseline, font.point_size());
        }
        lines.push(row_chars.iter().collect::<String>());
    }

    Ok(AsciiRender {
        image,
        text: lines.join("\n"),
    })
}
