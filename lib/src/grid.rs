use crate::font::CellGeometry;
use crate::luminance::grey_level;
use image::GrayImage;
use rayon::prelude::*;

/// Average brightness of every glyph-sized cell of an image, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGrid {
    columns: u32,
    rows: u32,
    cells: Vec<u8>,
}

impl CellGrid {
    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn get(&self, column: u32, row: u32) -> Option<u8> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.cells.get((row * self.columns + column) as usize).copied()
    }
}

/// Grid shape for an image of `width`x`height`: (columns, rows), rounded up
///
/// Panics if the cell is empty.
pub fn grid_dimensions(width: u32, height: u32, cell: CellGeometry) -> (u32, u32) {
    assert!(!cell.is_empty(), "Cell geometry must be non-zero");
    (width.div_ceil(cell.width), height.div_ceil(cell.height))
}

/// Downscale a leveled luminance image to one brightness per cell
///
/// Cells on the right and bottom edges may hang over the image; only the
/// pixels inside it are averaged. Cells are independent and computed in
/// parallel.
///
/// # Arguments
/// * `leveled` - Luminance already leveled onto the glyph range
/// * `cell` - Size of one glyph cell
///
/// # Returns
/// `ceil(width / cell.width)` by `ceil(height / cell.height)` cell averages
///
/// # Panics
/// If `cell` has a zero dimension.
pub fn build_cell_grid(leveled: &GrayImage, cell: CellGeometry) -> CellGrid {
    let (width, height) = leveled.dimensions();
    let (columns, rows) = grid_dimensions(width, height, cell);
    let num_cells = (columns * rows) as usize;

    let cells = (0..num_cells)
        .into_par_iter()
        .map(|cell_idx| {
            let column = (cell_idx as u32) % columns;
            let row = (cell_idx as u32) / columns;

            let x0 = column * cell.width;
            let y0 = row * cell.height;
            let x1 = (x0 + cell.width).min(width);
            let y1 = (y0 + cell.height).min(height);

            let mut sum = 0u64;
            for py in y0..y1 {
                for px in x0..x1 {
                    sum += grey_level(leveled.get_pixel(px, py)) as u64;
                }
            }

            // Ceiling-division sizing leaves every cell at least one pixel
            let count = ((x1 - x0) * (y1 - y0)) as f64;
            (sum as f64 / count).round() as u8
        })
        .collect();

    CellGrid {
        columns,
        rows,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn cell(width: u32, height: u32) -> CellGeometry {
        CellGeometry { width, height }
    }

    #[test]
    fn test_grid_dimensions_round_up() {
        assert_eq!(grid_dimensions(16, 16, cell(8, 8)), (2, 2));
        assert_eq!(grid_dimensions(17, 9, cell(8, 8)), (3, 2));
        assert_eq!(grid_dimensions(1, 1, cell(5, 11)), (1, 1));
        assert_eq!(grid_dimensions(100, 37, cell(7, 12)), (15, 4));
    }

    #[test]
    fn test_grid_dimensions_for_many_shapes() {
        for (w, h) in [(1, 1), (3, 50), (64, 64), (99, 2)] {
            for (cw, ch) in [(1, 1), (4, 9), (7, 3)] {
                let (columns, rows) = grid_dimensions(w, h, cell(cw, ch));
                assert_eq!(columns, (w as f64 / cw as f64).ceil() as u32);
                assert_eq!(rows, (h as f64 / ch as f64).ceil() as u32);
            }
        }
    }

    #[test]
    #[should_panic(expected = "Cell geometry must be non-zero")]
    fn test_grid_dimensions_empty_cell() {
        grid_dimensions(10, 10, cell(0, 8));
    }

    #[test]
    fn test_build_cell_grid_uniform() {
        let img = GrayImage::from_pixel(16, 16, Luma([128]));
        let grid = build_cell_grid(&img, cell(8, 8));

        assert_eq!((grid.columns(), grid.rows()), (2, 2));
        assert!(grid.cells().iter().all(|&v| v == 128));
    }

    #[test]
    fn test_build_cell_grid_partial_edge_cells() {
        // 3x1 image with 2x2 cells: right cell holds a single pixel
        let mut img = GrayImage::new(3, 1);
        img.put_pixel(0, 0, Luma([10]));
        img.put_pixel(1, 0, Luma([21]));
        img.put_pixel(2, 0, Luma([200]));
        let grid = build_cell_grid(&img, cell(2, 2));

        assert_eq!((grid.columns(), grid.rows()), (2, 1));
        // (10 + 21) / 2 = 15.5 rounds up
        assert_eq!(grid.get(0, 0), Some(16));
        assert_eq!(grid.get(1, 0), Some(200));
        assert_eq!(grid.get(2, 0), None);
    }

    #[test]
    fn test_build_cell_grid_row_major() {
        let mut img = GrayImage::new(2, 2);
        img.put_pixel(1, 0, Luma([1]));
        img.put_pixel(0, 1, Luma([2]));
        img.put_pixel(1, 1, Luma([3]));
        let grid = build_cell_grid(&img, cell(1, 1));
        assert_eq!(grid.cells(), &[0, 1, 2, 3]);
    }
}
