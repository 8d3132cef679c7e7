use rayon::prelude::*;

use crate::types::{ColorRanges, PixelGrid};

/// Build the row-major selection mask: true where all three channel samples
/// fall inside their inclusive ranges. Pure function of the grid and ranges;
/// each entry is independent of its neighbors.
pub(crate) fn select_pixels(grid: &PixelGrid, ranges: &ColorRanges) -> Vec<bool> {
    let r = grid.red();
    let g = grid.green();
    let b = grid.blue();

    let mut mask = vec![false; grid.pixel_count()];
    const CHUNK: usize = 8192;
    mask.par_chunks_mut(CHUNK)
        .enumerate()
        .for_each(|(ci, chunk)| {
            let off = ci * CHUNK;
            for (i, dst) in chunk.iter_mut().enumerate() {
                let idx = off + i;
                *dst = ranges.red.contains(r[idx])
                    && ranges.green.contains(g[idx])
                    && ranges.blue.contains(b[idx]);
            }
        });
    mask
}
