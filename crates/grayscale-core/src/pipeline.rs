//! Grayscale pixel pipeline.
//!
//! Every destination cell depends only on the source pixel at the same
//! coordinate, so the grid can be split into horizontal bands of rows and
//! converted on scoped worker threads. Each worker owns a disjoint slice of
//! the destination buffer and the scope join is the completion barrier: the
//! returned grid is always fully populated.
//!
//! Output is bit-identical for every traversal and worker count.

use std::num::NonZeroUsize;
use std::thread;

use serde::{Deserialize, Serialize};

use crate::grid::{GrayscaleGrid, PixelGrid, RGBA_CHANNELS};
use crate::luma::luma_rgba8;

/// How the pipeline walks the source grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Traversal {
    /// Single loop on the calling thread.
    Sequential,
    /// Split rows into up to `workers` bands, one scoped thread per band.
    RowBands { workers: usize },
}

impl Default for Traversal {
    fn default() -> Self {
        let workers = thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        Self::from_workers(workers)
    }
}

impl Traversal {
    /// Row bands for `workers > 1`, sequential otherwise.
    pub fn from_workers(workers: usize) -> Self {
        if workers <= 1 {
            Traversal::Sequential
        } else {
            Traversal::RowBands { workers }
        }
    }
}

/// Convert a color grid to grayscale.
///
/// # Example
/// ```
/// use grayscale_core::grid::PixelGrid;
/// use grayscale_core::pipeline::{to_grayscale, Traversal};
///
/// let red = PixelGrid::new(1, 1, vec![255, 0, 0, 255]);
/// let gray = to_grayscale(&red, Traversal::Sequential);
/// assert_eq!(gray.pixels, vec![76]);
/// ```
pub fn to_grayscale(source: &PixelGrid, traversal: Traversal) -> GrayscaleGrid {
    match traversal {
        Traversal::Sequential => to_grayscale_sequential(source),
        Traversal::RowBands { workers } => to_grayscale_row_bands(source, workers),
    }
}

/// Convert on the calling thread.
pub fn to_grayscale_sequential(source: &PixelGrid) -> GrayscaleGrid {
    let mut gray = GrayscaleGrid::matching(source);
    convert_span(&source.pixels, &mut gray.pixels);
    gray
}

/// Convert using up to `workers` scoped threads, one per band of rows.
pub fn to_grayscale_row_bands(source: &PixelGrid, workers: usize) -> GrayscaleGrid {
    let mut gray = GrayscaleGrid::matching(source);
    if source.is_empty() {
        return gray;
    }

    let width = source.width as usize;
    let height = source.height as usize;
    let rows_per_band = height.div_ceil(workers.clamp(1, height));

    let src_band = rows_per_band * width * RGBA_CHANNELS;
    let dst_band = rows_per_band * width;

    thread::scope(|scope| {
        for (src, dst) in source
            .pixels
            .chunks(src_band)
            .zip(gray.pixels.chunks_mut(dst_band))
        {
            scope.spawn(move || convert_span(src, dst));
        }
    });

    gray
}

#[inline]
fn convert_span(src: &[u8], dst: &mut [u8]) {
    debug_assert_eq!(src.len(), dst.len() * RGBA_CHANNELS);

    for (px, out) in src.chunks_exact(RGBA_CHANNELS).zip(dst.iter_mut()) {
        *out = luma_rgba8(px[0], px[1], px[2], px[3]);
    }
}
