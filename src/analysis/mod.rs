/// Stained-region quantification: range-based color selection, minimum-area
/// region filtering, weighted intensity aggregation.

mod intensity;
mod regions;
mod selection;

use std::path::Path;
use std::sync::Arc;

use crate::formats;
use crate::types::{ColorRanges, ImageError, Measurement, PixelGrid};

pub use intensity::ChannelWeights;

/// Analyzer configuration (internal).
struct AnalyzerConfig {
    ranges: ColorRanges,
    min_area: usize,
}

/// Batch-constant analyzer with builder configuration. The weighting
/// coefficients are derived once at construction and reused for every image.
pub struct StainAnalyzer {
    config: AnalyzerConfig,
    weights: ChannelWeights,
    thread_pool: Option<Arc<rayon::ThreadPool>>,
}

impl StainAnalyzer {
    pub fn new(ranges: ColorRanges) -> Self {
        StainAnalyzer {
            weights: ChannelWeights::from_ranges(&ranges),
            config: AnalyzerConfig {
                ranges,
                min_area: 0,
            },
            thread_pool: None,
        }
    }

    /// Reject connected selected regions with fewer pixels than this.
    pub fn with_min_area(mut self, area: usize) -> Self {
        self.config.min_area = area;
        self
    }

    /// Use a custom rayon thread pool for the pixel-selection stage.
    pub fn with_thread_pool(mut self, pool: Arc<rayon::ThreadPool>) -> Self {
        self.thread_pool = Some(pool);
        self
    }

    pub fn weights(&self) -> ChannelWeights {
        self.weights
    }

    /// Full-cube ranges select every pixel, which makes area rejection
    /// meaningless: the threshold is forced to zero for the whole batch.
    fn effective_min_area(&self) -> usize {
        if self.config.ranges.selects_everything() {
            0
        } else {
            self.config.min_area
        }
    }

    /// Measure an already-decoded pixel grid.
    pub fn measure_grid(&self, grid: &PixelGrid) -> Measurement {
        match &self.thread_pool {
            Some(pool) => pool.install(|| self.run(grid)),
            None => self.run(grid),
        }
    }

    /// Decode an image file and measure it. The two failure kinds are
    /// terminal for this image only; callers record them and move on.
    pub fn analyze<P: AsRef<Path>>(&self, path: P) -> Result<Measurement, ImageError> {
        let grid = formats::read_rgb(path.as_ref())?;
        Ok(self.measure_grid(&grid))
    }

    fn run(&self, grid: &PixelGrid) -> Measurement {
        let mut mask = selection::select_pixels(grid, &self.config.ranges);
        regions::remove_small_regions(
            &mut mask,
            grid.width(),
            grid.height(),
            self.effective_min_area(),
        );
        intensity::measure(grid, &mask, &self.weights)
    }
}
