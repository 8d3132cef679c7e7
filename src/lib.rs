// Batch quantification of stained regions in RGB images: per-channel color
// selection, minimum-area region filtering, weighted intensity scoring.

pub mod analysis;
pub mod batch;
pub mod formats;
pub mod output;
pub mod types;

pub use analysis::{ChannelWeights, StainAnalyzer};
pub use batch::analyze_batch;
pub use types::{ChannelRange, ColorRanges, ImageError, ImageReport, Measurement, PixelGrid};
