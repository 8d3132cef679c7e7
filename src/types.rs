use anyhow::bail;

/// Inclusive selection bounds for one color channel, both ends in [0, 255].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ChannelRange {
    low: u8,
    high: u8,
}

impl ChannelRange {
    /// Construct a range, rejecting reversed bounds. A reversed range is a
    /// configuration error and must fail before any image is processed.
    pub fn new(low: u8, high: u8) -> anyhow::Result<Self> {
        if low > high {
            bail!("Invalid channel range: low {} > high {}", low, high);
        }
        Ok(ChannelRange { low, high })
    }

    /// The full [0, 255] span: every sample passes.
    pub fn full() -> Self {
        ChannelRange { low: 0, high: 255 }
    }

    pub fn low(&self) -> u8 {
        self.low
    }

    pub fn high(&self) -> u8 {
        self.high
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.low as f32 && value <= self.high as f32
    }

    pub fn is_full(&self) -> bool {
        self.low == 0 && self.high == 255
    }
}

/// One selection range per channel, fixed for an entire batch run.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ColorRanges {
    pub red: ChannelRange,
    pub green: ChannelRange,
    pub blue: ChannelRange,
}

impl ColorRanges {
    /// All three channels spanning [0, 255].
    pub fn full() -> Self {
        ColorRanges {
            red: ChannelRange::full(),
            green: ChannelRange::full(),
            blue: ChannelRange::full(),
        }
    }

    /// True when the ranges cover the entire color cube, so every pixel of
    /// every image passes selection.
    pub fn selects_everything(&self) -> bool {
        self.red.is_full() && self.green.is_full() && self.blue.is_full()
    }
}

/// Decoded RGB image: planar f32 channels (all red samples, then all green,
/// then all blue), row-major within each plane, values in [0, 255].
/// Immutable after decode.
pub struct PixelGrid {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl PixelGrid {
    /// Wrap planar channel data. `data` must hold exactly
    /// `width * height * 3` samples.
    pub fn from_planar(data: Vec<f32>, width: usize, height: usize) -> anyhow::Result<Self> {
        if data.len() != width * height * 3 {
            bail!(
                "Planar data length {} does not match {}x{} RGB",
                data.len(),
                width,
                height
            );
        }
        Ok(PixelGrid {
            data,
            width,
            height,
        })
    }

    /// Convert an interleaved 8-bit RGB buffer to planar f32.
    pub fn from_rgb8(image: &image::RgbImage) -> Self {
        let width = image.width() as usize;
        let height = image.height() as usize;
        let plane = width * height;
        let mut data = vec![0.0_f32; plane * 3];
        for (i, pixel) in image.pixels().enumerate() {
            data[i] = pixel[0] as f32;
            data[plane + i] = pixel[1] as f32;
            data[2 * plane + i] = pixel[2] as f32;
        }
        PixelGrid {
            data,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    pub fn red(&self) -> &[f32] {
        &self.data[..self.pixel_count()]
    }

    pub fn green(&self) -> &[f32] {
        &self.data[self.pixel_count()..2 * self.pixel_count()]
    }

    pub fn blue(&self) -> &[f32] {
        &self.data[2 * self.pixel_count()..]
    }
}

/// Surviving selected area and weighted intensity for one image.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Measurement {
    /// Count of pixels still selected after region filtering.
    pub area: usize,
    /// Sum of weighted gray values over the selected pixels, divided by 255.
    pub intensity: f64,
}

/// Per-image failure. Recorded in the report; never aborts the batch.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ImageError {
    /// The file could not be opened or decoded.
    OpenFailed,
    /// The file decoded to something other than 8-bit three-channel RGB.
    NotRgb,
}

impl std::fmt::Display for ImageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageError::OpenFailed => write!(f, "Open Failed"),
            ImageError::NotRgb => write!(f, "Not RGB Mode"),
        }
    }
}

impl std::error::Error for ImageError {}

/// One report row: the image's file name and its outcome.
#[derive(Clone, PartialEq, Debug)]
pub struct ImageReport {
    pub name: String,
    pub result: Result<Measurement, ImageError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_rejects_reversed_bounds() {
        assert!(ChannelRange::new(200, 100).is_err());
        assert!(ChannelRange::new(100, 100).is_ok());
    }

    #[test]
    fn range_contains_is_inclusive() {
        let range = ChannelRange::new(10, 20).unwrap();
        assert!(range.contains(10.0));
        assert!(range.contains(20.0));
        assert!(range.contains(15.0));
        assert!(!range.contains(9.0));
        assert!(!range.contains(21.0));
    }

    #[test]
    fn full_ranges_select_everything() {
        assert!(ChannelRange::full().is_full());
        assert!(ColorRanges::full().selects_everything());

        let narrow = ColorRanges {
            red: ChannelRange::new(0, 254).unwrap(),
            green: ChannelRange::full(),
            blue: ChannelRange::full(),
        };
        assert!(!narrow.selects_everything());
    }

    #[test]
    fn grid_from_rgb8_is_planar() {
        // 2x1 image: red pixel then blue pixel.
        let buffer = image::RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 0, 255]).unwrap();
        let grid = PixelGrid::from_rgb8(&buffer);

        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 1);
        assert_eq!(grid.red(), &[255.0, 0.0]);
        assert_eq!(grid.green(), &[0.0, 0.0]);
        assert_eq!(grid.blue(), &[0.0, 255.0]);
    }

    #[test]
    fn from_planar_rejects_bad_length() {
        assert!(PixelGrid::from_planar(vec![0.0; 5], 2, 1).is_err());
        assert!(PixelGrid::from_planar(vec![0.0; 6], 2, 1).is_ok());
    }

    #[test]
    fn zero_area_grid_is_valid() {
        let grid = PixelGrid::from_planar(Vec::new(), 0, 0).unwrap();
        assert_eq!(grid.pixel_count(), 0);
        assert!(grid.red().is_empty());
    }

    #[test]
    fn error_kinds_use_report_strings() {
        assert_eq!(ImageError::OpenFailed.to_string(), "Open Failed");
        assert_eq!(ImageError::NotRgb.to_string(), "Not RGB Mode");
    }
}
