//! Sample Builder
//!
//! Nearest-neighbor downsampling of an RGBA raster to a square grid.

use digitpad_canvas::ImageData;

use crate::{Sample, SampleEncoding, SampleError, GRID_SIZE};

/// Builds samples from raster snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleBuilder {
    grid: u32,
    encoding: SampleEncoding,
}

impl SampleBuilder {
    /// Builder for a `grid` x `grid` sample
    pub fn new(grid: u32, encoding: SampleEncoding) -> Result<Self, SampleError> {
        if grid == 0 {
            return Err(SampleError::ZeroGrid);
        }
        Ok(Self { grid, encoding })
    }

    pub fn grid(&self) -> u32 {
        self.grid
    }

    pub fn encoding(&self) -> SampleEncoding {
        self.encoding
    }

    /// Number of values every sample carries
    pub fn sample_len(&self) -> usize {
        self.grid as usize * self.grid as usize
    }

    /// Downsample `image` into a fresh sample.
    ///
    /// Cell (x, y) reads the source pixel at `(floor(x * step_x), floor(y * step_y))`
    /// with `step = source / grid`, clamped to the raster. Alpha is ignored.
    pub fn build(&self, image: &ImageData) -> Result<Sample, SampleError> {
        let (width, height) = (image.width(), image.height());
        if image.is_empty() {
            return Err(SampleError::EmptyRaster { width, height });
        }

        let step_x = f64::from(width) / f64::from(self.grid);
        let step_y = f64::from(height) / f64::from(self.grid);

        let mut values = Vec::with_capacity(self.sample_len());
        for y in 0..self.grid {
            let sy = source_index(y, step_y, height);
            for x in 0..self.grid {
                let sx = source_index(x, step_x, width);
                let (r, g, b, _) = image
                    .get_pixel(sx, sy)
                    .ok_or(SampleError::EmptyRaster { width, height })?;
                let intensity = (f32::from(r) + f32::from(g) + f32::from(b)) / 3.0;
                values.push(self.encoding.encode(intensity));
            }
        }

        tracing::debug!(
            width,
            height,
            grid = self.grid,
            encoding = ?self.encoding,
            "built sample"
        );
        Ok(Sample::new(self.grid, values))
    }
}

impl Default for SampleBuilder {
    fn default() -> Self {
        Self {
            grid: GRID_SIZE,
            encoding: SampleEncoding::Normalized,
        }
    }
}

fn source_index(cell: u32, step: f64, extent: u32) -> u32 {
    let idx = (f64::from(cell) * step).floor() as u32;
    idx.min(extent - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SAMPLE_LEN;

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const BLACK: [u8; 4] = [0, 0, 0, 255];

    #[test]
    fn test_default_builder() {
        let builder = SampleBuilder::default();
        assert_eq!(builder.grid(), 28);
        assert_eq!(builder.sample_len(), SAMPLE_LEN);
        assert_eq!(builder.encoding(), SampleEncoding::Normalized);
    }

    #[test]
    fn test_zero_grid_rejected() {
        assert_eq!(
            SampleBuilder::new(0, SampleEncoding::Normalized).unwrap_err(),
            SampleError::ZeroGrid
        );
    }

    #[test]
    fn test_white_raster() {
        let sample = SampleBuilder::default()
            .build(&ImageData::filled(280, 280, WHITE))
            .unwrap();
        assert_eq!(sample.len(), 784);
        assert!(sample.values().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_black_raster() {
        let sample = SampleBuilder::default()
            .build(&ImageData::filled(280, 280, BLACK))
            .unwrap();
        assert_eq!(sample.len(), 784);
        assert!(sample.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_alpha_ignored() {
        let sample = SampleBuilder::default()
            .build(&ImageData::filled(56, 56, [255, 255, 255, 0]))
            .unwrap();
        assert!(sample.values().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_unweighted_channel_mean() {
        let sample = SampleBuilder::new(1, SampleEncoding::Intensity)
            .unwrap()
            .build(&ImageData::filled(3, 3, [30, 60, 90, 255]))
            .unwrap();
        assert_eq!(sample.values(), &[60.0]);
    }

    #[test]
    fn test_nearest_neighbor_picks_cell_origin() {
        // 280 / 28 = 10: cell (3, 1) samples source pixel (30, 10)
        let mut img = ImageData::filled(280, 280, WHITE);
        img.set_pixel(30, 10, 0, 0, 0, 255);
        // Neighbours inside the same cell are never read
        img.set_pixel(31, 10, 0, 0, 0, 255);
        img.set_pixel(35, 15, 0, 0, 0, 255);
        img.set_pixel(39, 19, 0, 0, 0, 255);

        let sample = SampleBuilder::default().build(&img).unwrap();
        assert_eq!(sample.get(3, 1), Some(0.0));
        let dark = sample.values().iter().filter(|&&v| v < 1.0).count();
        assert_eq!(dark, 1);
        assert_eq!(sample.values()[28 + 3], 0.0, "row-major: y * 28 + x");
    }

    #[test]
    fn test_fractional_step() {
        // 100 / 28 ≈ 3.571: cell 27 reads floor(27 * 3.571) = 96
        let mut img = ImageData::filled(100, 100, WHITE);
        img.set_pixel(96, 0, 0, 0, 0, 255);
        let sample = SampleBuilder::default().build(&img).unwrap();
        assert_eq!(sample.len(), 784);
        assert_eq!(sample.get(27, 0), Some(0.0));
        assert_eq!(sample.get(26, 0), Some(1.0));
    }

    #[test]
    fn test_grid_larger_than_raster() {
        let mut img = ImageData::filled(10, 7, WHITE);
        img.set_pixel(9, 6, 0, 0, 0, 255);
        let sample = SampleBuilder::default().build(&img).unwrap();
        assert_eq!(sample.len(), 784);
        assert_eq!(sample.get(27, 27), Some(0.0));
        assert!(sample.values().iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_empty_raster() {
        let err = SampleBuilder::default()
            .build(&ImageData::filled(0, 280, WHITE))
            .unwrap_err();
        assert_eq!(err, SampleError::EmptyRaster { width: 0, height: 280 });
    }

    #[test]
    fn test_intensity_encoding() {
        let sample = SampleBuilder::new(28, SampleEncoding::Intensity)
            .unwrap()
            .build(&ImageData::filled(280, 280, WHITE))
            .unwrap();
        assert!(sample.values().iter().all(|&v| v == 255.0));
    }
}
