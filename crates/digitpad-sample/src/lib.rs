//! Digit Pad Samples
//!
//! Turns a raster snapshot into the fixed-size grayscale vector a small
//! image classifier consumes.
//!
//! The contract is a single one: nearest-neighbor downsampling to a G x G
//! grid (28 x 28 by default), unweighted RGB mean per sampled pixel, emitted
//! row-major. `SampleEncoding` only selects the scale of each value.

mod builder;

pub use builder::SampleBuilder;

use serde::Serialize;

/// Default grid edge
pub const GRID_SIZE: u32 = 28;

/// Values in a default sample
pub const SAMPLE_LEN: usize = (GRID_SIZE * GRID_SIZE) as usize;

/// Scale of each sample value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SampleEncoding {
    /// Intensity / 255, in [0, 1]
    #[default]
    Normalized,
    /// Raw mean intensity, in [0, 255]
    Intensity,
}

impl SampleEncoding {
    fn encode(self, intensity: f32) -> f32 {
        match self {
            SampleEncoding::Normalized => intensity / 255.0,
            SampleEncoding::Intensity => intensity,
        }
    }
}

impl std::str::FromStr for SampleEncoding {
    type Err = SampleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normalized" | "unit" => Ok(SampleEncoding::Normalized),
            "intensity" | "raw" => Ok(SampleEncoding::Intensity),
            other => Err(SampleError::UnknownEncoding(other.to_string())),
        }
    }
}

/// Flattened grayscale grid, row-major
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Sample {
    #[serde(skip)]
    grid: u32,
    values: Vec<f32>,
}

impl Sample {
    pub(crate) fn new(grid: u32, values: Vec<f32>) -> Self {
        debug_assert_eq!(values.len(), grid as usize * grid as usize);
        Self { grid, values }
    }

    /// Grid edge of the sample (values are `grid * grid`)
    pub fn grid(&self) -> u32 {
        self.grid
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Value at grid cell (x, y)
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        let grid = self.grid;
        if x >= grid || y >= grid {
            return None;
        }
        self.values.get((y * grid + x) as usize).copied()
    }
}

/// Sample error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SampleError {
    #[error("Cannot sample an empty raster ({width}x{height})")]
    EmptyRaster { width: u32, height: u32 },

    #[error("Grid size must be positive")]
    ZeroGrid,

    #[error("Unknown sample encoding: {0}")]
    UnknownEncoding(String),
}
