//! Application Configuration
//!
//! Defaults match the classic 280 x 280 canvas and 28 x 28 sample. Any field
//! can be overridden from the environment.

use std::time::Duration;

use digitpad_canvas::{CanvasError, DrawingSurface, StrokeStyle, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use digitpad_net::{ClientConfig, Endpoints, InferenceClient, NetError, Transport};
use digitpad_sample::{SampleBuilder, SampleEncoding, SampleError, GRID_SIZE};

use crate::session::Workbench;

/// Classifier base URL
pub const ENV_API: &str = "DIGITPAD_API";
/// Sample grid edge
pub const ENV_GRID: &str = "DIGITPAD_GRID";
/// `normalized` or `intensity`
pub const ENV_ENCODING: &str = "DIGITPAD_ENCODING";
/// Stroke width in pixels
pub const ENV_STROKE_WIDTH: &str = "DIGITPAD_STROKE_WIDTH";
/// Request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "DIGITPAD_TIMEOUT_SECS";

/// Configuration error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Stroke width must be a positive number, got {0}")]
    InvalidStrokeWidth(f32),

    #[error("Request timeout must be at least one second")]
    ZeroTimeout,

    #[error(transparent)]
    Canvas(#[from] CanvasError),

    #[error(transparent)]
    Sample(#[from] SampleError),

    #[error(transparent)]
    Endpoint(#[from] NetError),
}

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Classifier base URL; `api/predict` and `api/train` hang off it
    pub api_base: String,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub stroke: StrokeStyle,
    pub grid: u32,
    pub encoding: SampleEncoding,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:8000".into(),
            canvas_width: DEFAULT_WIDTH,
            canvas_height: DEFAULT_HEIGHT,
            stroke: StrokeStyle::default(),
            grid: GRID_SIZE,
            encoding: SampleEncoding::Normalized,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl AppConfig {
    /// Defaults overridden by the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by `lookup(key)` for every known key
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(api) = lookup(ENV_API) {
            config.api_base = api;
        }
        if let Some(grid) = lookup(ENV_GRID) {
            config.grid = parse(ENV_GRID, &grid)?;
        }
        if let Some(encoding) = lookup(ENV_ENCODING) {
            config.encoding = encoding.parse().map_err(|e: SampleError| ConfigError::InvalidValue {
                key: ENV_ENCODING,
                value: encoding.clone(),
                reason: e.to_string(),
            })?;
        }
        if let Some(width) = lookup(ENV_STROKE_WIDTH) {
            config.stroke.line_width = parse(ENV_STROKE_WIDTH, &width)?;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            config.request_timeout = Duration::from_secs(parse(ENV_TIMEOUT_SECS, &secs)?);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Check every field without building anything
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(CanvasError::InvalidDimensions {
                width: self.canvas_width,
                height: self.canvas_height,
            }
            .into());
        }
        let width = self.stroke.line_width;
        if !width.is_finite() || width <= 0.0 {
            return Err(ConfigError::InvalidStrokeWidth(width));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        SampleBuilder::new(self.grid, self.encoding)?;
        self.endpoints()?;
        Ok(())
    }

    pub fn endpoints(&self) -> Result<Endpoints, ConfigError> {
        Ok(Endpoints::from_base(&self.api_base)?)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            request_timeout: self.request_timeout,
            ..ClientConfig::default()
        }
    }

    /// Assemble a workbench talking through `transport`
    pub fn build_workbench<T: Transport>(&self, transport: T) -> Result<Workbench<T>, ConfigError> {
        self.validate()?;
        let surface = DrawingSurface::with_style(self.canvas_width, self.canvas_height, self.stroke)?;
        let builder = SampleBuilder::new(self.grid, self.encoding)?;
        let client = InferenceClient::new(transport, self.endpoints()?);
        Ok(Workbench::new(surface, builder, client))
    }
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
