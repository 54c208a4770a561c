//! Digit Pad Canvas
//!
//! The drawing surface: a fixed-size RGBA raster painted by free-hand
//! strokes, and the pointer state machine that turns pointer events into
//! stroke segments.

pub mod context2d;
pub mod image_data;
pub mod pointer;
pub mod surface;

pub use context2d::{Color, DrawingContext, StrokeStyle};
pub use image_data::ImageData;
pub use pointer::{Point, PointerEvent, PointerEventType};
pub use surface::{DrawingSurface, StrokeState};

/// Default raster width in pixels
pub const DEFAULT_WIDTH: u32 = 280;

/// Default raster height in pixels
pub const DEFAULT_HEIGHT: u32 = 280;

/// Canvas error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanvasError {
    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}
