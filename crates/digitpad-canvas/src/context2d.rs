//! Canvas 2D Rendering Context
//!
//! A small subset of CanvasRenderingContext2D backed by a `tiny_skia`
//! pixmap: background fill and round-capped line segments.

use tiny_skia::{FillRule, LineCap, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::image_data::ImageData;
use crate::pointer::Point;
use crate::CanvasError;

/// Color (RGBA)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

/// Stroke style applied to every segment; caps are always round
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub line_width: f32,
    pub anti_alias: bool,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            line_width: 15.0,
            anti_alias: true,
        }
    }
}

/// 2D drawing context over an RGBA raster
#[derive(Debug, Clone)]
pub struct DrawingContext {
    pixmap: Pixmap,
    background: Color,
    stroke_style: StrokeStyle,
}

impl DrawingContext {
    /// Create a new context filled with white
    pub fn new(width: u32, height: u32) -> Result<Self, CanvasError> {
        Self::with_style(width, height, Color::WHITE, StrokeStyle::default())
    }

    /// Create a context with an explicit background and stroke style
    pub fn with_style(
        width: u32,
        height: u32,
        background: Color,
        stroke_style: StrokeStyle,
    ) -> Result<Self, CanvasError> {
        let pixmap =
            Pixmap::new(width, height).ok_or(CanvasError::InvalidDimensions { width, height })?;
        let mut ctx = Self {
            pixmap,
            background,
            stroke_style,
        };
        ctx.fill_background();
        Ok(ctx)
    }

    /// Get canvas width
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Get canvas height
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn set_stroke_style(&mut self, style: StrokeStyle) {
        self.stroke_style = style;
    }

    /// Fill the whole raster with the background color
    pub fn fill_background(&mut self) {
        self.pixmap.fill(self.background.to_skia());
    }

    /// Stroke a straight segment over the existing pixels.
    ///
    /// A zero-length segment paints the round cap alone, as a browser canvas
    /// does for a degenerate subpath. Returns whether anything was painted.
    pub fn stroke_segment(&mut self, from: Point, to: Point) -> bool {
        if !(from.is_finite() && to.is_finite()) {
            return false;
        }
        let style = self.stroke_style;
        let mut paint = Paint::default();
        paint.set_color(style.color.to_skia());
        paint.anti_alias = style.anti_alias;

        if from == to {
            return self.paint_dot(to, &paint);
        }

        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);
        let Some(path) = pb.finish() else {
            return false;
        };

        let stroke = Stroke {
            width: style.line_width,
            line_cap: LineCap::Round,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        true
    }

    fn paint_dot(&mut self, at: Point, paint: &Paint<'_>) -> bool {
        let radius = self.stroke_style.line_width / 2.0;
        let Some(path) = PathBuilder::from_circle(at.x, at.y, radius) else {
            return false;
        };
        self.pixmap
            .fill_path(&path, paint, FillRule::Winding, Transform::identity(), None);
        true
    }

    /// Snapshot the raster as straight RGBA
    pub fn image_data(&self) -> ImageData {
        let mut data = Vec::with_capacity(self.pixmap.data().len());
        for px in self.pixmap.pixels() {
            let c = px.demultiply();
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        ImageData::from_parts(data, self.width(), self.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(ctx: &DrawingContext, x: u32, y: u32) -> (u8, u8, u8, u8) {
        ctx.image_data().get_pixel(x, y).unwrap()
    }

    #[test]
    fn test_create_context() {
        let ctx = DrawingContext::new(100, 80).unwrap();
        assert_eq!(ctx.width(), 100);
        assert_eq!(ctx.height(), 80);
        assert!(ctx.image_data().pixels().all(|px| px == [255, 255, 255, 255]));
    }

    #[test]
    fn test_invalid_dimensions() {
        let err = DrawingContext::new(0, 10).unwrap_err();
        assert_eq!(err, CanvasError::InvalidDimensions { width: 0, height: 10 });
    }

    #[test]
    fn test_stroke_segment() {
        let mut ctx = DrawingContext::new(200, 200).unwrap();
        assert!(ctx.stroke_segment(Point::new(50.0, 100.0), Point::new(150.0, 100.0)));

        assert_eq!(pixel(&ctx, 100, 100), (0, 0, 0, 255));
        assert_eq!(pixel(&ctx, 100, 20), (255, 255, 255, 255));
    }

    #[test]
    fn test_round_cap_extends_past_endpoint() {
        let mut ctx = DrawingContext::new(200, 200).unwrap();
        ctx.stroke_segment(Point::new(50.0, 100.0), Point::new(150.0, 100.0));
        assert_eq!(pixel(&ctx, 155, 100), (0, 0, 0, 255));
        assert_eq!(pixel(&ctx, 160, 100), (255, 255, 255, 255));
    }

    #[test]
    fn test_non_finite_segment() {
        let mut ctx = DrawingContext::new(50, 50).unwrap();
        assert!(!ctx.stroke_segment(Point::new(f32::INFINITY, 0.0), Point::new(25.0, 25.0)));
        assert!(ctx.image_data().pixels().all(|px| px == [255, 255, 255, 255]));
    }

    #[test]
    fn test_zero_length_segment_paints_dot() {
        let mut ctx = DrawingContext::new(50, 50).unwrap();
        assert!(ctx.stroke_segment(Point::new(25.0, 25.0), Point::new(25.0, 25.0)));
        assert_eq!(pixel(&ctx, 25, 25), (0, 0, 0, 255));
        assert_eq!(pixel(&ctx, 0, 0), (255, 255, 255, 255));
    }

    #[test]
    fn test_fill_background_erases_strokes() {
        let mut ctx = DrawingContext::new(60, 60).unwrap();
        ctx.stroke_segment(Point::new(0.0, 0.0), Point::new(60.0, 60.0));
        assert!(ctx.image_data().pixels().any(|px| px != [255, 255, 255, 255]));

        ctx.fill_background();
        assert!(ctx.image_data().pixels().all(|px| px == [255, 255, 255, 255]));
    }

    #[test]
    fn test_strokes_are_gray() {
        let mut ctx = DrawingContext::new(64, 64).unwrap();
        ctx.stroke_segment(Point::new(3.0, 7.0), Point::new(58.0, 41.0));
        assert!(ctx.image_data().pixels().all(|[r, g, b, _]| r == g && g == b));
    }
}
