//! Drawing Surface
//!
//! Owns the raster and the free-hand stroke state machine:
//!
//! ```text
//! Idle ──down──▶ Stroking ──move──▶ Stroking (segment painted, anchor moved)
//!                Stroking ──up/leave──▶ Idle
//! any  ──clear──▶ Idle (raster filled with background)
//! ```

use crate::context2d::{DrawingContext, StrokeStyle};
use crate::image_data::ImageData;
use crate::pointer::{Point, PointerEvent, PointerEventType};
use crate::CanvasError;

/// Per-gesture stroke state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StrokeState {
    #[default]
    Idle,
    Stroking {
        anchor: Point,
        /// Ink already covers the anchor
        inked: bool,
    },
}

/// Raster surface plus stroke state
#[derive(Debug, Clone)]
pub struct DrawingSurface {
    ctx: DrawingContext,
    state: StrokeState,
    /// Bumped on every raster mutation
    revision: u64,
}

impl DrawingSurface {
    /// Create a white surface with the default stroke style
    pub fn new(width: u32, height: u32) -> Result<Self, CanvasError> {
        Ok(Self::with_context(DrawingContext::new(width, height)?))
    }

    /// Create a surface with an explicit stroke style
    pub fn with_style(width: u32, height: u32, style: StrokeStyle) -> Result<Self, CanvasError> {
        let mut ctx = DrawingContext::new(width, height)?;
        ctx.set_stroke_style(style);
        Ok(Self::with_context(ctx))
    }

    fn with_context(ctx: DrawingContext) -> Self {
        Self {
            ctx,
            state: StrokeState::Idle,
            revision: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.ctx.width()
    }

    pub fn height(&self) -> u32 {
        self.ctx.height()
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    pub fn is_stroking(&self) -> bool {
        matches!(self.state, StrokeState::Stroking { .. })
    }

    /// Raster revision; changes whenever pixels change
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Snapshot the raster
    pub fn image_data(&self) -> ImageData {
        self.ctx.image_data()
    }

    /// Dispatch a pointer event. Returns whether the raster changed.
    pub fn handle(&mut self, event: PointerEvent) -> bool {
        match event.event_type {
            PointerEventType::PointerDown => {
                self.pointer_down(event.position);
                false
            }
            PointerEventType::PointerMove => self.pointer_move(event.position),
            PointerEventType::PointerUp | PointerEventType::PointerLeave => {
                self.pointer_stop();
                false
            }
        }
    }

    /// Begin a new path anchored at `at`
    pub fn pointer_down(&mut self, at: Point) {
        tracing::debug!(x = at.x, y = at.y, "stroke started");
        self.state = StrokeState::Stroking {
            anchor: at,
            inked: false,
        };
    }

    /// Paint a segment from the anchor to `to` and move the anchor.
    ///
    /// A move onto an anchor that is already inked changes nothing.
    pub fn pointer_move(&mut self, to: Point) -> bool {
        let StrokeState::Stroking { anchor, inked } = self.state else {
            return false;
        };
        if inked && anchor == to {
            return false;
        }
        let painted = self.ctx.stroke_segment(anchor, to);
        if painted {
            self.revision += 1;
        }
        self.state = StrokeState::Stroking {
            anchor: to,
            inked: painted,
        };
        painted
    }

    /// End the current stroke; pixels are untouched
    pub fn pointer_stop(&mut self) {
        if self.is_stroking() {
            tracing::debug!("stroke ended");
        }
        self.state = StrokeState::Idle;
    }

    /// Fill the raster with the background and return to `Idle`
    pub fn clear(&mut self) {
        self.ctx.fill_background();
        self.state = StrokeState::Idle;
        self.revision += 1;
        tracing::debug!(revision = self.revision, "surface cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

    fn is_blank(surface: &DrawingSurface) -> bool {
        surface.image_data().pixels().all(|px| px == [255, 255, 255, 255])
    }

    #[test]
    fn test_default_surface() {
        let surface = DrawingSurface::new(DEFAULT_WIDTH, DEFAULT_HEIGHT).unwrap();
        assert_eq!(surface.width(), 280);
        assert_eq!(surface.height(), 280);
        assert_eq!(surface.state(), StrokeState::Idle);
        assert!(is_blank(&surface));
    }

    #[test]
    fn test_move_while_idle_is_ignored() {
        let mut surface = DrawingSurface::new(100, 100).unwrap();
        assert!(!surface.handle(PointerEvent::moved(10.0, 10.0)));
        assert!(!surface.handle(PointerEvent::moved(90.0, 90.0)));
        assert!(is_blank(&surface));
        assert_eq!(surface.revision(), 0);
    }

    #[test]
    fn test_stroke_lifecycle() {
        let mut surface = DrawingSurface::new(100, 100).unwrap();

        assert!(!surface.handle(PointerEvent::down(10.0, 50.0)));
        assert_eq!(
            surface.state(),
            StrokeState::Stroking { anchor: Point::new(10.0, 50.0), inked: false }
        );
        assert!(is_blank(&surface), "pointer-down alone paints nothing");

        assert!(surface.handle(PointerEvent::moved(90.0, 50.0)));
        assert_eq!(
            surface.state(),
            StrokeState::Stroking { anchor: Point::new(90.0, 50.0), inked: true }
        );
        assert_eq!(surface.image_data().get_pixel(50, 50), Some((0, 0, 0, 255)));
        assert_eq!(surface.revision(), 1);

        let before = surface.image_data();
        surface.handle(PointerEvent::up(90.0, 50.0));
        assert_eq!(surface.state(), StrokeState::Idle);
        assert_eq!(surface.image_data(), before);

        surface.handle(PointerEvent::moved(10.0, 10.0));
        assert_eq!(surface.image_data(), before);
    }

    #[test]
    fn test_leave_ends_stroke() {
        let mut surface = DrawingSurface::new(100, 100).unwrap();
        surface.handle(PointerEvent::down(10.0, 10.0));
        surface.handle(PointerEvent::leave(0.0, 10.0));
        assert!(!surface.is_stroking());
    }

    #[test]
    fn test_strokes_are_additive() {
        let mut surface = DrawingSurface::new(100, 100).unwrap();
        surface.handle(PointerEvent::down(10.0, 20.0));
        surface.handle(PointerEvent::moved(90.0, 20.0));
        surface.handle(PointerEvent::up(90.0, 20.0));

        surface.handle(PointerEvent::down(10.0, 80.0));
        surface.handle(PointerEvent::moved(90.0, 80.0));

        let img = surface.image_data();
        assert_eq!(img.get_pixel(50, 20), Some((0, 0, 0, 255)));
        assert_eq!(img.get_pixel(50, 80), Some((0, 0, 0, 255)));
        assert_eq!(surface.revision(), 2);
    }

    #[test]
    fn test_move_onto_anchor_paints_dot_once() {
        let mut surface = DrawingSurface::new(100, 100).unwrap();
        surface.handle(PointerEvent::down(50.0, 50.0));

        assert!(surface.handle(PointerEvent::moved(50.0, 50.0)));
        assert_eq!(surface.image_data().get_pixel(50, 50), Some((0, 0, 0, 255)));
        assert_eq!(surface.revision(), 1);

        let before = surface.image_data();
        for _ in 0..5 {
            assert!(!surface.handle(PointerEvent::moved(50.0, 50.0)));
        }
        assert_eq!(surface.revision(), 1);
        assert_eq!(surface.image_data(), before);
    }

    #[test]
    fn test_repeated_move_after_segment_keeps_revision() {
        let mut surface = DrawingSurface::new(100, 100).unwrap();
        surface.handle(PointerEvent::down(10.0, 10.0));
        surface.handle(PointerEvent::moved(60.0, 60.0));
        let rev = surface.revision();

        assert!(!surface.handle(PointerEvent::moved(60.0, 60.0)));
        assert_eq!(surface.revision(), rev);

        assert!(surface.handle(PointerEvent::moved(70.0, 60.0)));
        assert_eq!(surface.revision(), rev + 1);
    }

    #[test]
    fn test_clear_from_stroking() {
        let mut surface = DrawingSurface::new(100, 100).unwrap();
        surface.handle(PointerEvent::down(10.0, 10.0));
        surface.handle(PointerEvent::moved(60.0, 60.0));
        assert!(!is_blank(&surface));

        surface.clear();
        assert_eq!(surface.state(), StrokeState::Idle);
        assert!(is_blank(&surface));

        let rev = surface.revision();
        surface.clear();
        assert!(is_blank(&surface));
        assert_eq!(surface.revision(), rev + 1);
    }
}
