//! Pointer Events
//!
//! Primary-pointer input in surface-local coordinates.

/// Surface-local position (offset within the drawing element)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Pointer event types that drive a stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventType {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerLeave,
}

impl PointerEventType {
    /// Whether this event ends the current stroke
    pub fn is_stop(self) -> bool {
        matches!(self, PointerEventType::PointerUp | PointerEventType::PointerLeave)
    }
}

/// Pointer event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub event_type: PointerEventType,
    pub position: Point,
}

impl PointerEvent {
    pub fn new(event_type: PointerEventType, x: f32, y: f32) -> Self {
        Self {
            event_type,
            position: Point::new(x, y),
        }
    }

    pub fn down(x: f32, y: f32) -> Self {
        Self::new(PointerEventType::PointerDown, x, y)
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerEventType::PointerMove, x, y)
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::new(PointerEventType::PointerUp, x, y)
    }

    pub fn leave(x: f32, y: f32) -> Self {
        Self::new(PointerEventType::PointerLeave, x, y)
    }
}
