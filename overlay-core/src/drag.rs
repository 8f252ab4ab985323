//! Pointer-drag sessions and pointer capture.
//!
//! A drag exists from pointer-down on the logo until pointer-up. While it
//! exists the host keeps global move/up listeners attached; [`PointerCapture`]
//! tells it when to attach and detach them.

use serde::{Deserialize, Serialize};

use crate::layout::Point;

/// What the host should do with its global pointer listeners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerCapture {
    /// Leave listeners as they are.
    #[default]
    Unchanged,
    /// A drag started: attach move/up listeners.
    Acquire,
    /// The drag ended: detach them.
    Release,
}

/// An active drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    /// Pointer position relative to the logo's top-left corner, fixed for
    /// the whole drag.
    pub offset: Point,
}

impl DragSession {
    /// Start a drag. All three points are in client space.
    #[must_use]
    pub fn begin(pointer: Point, origin: Point, logo_top_left: Point) -> Self {
        Self {
            offset: Point::new(
                pointer.x - (origin.x + logo_top_left.x),
                pointer.y - (origin.y + logo_top_left.y),
            ),
        }
    }

    /// Unsnapped, unclamped logo top-left (container space) for a pointer at
    /// `pointer` with the container at `origin`.
    #[must_use]
    pub fn target(&self, pointer: Point, origin: Point) -> Point {
        Point::new(
            pointer.x - origin.x - self.offset.x,
            pointer.y - origin.y - self.offset.y,
        )
    }
}

/// Owner of the global pointer listeners (a DOM document, a window, ...).
pub trait PointerHost {
    /// Attach move/up listeners.
    fn attach(&mut self);

    /// Detach move/up listeners.
    fn detach(&mut self);
}

/// Host without listeners to manage, for headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedHost;

impl PointerHost for DetachedHost {
    fn attach(&mut self) {}

    fn detach(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_is_held_for_the_drag() {
        let origin = Point::new(20.0, 30.0);
        let session = DragSession::begin(Point::new(95.0, 110.0), origin, Point::new(50.0, 50.0));
        assert_eq!(session.offset, Point::new(25.0, 30.0));

        // Not moving the pointer keeps the logo where it was.
        assert_eq!(
            session.target(Point::new(95.0, 110.0), origin),
            Point::new(50.0, 50.0)
        );
        assert_eq!(
            session.target(Point::new(195.0, 160.0), origin),
            Point::new(150.0, 100.0)
        );
    }
}
