//! Turns per-frame scroll offsets into discrete scroll events.
//!
//! egui reports where a `ScrollArea` is, not what the user is doing, so
//! motion is inferred by comparing offsets between frames. Only motion the
//! user started counts: a programmatic jump to the newest message is not a
//! scroll gesture.

/// Offsets closer than this (in points) count as "not moving".
const MOTION_EPSILON: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollEvent {
    /// The user began scrolling (wheel, touch or drag)
    Started,
    /// Motion (including momentum) stopped
    Ended,
    /// The oldest loaded message scrolled into the top edge
    ReachedOldest,
}

#[derive(Clone, Debug, Default)]
pub struct ScrollTracker {
    last_offset: Option<f32>,
    moving: bool,
    at_oldest: bool,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's scroll position.
    ///
    /// `user_input` is true while the user is wheeling or dragging the list
    /// this frame. Once started, a scroll stays active for as long as the
    /// offset keeps moving (momentum) or input continues.
    pub fn observe(
        &mut self,
        offset: f32,
        viewport_height: f32,
        content_height: f32,
        user_input: bool,
    ) -> Vec<ScrollEvent> {
        let mut events = Vec::new();

        let moved = self
            .last_offset
            .is_some_and(|last| (offset - last).abs() > MOTION_EPSILON);
        self.last_offset = Some(offset);

        if user_input && !self.moving {
            self.moving = true;
            events.push(ScrollEvent::Started);
        } else if self.moving && !moved && !user_input {
            self.moving = false;
            events.push(ScrollEvent::Ended);
        }

        let scrollable = content_height > viewport_height + MOTION_EPSILON;
        let at_top = scrollable && offset <= MOTION_EPSILON;
        let arrived = at_top && moved && (self.moving || user_input);
        if arrived && !self.at_oldest {
            events.push(ScrollEvent::ReachedOldest);
        }
        // Re-arm only after leaving the top.
        if !at_top {
            self.at_oldest = false;
        } else if arrived {
            self.at_oldest = true;
        }

        events
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }
}
