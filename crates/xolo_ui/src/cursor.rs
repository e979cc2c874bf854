//! Custom cursor: a small dot that follows the pointer.

/// Tracks the pointer and positions the cursor dot centred on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorFollower {
    x: f32,
    y: f32,
    diameter: f32,
}

impl CursorFollower {
    /// Dot diameter in CSS pixels.
    pub const DIAMETER: f32 = 24.0;

    /// Creates a follower at the page origin.
    #[must_use]
    pub fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            diameter: Self::DIAMETER,
        }
    }

    /// Records a pointer position. Non-finite input is ignored.
    pub fn on_move(&mut self, x: f32, y: f32) {
        if x.is_finite() && y.is_finite() {
            self.x = x;
            self.y = y;
        }
    }

    /// Last pointer position.
    #[must_use]
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Top-left corner of the dot, so that its centre sits on the pointer.
    #[must_use]
    pub fn top_left(&self) -> (f32, f32) {
        let half = self.diameter / 2.0;
        (self.x - half, self.y - half)
    }

    /// Dot diameter.
    #[must_use]
    pub fn diameter(&self) -> f32 {
        self.diameter
    }
}

impl Default for CursorFollower {
    fn default() -> Self {
        Self::new()
    }
}
