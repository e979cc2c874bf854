//! Page input.
//!
//! [`InputEvent`] is what the host delivers; [`InputState`] folds a frame's
//! worth of events into positions and deltas.

/// A raw input event from the host page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to viewport position `(x, y)`.
    PointerMove {
        /// X in CSS pixels.
        x: f32,
        /// Y in CSS pixels.
        y: f32,
        /// Host clock in ms.
        time: f64,
    },
    /// Page scrolled by `delta_y` CSS pixels.
    Scroll {
        /// Vertical scroll distance, positive is down.
        delta_y: f32,
        /// Host clock in ms.
        time: f64,
    },
    /// Viewport changed.
    Resize {
        /// Width in CSS pixels.
        width: f32,
        /// Height in CSS pixels.
        height: f32,
        /// Device pixel ratio.
        device_pixel_ratio: f32,
    },
}

impl InputEvent {
    /// Host timestamp, if the event carries one.
    #[must_use]
    pub fn time(&self) -> Option<f64> {
        match *self {
            Self::PointerMove { time, .. } | Self::Scroll { time, .. } => Some(time),
            Self::Resize { .. } => None,
        }
    }
}

/// Input accumulated over the current frame.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Pointer X.
    pub pointer_x: f32,
    /// Pointer Y.
    pub pointer_y: f32,
    /// Pointer X at the start of the frame.
    pub prev_pointer_x: f32,
    /// Pointer Y at the start of the frame.
    pub prev_pointer_y: f32,
    /// Scroll distance this frame.
    pub scroll_delta: f32,
    /// Total scroll offset of the page.
    pub scroll_offset: f32,
    /// Pointer events seen this frame.
    moves: u32,
    /// Scroll events seen this frame.
    scrolls: u32,
    /// Pointer has been seen at least once.
    pointer_seen: bool,
}

impl InputState {
    /// Creates an empty input state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new frame, clearing per-frame counters.
    pub fn begin_frame(&mut self) {
        self.prev_pointer_x = self.pointer_x;
        self.prev_pointer_y = self.pointer_y;
        self.scroll_delta = 0.0;
        self.moves = 0;
        self.scrolls = 0;
    }

    /// Folds one event into the frame.
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerMove { x, y, .. } => {
                if !self.pointer_seen {
                    // No jump from the origin on the first sample
                    self.prev_pointer_x = x;
                    self.prev_pointer_y = y;
                    self.pointer_seen = true;
                }
                self.pointer_x = x;
                self.pointer_y = y;
                self.moves += 1;
            }
            InputEvent::Scroll { delta_y, .. } => {
                if delta_y.is_finite() {
                    self.scroll_delta += delta_y;
                    self.scroll_offset = (self.scroll_offset + delta_y).max(0.0);
                }
                self.scrolls += 1;
            }
            InputEvent::Resize { .. } => {}
        }
    }

    /// Pointer movement since the frame started.
    #[must_use]
    pub fn pointer_delta(&self) -> (f32, f32) {
        (
            self.pointer_x - self.prev_pointer_x,
            self.pointer_y - self.prev_pointer_y,
        )
    }

    /// True if the pointer moved this frame.
    #[must_use]
    pub fn pointer_moved(&self) -> bool {
        self.moves > 0
    }

    /// True if the page scrolled this frame.
    #[must_use]
    pub fn scrolled(&self) -> bool {
        self.scrolls > 0
    }

    /// Pointer events seen this frame.
    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.moves
    }
}
