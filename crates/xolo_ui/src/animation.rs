//! Panel transitions.
//!
//! The cart panel rides a damped spring between off-screen (1) and docked
//! (0). The checkout overlay fades its opacity at a constant rate. Both are
//! stepped with the frame delta in seconds.

/// A damped spring pulling a value towards its target.
///
/// Integrated with semi-implicit Euler in fixed substeps, so long frames stay
/// stable. The value snaps onto the target once both the distance and the
/// speed drop below their rest thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    position: f32,
    velocity: f32,
    target: f32,
    stiffness: f32,
    damping: f32,
}

impl Spring {
    /// Stiffness of the cart panel slide.
    pub const CART_STIFFNESS: f32 = 300.0;
    /// Damping of the cart panel slide.
    pub const CART_DAMPING: f32 = 30.0;
    /// Distance from the target under which the spring may rest.
    pub const REST_DELTA: f32 = 0.001;
    /// Speed under which the spring may rest (units per second).
    pub const REST_SPEED: f32 = 0.01;
    /// Longest integration step in seconds.
    const MAX_STEP: f32 = 1.0 / 240.0;

    /// Creates a spring resting at `position`.
    #[must_use]
    pub fn new(position: f32, stiffness: f32, damping: f32) -> Self {
        Self {
            position,
            velocity: 0.0,
            target: position,
            stiffness: stiffness.max(0.0),
            damping: damping.max(0.0),
        }
    }

    /// The cart panel spring, resting at `position`.
    #[must_use]
    pub fn cart_panel(position: f32) -> Self {
        Self::new(position, Self::CART_STIFFNESS, Self::CART_DAMPING)
    }

    /// Current value.
    #[must_use]
    pub fn position(&self) -> f32 {
        self.position
    }

    /// Current speed in units per second.
    #[must_use]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Value the spring pulls towards.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// True once the spring sits on its target with no speed left.
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        (self.position - self.target).abs() < Self::REST_DELTA
            && self.velocity.abs() < Self::REST_SPEED
    }

    /// Moves the anchor. The current position and speed carry over.
    pub fn set_target(&mut self, target: f32) {
        if target.is_finite() {
            self.target = target;
        }
    }

    /// Advances by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 || self.is_at_rest() {
            self.settle();
            return;
        }

        let steps = (dt / Self::MAX_STEP).ceil().max(1.0);
        let h = dt / steps;
        for _ in 0..steps as u32 {
            let pull = -self.stiffness * (self.position - self.target);
            let drag = -self.damping * self.velocity;
            self.velocity += (pull + drag) * h;
            self.position += self.velocity * h;
        }
        self.settle();
    }

    fn settle(&mut self) {
        if self.is_at_rest() {
            self.position = self.target;
            self.velocity = 0.0;
        }
    }
}

/// A value that moves towards its target at a constant rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Fade {
    value: f32,
    target: f32,
    /// Seconds for a full 0 to 1 sweep.
    duration: f32,
}

impl Fade {
    /// Seconds for a full sweep unless configured otherwise.
    pub const DEFAULT_DURATION: f32 = 0.3;

    /// Creates a fade resting at `value`.
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self {
            value,
            target: value,
            duration: Self::DEFAULT_DURATION,
        }
    }

    /// Sets the full-sweep time. Zero or less makes changes instant.
    #[must_use]
    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = if duration.is_finite() { duration } else { 0.0 };
        self
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Value being faded towards.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// True once the value rests on its target.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        (self.value - self.target).abs() < f32::EPSILON
    }

    /// Starts fading from the current value to `target`.
    pub fn set_target(&mut self, target: f32) {
        if target.is_finite() {
            self.target = target;
        }
    }

    /// Advances by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if self.duration <= 0.0 {
            self.value = self.target;
            return;
        }
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        let step = dt / self.duration;
        let remaining = self.target - self.value;
        if remaining.abs() <= step {
            self.value = self.target;
        } else {
            self.value += step.copysign(remaining);
        }
    }
}
