//! Host environment seam.
//!
//! Everything the overlay consumes from its environment goes through
//! [`Host`]: viewport metrics, a monotonic clock, frame scheduling, input
//! listener registration and the drawing context. [`HeadlessHost`] is a
//! deterministic implementation with a manual clock, used by tests, benches
//! and the replay binary.

use crate::surface::{Canvas, PixelCanvas};

/// Viewport metrics reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in CSS pixels.
    pub width: f32,
    /// Height in CSS pixels.
    pub height: f32,
    /// Device pixel ratio as reported (clamped by the surface).
    pub device_pixel_ratio: f32,
}

impl Viewport {
    /// Creates viewport metrics.
    #[must_use]
    pub const fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0, 1.0)
    }
}

/// Handle to a scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u64);

/// Handle to a registered input listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Input streams the overlay can listen to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Pointer moved.
    PointerMove,
    /// Page scrolled.
    Scroll,
    /// Viewport resized.
    Resize,
}

/// An input event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// Pointer moved to viewport position `(x, y)` at `time` ms.
    PointerMove {
        /// X in CSS pixels.
        x: f32,
        /// Y in CSS pixels.
        y: f32,
        /// Host clock in ms.
        time: f64,
    },
    /// Page scrolled at `time` ms.
    Scroll {
        /// Host clock in ms.
        time: f64,
    },
    /// Viewport changed.
    Resize(Viewport),
}

impl HostEvent {
    /// The listener stream this event is delivered on.
    #[must_use]
    pub const fn kind(&self) -> ListenerKind {
        match self {
            Self::PointerMove { .. } => ListenerKind::PointerMove,
            Self::Scroll { .. } => ListenerKind::Scroll,
            Self::Resize(_) => ListenerKind::Resize,
        }
    }
}

/// The environment the overlay runs in.
///
/// All calls happen on the host's single UI thread.
pub trait Host {
    /// Drawing context type.
    type Canvas: Canvas;

    /// Current viewport metrics.
    fn viewport(&self) -> Viewport;

    /// Monotonic high-resolution clock in ms.
    fn now(&self) -> f64;

    /// Creates the overlay's drawing context, `None` if unavailable.
    fn create_canvas(&mut self) -> Option<Self::Canvas>;

    /// Schedules one frame callback for the next display refresh.
    fn request_frame(&mut self) -> FrameRequest;

    /// Cancels a scheduled frame callback. Unknown handles are ignored.
    fn cancel_frame(&mut self, request: FrameRequest);

    /// Registers interest in an input stream.
    fn listen(&mut self, kind: ListenerKind) -> ListenerId;

    /// Removes a listener. Unknown ids are ignored.
    fn unlisten(&mut self, id: ListenerId);
}

/// Deterministic host with a manual clock.
///
/// Frame requests queue up until [`HeadlessHost::take_frame`] hands them
/// out, the way a browser runs `requestAnimationFrame` callbacks on the next
/// refresh.
#[derive(Debug)]
pub struct HeadlessHost {
    viewport: Viewport,
    clock_ms: f64,
    canvas_available: bool,
    next_id: u64,
    pending_frames: Vec<FrameRequest>,
    listeners: Vec<(ListenerId, ListenerKind)>,
}

impl HeadlessHost {
    /// Creates a host at time 0 with a working drawing context.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            clock_ms: 0.0,
            canvas_available: true,
            next_id: 1,
            pending_frames: Vec::new(),
            listeners: Vec::new(),
        }
    }

    /// Creates a host whose drawing context cannot be created.
    #[must_use]
    pub fn without_canvas(viewport: Viewport) -> Self {
        Self {
            canvas_available: false,
            ..Self::new(viewport)
        }
    }

    /// Advances the clock by `ms`.
    pub fn advance(&mut self, ms: f64) {
        if ms.is_finite() && ms > 0.0 {
            self.clock_ms += ms;
        }
    }

    /// Sets the clock directly. Unlike [`Self::advance`] it may go backwards.
    pub fn set_time(&mut self, ms: f64) {
        self.clock_ms = ms;
    }

    /// Changes the viewport. Returns the matching resize event so callers
    /// can deliver it.
    pub fn resize(&mut self, viewport: Viewport) -> HostEvent {
        self.viewport = viewport;
        HostEvent::Resize(viewport)
    }

    /// Pops the oldest scheduled frame callback.
    pub fn take_frame(&mut self) -> Option<FrameRequest> {
        if self.pending_frames.is_empty() {
            None
        } else {
            Some(self.pending_frames.remove(0))
        }
    }

    /// Number of frame callbacks scheduled and not yet taken or cancelled.
    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.pending_frames.len()
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// True if some listener is registered for `kind`.
    #[must_use]
    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.listeners.iter().any(|(_, k)| *k == kind)
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl Host for HeadlessHost {
    type Canvas = PixelCanvas;

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn now(&self) -> f64 {
        self.clock_ms
    }

    fn create_canvas(&mut self) -> Option<PixelCanvas> {
        self.canvas_available.then(PixelCanvas::new)
    }

    fn request_frame(&mut self) -> FrameRequest {
        let request = FrameRequest(self.next_id());
        self.pending_frames.push(request);
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.pending_frames.retain(|r| *r != request);
    }

    fn listen(&mut self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next_id());
        self.listeners.push((id, kind));
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.listeners.retain(|(registered, _)| *registered != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_queue_and_cancel() {
        let mut host = HeadlessHost::new(Viewport::default());
        let a = host.request_frame();
        let b = host.request_frame();
        assert_eq!(host.pending_frames(), 2);

        host.cancel_frame(a);
        assert_eq!(host.take_frame(), Some(b));
        assert_eq!(host.take_frame(), None);

        // Cancelling something already gone is harmless
        host.cancel_frame(a);
        assert_eq!(host.pending_frames(), 0);
    }

    #[test]
    fn test_listeners_register_and_unregister() {
        let mut host = HeadlessHost::new(Viewport::default());
        let id = host.listen(ListenerKind::Scroll);
        assert!(host.is_listening(ListenerKind::Scroll));
        assert!(!host.is_listening(ListenerKind::PointerMove));

        host.unlisten(id);
        host.unlisten(id);
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn test_clock_only_moves_forward_on_advance() {
        let mut host = HeadlessHost::new(Viewport::default());
        host.advance(16.0);
        host.advance(-5.0);
        host.advance(f64::NAN);
        assert!((host.now() - 16.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_canvas() {
        let mut host = HeadlessHost::without_canvas(Viewport::default());
        assert!(host.create_canvas().is_none());
    }

    #[test]
    fn test_event_kinds() {
        assert_eq!(HostEvent::Scroll { time: 0.0 }.kind(), ListenerKind::Scroll);
        assert_eq!(
            HostEvent::Resize(Viewport::default()).kind(),
            ListenerKind::Resize
        );
    }
}
