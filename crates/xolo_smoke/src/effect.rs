//! Smoke effect lifecycle.
//!
//! ```text
//!   Disabled ──enable──▶ Initializing ──▶ Running ──disable/teardown──▶ TornDown
//!      ▲                      │                                            │
//!      └── no drawing context ┘                 ◀──────── enable ──────────┘
//! ```
//!
//! - **Initializing**: create the drawing context, size the surface, attach
//!   pointer/scroll/resize listeners, schedule the first frame.
//! - **Running**: events spawn, each frame ticks + renders + reschedules.
//! - **TornDown**: the pending frame is cancelled, every listener detached,
//!   the engine dropped. Tearing down twice is a no-op.
//!
//! There is no error state. A host without a drawing context simply leaves
//! the effect disabled.

use crate::adapters::{PointerAdapter, ScrollAdapter};
use crate::config::SmokeConfig;
use crate::engine::ParticleEngine;
use crate::host::{FrameRequest, Host, HostEvent, ListenerId, ListenerKind};
use crate::rng::SmokeRng;
use crate::surface::{Canvas, RenderSurface};

/// Lifecycle state of a [`SmokeEffect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectState {
    /// Not running, nothing attached.
    #[default]
    Disabled,
    /// Attaching to the host.
    Initializing,
    /// Spawn/tick/render loop active.
    Running,
    /// Detached from the host after running.
    TornDown,
}

/// Result of a single frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Frames run since initialization.
    pub frame_number: u64,
    /// Host timestamp of this frame (ms).
    pub now: f64,
    /// Elapsed time applied by the engine (ms).
    pub dt_ms: f64,
    /// Particles retired this frame.
    pub retired: usize,
    /// Particles live after the tick.
    pub active: usize,
    /// Particles drawn.
    pub drawn: usize,
}

/// Everything that exists only while the effect is running.
#[derive(Debug)]
struct Runtime<C: Canvas> {
    engine: ParticleEngine,
    surface: RenderSurface<C>,
    pointer: PointerAdapter,
    scroll: ScrollAdapter,
    listeners: Vec<ListenerId>,
    pending_frame: Option<FrameRequest>,
    frame_number: u64,
}

/// The smoke overlay bound to a host.
#[derive(Debug)]
pub struct SmokeEffect<C: Canvas> {
    config: SmokeConfig,
    enabled: bool,
    state: EffectState,
    runtime: Option<Runtime<C>>,
}

impl<C: Canvas> SmokeEffect<C> {
    /// Creates a disabled effect.
    #[must_use]
    pub fn new(config: SmokeConfig) -> Self {
        Self {
            config: config.sanitized(),
            enabled: false,
            state: EffectState::Disabled,
            runtime: None,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> EffectState {
        self.state
    }

    /// The enable flag as last set.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The running engine, if any.
    #[must_use]
    pub fn engine(&self) -> Option<&ParticleEngine> {
        self.runtime.as_ref().map(|rt| &rt.engine)
    }

    /// The running surface, if any.
    #[must_use]
    pub fn surface(&self) -> Option<&RenderSurface<C>> {
        self.runtime.as_ref().map(|rt| &rt.surface)
    }

    /// The frame callback currently scheduled, if any.
    #[must_use]
    pub fn pending_frame(&self) -> Option<FrameRequest> {
        self.runtime.as_ref().and_then(|rt| rt.pending_frame)
    }

    /// Sets the enable flag, starting or tearing down the effect.
    pub fn set_enabled<H>(&mut self, host: &mut H, enabled: bool)
    where
        H: Host<Canvas = C>,
    {
        self.enabled = enabled;
        match (enabled, self.state) {
            (true, EffectState::Disabled | EffectState::TornDown) => self.initialize(host),
            (false, EffectState::Running | EffectState::Initializing) => self.teardown(host),
            _ => {}
        }
    }

    fn initialize<H>(&mut self, host: &mut H)
    where
        H: Host<Canvas = C>,
    {
        self.state = EffectState::Initializing;

        let Some(canvas) = host.create_canvas() else {
            tracing::warn!("smoke effect has no drawing context, staying disabled");
            self.state = EffectState::Disabled;
            return;
        };

        let viewport = host.viewport();
        let now = host.now();
        let seed = self.config.seed.unwrap_or_else(|| now.to_bits());

        let mut rng = SmokeRng::seeded(seed);
        let surface = RenderSurface::new(canvas, viewport);
        let (width, height) = surface.logical_size();
        let mut engine = ParticleEngine::new(&self.config, width, height, seed);
        engine.start(now);
        let pointer = PointerAdapter::new(&self.config.pointer, rng.fork());
        let scroll = ScrollAdapter::new(&self.config.scroll, rng.fork());

        let listeners = vec![
            host.listen(ListenerKind::PointerMove),
            host.listen(ListenerKind::Scroll),
            host.listen(ListenerKind::Resize),
        ];
        let pending_frame = Some(host.request_frame());

        self.runtime = Some(Runtime {
            engine,
            surface,
            pointer,
            scroll,
            listeners,
            pending_frame,
            frame_number: 0,
        });
        self.state = EffectState::Running;

        tracing::info!(
            width,
            height,
            max_particles = self.config.particles.max_particles,
            "smoke effect running"
        );
    }

    /// Detaches from the host: cancels the pending frame, removes every
    /// listener and drops the engine. Safe to call any number of times.
    pub fn teardown<H>(&mut self, host: &mut H)
    where
        H: Host<Canvas = C>,
    {
        let Some(runtime) = self.runtime.take() else {
            if self.state == EffectState::Initializing {
                self.state = EffectState::Disabled;
            }
            return;
        };

        if let Some(request) = runtime.pending_frame {
            host.cancel_frame(request);
        }
        for id in runtime.listeners {
            host.unlisten(id);
        }

        self.state = EffectState::TornDown;
        tracing::info!(
            frames = runtime.frame_number,
            spawned = runtime.engine.stats().spawned,
            "smoke effect torn down"
        );
    }

    /// Delivers an input event. Ignored unless running.
    ///
    /// Returns the number of particles spawned.
    pub fn handle_event<H>(&mut self, _host: &mut H, event: &HostEvent) -> usize
    where
        H: Host<Canvas = C>,
    {
        let Some(runtime) = self.runtime.as_mut() else {
            return 0;
        };

        match *event {
            HostEvent::PointerMove { x, y, time } => {
                runtime.pointer.on_move(&mut runtime.engine, time, x, y)
            }
            HostEvent::Scroll { time } => runtime.scroll.on_scroll(&mut runtime.engine, time),
            HostEvent::Resize(viewport) => {
                runtime.surface.resize(viewport);
                let (width, height) = runtime.surface.logical_size();
                runtime.engine.set_viewport(width, height);
                0
            }
        }
    }

    /// Runs one frame for the callback `request`: tick, render, reschedule.
    ///
    /// Returns `None` for a stale or cancelled request, or when not running.
    pub fn on_frame<H>(&mut self, host: &mut H, request: FrameRequest) -> Option<FrameReport>
    where
        H: Host<Canvas = C>,
    {
        let runtime = self.runtime.as_mut()?;
        if runtime.pending_frame != Some(request) {
            return None;
        }
        runtime.pending_frame = None;

        let now = host.now();
        let tick = runtime.engine.tick(now);
        let drawn = runtime.surface.render(runtime.engine.particles());
        runtime.frame_number += 1;

        runtime.pending_frame = Some(host.request_frame());

        Some(FrameReport {
            frame_number: runtime.frame_number,
            now,
            dt_ms: tick.dt_ms,
            retired: tick.retired,
            active: tick.active,
            drawn,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HeadlessHost, Viewport};
    use crate::surface::PixelCanvas;

    fn setup() -> (HeadlessHost, SmokeEffect<PixelCanvas>) {
        let host = HeadlessHost::new(Viewport::new(200.0, 150.0, 1.0));
        let effect = SmokeEffect::new(SmokeConfig::default().with_seed(9));
        (host, effect)
    }

    #[test]
    fn test_starts_disabled() {
        let (host, effect) = setup();
        assert_eq!(effect.state(), EffectState::Disabled);
        assert!(!effect.is_enabled());
        assert!(effect.engine().is_none());
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn test_enable_attaches_everything() {
        let (mut host, mut effect) = setup();
        effect.set_enabled(&mut host, true);

        assert_eq!(effect.state(), EffectState::Running);
        assert!(host.is_listening(ListenerKind::PointerMove));
        assert!(host.is_listening(ListenerKind::Scroll));
        assert!(host.is_listening(ListenerKind::Resize));
        assert_eq!(host.pending_frames(), 1);
        assert_eq!(effect.surface().map(RenderSurface::backing_size), Some((200, 150)));
    }

    #[test]
    fn test_enable_twice_does_not_double_attach() {
        let (mut host, mut effect) = setup();
        effect.set_enabled(&mut host, true);
        effect.set_enabled(&mut host, true);
        assert_eq!(host.listener_count(), 3);
        assert_eq!(host.pending_frames(), 1);
    }

    #[test]
    fn test_stale_frame_is_ignored() {
        let (mut host, mut effect) = setup();
        effect.set_enabled(&mut host, true);
        let first = host.take_frame().unwrap();

        assert!(effect.on_frame(&mut host, first).is_some());
        // Replaying the same request does nothing
        assert!(effect.on_frame(&mut host, first).is_none());
        assert_eq!(host.pending_frames(), 1);
    }

    #[test]
    fn test_frame_reschedules_and_counts() {
        let (mut host, mut effect) = setup();
        effect.set_enabled(&mut host, true);

        for expected in 1..=3 {
            host.advance(16.0);
            let request = host.take_frame().unwrap();
            let report = effect.on_frame(&mut host, request).unwrap();
            assert_eq!(report.frame_number, expected);
            assert_eq!(host.pending_frames(), 1);
        }
    }

    #[test]
    fn test_events_ignored_when_not_running() {
        let (mut host, mut effect) = setup();
        let event = HostEvent::PointerMove {
            x: 10.0,
            y: 10.0,
            time: 0.0,
        };
        assert_eq!(effect.handle_event(&mut host, &event), 0);
        assert!(effect.engine().is_none());
    }

    #[test]
    fn test_disable_tears_down() {
        let (mut host, mut effect) = setup();
        effect.set_enabled(&mut host, true);
        effect.set_enabled(&mut host, false);

        assert_eq!(effect.state(), EffectState::TornDown);
        assert_eq!(host.pending_frames(), 0);
        assert_eq!(host.listener_count(), 0);
        assert!(effect.pending_frame().is_none());
    }

    #[test]
    fn test_engine_culls_against_capped_surface() {
        let mut host = HeadlessHost::new(Viewport::new(20_000.0, 10.0, 1.0));
        let mut effect: SmokeEffect<PixelCanvas> = SmokeEffect::new(SmokeConfig::default());
        effect.set_enabled(&mut host, true);

        let surface = effect.surface().map(RenderSurface::logical_size);
        let engine = effect.engine().map(ParticleEngine::viewport);
        assert_eq!(surface, Some((8192.0, 10.0)));
        assert_eq!(engine, surface);
    }

    #[test]
    fn test_no_canvas_stays_disabled() {
        let mut host = HeadlessHost::without_canvas(Viewport::default());
        let mut effect: SmokeEffect<PixelCanvas> = SmokeEffect::new(SmokeConfig::default());
        effect.set_enabled(&mut host, true);

        assert_eq!(effect.state(), EffectState::Disabled);
        assert!(effect.is_enabled());
        assert_eq!(host.listener_count(), 0);
        assert_eq!(host.pending_frames(), 0);
    }
}
