//! # XOLO Smoke
//!
//! Cosmetic smoke overlay driven by pointer movement and scroll.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        FRAME PIPELINE                         │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Host events → Adapters → ParticleEngine::spawn               │
//! │                                   ↓                           │
//! │  Host frame  → ParticleEngine::tick (update + cull + recycle) │
//! │                                   ↓                           │
//! │                RenderSurface::render (clear + additive blobs) │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Threading
//!
//! Everything runs on the host's single UI thread. Event handlers mutate the
//! engine directly and never draw; the frame callback is the only place that
//! renders. There is nothing to lock.
//!
//! ## Example
//!
//! ```rust
//! use xolo_smoke::{HeadlessHost, HostEvent, SmokeConfig, SmokeEffect, Viewport};
//!
//! let mut host = HeadlessHost::new(Viewport::new(320.0, 240.0, 1.0));
//! let mut effect = SmokeEffect::new(SmokeConfig::default());
//!
//! effect.set_enabled(&mut host, true);
//! effect.handle_event(&mut host, &HostEvent::PointerMove { x: 160.0, y: 120.0, time: 0.0 });
//!
//! host.advance(16.0);
//! let request = host.take_frame().expect("frame scheduled");
//! let report = effect.on_frame(&mut host, request).expect("effect running");
//! assert_eq!(report.active, 2);
//!
//! effect.teardown(&mut host);
//! assert_eq!(host.pending_frames(), 0);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]
// Pixel and particle math converts freely between f32, f64 and integer pixels
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

pub mod adapters;
pub mod config;
pub mod effect;
pub mod engine;
pub mod error;
pub mod host;
pub mod particle;
pub mod rng;
pub mod surface;

pub use adapters::{PointerAdapter, ScrollAdapter};
pub use config::{
    AlphaFalloff, ParticleConfig, PhysicsConfig, PointerConfig, ScrollConfig, SmokeColor,
    SmokeConfig, SpawnRange,
};
pub use effect::{EffectState, FrameReport, SmokeEffect};
pub use engine::{EngineStats, ParticleEngine, RetireReason, TickReport};
pub use error::{SmokeError, SmokeResult};
pub use host::{FrameRequest, HeadlessHost, Host, HostEvent, ListenerId, ListenerKind, Viewport};
pub use particle::Particle;
pub use rng::SmokeRng;
pub use surface::{
    Canvas, Ellipse, GradientStop, PixelCanvas, RadialGradient, RenderSurface, MAX_BACKING_EXTENT,
};
