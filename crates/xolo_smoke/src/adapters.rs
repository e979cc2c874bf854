//! Input → spawn adapters.
//!
//! Adapters turn raw pointer and scroll events into a handful of
//! `ParticleEngine::spawn` calls, dropping events that arrive faster than
//! their configured interval. They spawn straight into the engine: there is
//! no queue because handlers and the frame loop share one thread.

use crate::config::{PointerConfig, ScrollConfig, SpawnRange};
use crate::engine::ParticleEngine;
use crate::rng::SmokeRng;

/// Accepts an event at `time` if at least `interval` ms passed since the
/// last accepted one. The first event is always accepted.
#[derive(Debug, Clone, Copy)]
struct Debounce {
    interval: f64,
    last_accepted: Option<f64>,
}

impl Debounce {
    fn new(interval: f64) -> Self {
        Self {
            interval,
            last_accepted: None,
        }
    }

    fn accept(&mut self, time: f64) -> bool {
        if let Some(last) = self.last_accepted {
            // A clock that went backwards reopens the gate
            if time >= last && time - last < self.interval {
                return false;
            }
        }
        self.last_accepted = Some(time);
        true
    }
}

/// Pointer-move adapter: a small puff under the cursor, at most once per
/// interval.
#[derive(Debug, Clone)]
pub struct PointerAdapter {
    debounce: Debounce,
    spawn_count: u32,
    jitter: f32,
    rng: SmokeRng,
}

impl PointerAdapter {
    /// Creates the adapter.
    #[must_use]
    pub fn new(config: &PointerConfig, rng: SmokeRng) -> Self {
        Self {
            debounce: Debounce::new(config.interval_ms),
            spawn_count: config.spawn_count,
            jitter: config.jitter,
            rng,
        }
    }

    /// Handles a pointer move. Returns the number of particles spawned
    /// (0 when the event was debounced or the engine is full).
    pub fn on_move(&mut self, engine: &mut ParticleEngine, time: f64, x: f32, y: f32) -> usize {
        if !self.debounce.accept(time) {
            return 0;
        }

        let mut spawned = 0;
        for _ in 0..self.spawn_count {
            let jx = self.rng.centered(self.jitter);
            let jy = self.rng.centered(self.jitter);
            if engine.spawn(x + jx, y + jy) {
                spawned += 1;
            }
        }
        spawned
    }
}

/// Scroll adapter: puffs rising from a band near the bottom of the viewport.
#[derive(Debug, Clone)]
pub struct ScrollAdapter {
    debounce: Debounce,
    spawn_count: u32,
    band: SpawnRange,
    height_fraction: f32,
    rng: SmokeRng,
}

impl ScrollAdapter {
    /// Creates the adapter. An interval of 0 accepts every scroll event.
    #[must_use]
    pub fn new(config: &ScrollConfig, rng: SmokeRng) -> Self {
        Self {
            debounce: Debounce::new(config.interval_ms),
            spawn_count: config.spawn_count,
            band: config.band,
            height_fraction: config.height_fraction,
            rng,
        }
    }

    /// Handles a scroll event. All spawns share one random x in the band.
    pub fn on_scroll(&mut self, engine: &mut ParticleEngine, time: f64) -> usize {
        if !self.debounce.accept(time) {
            return 0;
        }

        let (width, height) = engine.viewport();
        let x = width * self.rng.in_range(self.band);
        let y = height * self.height_fraction;

        (0..self.spawn_count).filter(|_| engine.spawn(x, y)).count()
    }
}
