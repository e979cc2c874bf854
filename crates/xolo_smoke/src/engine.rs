//! Pooled Smoke Particle Engine
//!
//! Owns every particle record. Two operations drive it:
//!
//! 1. `spawn(x, y)` - take a record from the pool, randomize it, append it
//!    to the active list. Dropped silently once the list is full.
//! 2. `tick(now)` - advance every active particle by the elapsed time,
//!    then retire expired or off-screen ones back to the pool.
//!
//! The active list is walked from the back so retirement can remove in
//! place without skipping or reordering the particles still to visit.
//! Retirement happens before the caller draws, so a retired particle is
//! never rendered in the frame it retires.

use xolo_core::Pool;

use crate::config::{SmokeColor, SmokeConfig};
use crate::particle::Particle;
use crate::rng::SmokeRng;

/// Why a particle left the active list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetireReason {
    /// `age >= age_limit`.
    Expired,
    /// Position left the viewport plus cull margin.
    OffScreen,
}

/// Counters since the engine was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Particles spawned.
    pub spawned: u64,
    /// Spawn requests dropped because the active list was full.
    pub dropped: u64,
    /// Particles retired because they expired.
    pub retired_expired: u64,
    /// Particles retired because they left the screen.
    pub retired_offscreen: u64,
    /// Particles currently live.
    pub active: usize,
    /// Records waiting in the pool.
    pub pooled: usize,
    /// Records ever created.
    pub allocated: usize,
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    /// Elapsed time applied, in ms.
    pub dt_ms: f64,
    /// Particles retired this tick.
    pub retired: usize,
    /// Particles still live after the tick.
    pub active: usize,
}

/// Viewport bounds used for off-screen culling.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CullBox {
    min_x: f32,
    max_x: f32,
    min_y: f32,
    max_y: f32,
}

impl CullBox {
    fn new(width: f32, height: f32, config: &SmokeConfig) -> Self {
        let physics = &config.physics;
        Self {
            min_x: -physics.margin_side,
            max_x: width.max(0.0) + physics.margin_side,
            min_y: -physics.margin_top,
            max_y: height.max(0.0) + physics.margin_bottom,
        }
    }

    #[inline]
    fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// The smoke simulation.
///
/// Created when the effect is enabled and dropped on teardown; nothing is
/// global.
#[derive(Debug)]
pub struct ParticleEngine {
    /// Sanitized configuration.
    config: SmokeConfig,
    /// Retired records waiting for reuse.
    pool: Pool<Particle>,
    /// Live particles, in spawn order.
    active: Vec<Particle>,
    /// Timestamp of the previous tick (ms).
    last_tick: Option<f64>,
    /// Spawn variation.
    rng: SmokeRng,
    /// Logical viewport size.
    viewport: (f32, f32),
    /// Off-screen cull bounds derived from the viewport.
    cull: CullBox,
    /// Counters.
    stats: EngineStats,
}

impl ParticleEngine {
    /// Creates an engine for a viewport of `width` x `height` CSS pixels.
    ///
    /// The config is sanitized first. `seed` overrides `config.seed`.
    #[must_use]
    pub fn new(config: &SmokeConfig, width: f32, height: f32, seed: u64) -> Self {
        let config = config.sanitized();
        let max = config.particles.max_particles;

        let mut pool = Pool::new(max);
        pool.prewarm(config.particles.prewarm);

        let cull = CullBox::new(width, height, &config);
        let stats = EngineStats {
            pooled: pool.free_count(),
            allocated: pool.allocated_count(),
            ..EngineStats::default()
        };

        Self {
            pool,
            active: Vec::with_capacity(max),
            last_tick: None,
            rng: SmokeRng::seeded(seed),
            viewport: (width, height),
            cull,
            stats,
            config,
        }
    }

    /// Sets the timestamp the first tick measures from.
    ///
    /// Without it the first tick applies no elapsed time.
    pub fn start(&mut self, now: f64) {
        if now.is_finite() {
            self.last_tick = Some(now);
        }
    }

    /// Spawns one particle jittered around `(x, y)`.
    ///
    /// Returns `false` if the active list is full; the request is dropped,
    /// not queued.
    pub fn spawn(&mut self, x: f32, y: f32) -> bool {
        if !x.is_finite() || !y.is_finite() {
            self.stats.dropped += 1;
            return false;
        }

        if self.active.len() >= self.config.particles.max_particles {
            self.stats.dropped += 1;
            if self.stats.dropped.is_power_of_two() {
                tracing::debug!(
                    dropped = self.stats.dropped,
                    cap = self.config.particles.max_particles,
                    "smoke spawn dropped, active list full"
                );
            }
            return false;
        }

        let Some(mut particle) = self.pool.acquire() else {
            self.stats.dropped += 1;
            return false;
        };

        particle.respawn(
            x,
            y,
            &self.config.particles,
            &self.config.palette,
            &mut self.rng,
        );
        self.active.push(particle);
        self.stats.spawned += 1;
        true
    }

    /// Advances the simulation to `now` (ms on the host's monotonic clock).
    pub fn tick(&mut self, now: f64) -> TickReport {
        self.tick_observed(now, |_, _| {})
    }

    /// Like [`Self::tick`], calling `on_retire` for every retired particle
    /// before it goes back to the pool.
    pub fn tick_observed<F>(&mut self, now: f64, mut on_retire: F) -> TickReport
    where
        F: FnMut(&Particle, RetireReason),
    {
        let dt = match self.last_tick {
            Some(previous) if now.is_finite() => (now - previous).max(0.0),
            _ => 0.0,
        };
        if now.is_finite() {
            self.last_tick = Some(now);
        }

        let dt_ms = dt as f32;
        let physics = &self.config.physics;
        let mut retired = 0;

        // Back to front: removing index i never shifts an unvisited particle
        for i in (0..self.active.len()).rev() {
            let particle = &mut self.active[i];
            particle.advance(dt_ms, physics);

            let reason = if particle.is_expired() {
                RetireReason::Expired
            } else if !self.cull.contains(particle.x, particle.y) {
                RetireReason::OffScreen
            } else {
                continue;
            };

            let particle = self.active.remove(i);
            on_retire(&particle, reason);
            match reason {
                RetireReason::Expired => self.stats.retired_expired += 1,
                RetireReason::OffScreen => self.stats.retired_offscreen += 1,
            }
            self.pool.release(particle);
            retired += 1;
        }

        tracing::trace!(dt, retired, active = self.active.len(), "smoke tick");

        TickReport {
            dt_ms: dt,
            retired,
            active: self.active.len(),
        }
    }

    /// Updates the viewport used for off-screen culling.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
        self.cull = CullBox::new(width, height, &self.config);
    }

    /// Returns the logical viewport size.
    #[must_use]
    pub fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    /// Retires every live particle back to the pool.
    pub fn clear(&mut self) {
        while let Some(particle) = self.active.pop() {
            self.pool.release(particle);
        }
    }

    /// Live particles, oldest first.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.active
    }

    /// Number of live particles.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Number of retired records waiting in the pool.
    #[must_use]
    pub fn pooled_count(&self) -> usize {
        self.pool.free_count()
    }

    /// Number of records ever created.
    #[must_use]
    pub fn allocated_count(&self) -> usize {
        self.pool.allocated_count()
    }

    /// Maximum number of live particles.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.config.particles.max_particles
    }

    /// The palette particles pick their colour from.
    #[must_use]
    pub fn palette(&self) -> &[SmokeColor] {
        &self.config.palette
    }

    /// The sanitized configuration in use.
    #[must_use]
    pub fn config(&self) -> &SmokeConfig {
        &self.config
    }

    /// Returns current counters.
    #[must_use]
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            active: self.active.len(),
            pooled: self.pool.free_count(),
            allocated: self.pool.allocated_count(),
            ..self.stats
        }
    }
}
