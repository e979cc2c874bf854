//! Smoke particle record.

use crate::config::{ParticleConfig, PhysicsConfig, SmokeColor};
use crate::rng::SmokeRng;

/// A single smoke puff.
///
/// Records are recycled through the engine's pool, so every field is
/// overwritten at spawn. `render_size` and `render_alpha` are derived each
/// tick and read by the render surface.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Particle {
    /// X position in viewport (CSS) pixels.
    pub x: f32,
    /// Y position in viewport (CSS) pixels.
    pub y: f32,
    /// Horizontal velocity in px/ms.
    pub vx: f32,
    /// Vertical velocity in px/ms (negative is up).
    pub vy: f32,
    /// Base radius in px.
    pub size: f32,
    /// Time alive in ms.
    pub age: f32,
    /// Lifetime in ms.
    pub age_limit: f32,
    /// Ellipse orientation in radians.
    pub rotation: f32,
    /// Colour template.
    pub color: SmokeColor,
    /// Opacity ceiling.
    pub base_alpha: f32,
    /// Radius to draw this frame.
    pub render_size: f32,
    /// Alpha to draw this frame.
    pub render_alpha: f32,
}

impl Particle {
    /// Overwrites every field for a fresh spawn around `(x, y)`.
    pub fn respawn(
        &mut self,
        x: f32,
        y: f32,
        config: &ParticleConfig,
        palette: &[SmokeColor],
        rng: &mut SmokeRng,
    ) {
        self.x = x + rng.centered(config.jitter_x);
        self.y = y + rng.centered(config.jitter_y);
        self.vx = rng.in_range(config.velocity_x);
        self.vy = rng.in_range(config.velocity_y);
        self.size = rng.in_range(config.size);
        self.age = 0.0;
        self.age_limit = rng.in_range(config.lifetime_ms);
        self.rotation = rng.unit() * std::f32::consts::TAU;
        self.color = palette
            .get(rng.index(palette.len()))
            .copied()
            .unwrap_or_default();
        self.base_alpha = rng.in_range(config.base_alpha);
        self.render_size = self.size;
        self.render_alpha = self.base_alpha;
    }

    /// Advances the particle by `dt` milliseconds.
    ///
    /// Drag is applied once per call, not scaled by `dt`.
    pub fn advance(&mut self, dt: f32, physics: &PhysicsConfig) {
        self.age += dt;

        self.x += self.vx * dt;
        self.y += self.vy * dt;
        self.vx *= physics.drag_x;
        self.vy = self.vy * physics.drag_y - physics.buoyancy * dt;

        let t = self.lifetime_fraction();
        self.render_size = self.size * (1.0 + physics.growth * t);
        self.render_alpha = (self.base_alpha * physics.alpha_falloff.apply(t)).max(0.0);
    }

    /// Age as a fraction of lifetime, clamped to `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn lifetime_fraction(&self) -> f32 {
        if self.age_limit > 0.0 {
            (self.age / self.age_limit).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// True once the particle has lived its full lifetime.
    #[inline]
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.age >= self.age_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_palette, AlphaFalloff};

    fn spawned(seed: u64) -> Particle {
        let mut rng = SmokeRng::seeded(seed);
        let mut particle = Particle::default();
        particle.respawn(
            100.0,
            100.0,
            &ParticleConfig::default(),
            &default_palette(),
            &mut rng,
        );
        particle
    }

    #[test]
    fn test_respawn_stays_in_ranges() {
        for seed in 0..200 {
            let p = spawned(seed);
            assert!((80.0..120.0).contains(&p.x));
            assert!((85.0..115.0).contains(&p.y));
            assert!(p.vy < 0.0, "smoke always starts rising");
            assert!((25.0..75.0).contains(&p.size));
            assert!((2000.0..3500.0).contains(&p.age_limit));
            assert!(p.age.abs() < f32::EPSILON);
            assert!(default_palette().contains(&p.color));
        }
    }

    #[test]
    fn test_respawn_resets_age_of_recycled_record() {
        let mut p = spawned(3);
        p.advance(500.0, &PhysicsConfig::default());
        assert!(p.age > 0.0);

        let mut rng = SmokeRng::seeded(4);
        p.respawn(0.0, 0.0, &ParticleConfig::default(), &default_palette(), &mut rng);
        assert!(p.age.abs() < f32::EPSILON);
    }

    #[test]
    fn test_size_grows_and_alpha_decays() {
        let physics = PhysicsConfig::default();
        let mut p = spawned(9);
        let mut last_size = 0.0;
        let mut last_alpha = f32::MAX;

        while !p.is_expired() {
            p.advance(100.0, &physics);
            assert!(p.render_size >= last_size);
            assert!(p.render_alpha <= last_alpha);
            last_size = p.render_size;
            last_alpha = p.render_alpha;
        }

        assert!(p.render_alpha.abs() < f32::EPSILON);
        assert!((p.render_size - p.size * 2.5).abs() < 1e-3);
    }

    #[test]
    fn test_drag_and_buoyancy() {
        let physics = PhysicsConfig {
            drag_x: 0.5,
            drag_y: 1.0,
            buoyancy: 0.001,
            alpha_falloff: AlphaFalloff::Linear,
            ..PhysicsConfig::default()
        };
        let mut p = Particle {
            vx: 1.0,
            vy: 0.0,
            age_limit: 1000.0,
            ..Particle::default()
        };

        p.advance(10.0, &physics);
        assert!((p.x - 10.0).abs() < 1e-5);
        assert!((p.vx - 0.5).abs() < 1e-6);
        assert!((p.vy + 0.01).abs() < 1e-6, "buoyancy pushes upward");
    }

    #[test]
    fn test_zero_lifetime_counts_as_finished() {
        let p = Particle::default();
        assert!((p.lifetime_fraction() - 1.0).abs() < f32::EPSILON);
        assert!(p.is_expired());
    }
}
