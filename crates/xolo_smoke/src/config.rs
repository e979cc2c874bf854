//! # Smoke Configuration
//!
//! Every tunable of the overlay, loadable from TOML.
//!
//! All sections default to the shipped look, so a config file only needs to
//! name what it overrides:
//!
//! ```toml
//! seed = 7
//!
//! [particles]
//! max_particles = 120
//!
//! [scroll]
//! interval_ms = 50.0
//! ```
//!
//! Loaded configs are validated (structurally impossible values are errors)
//! and then sanitized (out-of-range values are clamped).

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{SmokeError, SmokeResult};

/// Hard ceiling on `max_particles`, keeps per-frame work bounded.
pub const MAX_PARTICLES_LIMIT: usize = 4096;

/// Hard ceiling on spawns issued per accepted input event.
pub const MAX_SPAWN_PER_EVENT: u32 = 64;

/// Half-open `[min, max)` range a spawn value is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRange {
    /// Inclusive lower bound.
    pub min: f32,
    /// Exclusive upper bound.
    pub max: f32,
}

impl SpawnRange {
    /// Creates a range.
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns `min + (max - min) * unit`.
    #[inline]
    #[must_use]
    pub fn lerp(self, unit: f32) -> f32 {
        self.min + (self.max - self.min) * unit
    }

    /// True when both bounds are finite and ordered.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    fn clamped(self, lo: f32, hi: f32) -> Self {
        Self::new(self.min.clamp(lo, hi), self.max.clamp(lo, hi))
    }
}

/// Translucent colour template for one smoke puff.
///
/// Channels are 0-255 like a CSS `rgba()`. The template alpha is the tint
/// the puff is designed around; the drawn alpha comes from the particle's
/// lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SmokeColor {
    /// Red channel (0-255).
    pub r: u8,
    /// Green channel (0-255).
    pub g: u8,
    /// Blue channel (0-255).
    pub b: u8,
    /// Template alpha (0-1).
    pub a: f32,
}

impl SmokeColor {
    /// Creates a colour template.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the RGB channels normalized to 0-1.
    #[inline]
    #[must_use]
    pub fn to_unit_rgb(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

/// The three greys the page's smoke is drawn from.
#[must_use]
pub fn default_palette() -> Vec<SmokeColor> {
    vec![
        SmokeColor::rgba(200, 200, 200, 0.02),
        SmokeColor::rgba(150, 150, 150, 0.03),
        SmokeColor::rgba(120, 120, 120, 0.025),
    ]
}

/// How render alpha decays over a particle's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphaFalloff {
    /// `alpha * (1 - t)`.
    Linear,
    /// `alpha * (1 - t)^2`, fades fast then lingers.
    #[default]
    Quadratic,
}

impl AlphaFalloff {
    /// Applies the falloff to a lifetime fraction `t` (clamped to 0-1).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let remaining = 1.0 - t.clamp(0.0, 1.0);
        match self {
            Self::Linear => remaining,
            Self::Quadratic => remaining * remaining,
        }
    }
}

/// Spawn-time ranges for new particles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Maximum number of live particles. Spawns beyond this are dropped.
    pub max_particles: usize,
    /// Records created before the first frame.
    pub prewarm: usize,
    /// Horizontal spawn jitter span in px (centered on the spawn point).
    pub jitter_x: f32,
    /// Vertical spawn jitter span in px (centered on the spawn point).
    pub jitter_y: f32,
    /// Horizontal velocity in px/ms.
    pub velocity_x: SpawnRange,
    /// Vertical velocity in px/ms (negative is up).
    pub velocity_y: SpawnRange,
    /// Base radius in px.
    pub size: SpawnRange,
    /// Lifetime in ms.
    pub lifetime_ms: SpawnRange,
    /// Opacity ceiling.
    pub base_alpha: SpawnRange,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            max_particles: 80,
            prewarm: 0,
            jitter_x: 40.0,
            jitter_y: 30.0,
            velocity_x: SpawnRange::new(-0.05, 0.05),
            velocity_y: SpawnRange::new(-0.4, -0.1),
            size: SpawnRange::new(25.0, 75.0),
            lifetime_ms: SpawnRange::new(2000.0, 3500.0),
            base_alpha: SpawnRange::new(0.6, 0.7),
        }
    }
}

/// Per-tick integration and culling constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Horizontal velocity multiplier applied once per frame.
    pub drag_x: f32,
    /// Vertical velocity multiplier applied once per frame.
    pub drag_y: f32,
    /// Constant upward acceleration in px/ms².
    pub buoyancy: f32,
    /// Render radius growth: `size * (1 + growth * t)`.
    pub growth: f32,
    /// Alpha decay curve.
    pub alpha_falloff: AlphaFalloff,
    /// Cull margin above the viewport in px.
    pub margin_top: f32,
    /// Cull margin left and right of the viewport in px.
    pub margin_side: f32,
    /// Cull margin below the viewport in px.
    pub margin_bottom: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            drag_x: 0.99,
            drag_y: 0.998,
            buoyancy: 0.000_02,
            growth: 1.5,
            alpha_falloff: AlphaFalloff::Quadratic,
            margin_top: 100.0,
            margin_side: 200.0,
            margin_bottom: 200.0,
        }
    }
}

/// Pointer-move adapter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// Minimum time between accepted move events in ms.
    pub interval_ms: f64,
    /// Spawns per accepted event.
    pub spawn_count: u32,
    /// Extra jitter span in px around the pointer.
    pub jitter: f32,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            interval_ms: 16.0,
            spawn_count: 2,
            jitter: 8.0,
        }
    }
}

/// Scroll adapter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Minimum time between accepted scroll events in ms. Zero disables the
    /// debounce.
    pub interval_ms: f64,
    /// Spawns per accepted event.
    pub spawn_count: u32,
    /// Horizontal band (fractions of viewport width) the spawn x is drawn from.
    pub band: SpawnRange,
    /// Spawn y as a fraction of viewport height.
    pub height_fraction: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            interval_ms: 0.0,
            spawn_count: 4,
            band: SpawnRange::new(0.1, 0.9),
            height_fraction: 0.95,
        }
    }
}

/// Complete smoke overlay configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmokeConfig {
    /// RNG seed. Unset means the host clock seeds each run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Spawn ranges.
    pub particles: ParticleConfig,
    /// Integration and culling.
    pub physics: PhysicsConfig,
    /// Pointer adapter.
    pub pointer: PointerConfig,
    /// Scroll adapter.
    pub scroll: ScrollConfig,
    /// Colour templates a puff picks from.
    pub palette: Vec<SmokeColor>,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            seed: None,
            particles: ParticleConfig::default(),
            physics: PhysicsConfig::default(),
            pointer: PointerConfig::default(),
            scroll: ScrollConfig::default(),
            palette: default_palette(),
        }
    }
}

impl SmokeConfig {
    /// Parses, validates and sanitizes a TOML document.
    ///
    /// # Errors
    ///
    /// `Parse` for malformed TOML, `InvalidConfig` for values that cannot be
    /// clamped into range.
    pub fn from_toml_str(source: &str) -> SmokeResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config.sanitized())
    }

    /// Loads a config file.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, otherwise as [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> SmokeResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| SmokeError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Serializes the config to TOML.
    ///
    /// # Errors
    ///
    /// `Serialize` if TOML cannot represent a value.
    pub fn to_toml_string(&self) -> SmokeResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Returns a config with a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns a config with a different particle cap.
    #[must_use]
    pub fn with_max_particles(mut self, max_particles: usize) -> Self {
        self.particles.max_particles = max_particles;
        self
    }

    /// Rejects values that have no sensible clamp.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> SmokeResult<()> {
        if self.palette.is_empty() {
            return Err(SmokeError::InvalidConfig("palette must not be empty".into()));
        }

        let ranges = [
            ("particles.velocity_x", self.particles.velocity_x),
            ("particles.velocity_y", self.particles.velocity_y),
            ("particles.size", self.particles.size),
            ("particles.lifetime_ms", self.particles.lifetime_ms),
            ("particles.base_alpha", self.particles.base_alpha),
            ("scroll.band", self.scroll.band),
        ];
        for (name, range) in ranges {
            if !range.is_valid() {
                return Err(SmokeError::InvalidConfig(format!(
                    "{name} must be finite with min <= max (got {} .. {})",
                    range.min, range.max
                )));
            }
        }

        let scalars = [
            ("particles.jitter_x", self.particles.jitter_x),
            ("particles.jitter_y", self.particles.jitter_y),
            ("physics.drag_x", self.physics.drag_x),
            ("physics.drag_y", self.physics.drag_y),
            ("physics.buoyancy", self.physics.buoyancy),
            ("physics.growth", self.physics.growth),
            ("physics.margin_top", self.physics.margin_top),
            ("physics.margin_side", self.physics.margin_side),
            ("physics.margin_bottom", self.physics.margin_bottom),
            ("pointer.jitter", self.pointer.jitter),
            ("scroll.height_fraction", self.scroll.height_fraction),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(SmokeError::InvalidConfig(format!("{name} must be finite")));
            }
        }

        if !self.pointer.interval_ms.is_finite() || !self.scroll.interval_ms.is_finite() {
            return Err(SmokeError::InvalidConfig("intervals must be finite".into()));
        }

        Ok(())
    }

    /// Returns a copy with every value clamped into its usable range.
    ///
    /// Never fails: an empty palette falls back to the default greys and
    /// non-finite numbers fall back to their defaults.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let mut out = self.clone();

        if out.palette.is_empty() {
            out.palette = defaults.palette.clone();
        }
        for color in &mut out.palette {
            color.a = finite_or(color.a, 0.0).clamp(0.0, 1.0);
        }

        let p = &mut out.particles;
        let dp = &defaults.particles;
        p.max_particles = p.max_particles.min(MAX_PARTICLES_LIMIT);
        p.prewarm = p.prewarm.min(p.max_particles);
        p.jitter_x = finite_or(p.jitter_x, dp.jitter_x).max(0.0);
        p.jitter_y = finite_or(p.jitter_y, dp.jitter_y).max(0.0);
        p.velocity_x = range_or(p.velocity_x, dp.velocity_x);
        p.velocity_y = range_or(p.velocity_y, dp.velocity_y);
        p.size = range_or(p.size, dp.size).clamped(0.0, f32::MAX);
        p.lifetime_ms = range_or(p.lifetime_ms, dp.lifetime_ms).clamped(1.0, f32::MAX);
        p.base_alpha = range_or(p.base_alpha, dp.base_alpha).clamped(0.0, 1.0);

        let ph = &mut out.physics;
        let dph = &defaults.physics;
        ph.drag_x = finite_or(ph.drag_x, dph.drag_x).clamp(0.0, 1.0);
        ph.drag_y = finite_or(ph.drag_y, dph.drag_y).clamp(0.0, 1.0);
        ph.buoyancy = finite_or(ph.buoyancy, dph.buoyancy).max(0.0);
        ph.growth = finite_or(ph.growth, dph.growth).max(0.0);
        ph.margin_top = finite_or(ph.margin_top, dph.margin_top).max(0.0);
        ph.margin_side = finite_or(ph.margin_side, dph.margin_side).max(0.0);
        ph.margin_bottom = finite_or(ph.margin_bottom, dph.margin_bottom).max(0.0);

        let pt = &mut out.pointer;
        pt.interval_ms = finite_or_f64(pt.interval_ms, defaults.pointer.interval_ms).max(0.0);
        pt.spawn_count = pt.spawn_count.min(MAX_SPAWN_PER_EVENT);
        pt.jitter = finite_or(pt.jitter, defaults.pointer.jitter).max(0.0);

        let sc = &mut out.scroll;
        sc.interval_ms = finite_or_f64(sc.interval_ms, defaults.scroll.interval_ms).max(0.0);
        sc.spawn_count = sc.spawn_count.min(MAX_SPAWN_PER_EVENT);
        sc.band = range_or(sc.band, defaults.scroll.band).clamped(0.0, 1.0);
        sc.height_fraction =
            finite_or(sc.height_fraction, defaults.scroll.height_fraction).clamp(0.0, 1.0);

        out
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

fn finite_or_f64(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

fn range_or(range: SpawnRange, fallback: SpawnRange) -> SpawnRange {
    if range.is_valid() {
        range
    } else {
        fallback
    }
}
