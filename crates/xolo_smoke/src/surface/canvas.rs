//! Drawing context abstraction.
//!
//! The render surface only needs four operations from whatever draws the
//! overlay: size the backing store, set the logical-to-device scale, clear,
//! and fill a radial-gradient ellipse.

/// An ellipse in logical (CSS) pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    /// Centre x.
    pub cx: f32,
    /// Centre y.
    pub cy: f32,
    /// Radius along the rotated x axis.
    pub rx: f32,
    /// Radius along the rotated y axis.
    pub ry: f32,
    /// Rotation in radians.
    pub rotation: f32,
}

impl Ellipse {
    /// A circle (rotation only matters once the radii differ).
    #[must_use]
    pub const fn circle(cx: f32, cy: f32, radius: f32, rotation: f32) -> Self {
        Self {
            cx,
            cy,
            rx: radius,
            ry: radius,
            rotation,
        }
    }

    /// True when the ellipse has a finite centre and positive radii.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.cx.is_finite()
            && self.cy.is_finite()
            && self.rotation.is_finite()
            && self.rx.is_finite()
            && self.ry.is_finite()
            && self.rx > 0.0
            && self.ry > 0.0
    }

    /// Half-width and half-height of the axis-aligned bounding box.
    #[must_use]
    pub fn half_extents(&self) -> (f32, f32) {
        let (sin, cos) = self.rotation.sin_cos();
        let ex = ((self.rx * cos).powi(2) + (self.ry * sin).powi(2)).sqrt();
        let ey = ((self.rx * sin).powi(2) + (self.ry * cos).powi(2)).sqrt();
        (ex, ey)
    }

    /// Normalized radial distance of `(x, y)`: 0 at the centre, 1 on the rim.
    #[inline]
    #[must_use]
    pub fn normalized_distance(&self, x: f32, y: f32) -> f32 {
        let (sin, cos) = self.rotation.sin_cos();
        let dx = x - self.cx;
        let dy = y - self.cy;
        let u = (dx * cos + dy * sin) / self.rx;
        let v = (-dx * sin + dy * cos) / self.ry;
        (u * u + v * v).sqrt()
    }
}

/// One colour stop of a radial gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position from centre (0) to rim (1).
    pub offset: f32,
    /// Alpha at this position.
    pub alpha: f32,
}

/// Single-colour radial gradient whose alpha varies with distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGradient {
    /// RGB, 0-1.
    pub rgb: [f32; 3],
    /// Stops ordered by offset.
    pub stops: [GradientStop; 3],
}

impl RadialGradient {
    /// Offset of the interior stop.
    pub const INTERIOR_OFFSET: f32 = 0.45;
    /// Interior stop alpha relative to the centre.
    pub const INTERIOR_RATIO: f32 = 0.5;

    /// The smoke glow: full alpha at the centre, half at 45%, clear at the rim.
    ///
    /// Negative or non-finite alpha is clamped to 0.
    #[must_use]
    pub fn glow(rgb: [f32; 3], alpha: f32) -> Self {
        let alpha = if alpha.is_finite() {
            alpha.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            rgb,
            stops: [
                GradientStop { offset: 0.0, alpha },
                GradientStop {
                    offset: Self::INTERIOR_OFFSET,
                    alpha: alpha * Self::INTERIOR_RATIO,
                },
                GradientStop {
                    offset: 1.0,
                    alpha: 0.0,
                },
            ],
        }
    }

    /// Alpha at normalized distance `d` (linear between stops, 0 outside).
    #[inline]
    #[must_use]
    pub fn alpha_at(&self, d: f32) -> f32 {
        if !(0.0..=1.0).contains(&d) {
            return 0.0;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if d <= b.offset {
                let span = b.offset - a.offset;
                if span <= 0.0 {
                    return b.alpha;
                }
                let t = (d - a.offset) / span;
                return a.alpha + (b.alpha - a.alpha) * t;
            }
        }
        0.0
    }

    /// True when no stop is visible.
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.stops.iter().all(|stop| stop.alpha <= 0.0)
    }
}

/// A 2D drawing context the overlay renders into.
pub trait Canvas {
    /// Sets the backing store size in device pixels.
    fn resize_backing(&mut self, width: u32, height: u32);

    /// Sets the uniform logical-to-device scale.
    fn set_transform(&mut self, scale: f32);

    /// Clears the whole backing store to transparent.
    fn clear(&mut self);

    /// Fills `ellipse` (logical coordinates) with `gradient`, added onto
    /// what is already drawn (the canvas "lighter" composite).
    fn fill_radial_ellipse(&mut self, ellipse: &Ellipse, gradient: &RadialGradient);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glow_stops() {
        let g = RadialGradient::glow([1.0, 1.0, 1.0], 0.6);
        assert!((g.alpha_at(0.0) - 0.6).abs() < 1e-6);
        assert!((g.alpha_at(0.45) - 0.3).abs() < 1e-6);
        assert!(g.alpha_at(1.0).abs() < 1e-6);
        assert!(g.alpha_at(1.5).abs() < f32::EPSILON);
        // Monotonic falloff from centre to rim
        let mut last = f32::MAX;
        for i in 0..=20 {
            let a = g.alpha_at(i as f32 / 20.0);
            assert!(a <= last + 1e-6);
            last = a;
        }
    }

    #[test]
    fn test_glow_clamps_alpha() {
        assert!(RadialGradient::glow([1.0; 3], -0.5).is_transparent());
        assert!(RadialGradient::glow([1.0; 3], f32::NAN).is_transparent());
        let saturated = RadialGradient::glow([1.0; 3], 4.0);
        assert!((saturated.alpha_at(0.0) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rotated_ellipse_extents() {
        let e = Ellipse {
            cx: 0.0,
            cy: 0.0,
            rx: 10.0,
            ry: 2.0,
            rotation: std::f32::consts::FRAC_PI_2,
        };
        let (ex, ey) = e.half_extents();
        assert!((ex - 2.0).abs() < 1e-4);
        assert!((ey - 10.0).abs() < 1e-4);
        // A point along the rotated major axis is on the rim
        assert!((e.normalized_distance(0.0, 10.0) - 1.0).abs() < 1e-4);
    }
}
