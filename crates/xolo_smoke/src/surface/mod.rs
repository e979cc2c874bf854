//! # Render Surface
//!
//! Full-viewport, input-transparent overlay the smoke is drawn on.
//!
//! - Backing store is `logical size x clamp(dpr, 1, 2)` device pixels
//! - Drawing code works in logical (CSS) pixels, the canvas transform scales
//! - Every frame: clear, then one additive radial-gradient blob per particle
//! - Backing extents are capped at [`MAX_BACKING_EXTENT`] device pixels

mod canvas;
mod pixel_canvas;

pub use canvas::{Canvas, Ellipse, GradientStop, RadialGradient};
pub use pixel_canvas::PixelCanvas;

use crate::host::Viewport;
use crate::particle::Particle;

/// Lowest device pixel ratio the backing store is scaled by.
pub const MIN_PIXEL_RATIO: f32 = 1.0;
/// Highest device pixel ratio the backing store is scaled by.
pub const MAX_PIXEL_RATIO: f32 = 2.0;
/// Largest backing width or height in device pixels, the same per-side
/// limit browsers put on a canvas.
pub const MAX_BACKING_EXTENT: u32 = 8192;

/// Clamps a reported device pixel ratio into `[1, 2]`; garbage becomes 1.
#[must_use]
pub fn clamp_pixel_ratio(dpr: f32) -> f32 {
    if dpr.is_finite() {
        dpr.clamp(MIN_PIXEL_RATIO, MAX_PIXEL_RATIO)
    } else {
        MIN_PIXEL_RATIO
    }
}

/// DPR-aware overlay wrapping a drawing context.
#[derive(Debug)]
pub struct RenderSurface<C: Canvas> {
    canvas: C,
    /// Logical width in CSS pixels.
    logical_width: f32,
    /// Logical height in CSS pixels.
    logical_height: f32,
    /// Clamped device pixel ratio.
    pixel_ratio: f32,
    /// Backing width in device pixels.
    backing_width: u32,
    /// Backing height in device pixels.
    backing_height: u32,
}

impl<C: Canvas> RenderSurface<C> {
    /// Wraps `canvas` and sizes it to `viewport`.
    pub fn new(canvas: C, viewport: Viewport) -> Self {
        let mut surface = Self {
            canvas,
            logical_width: 0.0,
            logical_height: 0.0,
            pixel_ratio: MIN_PIXEL_RATIO,
            backing_width: 0,
            backing_height: 0,
        };
        surface.resize(viewport);
        surface
    }

    /// Recomputes the backing store for a new viewport.
    ///
    /// Oversized viewports are shrunk so the backing store stays within
    /// [`MAX_BACKING_EXTENT`]; the logical size shrinks with it.
    pub fn resize(&mut self, viewport: Viewport) {
        let ratio = clamp_pixel_ratio(viewport.device_pixel_ratio);
        let limit = MAX_BACKING_EXTENT as f32 / ratio;
        let width = sanitize_extent(viewport.width).min(limit);
        let height = sanitize_extent(viewport.height).min(limit);

        self.logical_width = width;
        self.logical_height = height;
        self.pixel_ratio = ratio;
        self.backing_width = ((width * ratio).round() as u32).min(MAX_BACKING_EXTENT);
        self.backing_height = ((height * ratio).round() as u32).min(MAX_BACKING_EXTENT);

        self.canvas.resize_backing(self.backing_width, self.backing_height);
        self.canvas.set_transform(ratio);

        tracing::debug!(
            width,
            height,
            ratio,
            backing_width = self.backing_width,
            backing_height = self.backing_height,
            "smoke surface resized"
        );
    }

    /// Clears and draws one glow per particle. Returns the number drawn.
    pub fn render(&mut self, particles: &[Particle]) -> usize {
        self.canvas.clear();

        let mut drawn = 0;
        for particle in particles {
            if particle.render_alpha <= 0.0 || particle.render_size <= 0.0 {
                continue;
            }
            let ellipse = Ellipse::circle(
                particle.x,
                particle.y,
                particle.render_size,
                particle.rotation,
            );
            let rgb = particle.color.to_unit_rgb();
            let gradient = RadialGradient::glow(rgb, particle.render_alpha);
            self.canvas.fill_radial_ellipse(&ellipse, &gradient);
            drawn += 1;
        }
        drawn
    }

    /// Logical size in CSS pixels.
    #[must_use]
    pub fn logical_size(&self) -> (f32, f32) {
        (self.logical_width, self.logical_height)
    }

    /// Backing size in device pixels.
    #[must_use]
    pub fn backing_size(&self) -> (u32, u32) {
        (self.backing_width, self.backing_height)
    }

    /// Clamped device pixel ratio in use.
    #[must_use]
    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// The drawing context.
    #[must_use]
    pub fn canvas(&self) -> &C {
        &self.canvas
    }
}

fn sanitize_extent(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SmokeColor;

    fn particle(x: f32, y: f32) -> Particle {
        Particle {
            x,
            y,
            size: 10.0,
            render_size: 10.0,
            base_alpha: 0.6,
            render_alpha: 0.6,
            age_limit: 1000.0,
            color: SmokeColor::rgba(200, 200, 200, 0.02),
            ..Particle::default()
        }
    }

    #[test]
    fn test_resize_scales_by_clamped_ratio() {
        let mut surface = RenderSurface::new(PixelCanvas::new(), Viewport::new(100.0, 50.0, 1.5));
        assert_eq!(surface.backing_size(), (150, 75));
        assert!((surface.canvas().scale() - 1.5).abs() < f32::EPSILON);

        surface.resize(Viewport::new(100.0, 50.0, 3.0));
        assert_eq!(surface.backing_size(), (200, 100));

        surface.resize(Viewport::new(100.0, 50.0, 0.5));
        assert_eq!(surface.backing_size(), (100, 50));

        surface.resize(Viewport::new(100.0, 50.0, f32::NAN));
        assert!((surface.pixel_ratio() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_resize_keeps_logical_coordinates() {
        let mut surface = RenderSurface::new(PixelCanvas::new(), Viewport::new(80.0, 80.0, 1.0));
        surface.render(&[particle(40.0, 40.0)]);
        let centre_1x = surface.canvas().pixel(40, 40).unwrap()[3];

        surface.resize(Viewport::new(80.0, 80.0, 2.0));
        surface.render(&[particle(40.0, 40.0)]);
        // Same logical point, twice the device coordinates
        let centre_2x = surface.canvas().pixel(80, 80).unwrap()[3];
        assert!((centre_1x - centre_2x).abs() < 0.05);
        assert!(surface.canvas().pixel(40, 40).unwrap()[3].abs() < f32::EPSILON);
    }

    #[test]
    fn test_render_clears_previous_frame() {
        let mut surface = RenderSurface::new(PixelCanvas::new(), Viewport::new(64.0, 64.0, 1.0));
        assert_eq!(surface.render(&[particle(10.0, 10.0)]), 1);
        assert!(surface.canvas().pixel(10, 10).unwrap()[3] > 0.0);

        assert_eq!(surface.render(&[particle(50.0, 50.0)]), 1);
        assert!(surface.canvas().pixel(10, 10).unwrap()[3].abs() < f32::EPSILON);
    }

    #[test]
    fn test_invisible_particles_are_skipped() {
        let mut surface = RenderSurface::new(PixelCanvas::new(), Viewport::new(32.0, 32.0, 1.0));
        let mut faded = particle(16.0, 16.0);
        faded.render_alpha = 0.0;
        assert_eq!(surface.render(&[faded]), 0);
        assert_eq!(surface.canvas().fill_count(), 0);
    }

    #[test]
    fn test_negative_viewport_collapses_to_empty() {
        let viewport = Viewport::new(-10.0, f32::INFINITY, 2.0);
        let surface = RenderSurface::new(PixelCanvas::new(), viewport);
        assert_eq!(surface.backing_size(), (0, 0));
    }

    #[test]
    fn test_huge_viewport_is_capped() {
        let viewport = Viewport::new(1.0e6, 10.0, 2.0);
        let surface = RenderSurface::new(PixelCanvas::new(), viewport);

        assert_eq!(surface.backing_size(), (MAX_BACKING_EXTENT, 20));
        assert_eq!(surface.canvas().pixels().len(), MAX_BACKING_EXTENT as usize * 20);
        let (width, height) = surface.logical_size();
        assert!((width - 4096.0).abs() < f32::EPSILON);
        assert!((height - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_cap_keeps_ordinary_sizes() {
        let surface = RenderSurface::new(PixelCanvas::new(), Viewport::new(1280.0, 720.0, 2.0));
        assert_eq!(surface.backing_size(), (2560, 1440));
    }
}
