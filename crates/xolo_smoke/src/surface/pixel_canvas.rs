//! Software canvas.
//!
//! Premultiplied RGBA `f32` pixels, one `[f32; 4]` per device pixel. Used by
//! the headless host and anywhere the overlay is composited on the CPU.

use super::canvas::{Canvas, Ellipse, RadialGradient};

/// CPU rasterizer implementing [`Canvas`].
#[derive(Debug, Clone, Default)]
pub struct PixelCanvas {
    /// Row-major premultiplied RGBA.
    pixels: Vec<[f32; 4]>,
    /// Backing width in device pixels.
    width: u32,
    /// Backing height in device pixels.
    height: u32,
    /// Logical-to-device scale.
    scale: f32,
    /// Fills issued since the last clear.
    fills: u32,
}

impl PixelCanvas {
    /// Creates an empty canvas; the render surface sizes it.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            ..Self::default()
        }
    }

    /// Backing width in device pixels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Backing height in device pixels.
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Current logical-to-device scale.
    #[inline]
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Number of fills since the last clear.
    #[must_use]
    pub fn fill_count(&self) -> u32 {
        self.fills
    }

    /// Premultiplied RGBA at device pixel `(x, y)`.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    /// All pixels, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[[f32; 4]] {
        &self.pixels
    }

    /// The pixel buffer as a flat run of `f32` channels, RGBA order.
    #[must_use]
    pub fn channels(&self) -> &[f32] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Converts to premultiplied 8-bit RGBA.
    #[must_use]
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.channels()
            .iter()
            .map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect()
    }

    /// Sum of alpha over every pixel. Handy for asserting "something drew".
    #[must_use]
    pub fn total_alpha(&self) -> f64 {
        self.channels()
            .iter()
            .skip(3)
            .step_by(4)
            .map(|&a| f64::from(a))
            .sum()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Device-pixel span `[start, end)` covering logical `[lo, hi]`.
    fn device_span(&self, lo: f32, hi: f32, limit: u32) -> (u32, u32) {
        let start = (lo * self.scale).floor().max(0.0);
        let end = (hi * self.scale).ceil().min(limit as f32);
        if end <= start {
            return (0, 0);
        }
        (start as u32, end as u32)
    }
}

impl Canvas for PixelCanvas {
    fn resize_backing(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width as usize * height as usize, [0.0; 4]);
        self.fills = 0;
    }

    fn set_transform(&mut self, scale: f32) {
        self.scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
    }

    fn clear(&mut self) {
        self.pixels.fill([0.0; 4]);
        self.fills = 0;
    }

    fn fill_radial_ellipse(&mut self, ellipse: &Ellipse, gradient: &RadialGradient) {
        if !ellipse.is_drawable() || gradient.is_transparent() || self.pixels.is_empty() {
            return;
        }
        self.fills += 1;

        let (ex, ey) = ellipse.half_extents();
        let (x0, x1) = self.device_span(ellipse.cx - ex, ellipse.cx + ex, self.width);
        let (y0, y1) = self.device_span(ellipse.cy - ey, ellipse.cy + ey, self.height);
        let inv_scale = 1.0 / self.scale;
        let [r, g, b] = gradient.rgb;

        for py in y0..y1 {
            // Sample at the pixel centre, in logical space
            let ly = (py as f32 + 0.5) * inv_scale;
            let row = py as usize * self.width as usize;
            for px in x0..x1 {
                let lx = (px as f32 + 0.5) * inv_scale;
                let d = ellipse.normalized_distance(lx, ly);
                if d > 1.0 {
                    continue;
                }
                let a = gradient.alpha_at(d);
                if a <= 0.0 {
                    continue;
                }
                let dst = &mut self.pixels[row + px as usize];
                for (d, s) in dst.iter_mut().zip([r * a, g * a, b * a, a]) {
                    *d = (*d + s).min(1.0);
                }
            }
        }
    }
}
