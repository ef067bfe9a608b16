#![forbid(unsafe_code)]

//! Persistent raster surface.
//!
//! A [`Pixmap`] behaves like a 2D canvas backing store: pixels persist across
//! frames so effects can composite low-alpha black into motion trails, and a
//! resize discards all contents. Primitives are bounds-checked and writes
//! outside the raster are ignored, so callers may draw partially off-screen
//! geometry without pre-clipping. Coordinates are `i32` for that reason.
//!
//! # Invariants
//!
//! - Zero-area pixmaps are legal; every primitive degrades to a no-op.
//! - No primitive allocates.
//! - Disc and glow walks clip to the raster first; far-off centers and
//!   oversized radii degrade to empty spans.
//! - Pixels stay opaque: fades and blends never drop alpha below 255 once
//!   the surface is filled.

use crate::color::{BlendMode, Rgba};

pub struct Pixmap {
    width: u16,
    height: u16,
    pixels: Vec<Rgba>,
}

impl Pixmap {
    /// Creates an opaque black raster.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::BLACK; usize::from(width) * usize::from(height)],
        }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[must_use]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// One row of pixels, left to right.
    ///
    /// # Panics
    /// Panics if `y >= height`.
    #[must_use]
    pub fn row(&self, y: u16) -> &[Rgba] {
        let w = usize::from(self.width);
        let start = usize::from(y) * w;
        &self.pixels[start..start + w]
    }

    /// Reallocates at the new dimensions and clears to black. Old contents
    /// are discarded, matching canvas resize semantics.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize(usize::from(width) * usize::from(height), Rgba::BLACK);
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return None;
        }
        Some(y as usize * usize::from(self.width) + x as usize)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Writes `color` without blending.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Composites `color` onto the pixel with `mode`.
    #[inline]
    pub fn blend(&mut self, x: i32, y: i32, color: Rgba, mode: BlendMode) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = mode.apply(color, self.pixels[i]);
        }
    }

    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Composites translucent black over the whole surface, the canvas idiom
    /// for motion trails. `alpha` is the black layer's opacity. Channel math
    /// truncates so repeated fades decay every pixel all the way to zero.
    pub fn fade(&mut self, alpha: f32) {
        let keep = 1.0 - alpha.clamp(0.0, 1.0);
        // 8.8 fixed point keeps the per-pixel work integer-only.
        let k = (keep * 256.0) as u32;
        if k >= 256 {
            return;
        }
        for px in &mut self.pixels {
            let r = (u32::from(px.r()) * k) >> 8;
            let g = (u32::from(px.g()) * k) >> 8;
            let b = (u32::from(px.b()) * k) >> 8;
            *px = Rgba::rgba(r as u8, g as u8, b as u8, px.a());
        }
    }

    /// Bresenham segment from `(x0, y0)` to `(x1, y1)` inclusive.
    ///
    /// Endpoints are expected within a few raster spans of the surface;
    /// callers with unbounded geometry clip first.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba, mode: BlendMode) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.blend(x, y, color, mode);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Axis-aligned filled rectangle with top-left corner at `(x, y)`.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba, mode: BlendMode) {
        for py in y..y.saturating_add(h.max(0)) {
            for px in x..x.saturating_add(w.max(0)) {
                self.blend(px, py, color, mode);
            }
        }
    }

    /// Filled disc. `r <= 0` plots the center pixel only.
    pub fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, color: Rgba, mode: BlendMode) {
        if r <= 0 {
            self.blend(cx, cy, color, mode);
            return;
        }
        // Walk only the rows that land on the raster; u64 distance math
        // holds any center/radius pair.
        let x0 = cx.saturating_sub(r).max(0);
        let x1 = cx.saturating_add(r).min(i32::from(self.width) - 1);
        let y0 = cy.saturating_sub(r).max(0);
        let y1 = cy.saturating_add(r).min(i32::from(self.height) - 1);
        let r2 = u64::from(r.unsigned_abs()) * u64::from(r.unsigned_abs());
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = u64::from(x.abs_diff(cx));
                let dy = u64::from(y.abs_diff(cy));
                if dx * dx + dy * dy <= r2 {
                    self.blend(x, y, color, mode);
                }
            }
        }
    }

    /// Radial glow: `color` at the center falling off quadratically to
    /// transparent at `radius`. Stands in for a canvas radial gradient.
    pub fn glow(&mut self, cx: i32, cy: i32, radius: i32, color: Rgba, mode: BlendMode) {
        if radius <= 0 {
            self.blend(cx, cy, color, mode);
            return;
        }
        let x0 = cx.saturating_sub(radius).max(0);
        let x1 = cx.saturating_add(radius).min(i32::from(self.width) - 1);
        let y0 = cy.saturating_sub(radius).max(0);
        let y1 = cy.saturating_add(radius).min(i32::from(self.height) - 1);
        let r2 = u64::from(radius.unsigned_abs()) * u64::from(radius.unsigned_abs());
        let inv = 1.0 / radius as f32;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = u64::from(x.abs_diff(cx));
                let dy = u64::from(y.abs_diff(cy));
                let d2 = dx * dx + dy * dy;
                if d2 > r2 {
                    continue;
                }
                let t = 1.0 - (d2 as f32).sqrt() * inv;
                self.blend(x, y, color.with_opacity(t * t), mode);
            }
        }
    }
}

impl std::fmt::Debug for Pixmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pixmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_opaque_black() {
        let px = Pixmap::new(4, 3);
        assert_eq!(px.len(), 12);
        assert!(px.pixels().iter().all(|&p| p == Rgba::BLACK));
    }

    #[test]
    fn set_and_get_round_trip() {
        let mut px = Pixmap::new(4, 4);
        px.set(2, 1, Rgba::rgb(9, 9, 9));
        assert_eq!(px.get(2, 1), Some(Rgba::rgb(9, 9, 9)));
        assert_eq!(px.get(3, 3), Some(Rgba::BLACK));
    }

    #[test]
    fn out_of_range_writes_are_ignored() {
        let mut px = Pixmap::new(2, 2);
        px.set(-1, 0, Rgba::WHITE);
        px.set(0, -1, Rgba::WHITE);
        px.set(2, 0, Rgba::WHITE);
        px.set(0, 2, Rgba::WHITE);
        assert!(px.pixels().iter().all(|&p| p == Rgba::BLACK));
        assert_eq!(px.get(5, 5), None);
    }

    #[test]
    fn zero_area_is_safe() {
        let mut px = Pixmap::new(0, 0);
        assert!(px.is_empty());
        px.set(0, 0, Rgba::WHITE);
        px.fade(0.1);
        px.line(-5, -5, 5, 5, Rgba::WHITE, BlendMode::Over);
        px.fill_circle(0, 0, 3, Rgba::WHITE, BlendMode::Over);
        px.glow(0, 0, 3, Rgba::WHITE, BlendMode::Screen);
        assert!(px.is_empty());
    }

    #[test]
    fn resize_clears_contents() {
        let mut px = Pixmap::new(2, 2);
        px.fill(Rgba::WHITE);
        px.resize(3, 5);
        assert_eq!((px.width(), px.height()), (3, 5));
        assert_eq!(px.len(), 15);
        assert!(px.pixels().iter().all(|&p| p == Rgba::BLACK));
    }

    #[test]
    fn fade_decays_to_black() {
        let mut px = Pixmap::new(1, 1);
        px.set(0, 0, Rgba::WHITE);
        for _ in 0..600 {
            px.fade(0.1);
        }
        let p = px.get(0, 0).unwrap();
        assert_eq!((p.r(), p.g(), p.b()), (0, 0, 0));
        assert_eq!(p.a(), 255);
    }

    #[test]
    fn fade_is_monotonic() {
        let mut px = Pixmap::new(1, 1);
        px.set(0, 0, Rgba::rgb(200, 150, 100));
        let before = px.get(0, 0).unwrap();
        px.fade(0.1);
        let after = px.get(0, 0).unwrap();
        assert!(after.r() < before.r());
        assert!(after.g() < before.g());
        assert!(after.b() < before.b());
    }

    #[test]
    fn fade_zero_keeps_pixels() {
        let mut px = Pixmap::new(1, 1);
        px.set(0, 0, Rgba::rgb(123, 45, 67));
        px.fade(0.0);
        assert_eq!(px.get(0, 0), Some(Rgba::rgb(123, 45, 67)));
    }

    #[test]
    fn line_plots_both_endpoints() {
        let mut px = Pixmap::new(8, 8);
        px.line(1, 1, 6, 4, Rgba::WHITE, BlendMode::Over);
        assert_eq!(px.get(1, 1), Some(Rgba::WHITE));
        assert_eq!(px.get(6, 4), Some(Rgba::WHITE));
    }

    #[test]
    fn line_partially_off_screen_is_clipped() {
        let mut px = Pixmap::new(4, 4);
        px.line(-3, 2, 7, 2, Rgba::WHITE, BlendMode::Over);
        for x in 0..4 {
            assert_eq!(px.get(x, 2), Some(Rgba::WHITE));
        }
    }

    #[test]
    fn fill_circle_covers_radius() {
        let mut px = Pixmap::new(9, 9);
        px.fill_circle(4, 4, 3, Rgba::WHITE, BlendMode::Over);
        assert_eq!(px.get(4, 4), Some(Rgba::WHITE));
        assert_eq!(px.get(7, 4), Some(Rgba::WHITE));
        assert_eq!(px.get(8, 4), Some(Rgba::BLACK));
        assert_eq!(px.get(7, 7), Some(Rgba::BLACK));
    }

    #[test]
    fn glow_is_brightest_at_center() {
        let mut px = Pixmap::new(11, 11);
        px.glow(5, 5, 4, Rgba::WHITE, BlendMode::Over);
        let center = px.get(5, 5).unwrap();
        let edge = px.get(8, 5).unwrap();
        assert!(center.r() > edge.r());
        assert_eq!(px.get(5, 5).unwrap().a(), 255);
    }

    #[test]
    fn extreme_centers_and_radii_are_ignored() {
        let mut px = Pixmap::new(4, 4);
        px.fill_circle(i32::MAX, i32::MIN, 40, Rgba::WHITE, BlendMode::Over);
        px.fill_circle(-2_000_000_000, 2_000_000_000, i32::MAX, Rgba::WHITE, BlendMode::Over);
        px.glow(i32::MIN, i32::MAX, 40, Rgba::WHITE, BlendMode::Additive);
        px.glow(2_000_000_000, -2_000_000_000, i32::MAX, Rgba::WHITE, BlendMode::Screen);
        assert!(px.pixels().iter().all(|&p| p == Rgba::BLACK));
    }

    #[test]
    fn distant_center_with_covering_radius_still_lands() {
        let mut px = Pixmap::new(4, 4);
        px.fill_circle(1_000_003, 2, 1_000_002, Rgba::WHITE, BlendMode::Over);
        assert_eq!(px.get(1, 2), Some(Rgba::WHITE));
        assert_eq!(px.get(3, 2), Some(Rgba::WHITE));
        assert_eq!(px.get(0, 2), Some(Rgba::BLACK));
        assert_eq!(px.get(1, 0), Some(Rgba::BLACK));
    }

    #[test]
    fn row_matches_get() {
        let mut px = Pixmap::new(3, 2);
        px.set(2, 1, Rgba::rgb(7, 7, 7));
        assert_eq!(px.row(1)[2], Rgba::rgb(7, 7, 7));
        assert_eq!(px.row(0).len(), 3);
    }
}
