#![forbid(unsafe_code)]

//! Packed RGBA color and blending.
//!
//! Colors are a single `u32` in RGBA byte order. Blending works in straight
//! (non-premultiplied) alpha with integer channel math. The pixmap is opaque
//! end to end, so every composite here lands on an opaque destination.

/// Packed 32-bit color, `0xRRGGBBAA`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Rgba(pub u32);

impl Rgba {
    pub const TRANSPARENT: Self = Self(0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Opaque color from channel bytes.
    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    #[inline]
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    #[inline]
    #[must_use]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    #[must_use]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    #[must_use]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    #[must_use]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Same color with alpha scaled by `t` in `[0, 1]`.
    #[must_use]
    pub fn with_opacity(self, t: f32) -> Self {
        let a = (f32::from(self.a()) * t.clamp(0.0, 1.0)).round() as u8;
        Self::rgba(self.r(), self.g(), self.b(), a)
    }

    /// Source-over composite of `self` onto `dst`, straight alpha with
    /// round-to-nearest channel math. Exact for opaque destinations, which
    /// is the only case the pixmap produces.
    #[must_use]
    pub fn over(self, dst: Self) -> Self {
        let sa = u32::from(self.a());
        if sa == 255 {
            return self;
        }
        if sa == 0 {
            return dst;
        }
        let inv = 255 - sa;
        let ch = |s: u8, d: u8| ((u32::from(s) * sa + u32::from(d) * inv + 127) / 255) as u8;
        let a = ((sa * 255 + u32::from(dst.a()) * inv + 127) / 255) as u8;
        Self::rgba(
            ch(self.r(), dst.r()),
            ch(self.g(), dst.g()),
            ch(self.b(), dst.b()),
            a,
        )
    }

    /// Additive composite: saturating channel add, weighted by source alpha.
    /// Used for particle glows, where overlapping light accumulates.
    #[must_use]
    pub fn additive(self, dst: Self) -> Self {
        let sa = u32::from(self.a());
        let ch = |s: u8, d: u8| {
            let add = (u32::from(s) * sa + 127) / 255;
            (u32::from(d) + add).min(255) as u8
        };
        Self::rgba(
            ch(self.r(), dst.r()),
            ch(self.g(), dst.g()),
            ch(self.b(), dst.b()),
            self.a().max(dst.a()),
        )
    }

    /// Screen composite lerped by source alpha. Lightens, never darkens.
    #[must_use]
    pub fn screen(self, dst: Self) -> Self {
        let sa = u32::from(self.a());
        let ch = |s: u8, d: u8| {
            let s = u32::from(s);
            let d = u32::from(d);
            let scr = 255 - ((255 - s) * (255 - d) + 127) / 255;
            // scr >= d holds for all inputs, so the lerp stays in range.
            (d + (scr - d) * sa / 255) as u8
        };
        Self::rgba(
            ch(self.r(), dst.r()),
            ch(self.g(), dst.g()),
            ch(self.b(), dst.b()),
            self.a().max(dst.a()),
        )
    }
}

/// How a color is composited onto an existing pixel.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum BlendMode {
    /// Source-over in straight alpha.
    #[default]
    Over,
    /// Saturating channel add, weighted by source alpha.
    Additive,
    /// Inverted multiply, lerped by source alpha.
    Screen,
}

impl BlendMode {
    #[inline]
    #[must_use]
    pub fn apply(self, src: Rgba, dst: Rgba) -> Rgba {
        match self {
            BlendMode::Over => src.over(dst),
            BlendMode::Additive => src.additive(dst),
            BlendMode::Screen => src.screen(dst),
        }
    }
}

/// HSL to opaque RGB. `h` is degrees (wrapped into `[0, 360)`), `s` and `l`
/// in `[0, 1]`.
#[must_use]
pub fn hsl(h: f32, s: f32, l: f32) -> Rgba {
    hsla(h, s, l, 1.0)
}

/// HSL with an explicit alpha in `[0, 1]`.
#[must_use]
pub fn hsla(h: f32, s: f32, l: f32, alpha: f32) -> Rgba {
    let h = if h.is_finite() { h.rem_euclid(360.0) } else { 0.0 };
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let q = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba::rgba(q(r), q(g), q(b), (alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
}
