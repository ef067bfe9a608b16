#![forbid(unsafe_code)]

//! Overlapping circular wavefronts from three fixed sources.
//!
//! The signed wave height at a sample point is the sum of each source's
//! amplitude-decayed sine contribution. Height maps to intensity, intensity
//! to a hue sweep from red toward blue. The field is evaluated at half
//! resolution: one sample per 2x2 block, filling the whole block. Source
//! centers carry a pulsing screen-blended glow.

use std::f32::consts::{FRAC_PI_2, PI};

use aglow_core::{color, BlendMode, Pixmap, Rgba};

use crate::{FxContext, ScreenFx};

/// Global clock advance per tick at speed 1.
const CLOCK_RATE: f32 = 0.02;
const TRAIL_FADE: f32 = 0.1;
/// Distance falloff applied to every contribution.
const FALLOFF: f32 = 0.001;

#[derive(Clone, Copy, Debug)]
struct WaveSource {
    x: f32,
    y: f32,
    frequency: f32,
    amplitude: f32,
    phase: f32,
}

impl WaveSource {
    /// Signed wave height this source contributes at `(x, y)` when the
    /// global clock reads `time`.
    fn contribution(&self, x: f32, y: f32, time: f32) -> f32 {
        let dist = ((x - self.x).powi(2) + (y - self.y).powi(2)).sqrt();
        self.amplitude * (self.frequency * dist - time + self.phase).sin() / (1.0 + dist * FALLOFF)
    }
}

fn derive_sources(width: u16, height: u16) -> [WaveSource; 3] {
    let w = f32::from(width);
    let h = f32::from(height);
    [
        WaveSource {
            x: w * 0.3,
            y: h * 0.3,
            frequency: 0.020,
            amplitude: 50.0,
            phase: 0.0,
        },
        WaveSource {
            x: w * 0.7,
            y: h * 0.7,
            frequency: 0.025,
            amplitude: 45.0,
            phase: PI,
        },
        WaveSource {
            x: w * 0.6,
            y: h * 0.2,
            frequency: 0.018,
            amplitude: 40.0,
            phase: FRAC_PI_2,
        },
    ]
}

/// Maps an aggregate wave height to a pixel color.
fn shade(amplitude: f32) -> Rgba {
    let intensity = (128.0 + amplitude * 2.0).clamp(0.0, 255.0);
    let hue = intensity / 255.0 * 240.0;
    color::hsl(hue, 0.8, intensity / 512.0 + 0.2)
}

pub struct WaveInterference {
    sources: [WaveSource; 3],
    time: f32,
}

impl WaveInterference {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            sources: derive_sources(width, height),
            time: 0.0,
        }
    }

    /// Total signed wave height at a point.
    fn field(&self, x: f32, y: f32) -> f32 {
        self.sources
            .iter()
            .map(|s| s.contribution(x, y, self.time))
            .sum()
    }
}

impl ScreenFx for WaveInterference {
    fn name(&self) -> &'static str {
        "wave-interference"
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.sources = derive_sources(width, height);
    }

    fn tick(&mut self, ctx: &FxContext, px: &mut Pixmap) {
        if px.is_empty() {
            return;
        }
        px.fade(TRAIL_FADE);
        self.time += CLOCK_RATE * ctx.speed.get();

        let w = i32::from(px.width());
        let h = i32::from(px.height());
        let mut y = 0;
        while y < h {
            let mut x = 0;
            while x < w {
                let color = shade(self.field(x as f32, y as f32));
                px.set(x, y, color);
                px.set(x + 1, y, color);
                px.set(x, y + 1, color);
                px.set(x + 1, y + 1, color);
                x += 2;
            }
            y += 2;
        }

        let pulse = (self.time * 3.0).sin() * 0.3 + 0.7;
        let radius = i32::from(px.width().min(px.height()) / 16).max(3);
        for source in self.sources {
            px.glow(
                source.x as i32,
                source.y as i32,
                radius,
                Rgba::WHITE.with_opacity(pulse),
                BlendMode::Screen,
            );
        }
    }
}
