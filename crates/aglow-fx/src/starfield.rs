#![forbid(unsafe_code)]

//! Depth-flying starfield.
//!
//! 800 stars live in a synthetic space with `x, y` in `[-1000, 1000]` and
//! depth `z` in `(0, 1000]`. Each tick pulls every star toward the camera
//! and draws the streak between its previous and current projection; the
//! whole surface fades first so streaks leave trails. Stars crossing the
//! camera plane respawn at the far plane, where their projected alpha is
//! zero, so the respawn jump never paints a streak.

use aglow_core::{BlendMode, FxRng, Pixmap, Rgba};

use crate::{FxContext, ScreenFx};

const STAR_COUNT: usize = 800;
const MAX_DEPTH: f32 = 1000.0;
/// Depth units closed per tick at speed 1.
const FALL_RATE: f32 = 2.0;
/// Projection scale from star space onto the raster.
const FOCAL: f32 = 100.0;
const TRAIL_FADE: f32 = 0.1;
const DEFAULT_SEED: u32 = 0x9E37_79B9;

struct Star {
    x: f32,
    y: f32,
    z: f32,
}

pub struct Starfield {
    stars: Vec<Star>,
    rng: FxRng,
}

impl Starfield {
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Deterministic constructor for tests and reproducible runs.
    #[must_use]
    pub fn with_seed(seed: u32) -> Self {
        let mut rng = FxRng::new(seed);
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                x: rng.range(-MAX_DEPTH, MAX_DEPTH),
                y: rng.range(-MAX_DEPTH, MAX_DEPTH),
                z: rng.range(1.0, MAX_DEPTH),
            })
            .collect();
        Self { stars, rng }
    }
}

impl Default for Starfield {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn project(star: &Star, cx: f32, cy: f32) -> (f32, f32) {
    (
        star.x / star.z * FOCAL + cx,
        star.y / star.z * FOCAL + cy,
    )
}

impl ScreenFx for Starfield {
    fn name(&self) -> &'static str {
        "starfield"
    }

    fn tick(&mut self, ctx: &FxContext, px: &mut Pixmap) {
        if px.is_empty() {
            return;
        }
        px.fade(TRAIL_FADE);

        let cx = f32::from(px.width()) / 2.0;
        let cy = f32::from(px.height()) / 2.0;
        let step = FALL_RATE * ctx.speed.get();

        // Projections blow up as z approaches zero; streaks whose endpoints
        // land more than one raster span outside the surface are skipped.
        let span_x = f32::from(px.width()).max(1.0);
        let span_y = f32::from(px.height()).max(1.0);
        let in_reach = |x: f32, y: f32| {
            x >= -span_x && x <= 2.0 * span_x && y >= -span_y && y <= 2.0 * span_y
        };

        for star in &mut self.stars {
            let (x0, y0) = project(star, cx, cy);
            star.z -= step;
            if star.z <= 0.0 {
                star.x = self.rng.range(-MAX_DEPTH, MAX_DEPTH);
                star.y = self.rng.range(-MAX_DEPTH, MAX_DEPTH);
                star.z = MAX_DEPTH;
            }
            let (x1, y1) = project(star, cx, cy);

            let depth = 1.0 - star.z / MAX_DEPTH;
            if depth <= 0.0 {
                continue;
            }
            if !in_reach(x0, y0) || !in_reach(x1, y1) {
                continue;
            }

            let color = Rgba::WHITE.with_opacity(depth);
            px.line(
                x0 as i32,
                y0 as i32,
                x1 as i32,
                y1 as i32,
                color,
                BlendMode::Over,
            );
            // Close streaks widen to two pixels, matching a stroke width of
            // 2 * depth crossing 1.5.
            if depth * 2.0 >= 1.5 {
                px.line(
                    x0 as i32 + 1,
                    y0 as i32,
                    x1 as i32 + 1,
                    y1 as i32,
                    color,
                    BlendMode::Over,
                );
            }
        }
    }
}
