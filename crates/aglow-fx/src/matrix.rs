#![forbid(unsafe_code)]

//! Matrix-style glyph rain.
//!
//! One glyph column per six raster pixels. Only the head glyph is painted
//! each tick; the global fade is what turns previously painted heads into
//! the decaying trail behind them. Heads advance by fractional rows so
//! speed scaling stays smooth, and each paint picks a fresh random glyph,
//! which produces the classic mutation shimmer while a head crosses a cell.

use aglow_core::{font, FxRng, Pixmap, Rgba};

use crate::{FxContext, ScreenFx};

/// Glyph cell geometry at scale 1: 5x7 glyphs with a one pixel gutter.
const CELL_W: u32 = font::ADVANCE;
const CELL_H: u32 = font::GLYPH_HEIGHT + 1;
const TRAIL_FADE: f32 = 0.1;
/// Rows per tick at speed 1.
const MIN_VELOCITY: f32 = 0.15;
const MAX_VELOCITY: f32 = 0.5;
/// Heads respawn up to this many rows above the top edge.
const RESPAWN_ABOVE: f32 = 10.0;
const HEAD_COLOR: Rgba = Rgba::rgb(0, 255, 70);
const DEFAULT_SEED: u32 = 0x8FB3_52C1;

struct Column {
    row: f32,
    velocity: f32,
}

pub struct MatrixRain {
    columns: Vec<Column>,
    /// Raster height in glyph rows.
    rows: f32,
    rng: FxRng,
}

impl MatrixRain {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_seed(width, height, DEFAULT_SEED)
    }

    /// Deterministic constructor for tests and reproducible runs.
    #[must_use]
    pub fn with_seed(width: u16, height: u16, seed: u32) -> Self {
        let mut fx = Self {
            columns: Vec::new(),
            rows: 0.0,
            rng: FxRng::new(seed),
        };
        fx.resize(width, height);
        fx
    }

    fn spawn(rng: &mut FxRng) -> Column {
        Column {
            row: rng.range(-RESPAWN_ABOVE, 0.0),
            velocity: rng.range(MIN_VELOCITY, MAX_VELOCITY),
        }
    }

    fn pick_glyph(rng: &mut FxRng) -> char {
        let idx = (rng.next_f32() * font::CHARSET.len() as f32) as usize;
        font::CHARSET[idx.min(font::CHARSET.len() - 1)] as char
    }
}

impl ScreenFx for MatrixRain {
    fn name(&self) -> &'static str {
        "matrix-rain"
    }

    fn resize(&mut self, width: u16, height: u16) {
        let cols = (u32::from(width) / CELL_W) as usize;
        self.rows = f32::from(height) / CELL_H as f32;
        self.columns.clear();
        for _ in 0..cols {
            let column = Self::spawn(&mut self.rng);
            self.columns.push(column);
        }
    }

    fn tick(&mut self, ctx: &FxContext, px: &mut Pixmap) {
        if px.is_empty() {
            return;
        }
        px.fade(TRAIL_FADE);

        let speed = ctx.speed.get();
        for (i, col) in self.columns.iter_mut().enumerate() {
            col.row += col.velocity * speed;
            if col.row > self.rows + 1.0 {
                *col = Self::spawn(&mut self.rng);
            }
            let row = col.row.floor();
            if row < 0.0 {
                continue;
            }
            if let Some(bits) = font::glyph(Self::pick_glyph(&mut self.rng)) {
                font::draw_glyph(
                    px,
                    (i as u32 * CELL_W) as i32,
                    (row * CELL_H as f32) as i32,
                    bits,
                    1,
                    HEAD_COLOR,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aglow_core::Speed;
    use time::OffsetDateTime;

    fn ctx(speed: f32) -> FxContext {
        FxContext {
            frame: 0,
            now_ms: 0,
            speed: Speed::new(speed),
            wall: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn one_column_per_six_pixels() {
        let fx = MatrixRain::with_seed(60, 40, 1);
        assert_eq!(fx.columns.len(), 10);
        let fx = MatrixRain::with_seed(5, 40, 1);
        assert!(fx.columns.is_empty());
    }

    #[test]
    fn heads_advance_by_velocity_times_speed() {
        let mut fx = MatrixRain::with_seed(60, 40, 2);
        let before = fx.columns[0].row;
        let velocity = fx.columns[0].velocity;
        let mut px = Pixmap::new(60, 40);
        fx.tick(&ctx(2.0), &mut px);
        assert!((fx.columns[0].row - (before + velocity * 2.0)).abs() < 1e-4);
    }

    #[test]
    fn heads_respawn_above_the_top() {
        let mut fx = MatrixRain::with_seed(60, 40, 3);
        fx.columns[0].row = 1000.0;
        let mut px = Pixmap::new(60, 40);
        fx.tick(&ctx(1.0), &mut px);
        let col = &fx.columns[0];
        assert!(col.row >= -RESPAWN_ABOVE && col.row < 1.0);
        assert!(col.velocity >= MIN_VELOCITY && col.velocity < MAX_VELOCITY);
    }

    #[test]
    fn paints_heads_in_matrix_green() {
        let mut fx = MatrixRain::with_seed(64, 48, 4);
        let mut px = Pixmap::new(64, 48);
        let mut saw_green = false;
        for _ in 0..200 {
            fx.tick(&ctx(1.0), &mut px);
            saw_green |= px.pixels().iter().any(|&p| p == HEAD_COLOR);
        }
        assert!(saw_green);
    }

    #[test]
    fn resize_rebuilds_columns() {
        let mut fx = MatrixRain::with_seed(60, 40, 5);
        fx.resize(12, 16);
        assert_eq!(fx.columns.len(), 2);
        assert!((fx.rows - 2.0).abs() < 1e-6);
    }

    #[test]
    fn same_seed_same_pixels() {
        let mut a = MatrixRain::with_seed(48, 32, 6);
        let mut b = MatrixRain::with_seed(48, 32, 6);
        let mut pa = Pixmap::new(48, 32);
        let mut pb = Pixmap::new(48, 32);
        for _ in 0..100 {
            a.tick(&ctx(1.5), &mut pa);
            b.tick(&ctx(1.5), &mut pb);
        }
        assert_eq!(pa.pixels(), pb.pixels());
    }

    #[test]
    fn zero_area_is_a_noop() {
        let mut fx = MatrixRain::with_seed(0, 0, 7);
        let mut px = Pixmap::new(0, 0);
        for _ in 0..10 {
            fx.tick(&ctx(3.0), &mut px);
        }
        assert!(fx.columns.is_empty());
    }
}
