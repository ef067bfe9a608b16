#![forbid(unsafe_code)]

//! Digital wall-clock display.
//!
//! Stateless between ticks: every frame clears to black and repaints the
//! zero-padded time with the long-form date beneath it, sized from the
//! raster dimensions. There is no throttling against second boundaries;
//! an unchanged second repaints identically.

use aglow_core::{font, Pixmap, Rgba};
use time::OffsetDateTime;

use crate::{FxContext, ScreenFx};

const TIME_COLOR: Rgba = Rgba::WHITE;
const DATE_COLOR: Rgba = Rgba::rgb(136, 136, 136);
/// Date height relative to the time height.
const DATE_RATIO: f32 = 0.3;
/// Date offset below the vertical center, relative to the time height.
const DATE_DROP: f32 = 0.7;

#[derive(Clone, Copy, Debug, Default)]
pub struct DigitalClock;

impl DigitalClock {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Time text height in raster pixels for a surface: an eighth of the width
/// capped by a quarter of the height.
#[inline]
#[must_use]
pub fn font_px(width: u16, height: u16) -> u16 {
    (width / 8).min(height / 4)
}

fn time_text(wall: OffsetDateTime) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        wall.hour(),
        wall.minute(),
        wall.second()
    )
}

fn date_text(wall: OffsetDateTime) -> String {
    format!(
        "{}, {} {}, {}",
        wall.weekday(),
        wall.month(),
        wall.day(),
        wall.year()
    )
}

impl ScreenFx for DigitalClock {
    fn name(&self) -> &'static str {
        "digital-clock"
    }

    fn tick(&mut self, ctx: &FxContext, px: &mut Pixmap) {
        if px.is_empty() {
            return;
        }
        px.fill(Rgba::BLACK);

        let w = i32::from(px.width());
        let h = i32::from(px.height());
        let size = i32::from(font_px(px.width(), px.height()));

        let time = time_text(ctx.wall);
        let time_scale = (size / font::GLYPH_HEIGHT as i32).max(1) as u32;
        let tw = font::text_width(&time, time_scale) as i32;
        let th = font::text_height(time_scale) as i32;
        font::draw_text(px, (w - tw) / 2, h / 2 - th / 2, &time, time_scale, TIME_COLOR);

        let date = date_text(ctx.wall);
        let date_scale =
            ((size as f32 * DATE_RATIO) as i32 / font::GLYPH_HEIGHT as i32).max(1) as u32;
        let dw = font::text_width(&date, date_scale) as i32;
        let dy = h / 2 + (size as f32 * DATE_DROP) as i32;
        font::draw_text(px, (w - dw) / 2, dy, &date, date_scale, DATE_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aglow_core::Speed;
    use time::macros::datetime;

    fn ctx_at(wall: OffsetDateTime) -> FxContext {
        FxContext {
            frame: 0,
            now_ms: 0,
            speed: Speed::default(),
            wall,
        }
    }

    #[test]
    fn font_px_is_an_eighth_of_width_capped_by_height() {
        assert_eq!(font_px(1920, 1080), 240);
        assert_eq!(font_px(800, 600), 100);
        assert_eq!(font_px(100, 100), 12);
        assert_eq!(font_px(0, 50), 0);
    }

    #[test]
    fn time_text_is_zero_padded() {
        assert_eq!(time_text(datetime!(2026-08-22 04:05:09 UTC)), "04:05:09");
        assert_eq!(time_text(datetime!(2026-08-22 14:05:09 UTC)), "14:05:09");
    }

    #[test]
    fn date_text_is_long_form() {
        assert_eq!(
            date_text(datetime!(2026-08-22 14:05:09 UTC)),
            "Saturday, August 22, 2026"
        );
    }

    #[test]
    fn paints_time_centered_and_date_dimmer_below() {
        let mut fx = DigitalClock::new();
        let mut px = Pixmap::new(192, 108);
        fx.tick(&ctx_at(datetime!(2026-08-22 14:05:09 UTC)), &mut px);

        // size = min(192/8, 108/4) = 24, scale 3, "14:05:09" is 8 chars.
        let tw = font::text_width("14:05:09", 3) as i32;
        let x0 = (192 - tw) / 2;
        let y0 = 108 / 2 - font::text_height(3) as i32 / 2;

        let mut white = 0;
        let mut gray = 0;
        for y in 0..108 {
            for x in 0..192 {
                match px.get(x, y) {
                    Some(TIME_COLOR) => {
                        white += 1;
                        assert!(x >= x0 && x < x0 + tw, "time pixel outside box");
                        assert!(y >= y0 && y < y0 + font::text_height(3) as i32);
                    }
                    Some(DATE_COLOR) => {
                        gray += 1;
                        assert!(y >= 108 / 2, "date pixel above center");
                    }
                    _ => {}
                }
            }
        }
        assert!(white > 0);
        assert!(gray > 0);
    }

    #[test]
    fn clears_stale_content_every_tick() {
        let mut fx = DigitalClock::new();
        let mut px = Pixmap::new(64, 32);
        px.fill(Rgba::rgb(1, 2, 3));
        fx.tick(&ctx_at(datetime!(2026-01-01 00:00:00 UTC)), &mut px);
        assert_eq!(px.get(0, 0), Some(Rgba::BLACK));
        assert_eq!(px.get(63, 31), Some(Rgba::BLACK));
    }

    #[test]
    fn zero_area_is_a_noop() {
        let mut fx = DigitalClock::new();
        let mut px = Pixmap::new(0, 0);
        fx.tick(&ctx_at(datetime!(2026-01-01 00:00:00 UTC)), &mut px);
    }

    #[test]
    fn tiny_rasters_still_draw_at_unit_scale() {
        let mut fx = DigitalClock::new();
        let mut px = Pixmap::new(50, 10);
        fx.tick(&ctx_at(datetime!(2026-08-22 23:59:58 UTC)), &mut px);
        assert!(px.pixels().iter().any(|&p| p == TIME_COLOR));
    }
}
