#![forbid(unsafe_code)]

//! 5x7 bitmap font.
//!
//! Glyphs are seven row bitmaps with bit 4 as the leftmost pixel. The font
//! covers digits, uppercase letters and the punctuation the clock, HUD and
//! matrix rain need. Rendering scales by whole pixels so large clock digits
//! stay crisp.

use crate::color::{BlendMode, Rgba};
use crate::pixmap::Pixmap;

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;
/// Horizontal advance per character at scale 1 (glyph plus one gutter
/// column).
pub const ADVANCE: u32 = GLYPH_WIDTH + 1;

/// Every character the font covers. Also used as the matrix-rain glyph pool.
pub const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789:+-*/=<>.,";

type Glyph = [u8; GLYPH_HEIGHT as usize];

/// Row bitmaps for `ch`, if covered. Lowercase letters map to their
/// uppercase glyphs.
#[must_use]
pub fn glyph(ch: char) -> Option<&'static Glyph> {
    let g: &'static Glyph = match ch.to_ascii_uppercase() {
        ' ' => &[0, 0, 0, 0, 0, 0, 0],
        '0' => &[0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => &[0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => &[0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => &[0b01110, 0b10001, 0b00001, 0b00110, 0b00001, 0b10001, 0b01110],
        '4' => &[0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => &[0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => &[0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => &[0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => &[0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => &[0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        'A' => &[0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => &[0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => &[0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => &[0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
        'E' => &[0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => &[0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => &[0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => &[0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => &[0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => &[0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => &[0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => &[0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => &[0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => &[0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => &[0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => &[0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => &[0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => &[0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => &[0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => &[0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => &[0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => &[0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => &[0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => &[0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => &[0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => &[0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        ':' => &[0b00000, 0b00100, 0b00100, 0b00000, 0b00100, 0b00100, 0b00000],
        '.' => &[0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00110, 0b00110],
        ',' => &[0b00000, 0b00000, 0b00000, 0b01100, 0b01100, 0b00100, 0b01000],
        '/' => &[0b00001, 0b00010, 0b00010, 0b00100, 0b01000, 0b01000, 0b10000],
        '-' => &[0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '+' => &[0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000],
        '*' => &[0b00000, 0b00100, 0b10101, 0b01110, 0b10101, 0b00100, 0b00000],
        '=' => &[0b00000, 0b00000, 0b11111, 0b00000, 0b11111, 0b00000, 0b00000],
        '<' => &[0b00010, 0b00100, 0b01000, 0b10000, 0b01000, 0b00100, 0b00010],
        '>' => &[0b01000, 0b00100, 0b00010, 0b00001, 0b00010, 0b00100, 0b01000],
        _ => return None,
    };
    Some(g)
}

/// Pixel width of `text` at `scale`, including inter-glyph gutters but not a
/// trailing one.
#[must_use]
pub fn text_width(text: &str, scale: u32) -> u32 {
    let n = text.chars().count() as u32;
    if n == 0 {
        0
    } else {
        (n * ADVANCE - 1) * scale.max(1)
    }
}

/// Glyph height in pixels at `scale`.
#[inline]
#[must_use]
pub fn text_height(scale: u32) -> u32 {
    GLYPH_HEIGHT * scale.max(1)
}

/// Draws `text` with its top-left corner at `(x, y)`. Characters the font
/// does not cover advance the pen without painting.
pub fn draw_text(px: &mut Pixmap, x: i32, y: i32, text: &str, scale: u32, color: Rgba) {
    let step = (ADVANCE * scale.max(1)) as i32;
    let mut pen = x;
    for ch in text.chars() {
        if let Some(rows) = glyph(ch) {
            draw_glyph(px, pen, y, rows, scale, color);
        }
        pen += step;
    }
}

/// Draws one glyph bitmap with its top-left corner at `(x, y)`.
pub fn draw_glyph(px: &mut Pixmap, x: i32, y: i32, rows: &Glyph, scale: u32, color: Rgba) {
    let s = scale.max(1) as i32;
    for (ry, bits) in rows.iter().enumerate() {
        for rx in 0..GLYPH_WIDTH {
            if bits & (1 << (GLYPH_WIDTH - 1 - rx)) != 0 {
                px.fill_rect(
                    x + rx as i32 * s,
                    y + ry as i32 * s,
                    s,
                    s,
                    color,
                    BlendMode::Over,
                );
            }
        }
    }
}
