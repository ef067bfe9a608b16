#![forbid(unsafe_code)]

//! Status overlay painted after the active effect each frame.

use aglow_core::{font, BlendMode, Pixmap, Rgba};

/// Distance from the bottom-left raster corner, in pixels.
const MARGIN: i32 = 2;
/// Backdrop padding around the text, in pixels.
const PAD: i32 = 2;

const BACKDROP: Rgba = Rgba::rgba(0, 0, 0, 160);
const TEXT: Rgba = Rgba::rgb(220, 220, 220);

/// Paint `status` over the bottom-left corner with a translucent backdrop.
pub fn draw(px: &mut Pixmap, status: &str) {
    if px.is_empty() || status.is_empty() {
        return;
    }
    let tw = font::text_width(status, 1) as i32;
    let th = font::text_height(1) as i32;
    let box_w = tw + PAD * 2;
    let box_h = th + PAD * 2;
    let box_x = MARGIN;
    let box_y = px.height() as i32 - box_h - MARGIN;
    px.fill_rect(box_x, box_y, box_w, box_h, BACKDROP, BlendMode::Over);
    font::draw_text(px, box_x + PAD, box_y + PAD, status, 1, TEXT);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paints_in_the_bottom_left_corner() {
        let mut px = Pixmap::new(120, 40);
        draw(&mut px, "1/5 TEST");
        let h = px.height() as i32;
        // Text pixels appear only inside the backdrop box.
        let mut lit = 0;
        for y in 0..px.height() as i32 {
            for x in 0..px.width() as i32 {
                if px.get(x, y) == Some(TEXT) {
                    assert!(x >= MARGIN + PAD);
                    assert!(y >= h - MARGIN - PAD * 2 - font::text_height(1) as i32);
                    assert!(y < h - MARGIN - PAD);
                    lit += 1;
                }
            }
        }
        assert!(lit > 0, "status text painted nothing");
    }

    #[test]
    fn backdrop_dims_rather_than_erases() {
        let mut px = Pixmap::new(120, 40);
        px.fill(Rgba::rgb(200, 200, 200));
        draw(&mut px, "HI");
        // Inside the backdrop but off the glyphs: darker than the scene,
        // brighter than black.
        let y = px.height() as i32 - MARGIN - 1;
        let probe = px.get(MARGIN, y).unwrap();
        assert!(probe.r() < 200);
        assert!(probe.r() > 0);
    }

    #[test]
    fn zero_area_surface_is_a_no_op() {
        let mut px = Pixmap::new(0, 0);
        draw(&mut px, "1/5 Starfield");
    }

    #[test]
    fn empty_status_paints_nothing() {
        let mut px = Pixmap::new(40, 20);
        draw(&mut px, "");
        assert!(px.pixels().iter().all(|&p| p == Rgba::BLACK));
    }
}
