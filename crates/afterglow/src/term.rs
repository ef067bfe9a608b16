#![forbid(unsafe_code)]

//! Terminal session guard and the half-block frame renderer.
//!
//! Each character cell carries two raster pixels: the background color
//! paints the top pixel and a `▄` glyph in the foreground color paints the
//! bottom one. Color escapes are only emitted when the pair changes, which
//! collapses flat regions into runs.

use std::io::{self, BufWriter, Stdout, Write};

use aglow_core::{Pixmap, Rgba};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color, Colors, Print, ResetColor, SetColors};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};

const HALF_BLOCK: &str = "▄";

/// Raw-mode alternate-screen session. Dropping it restores the terminal.
pub struct Session {
    out: BufWriter<Stdout>,
}

impl Session {
    /// Switch the terminal into raw mode on the alternate screen.
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = BufWriter::with_capacity(128 * 1024, io::stdout());
        if let Err(e) = execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All)) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Self { out })
    }

    /// Current terminal size in character cells.
    pub fn cell_size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Render the pixmap and flush it to the terminal in one burst.
    pub fn present(&mut self, px: &Pixmap) -> io::Result<()> {
        render_frame(&mut self.out, px)?;
        self.out.flush()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let _ = execute!(self.out, ResetColor, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn to_color(c: Rgba) -> Color {
    Color::Rgb {
        r: c.r(),
        g: c.g(),
        b: c.b(),
    }
}

/// Write the pixmap as half-block cells. Pixel row pairs map to one cell
/// row; an odd trailing pixel row is dropped.
pub fn render_frame(out: &mut impl Write, px: &Pixmap) -> io::Result<()> {
    let cols = px.width();
    let rows = px.height() / 2;
    let mut last: Option<(Color, Color)> = None;
    for row in 0..rows {
        queue!(out, MoveTo(0, row))?;
        let top = px.row(row * 2);
        let bottom = px.row(row * 2 + 1);
        for col in 0..cols as usize {
            let pair = (to_color(bottom[col]), to_color(top[col]));
            if last != Some(pair) {
                queue!(out, SetColors(Colors::new(pair.0, pair.1)))?;
                last = Some(pair);
            }
            queue!(out, Print(HALF_BLOCK))?;
        }
    }
    Ok(())
}
