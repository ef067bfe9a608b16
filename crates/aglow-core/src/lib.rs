#![forbid(unsafe_code)]

//! Render primitives shared by the afterglow effects and shell.
//!
//! Everything here is deterministic and allocation-free per frame: packed
//! RGBA color with canvas-style blending, the persistent [`Pixmap`] raster,
//! the seedable [`FxRng`] stream, the clamped [`Speed`] multiplier, and a
//! 5x7 bitmap font for the clock and HUD.

pub mod color;
pub mod font;
pub mod pixmap;
pub mod rng;
pub mod speed;

pub use color::{BlendMode, Rgba};
pub use pixmap::Pixmap;
pub use rng::FxRng;
pub use speed::Speed;
