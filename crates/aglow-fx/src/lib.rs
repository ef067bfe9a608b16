#![forbid(unsafe_code)]

//! Effect loops for afterglow.
//!
//! Each effect owns its entity state, advances it once per [`ScreenFx::tick`]
//! and paints into the shared [`Pixmap`]. Effects never share state; the
//! shell switches between them by dropping one and constructing the next,
//! which is also what ends an effect's tick chain.
//!
//! # Contract
//!
//! - Ticks tolerate zero-area pixmaps and degrade to a no-op.
//! - All randomness flows through an effect-owned [`aglow_core::FxRng`], so a
//!   seed fully determines the pixel output for a given context sequence.
//! - `resize` re-derives geometry cached from the raster dimensions; the
//!   pixmap itself has already been cleared by the caller.

pub mod clock;
pub mod explosions;
pub mod matrix;
pub mod starfield;
pub mod waves;

pub use clock::DigitalClock;
pub use explosions::ParticleExplosion;
pub use matrix::MatrixRain;
pub use starfield::Starfield;
pub use waves::WaveInterference;

use aglow_core::{Pixmap, Speed};
use time::OffsetDateTime;

/// Per-frame inputs handed to every effect.
#[derive(Clone, Copy, Debug)]
pub struct FxContext {
    /// Frames presented since the shell started.
    pub frame: u64,
    /// Monotonic milliseconds since the shell started. Drives spawn gates.
    pub now_ms: u64,
    /// Global speed multiplier applied to every per-tick delta.
    pub speed: Speed,
    /// Wall-clock snapshot, taken once per frame.
    pub wall: OffsetDateTime,
}

/// A self-contained animation loop painting into the shared pixmap.
pub trait ScreenFx {
    /// Stable identifier used in logs.
    fn name(&self) -> &'static str;

    /// Re-derives any geometry cached from the raster dimensions.
    fn resize(&mut self, width: u16, height: u16) {
        let _ = (width, height);
    }

    /// Advances the effect by one frame and paints it.
    fn tick(&mut self, ctx: &FxContext, px: &mut Pixmap);
}
