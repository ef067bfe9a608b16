#![forbid(unsafe_code)]

//! Application state: effect selection, input handling, auto-rotation.
//!
//! [`App`] owns the active effect and mediates between terminal events and
//! the effect contract. Switching effects rebuilds the effect from scratch
//! with a fresh seed so each visit starts a new scene.

use aglow_core::{Pixmap, Speed};
use aglow_fx::{
    DigitalClock, FxContext, MatrixRain, ParticleExplosion, ScreenFx, Starfield,
    WaveInterference,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::info;

use crate::hud;

/// How long the HUD stays visible after a keypress, in milliseconds.
const HUD_LINGER_MS: u64 = 3_000;

/// Seed increment applied on every effect switch.
const SEED_STEP: u32 = 0x9E37_79B9;

/// Identifies one of the built-in effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FxId {
    Starfield,
    MatrixRain,
    WaveInterference,
    ParticleExplosion,
    DigitalClock,
}

impl FxId {
    /// Every effect, in rotation order.
    pub const ALL: [FxId; 5] = [
        FxId::Starfield,
        FxId::MatrixRain,
        FxId::WaveInterference,
        FxId::ParticleExplosion,
        FxId::DigitalClock,
    ];

    /// Position within [`FxId::ALL`].
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&id| id == self).unwrap_or(0)
    }

    /// The effect after this one, wrapping.
    pub fn next(self) -> FxId {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The effect before this one, wrapping.
    pub fn prev(self) -> FxId {
        let n = Self::ALL.len();
        Self::ALL[(self.index() + n - 1) % n]
    }

    /// Display title shown in the HUD.
    pub fn title(self) -> &'static str {
        match self {
            FxId::Starfield => "Starfield",
            FxId::MatrixRain => "Matrix Rain",
            FxId::WaveInterference => "Wave Interference",
            FxId::ParticleExplosion => "Particle Explosion",
            FxId::DigitalClock => "Digital Clock",
        }
    }

    /// Resolve a `--fx` argument: a 1-indexed number or a name.
    pub fn from_arg(arg: &str) -> Option<FxId> {
        if let Ok(n) = arg.parse::<usize>() {
            return Self::ALL.get(n.wrapping_sub(1)).copied();
        }
        match arg.to_ascii_lowercase().as_str() {
            "starfield" | "stars" => Some(FxId::Starfield),
            "matrix-rain" | "matrix" | "rain" => Some(FxId::MatrixRain),
            "wave-interference" | "waves" | "wave" => Some(FxId::WaveInterference),
            "particle-explosion" | "explosions" | "particles" | "fireworks" => {
                Some(FxId::ParticleExplosion)
            }
            "digital-clock" | "clock" | "time" => Some(FxId::DigitalClock),
            _ => None,
        }
    }

    fn build(self, width: u16, height: u16, seed: u32) -> Box<dyn ScreenFx> {
        match self {
            FxId::Starfield => Box::new(Starfield::with_seed(seed)),
            FxId::MatrixRain => Box::new(MatrixRain::with_seed(width, height, seed)),
            FxId::WaveInterference => Box::new(WaveInterference::new(width, height)),
            FxId::ParticleExplosion => Box::new(ParticleExplosion::with_seed(seed)),
            FxId::DigitalClock => Box::new(DigitalClock::new()),
        }
    }
}

/// Outcome of handling a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Startup configuration for [`App`].
pub struct AppConfig {
    pub start: FxId,
    pub speed: Speed,
    pub auto_rotate: bool,
    pub rotate_every_ms: u64,
    pub seed: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            start: FxId::Starfield,
            speed: Speed::default(),
            auto_rotate: false,
            rotate_every_ms: 30_000,
            seed: 1,
        }
    }
}

/// The running screensaver: active effect plus shell state.
pub struct App {
    fx: Box<dyn ScreenFx>,
    current: FxId,
    speed: Speed,
    auto_rotate: bool,
    rotate_every_ms: u64,
    last_switch_ms: u64,
    hud_until_ms: Option<u64>,
    width: u16,
    height: u16,
    seed: u32,
}

impl App {
    pub fn new(cfg: AppConfig, width: u16, height: u16) -> Self {
        Self {
            fx: cfg.start.build(width, height, cfg.seed),
            current: cfg.start,
            speed: cfg.speed,
            auto_rotate: cfg.auto_rotate,
            rotate_every_ms: cfg.rotate_every_ms.max(1),
            last_switch_ms: 0,
            hud_until_ms: None,
            width,
            height,
            seed: cfg.seed,
        }
    }

    /// Replace the active effect. A no-op when `id` is already active.
    pub fn select(&mut self, id: FxId, now_ms: u64) {
        if id == self.current {
            return;
        }
        self.seed = self.seed.wrapping_add(SEED_STEP);
        let fx = id.build(self.width, self.height, self.seed);
        info!(effect = fx.name(), "switched effect");
        self.fx = fx;
        self.current = id;
        self.last_switch_ms = now_ms;
    }

    /// Handle one terminal key event.
    pub fn on_key(&mut self, key: KeyEvent, now_ms: u64) -> Flow {
        self.hud_until_ms = Some(now_ms.saturating_add(HUD_LINGER_MS));

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Flow::Quit;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Tab | KeyCode::Char('n') | KeyCode::Right => {
                self.select(self.current.next(), now_ms);
            }
            KeyCode::BackTab | KeyCode::Char('p') | KeyCode::Left => {
                self.select(self.current.prev(), now_ms);
            }
            KeyCode::Char('a') => {
                self.auto_rotate = !self.auto_rotate;
                self.last_switch_ms = now_ms;
                info!(enabled = self.auto_rotate, "auto-rotation toggled");
            }
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => {
                self.speed = self.speed.faster();
            }
            KeyCode::Char('-') | KeyCode::Down => {
                self.speed = self.speed.slower();
            }
            KeyCode::Char(c @ '1'..='5') => {
                let idx = (c as usize) - ('1' as usize);
                self.select(FxId::ALL[idx], now_ms);
            }
            _ => {}
        }
        Flow::Continue
    }

    /// Track a terminal resize. The caller resizes the pixmap itself.
    pub fn on_resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.fx.resize(width, height);
    }

    /// Advance one frame: rotate if due, tick the effect, overlay the HUD.
    pub fn frame(&mut self, ctx: &FxContext, px: &mut Pixmap) {
        if self.auto_rotate && ctx.now_ms.saturating_sub(self.last_switch_ms) >= self.rotate_every_ms
        {
            self.select(self.current.next(), ctx.now_ms);
        }
        self.fx.tick(ctx, px);
        if self.hud_visible(ctx.now_ms) {
            hud::draw(px, &self.status_line());
        }
    }

    pub fn hud_visible(&self, now_ms: u64) -> bool {
        self.hud_until_ms.is_some_and(|until| now_ms < until)
    }

    pub fn current(&self) -> FxId {
        self.current
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// One-line HUD summary.
    pub fn status_line(&self) -> String {
        format!(
            "{}/{} {}  {}  AUTO {}",
            self.current.index() + 1,
            FxId::ALL.len(),
            self.current.title(),
            self.speed,
            if self.auto_rotate { "ON" } else { "OFF" },
        )
    }
}
