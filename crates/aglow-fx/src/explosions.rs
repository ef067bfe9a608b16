#![forbid(unsafe_code)]

//! Interval-spawned particle explosions.
//!
//! Four blast kinds with distinct launch envelopes and force fields, four
//! particle shapes, additive center glows and capped motion trails. Spawning
//! is gated on the monotonic clock: the first tick after mount ignites
//! immediately, then each ignition waits 1500-2500 ms divided by the speed
//! multiplier, with the threshold redrawn on every check.

use std::collections::VecDeque;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use aglow_core::{color, BlendMode, FxRng, Pixmap};

use crate::{FxContext, ScreenFx};

const TRAIL_CAP: usize = 8;
const TRAIL_FADE: f32 = 0.08;
/// Spawn gate bounds in milliseconds at speed 1.
const SPAWN_BASE_MS: f32 = 1500.0;
const SPAWN_JITTER_MS: f32 = 1000.0;
/// Tangential acceleration constant for spiral blasts.
const SPIRAL_TORQUE: f32 = 0.02;
const DEFAULT_SEED: u32 = 0x1F2E_3D4C;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum BlastKind {
    Firework,
    Burst,
    Cascade,
    Spiral,
}

impl BlastKind {
    const ALL: [Self; 4] = [Self::Firework, Self::Burst, Self::Cascade, Self::Spiral];

    fn gravity(self) -> f32 {
        match self {
            Self::Cascade => 0.12,
            _ => 0.08,
        }
    }

    fn resistance(self) -> f32 {
        match self {
            Self::Cascade => 0.98,
            _ => 0.995,
        }
    }

    /// Particle population bounds: inclusive low, exclusive high.
    fn count_range(self) -> (u32, u32) {
        match self {
            Self::Firework => (30, 70),
            Self::Burst => (40, 100),
            Self::Cascade => (60, 140),
            Self::Spiral => (35, 85),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Shape {
    Spark,
    Ember,
    Star,
    Bloom,
}

const SHAPES: [Shape; 4] = [Shape::Spark, Shape::Ember, Shape::Star, Shape::Bloom];

#[derive(Clone, Copy)]
struct TrailPoint {
    x: f32,
    y: f32,
    alpha: f32,
    size: f32,
}

struct Particle {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    life: f32,
    max_life: f32,
    size: f32,
    hue: f32,
    brightness: f32,
    shape: Shape,
    rotation: f32,
    rotation_speed: f32,
    trail: VecDeque<TrailPoint>,
}

impl Particle {
    fn launch(ox: f32, oy: f32, kind: BlastKind, rng: &mut FxRng) -> Self {
        let (angle, velocity, max_life, size) = match kind {
            BlastKind::Firework => (
                rng.next_f32() * TAU,
                rng.range(2.0, 8.0),
                rng.range(80.0, 180.0),
                rng.range(2.0, 5.0),
            ),
            BlastKind::Burst => (
                rng.next_f32() * TAU,
                rng.range(3.0, 11.0),
                rng.range(40.0, 100.0),
                rng.range(1.0, 3.0),
            ),
            // Cascades launch into the lower half plane only.
            BlastKind::Cascade => (
                (rng.next_f32() - 0.5) * PI + FRAC_PI_2,
                rng.range(1.0, 5.0),
                rng.range(100.0, 250.0),
                rng.range(1.0, 5.0),
            ),
            BlastKind::Spiral => (
                rng.next_f32() * TAU,
                rng.range(1.0, 4.0),
                rng.range(80.0, 200.0),
                rng.range(1.5, 4.5),
            ),
        };
        Self {
            x: ox,
            y: oy,
            vx: angle.cos() * velocity,
            vy: angle.sin() * velocity,
            life: 0.0,
            max_life,
            size,
            hue: rng.next_f32() * 360.0,
            brightness: rng.range(0.5, 1.0),
            shape: SHAPES[(rng.next_f32() * SHAPES.len() as f32) as usize],
            rotation: 0.0,
            rotation_speed: (rng.next_f32() - 0.5) * 0.2,
            trail: VecDeque::with_capacity(TRAIL_CAP + 1),
        }
    }

    /// Advances one tick. Returns false once the particle's life is spent.
    fn advance(&mut self, origin: (f32, f32), kind: BlastKind, speed: f32) -> bool {
        self.life += speed;
        if self.life >= self.max_life {
            return false;
        }

        if kind == BlastKind::Spiral {
            let dx = self.x - origin.0;
            let dy = self.y - origin.1;
            self.vx += -dy * SPIRAL_TORQUE;
            self.vy += dx * SPIRAL_TORQUE;
        }
        self.x += self.vx * speed;
        self.y += self.vy * speed;
        self.vy += kind.gravity() * speed;
        self.vx *= kind.resistance();
        self.vy *= kind.resistance();
        self.rotation += self.rotation_speed * speed;

        let frac = self.life / self.max_life;
        self.trail.push_back(TrailPoint {
            x: self.x,
            y: self.y,
            alpha: 1.0 - frac,
            size: self.size * (1.0 - frac * 0.5),
        });
        if self.trail.len() > TRAIL_CAP {
            self.trail.pop_front();
        }
        true
    }

    fn draw(&self, px: &mut Pixmap, rng: &mut FxRng) {
        let frac = self.life / self.max_life;
        let alpha = 1.0 - frac;
        let size = self.size * (1.0 - frac * 0.3);
        let base = color::hsl(self.hue, 1.0, self.brightness * 0.7);

        let len = self.trail.len() as f32;
        for (i, point) in self.trail.iter().enumerate() {
            let a = point.alpha * (i as f32 / len) * 0.4;
            px.fill_circle(
                point.x as i32,
                point.y as i32,
                (point.size * 0.5) as i32,
                base.with_opacity(a),
                BlendMode::Over,
            );
        }

        let x = self.x as i32;
        let y = self.y as i32;
        px.glow(
            x,
            y,
            (size * 4.0) as i32,
            base.with_opacity(alpha * 0.6),
            BlendMode::Additive,
        );

        let tint = base.with_opacity(alpha);
        match self.shape {
            Shape::Spark => {
                let s = size.max(1.0) as i32;
                px.fill_rect(x - s / 2, y - s / 2, s, s, tint, BlendMode::Over);
            }
            Shape::Ember => {
                px.fill_circle(x, y, size as i32, tint, BlendMode::Over);
            }
            Shape::Star => {
                for k in 0..5 {
                    let a = self.rotation + k as f32 * TAU / 5.0;
                    px.line(
                        x,
                        y,
                        (self.x + a.cos() * size) as i32,
                        (self.y + a.sin() * size) as i32,
                        tint,
                        BlendMode::Over,
                    );
                }
                px.fill_circle(x, y, (size * 0.5) as i32, tint, BlendMode::Over);
            }
            Shape::Bloom => {
                for k in 0..6 {
                    let a = self.rotation + k as f32 * TAU / 6.0;
                    px.fill_circle(
                        (self.x + a.cos() * size * 0.5) as i32,
                        (self.y + a.sin() * size * 0.5) as i32,
                        (size * 0.55).max(1.0) as i32,
                        tint,
                        BlendMode::Over,
                    );
                }
            }
        }

        // Occasional hot highlight toward the next hue sector.
        if rng.chance(0.1) {
            px.fill_circle(
                x,
                y,
                (size * 0.3) as i32,
                color::hsla(self.hue + 60.0, 1.0, 0.9, 0.8),
                BlendMode::Over,
            );
        }
    }
}

struct Blast {
    x: f32,
    y: f32,
    kind: BlastKind,
    /// Elapsed ticks scaled by speed since ignition.
    age: f32,
    particles: Vec<Particle>,
}

impl Blast {
    fn ignite(x: f32, y: f32, kind: BlastKind, rng: &mut FxRng) -> Self {
        let (lo, hi) = kind.count_range();
        let count = lo + (rng.next_f32() * (hi - lo) as f32) as u32;
        let particles = (0..count)
            .map(|_| Particle::launch(x, y, kind, rng))
            .collect();
        Self {
            x,
            y,
            kind,
            age: 0.0,
            particles,
        }
    }
}

pub struct ParticleExplosion {
    blasts: Vec<Blast>,
    rng: FxRng,
    last_spawn_ms: Option<u64>,
}

impl ParticleExplosion {
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Deterministic constructor for tests and reproducible runs.
    #[must_use]
    pub fn with_seed(seed: u32) -> Self {
        Self {
            blasts: Vec::new(),
            rng: FxRng::new(seed),
            last_spawn_ms: None,
        }
    }

    fn maybe_spawn(&mut self, ctx: &FxContext, width: u16, height: u16) {
        let due = match self.last_spawn_ms {
            None => true,
            Some(last) => {
                let gate =
                    (SPAWN_BASE_MS + self.rng.next_f32() * SPAWN_JITTER_MS) / ctx.speed.get();
                ctx.now_ms.saturating_sub(last) as f32 > gate
            }
        };
        if !due {
            return;
        }
        let x = self.rng.next_f32() * f32::from(width);
        let y = self.rng.next_f32() * f32::from(height);
        let kind = BlastKind::ALL[(self.rng.next_f32() * BlastKind::ALL.len() as f32) as usize];
        let blast = Blast::ignite(x, y, kind, &mut self.rng);
        self.blasts.push(blast);
        self.last_spawn_ms = Some(ctx.now_ms);
    }
}

impl Default for ParticleExplosion {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenFx for ParticleExplosion {
    fn name(&self) -> &'static str {
        "particle-explosion"
    }

    fn tick(&mut self, ctx: &FxContext, px: &mut Pixmap) {
        if px.is_empty() {
            return;
        }
        self.maybe_spawn(ctx, px.width(), px.height());
        px.fade(TRAIL_FADE);

        // Spiral orbits grow without bound; particles drifting more than one
        // raster span outside the surface keep aging but are not painted.
        let span_x = f32::from(px.width()).max(1.0);
        let span_y = f32::from(px.height()).max(1.0);
        let in_reach = |x: f32, y: f32| {
            x >= -span_x && x <= 2.0 * span_x && y >= -span_y && y <= 2.0 * span_y
        };

        let speed = ctx.speed.get();
        let rng = &mut self.rng;
        for blast in &mut self.blasts {
            blast.age += speed;
            let origin = (blast.x, blast.y);
            let kind = blast.kind;
            blast.particles.retain_mut(|p| {
                if !p.advance(origin, kind, speed) {
                    return false;
                }
                if in_reach(p.x, p.y) {
                    p.draw(px, rng);
                }
                true
            });
        }
        self.blasts.retain(|b| !b.particles.is_empty());
    }
}
