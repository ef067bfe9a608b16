#![forbid(unsafe_code)]

//! Cross-effect invariants exercised through the trait object, the way the
//! shell drives the loops.

use aglow_core::{Pixmap, Rgba, Speed};
use aglow_fx::{
    DigitalClock, FxContext, MatrixRain, ParticleExplosion, ScreenFx, Starfield, WaveInterference,
};
use time::OffsetDateTime;

fn all_effects(width: u16, height: u16) -> Vec<Box<dyn ScreenFx>> {
    vec![
        Box::new(Starfield::with_seed(1)),
        Box::new(MatrixRain::with_seed(width, height, 1)),
        Box::new(WaveInterference::new(width, height)),
        Box::new(ParticleExplosion::with_seed(1)),
        Box::new(DigitalClock::new()),
    ]
}

fn ctx(frame: u64) -> FxContext {
    FxContext {
        frame,
        now_ms: frame * 16,
        speed: Speed::default(),
        wall: OffsetDateTime::UNIX_EPOCH,
    }
}

#[test]
fn names_are_stable_and_unique() {
    let effects = all_effects(80, 48);
    let names: Vec<&str> = effects.iter().map(|fx| fx.name()).collect();
    assert_eq!(names.len(), 5);
    for (i, name) in names.iter().enumerate() {
        assert!(!name.is_empty());
        assert!(!names[i + 1..].contains(name), "duplicate name {name}");
    }
}

#[test]
fn every_effect_survives_a_long_run_and_paints() {
    for mut fx in all_effects(80, 48) {
        let mut px = Pixmap::new(80, 48);
        let mut painted = false;
        for frame in 0..240 {
            fx.tick(&ctx(frame), &mut px);
            painted |= px.pixels().iter().any(|&p| p != Rgba::BLACK);
        }
        assert!(painted, "{} never painted", fx.name());
    }
}

#[test]
fn explosions_survive_thousands_of_frames_across_seeds() {
    // Long enough for dozens of ignitions and for runaway spiral orbits to
    // fly far beyond the raster before their particles expire.
    for seed in [1, 7, 42, 99, 12345, 0xDEAD_BEEF] {
        let mut fx = ParticleExplosion::with_seed(seed);
        let mut px = Pixmap::new(80, 48);
        for frame in 0..2500 {
            fx.tick(&ctx(frame), &mut px);
        }
    }
}

#[test]
fn every_effect_survives_resize_mid_run() {
    for mut fx in all_effects(64, 40) {
        let mut px = Pixmap::new(64, 40);
        for frame in 0..30 {
            fx.tick(&ctx(frame), &mut px);
        }
        px.resize(120, 66);
        fx.resize(120, 66);
        for frame in 30..60 {
            fx.tick(&ctx(frame), &mut px);
        }
        px.resize(0, 0);
        fx.resize(0, 0);
        for frame in 60..70 {
            fx.tick(&ctx(frame), &mut px);
        }
    }
}

#[test]
fn resize_clears_the_surface() {
    let mut fx = WaveInterference::new(40, 30);
    let mut px = Pixmap::new(40, 30);
    fx.tick(&ctx(0), &mut px);
    assert!(px.pixels().iter().any(|&p| p != Rgba::BLACK));
    px.resize(60, 44);
    assert!(px.pixels().iter().all(|&p| p == Rgba::BLACK));
}

#[test]
fn seeded_effects_reproduce_pixel_streams() {
    let make = |seed: u32| -> Vec<Box<dyn ScreenFx>> {
        vec![
            Box::new(Starfield::with_seed(seed)),
            Box::new(MatrixRain::with_seed(64, 40, seed)),
            Box::new(ParticleExplosion::with_seed(seed)),
        ]
    };
    let mut first = make(99);
    let mut second = make(99);
    for (a, b) in first.iter_mut().zip(second.iter_mut()) {
        let mut pa = Pixmap::new(64, 40);
        let mut pb = Pixmap::new(64, 40);
        for frame in 0..90 {
            a.tick(&ctx(frame), &mut pa);
            b.tick(&ctx(frame), &mut pb);
        }
        assert_eq!(pa.pixels(), pb.pixels(), "{} diverged", a.name());
    }
}
