#![forbid(unsafe_code)]

use aglow_core::{Pixmap, Speed};
use aglow_fx::{
    DigitalClock, FxContext, MatrixRain, ParticleExplosion, ScreenFx, Starfield, WaveInterference,
};
use criterion::{criterion_group, criterion_main, Criterion};
use time::OffsetDateTime;

fn tick_loop(fx: &mut dyn ScreenFx, px: &mut Pixmap, frame: &mut u64) {
    let ctx = FxContext {
        frame: *frame,
        now_ms: *frame * 16,
        speed: Speed::default(),
        wall: OffsetDateTime::UNIX_EPOCH,
    };
    fx.tick(&ctx, px);
    *frame += 1;
}

fn bench_effect_ticks(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick_160x96");

    let cases: Vec<(&str, Box<dyn ScreenFx>)> = vec![
        ("starfield", Box::new(Starfield::with_seed(1))),
        ("matrix_rain", Box::new(MatrixRain::with_seed(160, 96, 1))),
        ("wave_interference", Box::new(WaveInterference::new(160, 96))),
        ("particle_explosion", Box::new(ParticleExplosion::with_seed(1))),
        ("digital_clock", Box::new(DigitalClock::new())),
    ];

    for (name, mut fx) in cases {
        let mut px = Pixmap::new(160, 96);
        let mut frame = 0;
        group.bench_function(name, |b| {
            b.iter(|| tick_loop(fx.as_mut(), &mut px, &mut frame));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_effect_ticks);
criterion_main!(benches);
