#![forbid(unsafe_code)]

//! The frame loop: poll input until the frame deadline, tick, present.

use std::io;
use std::time::{Duration, Instant};

use aglow_core::{Pixmap, Speed};
use aglow_fx::FxContext;
use crossterm::event::{self, Event, KeyEventKind};
use time::{OffsetDateTime, UtcOffset};
use tracing::{info, warn};

use crate::app::{App, AppConfig, Flow, FxId};
use crate::cli::Opts;
use crate::term::Session;

/// Run the screensaver until a quit key or the configured auto-exit.
pub fn run(opts: &Opts) -> io::Result<()> {
    let mut session = Session::enter()?;
    let (cols, rows) = Session::cell_size()?;
    let raster_h = rows.saturating_mul(2);
    let mut px = Pixmap::new(cols, raster_h);

    // Resolved once; current_local_offset is unreliable after spawning
    // threads, and the subscriber may start some.
    let offset = match UtcOffset::current_local_offset() {
        Ok(o) => o,
        Err(e) => {
            warn!("local timezone unavailable, falling back to UTC: {e}");
            UtcOffset::UTC
        }
    };

    let start = FxId::from_arg(&opts.fx).unwrap_or(FxId::Starfield);
    let speed = match opts.dial {
        Some(f) => Speed::from_dial_fraction(f),
        None => Speed::new(opts.speed),
    };
    let mut app = App::new(
        AppConfig {
            start,
            speed,
            auto_rotate: opts.auto,
            rotate_every_ms: opts.interval_ms,
            seed: seed_from_clock(),
        },
        cols,
        raster_h,
    );
    info!(
        cols,
        rows,
        fps = opts.fps,
        effect = start.title(),
        "session started"
    );

    let budget = frame_budget(opts.fps);
    let epoch = Instant::now();
    let mut next_frame = epoch + budget;
    let mut frame: u64 = 0;

    loop {
        // Drain input until the frame deadline passes.
        loop {
            let wait = next_frame.saturating_duration_since(Instant::now());
            if !event::poll(wait)? {
                break;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let now_ms = epoch.elapsed().as_millis() as u64;
                    if app.on_key(key, now_ms) == Flow::Quit {
                        info!("quit requested");
                        return Ok(());
                    }
                }
                Event::Resize(w, h) => {
                    let raster_h = h.saturating_mul(2);
                    px.resize(w, raster_h);
                    app.on_resize(w, raster_h);
                    info!(cols = w, rows = h, "terminal resized");
                }
                _ => {}
            }
            if Instant::now() >= next_frame {
                break;
            }
        }

        let now_ms = epoch.elapsed().as_millis() as u64;
        if opts.exit_after_ms > 0 && now_ms >= opts.exit_after_ms {
            info!("auto-exit deadline reached");
            return Ok(());
        }

        let ctx = FxContext {
            frame,
            now_ms,
            speed: app.speed(),
            wall: OffsetDateTime::now_utc().to_offset(offset),
        };
        app.frame(&ctx, &mut px);
        session.present(&px)?;
        frame += 1;

        // Fixed cadence; resync instead of bursting after a stall.
        next_frame += budget;
        let now = Instant::now();
        if next_frame < now {
            next_frame = now + budget;
        }
    }
}

fn frame_budget(fps: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(fps.max(1)))
}

/// Seeds the session from the wall clock. Always odd, never zero.
fn seed_from_clock() -> u32 {
    let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos() as u128;
    (nanos ^ (nanos >> 32) ^ (nanos >> 64)) as u32 | 1
}
