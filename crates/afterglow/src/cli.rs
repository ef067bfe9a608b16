#![forbid(unsafe_code)]

//! Command-line argument parsing.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via the `AFTERGLOW_*` prefix;
//! explicit flags win over the environment.

use std::env;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
afterglow — a truecolor terminal screensaver

USAGE:
    afterglow [OPTIONS]

OPTIONS:
    --fx=N|NAME          Starting effect, 1-indexed or by name (default: 1)
    --speed=F            Speed multiplier, clamped to 0.1..3.0 (default: 1.0)
    --dial=F             Speed as a dial fraction 0..1 (overrides --speed)
    --auto               Rotate effects automatically
    --interval-ms=N      Auto-rotation period in milliseconds (default: 30000)
    --fps=N              Target frame rate, 1..240 (default: 60)
    --log-file=PATH      Append tracing output to PATH
    --exit-after-ms=N    Quit after N milliseconds (for testing)
    --help, -h           Show this help message
    --version, -V        Show version

EFFECTS:
    1  starfield            Depth-flying star streaks
    2  matrix-rain          Falling glyph columns
    3  wave-interference    Overlapping circular wavefronts
    4  particle-explosion   Interval-spawned particle blasts
    5  digital-clock        Time and date

KEYBINDINGS:
    1-5             Switch effect directly
    Tab / n / Right Next effect
    Shift-Tab / p / Left Previous effect
    + / = / Up      Faster
    - / Down        Slower
    a               Toggle auto-rotation
    q / Esc / Ctrl+C Quit

ENVIRONMENT VARIABLES:
    AFTERGLOW_FX              Override --fx
    AFTERGLOW_SPEED           Override --speed
    AFTERGLOW_AUTO            Enable auto-rotation (1/true)
    AFTERGLOW_INTERVAL_MS     Override --interval-ms
    AFTERGLOW_FPS             Override --fps
    AFTERGLOW_LOG_FILE        Override --log-file
    AFTERGLOW_LOG             Tracing filter for the log file
    AFTERGLOW_EXIT_AFTER_MS   Auto-quit after N milliseconds (for testing)";

/// Parsed command-line options.
pub struct Opts {
    /// Starting effect: a 1-indexed number or a name.
    pub fx: String,
    /// Speed multiplier, clamped later.
    pub speed: f32,
    /// Dial fraction in 0..1; takes precedence over `speed` when set.
    pub dial: Option<f32>,
    /// Whether auto-rotation starts enabled.
    pub auto: bool,
    /// Auto-rotation period in milliseconds.
    pub interval_ms: u64,
    /// Target frame rate.
    pub fps: u32,
    /// Tracing output file.
    pub log_file: Option<String>,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            fx: "1".into(),
            speed: 1.0,
            dial: None,
            auto: false,
            interval_ms: 30_000,
            fps: 60,
            log_file: None,
            exit_after_ms: 0,
        }
    }
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    pub fn parse() -> Self {
        let mut opts = Self::default();

        // Environment variable defaults first
        if let Ok(val) = env::var("AFTERGLOW_FX") {
            opts.fx = val;
        }
        if let Ok(val) = env::var("AFTERGLOW_SPEED")
            && let Ok(n) = val.parse()
        {
            opts.speed = n;
        }
        if let Ok(val) = env::var("AFTERGLOW_AUTO") {
            opts.auto = matches!(val.as_str(), "1" | "true" | "yes" | "on");
        }
        if let Ok(val) = env::var("AFTERGLOW_INTERVAL_MS")
            && let Ok(n) = val.parse()
        {
            opts.interval_ms = n;
        }
        if let Ok(val) = env::var("AFTERGLOW_FPS")
            && let Ok(n) = val.parse()
        {
            opts.fps = n;
        }
        if let Ok(val) = env::var("AFTERGLOW_LOG_FILE") {
            opts.log_file = Some(val);
        }
        if let Ok(val) = env::var("AFTERGLOW_EXIT_AFTER_MS")
            && let Ok(n) = val.parse()
        {
            opts.exit_after_ms = n;
        }

        // Command-line args override env vars
        let args: Vec<String> = env::args().skip(1).collect();
        let mut i = 0;
        while i < args.len() {
            let arg = &args[i];
            match arg.as_str() {
                "--help" | "-h" => {
                    println!("{HELP_TEXT}");
                    process::exit(0);
                }
                "--version" | "-V" => {
                    println!("afterglow {VERSION}");
                    process::exit(0);
                }
                "--auto" => {
                    opts.auto = true;
                }
                other => {
                    if let Some(val) = other.strip_prefix("--fx=") {
                        opts.fx = val.to_string();
                    } else if let Some(val) = other.strip_prefix("--speed=") {
                        match val.parse() {
                            Ok(n) => opts.speed = n,
                            Err(_) => {
                                eprintln!("Invalid --speed value: {val}");
                                process::exit(1);
                            }
                        }
                    } else if let Some(val) = other.strip_prefix("--dial=") {
                        match val.parse() {
                            Ok(n) => opts.dial = Some(n),
                            Err(_) => {
                                eprintln!("Invalid --dial value: {val}");
                                process::exit(1);
                            }
                        }
                    } else if let Some(val) = other.strip_prefix("--interval-ms=") {
                        match val.parse() {
                            Ok(n) => opts.interval_ms = n,
                            Err(_) => {
                                eprintln!("Invalid --interval-ms value: {val}");
                                process::exit(1);
                            }
                        }
                    } else if let Some(val) = other.strip_prefix("--fps=") {
                        match val.parse() {
                            Ok(n) => opts.fps = n,
                            Err(_) => {
                                eprintln!("Invalid --fps value: {val}");
                                process::exit(1);
                            }
                        }
                    } else if let Some(val) = other.strip_prefix("--log-file=") {
                        opts.log_file = Some(val.to_string());
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        match val.parse() {
                            Ok(n) => opts.exit_after_ms = n,
                            Err(_) => {
                                eprintln!("Invalid --exit-after-ms value: {val}");
                                process::exit(1);
                            }
                        }
                    } else {
                        eprintln!("Unknown argument: {other}");
                        eprintln!("Run with --help for usage information.");
                        process::exit(1);
                    }
                }
            }
            i += 1;
        }

        opts.fps = opts.fps.clamp(1, 240);
        opts
    }
}
