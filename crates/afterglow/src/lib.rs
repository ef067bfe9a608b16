#![forbid(unsafe_code)]

//! Shell for the afterglow terminal screensaver: CLI parsing, terminal
//! session and half-block presenter, the frame runner, and the effect
//! selector model with speed control, auto-rotation and the HUD.

pub mod app;
pub mod cli;
pub mod hud;
pub mod logging;
pub mod runner;
pub mod term;
