#![forbid(unsafe_code)]

//! Tracing setup.
//!
//! The renderer owns stdout for the whole session, so log output goes to a
//! file or nowhere. Without `--log-file` no subscriber is installed and the
//! tracing macros compile down to cheap no-ops against the default dispatcher.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Install a file-backed subscriber, or do nothing when `path` is `None`.
///
/// The `AFTERGLOW_LOG` environment variable supplies the filter directives;
/// the default keeps `info` and above.
pub fn init(path: Option<&Path>) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_env("AFTERGLOW_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_path_is_a_no_op() {
        assert!(init(None).is_ok());
    }

    #[test]
    fn unwritable_path_reports_before_installing() {
        let err = init(Some(Path::new("/nonexistent-dir-for-sure/afterglow.log")));
        assert!(err.is_err());
    }
}
