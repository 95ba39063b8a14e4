//! Resolving the file named on the command line.

use log::{debug, warn};
use std::fs;
use std::path::PathBuf;

use crate::api::models::PathResolutionError;

/// Canonicalizes `arg` into an absolute path.
///
/// The path must exist. Symlinks and `..` components are resolved.
pub fn canonicalize_arg(arg: &str) -> std::result::Result<PathBuf, PathResolutionError> {
    fs::canonicalize(arg).map_err(|source| PathResolutionError {
        arg: arg.to_string(),
        source,
    })
}

/// The file to open at startup, if the first argument names one.
///
/// Absent or empty arguments give `None`. Resolution failures are logged and
/// also give `None`; they are never fatal.
pub fn resolve_command_line_file(arg: Option<&str>) -> Option<PathBuf> {
    let arg = arg.filter(|a| !a.is_empty())?;
    match canonicalize_arg(arg) {
        Ok(path) => {
            debug!("Resolved command-line file {arg:?} to {}", path.display());
            Some(path)
        }
        Err(e) => {
            warn!("{e}: {}", e.source);
            None
        }
    }
}
