//! Hand finished artifacts to the desktop's default viewer.

use std::path::Path;
use std::process::Command;

use log::{info, warn};

use crate::errors::ExportError;

/// The platform command that opens a file with its default application.
fn opener(path: &Path) -> Command {
    if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]).arg(path);
        command
    } else if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg(path);
        command
    } else {
        let mut command = Command::new("xdg-open");
        command.arg(path);
        command
    }
}

/// Open `path` in the default viewer and wait for the opener to return.
///
/// # Errors
///
/// Returns [`ExportError::Viewer`] when the opener cannot be started or
/// reports failure.
pub fn open_in_viewer(path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    info!("opening {}", path.display());
    let status = opener(path).status().map_err(|error| ExportError::Viewer {
        path: path.to_path_buf(),
        reason: error.to_string(),
    })?;
    if status.success() {
        Ok(())
    } else {
        Err(ExportError::Viewer {
            path: path.to_path_buf(),
            reason: format!("viewer exited with {status}"),
        })
    }
}

/// Open `path` in the default viewer, logging a failure at `warn` instead of
/// returning it.
///
/// Returns whether the viewer opened.
pub fn open_or_warn(path: impl AsRef<Path>) -> bool {
    match open_in_viewer(path) {
        Ok(()) => true,
        Err(error) => {
            warn!("{error}");
            false
        }
    }
}
