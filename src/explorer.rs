//! Open paths in the platform file manager.
//!
//! [`reveal`] hands a path to the desktop environment: directories open
//! directly, files open their containing folder (selecting the file where
//! the platform supports it — Finder's `-R`, Explorer's `/select,`). The
//! spawned opener is not waited on; this is fire-and-forget UI glue, and the
//! only errors surfaced are "path missing" and "nothing could be launched".
//!
//! On Linux there is no single blessed opener, so a short list of common
//! file managers is tried in order, starting with `xdg-open`.

use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("path does not exist: {0}")]
    NotFound(PathBuf),
    #[error("no usable file manager found (tried: {tried})")]
    NoFileManager { tried: String },
    #[error("failed to launch {command}: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Openers tried in order on Linux and other unixes.
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const FILE_MANAGERS: &[&str] = &["xdg-open", "nautilus", "dolphin", "thunar", "pcmanfm"];

/// Show `path` in the file manager.
///
/// Files are revealed inside their parent directory; directories open
/// directly. The path must exist — nothing is spawned otherwise.
pub fn reveal(path: &Path) -> Result<(), ExplorerError> {
    if !path.exists() {
        return Err(ExplorerError::NotFound(path.to_path_buf()));
    }
    if path.is_file() {
        reveal_file(path)
    } else {
        open_directory(path)
    }
}

fn spawn(command: &str, args: &[&std::ffi::OsStr]) -> Result<(), ExplorerError> {
    Command::new(command)
        .args(args)
        .spawn()
        .map(drop)
        .map_err(|source| ExplorerError::Launch {
            command: command.to_string(),
            source,
        })
}

#[cfg(target_os = "macos")]
fn open_directory(path: &Path) -> Result<(), ExplorerError> {
    spawn("open", &[path.as_os_str()])
}

#[cfg(target_os = "macos")]
fn reveal_file(path: &Path) -> Result<(), ExplorerError> {
    spawn("open", &["-R".as_ref(), path.as_os_str()])
}

#[cfg(target_os = "windows")]
fn open_directory(path: &Path) -> Result<(), ExplorerError> {
    spawn("explorer", &[path.as_os_str()])
}

#[cfg(target_os = "windows")]
fn reveal_file(path: &Path) -> Result<(), ExplorerError> {
    let select = format!("/select,{}", path.display());
    spawn("explorer", &[select.as_ref()])
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn open_directory(path: &Path) -> Result<(), ExplorerError> {
    for manager in FILE_MANAGERS {
        if spawn(manager, &[path.as_os_str()]).is_ok() {
            return Ok(());
        }
    }
    Err(ExplorerError::NoFileManager {
        tried: FILE_MANAGERS.join(", "),
    })
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn reveal_file(path: &Path) -> Result<(), ExplorerError> {
    // No portable "select this file" flag; opening the parent is the
    // closest equivalent.
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    open_directory(parent)
}
