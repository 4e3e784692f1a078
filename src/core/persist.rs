//! Settings and theme persistence under `~/.mnemo/`.
//!
//! Two independent entries, mirroring the two things a session needs back
//! after a restart: `theme` (the raw string "light" or "dark") and
//! `settings.json` (the full settings object). Writes happen synchronously
//! on every change and go through an atomic `.tmp` + rename.
//!
//! All functions take the storage directory explicitly so tests can point
//! them at a scratch dir; [`data_dir`] resolves the real location.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use super::settings::{Settings, Theme};

const SETTINGS_FILE: &str = "settings.json";
const THEME_FILE: &str = "theme";

#[derive(Debug)]
pub enum PersistError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistError::Io(e) => write!(f, "settings I/O error: {e}"),
            PersistError::Parse(e) => write!(f, "settings parse error: {e}"),
        }
    }
}

impl std::error::Error for PersistError {}

/// Returns `~/.mnemo/`, creating it if needed.
pub fn data_dir() -> io::Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?;
    let dir = home.join(".mnemo");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Atomically write `contents` to `path` (via `.tmp` + rename).
fn atomic_write(path: &Path, contents: &str) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, contents)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Load settings from `dir`. Absence yields the defaults; a malformed blob
/// is a parse error for the caller to handle.
pub fn load_settings(dir: &Path) -> Result<Settings, PersistError> {
    let path = dir.join(SETTINGS_FILE);
    if !path.exists() {
        return Ok(Settings::default());
    }
    let json = fs::read_to_string(&path).map_err(PersistError::Io)?;
    let settings = serde_json::from_str(&json).map_err(PersistError::Parse)?;
    debug!("Loaded settings from {}", path.display());
    Ok(settings)
}

/// Write the full settings object to `dir`.
pub fn save_settings(dir: &Path, settings: &Settings) -> Result<(), PersistError> {
    let json = serde_json::to_string_pretty(settings).map_err(PersistError::Parse)?;
    atomic_write(&dir.join(SETTINGS_FILE), &json).map_err(PersistError::Io)
}

/// Load the theme preference from `dir`; absence or junk yields light.
pub fn load_theme(dir: &Path) -> Theme {
    let path = dir.join(THEME_FILE);
    match fs::read_to_string(&path) {
        Ok(raw) => Theme::parse(&raw),
        Err(_) => Theme::default(),
    }
}

/// Write the theme preference to `dir` as a raw string.
pub fn save_theme(dir: &Path, theme: Theme) -> Result<(), PersistError> {
    atomic_write(&dir.join(THEME_FILE), theme.as_str()).map_err(PersistError::Io)
}
