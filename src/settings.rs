use crate::statics;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub maximized: bool,
}

/// Last opened file, window geometry and theme. Read or write failures are
/// logged and never block loading or saving a parameters file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub last_file_path: Option<PathBuf>,
    #[serde(default)]
    pub window: Option<WindowGeometry>,
    #[serde(default = "default_dark_theme")]
    pub dark_theme: bool,
}

fn default_dark_theme() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_file_path: None,
            window: None,
            dark_theme: default_dark_theme(),
        }
    }
}

impl Settings {
    /// `<config dir>/params-editor/settings.json`, or `settings.json` in the
    /// working directory when the platform has no config dir.
    pub fn default_path() -> PathBuf {
        match dirs::config_dir() {
            Some(dir) => dir
                .join(statics::SETTINGS_DIR_NAME)
                .join(statics::SETTINGS_FILE_NAME),
            None => PathBuf::from(statics::SETTINGS_FILE_NAME),
        }
    }

    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("reading {path:?}"))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {path:?}"))
    }

    pub fn write(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| format!("creating {parent:?}"))?;
        }
        let text = serde_json::to_string_pretty(self).context("encoding settings")?;
        fs::write(path, text).with_context(|| format!("writing {path:?}"))
    }

    /// Read settings, falling back to defaults when the file is missing or bad.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::read(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("ignoring settings: {e:#}");
                Self::default()
            }
        }
    }

    pub fn store(&self, path: &Path) {
        if let Err(e) = self.write(path) {
            log::warn!("failed to save settings: {e:#}");
        }
    }

    /// The last opened file if it still exists. A stale path is cleared.
    pub fn take_existing_last_file(&mut self) -> Option<PathBuf> {
        let path = self.last_file_path.clone()?;
        if path.exists() {
            Some(path)
        } else {
            log::info!("last file {} no longer exists", path.display());
            self.last_file_path = None;
            None
        }
    }

    /// Directory to start file dialogs in.
    pub fn dialog_dir(&self) -> Option<PathBuf> {
        self.last_file_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .or_else(dirs::home_dir)
    }
}
