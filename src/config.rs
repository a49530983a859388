//! Persisted view settings (lives in the OS config directory).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::engine::Overscan;
use crate::error::ConfigError;
use crate::model::{GroupBy, Padding, ZoomLevel};

const SETTINGS_FILE: &str = "settings.json";
/// Ten years either side; far larger values overflow date arithmetic.
const MAX_PADDING_DAYS: i64 = 3650;
const MAX_OVERSCAN: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    pub zoom: ZoomLevel,
    pub group_by: GroupBy,
    pub padding: Padding,
    pub overscan: Overscan,
    pub row_height: f32,
    /// Draw undated items as a warning bar instead of hiding them.
    pub highlight_missing_dates: bool,
    /// Show per-resource double-booking badges.
    pub show_conflicts: bool,
    /// Frames the demo store waits before applying a commit.
    pub commit_latency_frames: u32,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            zoom: ZoomLevel::Week,
            group_by: GroupBy::Group,
            padding: Padding::default(),
            overscan: Overscan::default(),
            row_height: 36.0,
            highlight_missing_dates: true,
            show_conflicts: true,
            commit_latency_frames: 0,
        }
    }
}

impl PlannerSettings {
    /// `<config dir>/settings.json` for this application.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        directories::ProjectDirs::from("", "", "PlannerTimeline")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
            .ok_or(ConfigError::NoConfigDir)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings: Self = serde_json::from_str(&json)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Load from `path`, falling back to defaults when it is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(ConfigError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                debug!(path = %path.display(), "no settings file yet");
                Self::default()
            }
            Err(e) => {
                warn!(error = %e, "using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Clamp values a hand-edited file could get wrong.
    fn sanitize(&mut self) {
        if !(self.row_height >= 16.0) {
            self.row_height = Self::default().row_height;
        }
        self.padding.left_days = self.padding.left_days.clamp(0, MAX_PADDING_DAYS);
        self.padding.right_days = self.padding.right_days.clamp(0, MAX_PADDING_DAYS);
        self.overscan.rows = self.overscan.rows.min(MAX_OVERSCAN);
        self.overscan.days = self.overscan.days.min(MAX_OVERSCAN);
    }
}
