use crate::errors::EditorError;
use crate::interactive::DEFAULT_DRAG_TIMEOUT;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "folio.config.json";

/// Editor configuration file format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Maximum undo levels kept per document (0 = unlimited)
    #[serde(default)]
    pub history_limit: usize,

    /// Pointer silence after which an unfinished drag is force-ended
    #[serde(default = "default_drag_timeout_ms")]
    pub drag_timeout_ms: u64,

    /// Load unparseable content as plain text instead of failing
    #[serde(default = "default_plain_text_fallback")]
    pub plain_text_fallback: bool,
}

fn default_drag_timeout_ms() -> u64 {
    DEFAULT_DRAG_TIMEOUT.as_millis() as u64
}

fn default_plain_text_fallback() -> bool {
    true
}

impl EditorConfig {
    /// Load `folio.config.json` from a directory, or defaults if there is none
    pub fn load(dir: &Path) -> Result<Self, EditorError> {
        let config_path = dir.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            Self::from_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, EditorError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        serde_json::from_str(json).map_err(|e| EditorError::Config(e.to_string()))
    }

    pub fn drag_timeout(&self) -> Duration {
        Duration::from_millis(self.drag_timeout_ms)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: 0,
            drag_timeout_ms: default_drag_timeout_ms(),
            plain_text_fallback: default_plain_text_fallback(),
        }
    }
}
