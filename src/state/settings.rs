// Editor preferences and the unsaved draft, both kept in localStorage as JSON.
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::util::{load_item, remove_item, store_item};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Reopen the last edited text on startup.
    pub restore_draft: bool,
    /// Switch to the map right after a file is opened.
    pub open_map_after_load: bool,
    pub verbose_logging: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            restore_draft: true,
            open_map_after_load: false,
            verbose_logging: false,
        }
    }
}

impl Settings {
    const STORAGE_KEY: &'static str = "swr_editor_settings";

    pub fn from_json(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|e| {
            log::warn!("ignoring stored settings: {e}");
            Self::default()
        })
    }

    pub fn load() -> Self {
        load_item(Self::STORAGE_KEY)
            .map(|raw| Self::from_json(&raw))
            .unwrap_or_default()
    }

    pub fn save(&self) {
        match serde_json::to_string(self) {
            Ok(s) => store_item(Self::STORAGE_KEY, &s),
            Err(e) => log::warn!("could not encode settings: {e}"),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose_logging {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub file_name: Option<String>,
    pub text: String,
}

impl Draft {
    const STORAGE_KEY: &'static str = "swr_editor_draft";

    pub fn load() -> Option<Self> {
        let raw = load_item(Self::STORAGE_KEY)?;
        serde_json::from_str(&raw)
            .map_err(|e| log::warn!("ignoring stored draft: {e}"))
            .ok()
    }

    pub fn save(&self) {
        if let Ok(s) = serde_json::to_string(self) {
            store_item(Self::STORAGE_KEY, &s);
        }
    }

    pub fn clear() {
        remove_item(Self::STORAGE_KEY);
    }

    /// What happens to the stored draft when the editor's unsaved flag goes
    /// from `was_dirty` to `dirty`. Unsaved text is written; once it is saved
    /// or a file is opened over it, the draft is dropped.
    pub fn update(was_dirty: bool, dirty: bool) -> DraftUpdate {
        match (was_dirty, dirty) {
            (_, true) => DraftUpdate::Save,
            (true, false) => DraftUpdate::Clear,
            (false, false) => DraftUpdate::Keep,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftUpdate {
    Save,
    Clear,
    Keep,
}
