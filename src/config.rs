//! Application-level configuration constants and the injectable image table.

use crate::season::SeasonSlot;
use crate::BackgroundError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wasm_bindgen::JsValue;

// Asset layout
pub const BASE_PATH: &str = "./assets/img/";
pub const NARROW_MARKER: char = 'V';

/// Base filenames per slot: Jan-Feb, Mar-May, Jun-Aug, Sep-Nov, Dec.
pub const DEFAULT_IMAGES: [(u8, &str); 5] = [
    (1, "SprFes.jpg"),
    (2, "Spring.jpg"),
    (3, "Summer.jpg"),
    (4, "Sunset.jpg"),
    (5, "Xmas.jpg"),
];

// Layout
pub const BREAKPOINT_PX: f64 = 767.98;

// Timing
pub const DEBOUNCE_MS: u32 = 250;
pub const REFRESH_INTERVAL_MS: u32 = 24 * 60 * 60 * 1000;

/// Process-wide default configuration.
pub static DEFAULT_CONFIG: Lazy<ImageConfig> = Lazy::new(ImageConfig::default);

/// Everything a controller needs to know about its assets and timings.
///
/// Deserializes from camelCase keys; any field left out keeps its default, so
/// `{"basePath": "/img/"}` is a complete config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageConfig {
    pub base_path: String,
    pub images: BTreeMap<SeasonSlot, String>,
    pub breakpoint: f64,
    pub marker: char,
    pub debounce_ms: u32,
    pub refresh_interval_ms: u32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            base_path: BASE_PATH.to_string(),
            images: DEFAULT_IMAGES
                .iter()
                .filter_map(|&(id, name)| SeasonSlot::new(id).map(|slot| (slot, name.to_string())))
                .collect(),
            breakpoint: BREAKPOINT_PX,
            marker: NARROW_MARKER,
            debounce_ms: DEBOUNCE_MS,
            refresh_interval_ms: REFRESH_INTERVAL_MS,
        }
    }
}

impl ImageConfig {
    /// Parse a JSON document and validate the result.
    pub fn from_json(json: &str) -> Result<Self, BackgroundError> {
        let config: ImageConfig = serde_json::from_str(json)
            .map_err(|e| BackgroundError::InvalidConfig(format!("malformed JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Build a config from whatever a JS caller handed over: nothing, a JSON
    /// string, or a plain object.
    pub fn from_js(value: JsValue) -> Result<Self, BackgroundError> {
        if value.is_undefined() || value.is_null() {
            return Ok(DEFAULT_CONFIG.clone());
        }
        if let Some(json) = value.as_string() {
            return Self::from_json(&json);
        }
        let config: ImageConfig = serde_wasm_bindgen::from_value(value)
            .map_err(|e| BackgroundError::InvalidConfig(format!("unreadable config object: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every slot has a usable filename and that the layout and
    /// timing values make sense.
    pub fn validate(&self) -> Result<(), BackgroundError> {
        for slot in SeasonSlot::all() {
            match self.images.get(&slot) {
                None => {
                    return Err(BackgroundError::InvalidConfig(format!(
                        "no image configured for slot {}",
                        slot
                    )))
                }
                Some(name) if name.trim().is_empty() => {
                    return Err(BackgroundError::InvalidConfig(format!(
                        "empty filename for slot {}",
                        slot
                    )))
                }
                Some(_) => {}
            }
        }
        if !(self.breakpoint.is_finite() && self.breakpoint > 0.0) {
            return Err(BackgroundError::InvalidConfig(format!(
                "breakpoint must be a positive width, got {}",
                self.breakpoint
            )));
        }
        if self.debounce_ms == 0 {
            return Err(BackgroundError::InvalidConfig(
                "debounce delay must be at least 1 ms".to_string(),
            ));
        }
        if self.refresh_interval_ms == 0 {
            return Err(BackgroundError::InvalidConfig(
                "refresh interval must be at least 1 ms".to_string(),
            ));
        }
        Ok(())
    }

    /// Base filename configured for `slot`, if any.
    pub fn image_for(&self, slot: SeasonSlot) -> Option<&str> {
        self.images.get(&slot).map(String::as_str)
    }
}
