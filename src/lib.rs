//! Seasonal page backgrounds: picks an image by calendar month and viewport
//! width, applies it to the page root and keeps it current across resizes and
//! day boundaries.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

pub mod applicator;
pub mod browser;
pub mod components;
pub mod config;
pub mod env;
pub mod filename;
pub mod hooks;
pub mod logger;
pub mod preload;
pub mod scheduler;
pub mod screen;
pub mod season;
#[cfg(test)]
pub(crate) mod testing;

pub use applicator::{Applicator, Selection};
pub use config::{ImageConfig, DEFAULT_CONFIG};
pub use env::{Environment, Subscription};
pub use scheduler::{BackgroundHandle, SeasonalBackground};
pub use screen::ScreenClass;
pub use season::SeasonSlot;

#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundError {
    /// The page has no root element to carry the background.
    MissingRootElement,
    /// A slot resolved from the calendar has no configured image.
    MissingSlot(SeasonSlot),
    InvalidConfig(String),
    /// The browser rejected a style write.
    Style { property: String, detail: String },
}

impl fmt::Display for BackgroundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackgroundError::MissingRootElement => write!(f, "Page root element not found"),
            BackgroundError::MissingSlot(slot) => {
                write!(f, "No image configured for season slot {}", slot)
            }
            BackgroundError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            BackgroundError::Style { property, detail } => {
                write!(f, "Could not set style {}: {}", property, detail)
            }
        }
    }
}

impl std::error::Error for BackgroundError {}

impl From<BackgroundError> for JsValue {
    fn from(err: BackgroundError) -> JsValue {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// Handle returned to JavaScript by [`start_seasonal_background`].
#[wasm_bindgen]
pub struct SeasonalBackgroundHandle {
    running: Rc<RefCell<Option<BackgroundHandle>>>,
    ready: Option<Subscription>,
}

#[wasm_bindgen]
impl SeasonalBackgroundHandle {
    /// Stop listening for resizes, clear the daily refresh and cancel a start
    /// that is still waiting for the DOM.
    pub fn dispose(&mut self) {
        self.ready.take();
        if let Some(handle) = self.running.borrow_mut().take() {
            handle.dispose();
        }
    }
}

/// Start the seasonal background on the current page.
///
/// `config` may be `undefined`/`null` for the defaults, a JSON string, or a
/// plain object with any of `basePath`, `images`, `breakpoint`, `marker`,
/// `debounceMs` and `refreshIntervalMs`. Throws when the config is invalid.
#[wasm_bindgen(js_name = startSeasonalBackground)]
pub fn start_seasonal_background(config: JsValue) -> Result<SeasonalBackgroundHandle, JsValue> {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);

    let config = ImageConfig::from_js(config)?;
    let controller = SeasonalBackground::new(config, Environment::browser())?;

    let running = Rc::new(RefCell::new(None));
    let slot = running.clone();
    let ready = browser::when_document_ready(Box::new(move || {
        *slot.borrow_mut() = Some(controller.start());
    }));

    Ok(SeasonalBackgroundHandle { running, ready })
}

/// Resolve the background for the current month and viewport without
/// changing the page. Returns `{ month, slot, screen, filename, path }`.
#[wasm_bindgen(js_name = resolveSeasonalBackground)]
pub fn resolve_seasonal_background(config: JsValue) -> Result<JsValue, JsValue> {
    let config = ImageConfig::from_js(config)?;
    let controller = SeasonalBackground::new(config, Environment::browser())?;
    let selection = controller.applicator().resolve()?;
    serde_wasm_bindgen::to_value(&selection).map_err(JsValue::from)
}
