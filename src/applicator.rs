//! Resolves the current selection and writes it to the page root's style.

use crate::config::ImageConfig;
use crate::env::{BackgroundTarget, ClockSource, Environment, ViewportSource};
use crate::filename::{asset_path, derive_filename};
use crate::screen::ScreenClass;
use crate::season::SeasonSlot;
use crate::BackgroundError;
use log::{info, warn};
use serde::Serialize;
use std::rc::Rc;

/// Smooth swap between images.
pub const TRANSITION: &str = "background-image 0.5s ease-in-out";

/// Everything one resolution decided.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub month: u32,
    pub slot: SeasonSlot,
    pub screen: ScreenClass,
    pub filename: String,
    pub path: String,
}

/// The inline style declarations that show `selection` as the page background.
pub fn background_style(selection: &Selection) -> [(&'static str, String); 6] {
    [
        ("background-image", format!("url('{}')", selection.path)),
        ("background-size", "cover".to_string()),
        ("background-repeat", "no-repeat".to_string()),
        ("background-attachment", "fixed".to_string()),
        (
            "background-position",
            selection.screen.background_position().to_string(),
        ),
        ("transition", TRANSITION.to_string()),
    ]
}

pub struct Applicator {
    config: Rc<ImageConfig>,
    clock: Rc<dyn ClockSource>,
    viewport: Rc<dyn ViewportSource>,
    target: Rc<dyn BackgroundTarget>,
}

impl Applicator {
    pub fn new(config: Rc<ImageConfig>, env: &Environment) -> Self {
        Self {
            config,
            clock: env.clock.clone(),
            viewport: env.viewport.clone(),
            target: env.target.clone(),
        }
    }

    /// Work out which image belongs on the page right now without touching it.
    pub fn resolve(&self) -> Result<Selection, BackgroundError> {
        let month = self.clock.current_month();
        let slot = SeasonSlot::for_month(month);
        let screen = ScreenClass::classify(self.viewport.viewport_width(), self.config.breakpoint);
        let filename = derive_filename(&self.config, slot, screen)?;
        let path = asset_path(&self.config, &filename);

        Ok(Selection {
            month,
            slot,
            screen,
            filename,
            path,
        })
    }

    /// Resolve and write the background. Leaves the page alone when the root
    /// element is missing; when a write is rejected, the declarations already
    /// written are put back to what they were.
    pub fn apply(&self) -> Result<Selection, BackgroundError> {
        let selection = self.resolve()?;
        let root = self
            .target
            .root()
            .ok_or(BackgroundError::MissingRootElement)?;

        let mut written: Vec<(&str, String)> = Vec::new();
        for (property, value) in background_style(&selection) {
            let previous = root.style_value(property);
            if let Err(e) = root.set_style(property, &value) {
                for (property, previous) in written.iter().rev() {
                    if let Err(undo) = root.set_style(property, previous) {
                        warn!("Could not restore {}: {}", property, undo);
                    }
                }
                return Err(e);
            }
            written.push((property, previous));
        }

        info!(
            "Seasonal background applied: month {} -> image {}, screen: {}, file: {}",
            selection.month, selection.slot, selection.screen, selection.filename
        );
        Ok(selection)
    }
}
