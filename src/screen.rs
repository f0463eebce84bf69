//! Viewport width classification.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenClass {
    Wide,
    Narrow,
}

impl ScreenClass {
    /// Strictly wider than `breakpoint` is wide; anything else, including a
    /// width equal to the breakpoint or NaN, is narrow.
    pub fn classify(width: f64, breakpoint: f64) -> Self {
        if width > breakpoint {
            ScreenClass::Wide
        } else {
            ScreenClass::Narrow
        }
    }

    /// CSS `background-position` for this class.
    pub fn background_position(self) -> &'static str {
        match self {
            ScreenClass::Wide => "center top",
            ScreenClass::Narrow => "top",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScreenClass::Wide => "wide",
            ScreenClass::Narrow => "narrow",
        }
    }
}

impl fmt::Display for ScreenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
