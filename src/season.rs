//! Calendar month to season slot mapping.

use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One of the five calendar buckets that pick a background image.
///
/// Slots are numbered 1 to 5: Jan-Feb, Mar-May, Jun-Aug, Sep-Nov and Dec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct SeasonSlot(u8);

impl SeasonSlot {
    pub const FIRST: u8 = 1;
    pub const LAST: u8 = 5;

    pub fn new(id: u8) -> Option<Self> {
        (Self::FIRST..=Self::LAST).contains(&id).then_some(SeasonSlot(id))
    }

    pub fn id(self) -> u8 {
        self.0
    }

    /// All slots in ascending order.
    pub fn all() -> impl Iterator<Item = SeasonSlot> {
        (Self::FIRST..=Self::LAST).map(SeasonSlot)
    }

    /// Resolve the slot for a 1-based month. Day and year play no part.
    ///
    /// A month outside 1..=12 can only come from a broken clock source; it
    /// falls back to slot 1.
    pub fn for_month(month: u32) -> Self {
        match month {
            1..=2 => SeasonSlot(1),
            3..=5 => SeasonSlot(2),
            6..=8 => SeasonSlot(3),
            9..=11 => SeasonSlot(4),
            12 => SeasonSlot(5),
            _ => {
                warn!("Month {} is outside 1-12, falling back to slot 1", month);
                SeasonSlot(1)
            }
        }
    }
}

impl fmt::Display for SeasonSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<SeasonSlot> for u8 {
    fn from(slot: SeasonSlot) -> u8 {
        slot.0
    }
}

// Map keys arrive as strings from both JSON and JS objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum SlotKey {
    Id(u8),
    Text(String),
}

impl SlotKey {
    fn into_slot(self) -> Result<SeasonSlot, String> {
        let id = match self {
            SlotKey::Id(id) => id,
            SlotKey::Text(text) => text
                .trim()
                .parse::<u8>()
                .map_err(|_| format!("slot key {:?} is not a number", text))?,
        };
        SeasonSlot::new(id).ok_or_else(|| {
            format!(
                "slot {} is out of range ({}-{})",
                id,
                SeasonSlot::FIRST,
                SeasonSlot::LAST
            )
        })
    }
}

impl<'de> Deserialize<'de> for SeasonSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        SlotKey::deserialize(deserializer)?
            .into_slot()
            .map_err(serde::de::Error::custom)
    }
}
