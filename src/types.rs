//! Core domain types for keypad slot configurations
//!
//! A configuration maps slot identifiers (`slot_1`, `slot_2`, ...) to the
//! icon insert and optional glow color chosen for that physical button.
//! Slot ordering is canonical everywhere: ascending by numeric suffix.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One physical button position on a keypad, identified by `slot_<n>`.
///
/// Stored as the numeric suffix so ordering and equality never depend on
/// string formatting ("slot_007" parses to the same id as "slot_7").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId(u16);

impl SlotId {
    pub const fn new(number: u16) -> Self {
        Self(number)
    }

    /// Parse `slot_<digits>` (case-insensitive prefix). Anything else is
    /// not a slot key.
    pub fn parse(value: &str) -> Option<Self> {
        let (prefix, rest) = value.split_at_checked(5)?;
        if !prefix.eq_ignore_ascii_case("slot_")
            || rest.is_empty()
            || !rest.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        rest.parse::<u16>().ok().map(Self)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot_{}", self.0)
    }
}

impl Serialize for SlotId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid slot id \"{raw}\"")))
    }
}

/// Glow ring color, normalized from `#RRGGBB` text.
///
/// Kept as raw channel bytes so re-encoding always produces the uppercase
/// canonical form regardless of how the input was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlowColor([u8; 3]);

impl GlowColor {
    /// Parse a hex color. Input is trimmed; hex digits may be any case, but
    /// the leading `#` and exactly six digits are required.
    pub fn parse(value: &str) -> Option<Self> {
        let hex = value.trim().strip_prefix('#')?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self([r, g, b]))
    }
}

impl fmt::Display for GlowColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0[0], self.0[1], self.0[2])
    }
}

impl Serialize for GlowColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GlowColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid color \"{raw}\"")))
    }
}

/// Display rotation of the unit relative to its native orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// Only the four right-angle values are meaningful; anything else is
    /// treated by callers as "no rotation".
    pub fn from_degrees(degrees: i64) -> Option<Self> {
        match degrees {
            0 => Some(Self::R0),
            90 => Some(Self::R90),
            180 => Some(Self::R180),
            270 => Some(Self::R270),
            _ => None,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Self::R0 => 0,
            Self::R90 => 90,
            Self::R180 => 180,
            Self::R270 => 270,
        }
    }

    /// True when the unit is turned onto its side (90 or 270 degrees).
    pub fn is_side(self) -> bool {
        matches!(self, Self::R90 | Self::R270)
    }
}

/// One slot's payload: the icon insert and an optional glow color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotConfig {
    pub icon_id: String,
    pub color: Option<GlowColor>,
}

/// A normalized keypad configuration.
///
/// Only populated slots are present as entries; the `BTreeMap` keeps them in
/// canonical order. `rotation` comes from the optional `_meta` record of the
/// wire format and is presentation-only state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Configuration {
    pub slots: BTreeMap<SlotId, SlotConfig>,
    pub rotation: Rotation,
}

impl Configuration {
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot ids present in this configuration, in canonical order.
    pub fn slot_ids(&self) -> Vec<SlotId> {
        self.slots.keys().copied().collect()
    }

    pub fn get(&self, slot_id: SlotId) -> Option<&SlotConfig> {
        self.slots.get(&slot_id)
    }
}
