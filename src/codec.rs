//! Configuration codec
//!
//! Parses untrusted JSON-encoded configuration text (or pre-parsed values)
//! into a normalized [`Configuration`], and encodes configurations back to
//! their canonical wire form.
//!
//! Two modes cover the two call paths:
//! - **Strict** validates a closed slot set and reports a specific,
//!   field-addressable error for any deviation. Used when persisting a
//!   named design.
//! - **Lenient** tolerates partial and unknown slot sets, silently skipping
//!   anything unusable. Used by preview, cart and export rendering, which
//!   must show something even for garbled data from older saves.

use serde_json::{Map, Value};

use crate::constants::wire;
use crate::types::{Configuration, GlowColor, Rotation, SlotConfig, SlotId};

/// The closed slot set accepted by strict mode.
///
/// The saved-design persistence format predates the larger keypad models and
/// still accepts exactly these four slots, whichever model the design
/// targets. Kept for compatibility with existing saves; widening it would
/// change the accepted input shape of the persistence API.
pub const STRICT_SLOT_IDS: [SlotId; 4] = [
    SlotId::new(1),
    SlotId::new(2),
    SlotId::new(3),
    SlotId::new(4),
];

/// Validation mode for [`decode_str`] / [`decode_value`].
#[derive(Debug, Clone, Copy)]
pub enum DecodeMode<'a> {
    /// Exact, closed slot set ([`STRICT_SLOT_IDS`]).
    Strict,
    /// Tolerant of partial/unknown slot sets; keys outside the expected
    /// list are ignored, missing keys are unconfigured.
    Lenient(&'a [SlotId]),
}

/// User-input-class validation errors. Never process-fatal; callers that
/// present to an end user surface the message as-is.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration must be valid JSON")]
    MalformedJson(#[source] serde_json::Error),

    #[error("configuration must be an object keyed by slot ids")]
    NotAnObject,

    #[error("unexpected slot key \"{0}\" in configuration")]
    UnexpectedSlot(String),

    #[error("missing required slot \"{0}\" in configuration")]
    MissingSlot(SlotId),

    #[error("slot \"{0}\" has an invalid icon id")]
    InvalidIcon(SlotId),

    #[error("slot \"{0}\" has an invalid color, use #RRGGBB")]
    InvalidColor(SlotId),
}

/// Icon ids reference the external catalog and are plain alphanumeric keys.
pub fn is_valid_icon_id(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Decode JSON-encoded configuration text.
pub fn decode_str(raw: &str, mode: DecodeMode<'_>) -> Result<Configuration, ConfigError> {
    let value: Value = serde_json::from_str(raw).map_err(ConfigError::MalformedJson)?;
    decode_value(&value, mode)
}

/// Decode a pre-parsed configuration value.
pub fn decode_value(value: &Value, mode: DecodeMode<'_>) -> Result<Configuration, ConfigError> {
    let Some(object) = value.as_object() else {
        return Err(ConfigError::NotAnObject);
    };

    let strict = matches!(mode, DecodeMode::Strict);
    let expected: &[SlotId] = match mode {
        DecodeMode::Strict => &STRICT_SLOT_IDS,
        DecodeMode::Lenient(slot_ids) => slot_ids,
    };

    // First pass: map raw keys onto typed slot ids, so "slot_01" and
    // "slot_1" land on the same entry and ordering is canonical.
    let mut raw_slots: std::collections::BTreeMap<SlotId, &Value> = std::collections::BTreeMap::new();
    for (key, raw_slot) in object {
        if key == wire::META_KEY {
            continue;
        }
        match SlotId::parse(key) {
            Some(slot_id) if expected.contains(&slot_id) => {
                raw_slots.insert(slot_id, raw_slot);
            }
            _ if strict => return Err(ConfigError::UnexpectedSlot(key.clone())),
            _ => continue,
        }
    }

    let mut configuration = Configuration {
        rotation: decode_rotation(object),
        ..Configuration::default()
    };

    if strict {
        for slot_id in STRICT_SLOT_IDS {
            let raw_slot = raw_slots
                .get(&slot_id)
                .copied()
                .ok_or(ConfigError::MissingSlot(slot_id))?;
            if let Some(slot) = decode_slot(slot_id, raw_slot, strict)? {
                configuration.slots.insert(slot_id, slot);
            }
        }
    } else {
        for (slot_id, raw_slot) in raw_slots {
            if let Some(slot) = decode_slot(slot_id, raw_slot, strict)? {
                configuration.slots.insert(slot_id, slot);
            }
        }
    }

    Ok(configuration)
}

/// Encode a configuration to its canonical wire form: slots in canonical
/// order, uppercase colors, `_meta` only when the rotation is meaningful.
/// Decoding the result yields the identical configuration.
pub fn encode(configuration: &Configuration) -> String {
    let mut root = Map::new();
    for (slot_id, slot) in &configuration.slots {
        let mut entry = Map::new();
        entry.insert(
            wire::ICON_ID_KEY.to_string(),
            Value::String(slot.icon_id.clone()),
        );
        entry.insert(
            wire::COLOR_KEY.to_string(),
            slot.color
                .map(|color| Value::String(color.to_string()))
                .unwrap_or(Value::Null),
        );
        root.insert(slot_id.to_string(), Value::Object(entry));
    }

    if configuration.rotation != Rotation::R0 {
        let mut meta = Map::new();
        meta.insert(
            wire::META_ROTATION_KEY.to_string(),
            Value::from(configuration.rotation.degrees()),
        );
        root.insert(wire::META_KEY.to_string(), Value::Object(meta));
    }

    Value::Object(root).to_string()
}

/// Slot ids named by a raw JSON value's own keys, unique and canonically
/// sorted. Non-slot keys (including `_meta`) are ignored. Used to derive
/// the expected slot set for lenient decoding when no model is known.
pub fn slot_ids_in_value(value: &Value) -> Vec<SlotId> {
    let Some(object) = value.as_object() else {
        return Vec::new();
    };
    let mut ids: Vec<SlotId> = object.keys().filter_map(|key| SlotId::parse(key)).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Rotation lives under `_meta` and is presentation-only; anything other
/// than the four right-angle values degrades to no rotation.
fn decode_rotation(object: &Map<String, Value>) -> Rotation {
    object
        .get(wire::META_KEY)
        .and_then(Value::as_object)
        .and_then(|meta| meta.get(wire::META_ROTATION_KEY))
        .and_then(Value::as_i64)
        .and_then(Rotation::from_degrees)
        .unwrap_or_default()
}

/// Decode one slot payload. `Ok(None)` means "unconfigured": lenient mode
/// degrades anything unusable to that instead of failing the whole decode.
fn decode_slot(
    slot_id: SlotId,
    raw: &Value,
    strict: bool,
) -> Result<Option<SlotConfig>, ConfigError> {
    let Some(slot) = raw.as_object() else {
        return if strict {
            Err(ConfigError::InvalidIcon(slot_id))
        } else {
            Ok(None)
        };
    };

    let icon_id = match slot.get(wire::ICON_ID_KEY) {
        Some(Value::String(raw_icon)) => {
            let icon_id = raw_icon.trim();
            if is_valid_icon_id(icon_id) {
                icon_id.to_string()
            } else if strict {
                return Err(ConfigError::InvalidIcon(slot_id));
            } else {
                return Ok(None);
            }
        }
        _ => {
            return if strict {
                Err(ConfigError::InvalidIcon(slot_id))
            } else {
                Ok(None)
            };
        }
    };

    let color = match slot.get(wire::COLOR_KEY) {
        Some(Value::String(raw_color)) if !raw_color.trim().is_empty() => {
            match GlowColor::parse(raw_color) {
                Some(color) => Some(color),
                None if strict => return Err(ConfigError::InvalidColor(slot_id)),
                None => None,
            }
        }
        Some(Value::Null) | Some(Value::String(_)) | None => None,
        Some(_) if strict => return Err(ConfigError::InvalidColor(slot_id)),
        Some(_) => None,
    };

    Ok(Some(SlotConfig { icon_id, color }))
}
