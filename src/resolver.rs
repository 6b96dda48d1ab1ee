//! Model/slot resolution
//!
//! Rendering paths must always have an ordered slot list to work with, even
//! when the model identifier is missing or stale. Resolution is total: it
//! degrades through model lookup, slot-count inference and the raw key set
//! down to the default base model, and never fails.

use tracing::debug;

use crate::constants;
use crate::geometry;
use crate::types::{Configuration, SlotId};

/// Resolve the authoritative ordered slot id list for rendering/validation.
///
/// Priority:
/// 1. a recognized `model_code` wins;
/// 2. else a configuration whose populated slot count matches a known model
///    picks up that model's layout;
/// 3. else the configuration's own keys, canonically sorted (best-effort,
///    no geometry guarantees);
/// 4. else the default base model.
pub fn resolve_slot_ids(
    model_code: Option<&str>,
    configuration: Option<&Configuration>,
) -> Vec<SlotId> {
    if let Some(code) = model_code
        && geometry::known_model(code)
    {
        return geometry::slot_ids_for(code);
    }

    if let Some(configuration) = configuration
        && !configuration.is_empty()
    {
        if let Some(inferred) = geometry::model_from_slot_count(configuration.slots.len()) {
            debug!(model = %inferred, slots = configuration.slots.len(), "inferred model from slot count");
            return geometry::slot_ids_for(inferred);
        }
        debug!(slots = configuration.slots.len(), "no model for slot count, using configuration keys");
        return configuration.slot_ids();
    }

    geometry::slot_ids_for(constants::model::DEFAULT_MODEL_CODE)
}
