//! Slot schema and geometry registry
//!
//! Static, per-model layout data for the PKP keypad family: slot positions
//! and radii in normalized unit-square coordinates, the shell image aspect
//! ratio, and the visual proportions of the button ring and icon insert.
//! The registry is built once at first use and never mutated; lookups hand
//! out `&'static` references that are safe to share across threads.

pub mod models;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Serialize;

use crate::constants;
use crate::types::SlotId;

/// One slot's position and size in normalized [0, 1] unit-square coordinates
/// (x relative to shell width, y relative to shell height).
#[derive(Debug, Clone, Serialize)]
pub struct SlotGeometry {
    pub label: String,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

/// Visual proportions of the ring and icon markers, as percentages of the
/// slot bounding box.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ButtonVisual {
    pub ring_diameter_pct_of_slot: f64,
    pub icon_diameter_pct_of_slot: f64,
}

/// Immutable layout record for one keypad model.
#[derive(Debug, Clone)]
pub struct KeypadModelGeometry {
    pub model_code: &'static str,
    /// Shell image width / height.
    pub aspect_ratio: f64,
    pub intrinsic_width: f64,
    pub intrinsic_height: f64,
    pub slots: BTreeMap<SlotId, SlotGeometry>,
    pub button_visual: ButtonVisual,
}

impl KeypadModelGeometry {
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Slot ids of this model in canonical order.
    pub fn slot_ids(&self) -> Vec<SlotId> {
        self.slots.keys().copied().collect()
    }
}

static REGISTRY: LazyLock<Vec<KeypadModelGeometry>> = LazyLock::new(|| {
    let registry = vec![
        models::pkp2200::geometry(),
        models::pkp2300::geometry(),
        models::pkp2400::geometry(),
        models::pkp2500::geometry(),
        models::pkp2600::geometry(),
        models::pkp3500::geometry(),
    ];

    // Slot-count inference relies on counts being unique across models.
    // A new model sharing a count must fail construction, not guess.
    debug_assert!(
        {
            let mut counts: Vec<usize> = registry.iter().map(|g| g.slot_count()).collect();
            counts.sort_unstable();
            counts.windows(2).all(|pair| pair[0] != pair[1])
        },
        "keypad models must have distinct slot counts"
    );

    registry
});

fn normalize_model_code(model_code: &str) -> String {
    model_code.trim().to_ascii_uppercase()
}

fn find_model(model_code: &str) -> Option<&'static KeypadModelGeometry> {
    let normalized = normalize_model_code(model_code);
    REGISTRY.iter().find(|g| g.model_code == normalized)
}

/// Whether the registry knows this model code (after trim + uppercase).
pub fn known_model(model_code: &str) -> bool {
    find_model(model_code).is_some()
}

/// Geometry for a model code. Total: unrecognized or empty codes fall back
/// to the default base model so rendering paths always have a layout.
pub fn geometry_for(model_code: &str) -> &'static KeypadModelGeometry {
    find_model(model_code).unwrap_or_else(|| {
        find_model(constants::model::DEFAULT_MODEL_CODE)
            .expect("default model must be registered")
    })
}

/// Canonically ordered slot ids for a model code (same fallback as
/// [`geometry_for`]).
pub fn slot_ids_for(model_code: &str) -> Vec<SlotId> {
    geometry_for(model_code).slot_ids()
}

/// Exact table lookup from slot count to model code. Returns `None` for
/// counts outside the known set; never guesses.
pub fn model_from_slot_count(slot_count: usize) -> Option<&'static str> {
    REGISTRY
        .iter()
        .find(|g| g.slot_count() == slot_count)
        .map(|g| g.model_code)
}

/// All registered model codes, in registry order.
pub fn known_model_codes() -> Vec<&'static str> {
    REGISTRY.iter().map(|g| g.model_code).collect()
}
