//! Per-model layout tables
//!
//! One module per keypad model, mirroring the shipped hardware family.
//! Coordinates were measured on each model's render canvas and are stored
//! normalized: `cx`/`cy` as fractions of the shell width/height, `r` as the
//! insert radius over the shell width. All slots of a model share one size.

pub mod pkp2200;
pub mod pkp2300;
pub mod pkp2400;
pub mod pkp2500;
pub mod pkp2600;
pub mod pkp3500;

use std::collections::BTreeMap;

use super::{ButtonVisual, KeypadModelGeometry, SlotGeometry};
use crate::types::SlotId;

/// Assemble a model record from its slot centers and shared slot radius.
fn build(
    model_code: &'static str,
    intrinsic_width: f64,
    intrinsic_height: f64,
    button_visual: ButtonVisual,
    slot_r: f64,
    centers: &[(u16, f64, f64)],
) -> KeypadModelGeometry {
    let mut slots = BTreeMap::new();
    for &(number, cx, cy) in centers {
        slots.insert(
            SlotId::new(number),
            SlotGeometry {
                label: format!("Slot {number}"),
                cx,
                cy,
                r: slot_r,
            },
        );
    }

    KeypadModelGeometry {
        model_code,
        aspect_ratio: intrinsic_width / intrinsic_height,
        intrinsic_width,
        intrinsic_height,
        slots,
        button_visual,
    }
}
