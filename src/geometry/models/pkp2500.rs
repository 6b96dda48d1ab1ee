//! PKP-2500-SI: 10 slots in a 5x2 grid on a wide shell.

use super::build;
use crate::geometry::{ButtonVisual, KeypadModelGeometry};

pub fn geometry() -> KeypadModelGeometry {
    build(
        "PKP-2500-SI",
        1001.0,
        453.0,
        ButtonVisual {
            ring_diameter_pct_of_slot: 114.7,
            icon_diameter_pct_of_slot: 60.0,
        },
        0.0380,
        &[
            (1, 0.1159, 0.2627),
            (2, 0.3077, 0.2649),
            (3, 0.4995, 0.2671),
            (4, 0.6923, 0.2671),
            (5, 0.8831, 0.2649),
            (6, 0.1189, 0.7616),
            (7, 0.3097, 0.7616),
            (8, 0.5005, 0.7594),
            (9, 0.6913, 0.7594),
            (10, 0.8811, 0.7594),
        ],
    )
}
