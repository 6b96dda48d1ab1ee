//! PKP-2400-SI: 8 slots in a 4x2 grid.

use super::build;
use crate::geometry::{ButtonVisual, KeypadModelGeometry};

pub fn geometry() -> KeypadModelGeometry {
    build(
        "PKP-2400-SI",
        1000.0,
        580.0,
        ButtonVisual {
            ring_diameter_pct_of_slot: 104.3,
            icon_diameter_pct_of_slot: 60.0,
        },
        0.0460,
        &[
            (1, 0.1430, 0.2569),
            (2, 0.3790, 0.2569),
            (3, 0.6200, 0.2603),
            (4, 0.8570, 0.2603),
            (5, 0.1470, 0.7500),
            (6, 0.3830, 0.7500),
            (7, 0.6200, 0.7466),
            (8, 0.8550, 0.7466),
        ],
    )
}
