//! PKP-2200-SI: 4 slots in a 2x2 grid, the base model of the family.

use super::build;
use crate::geometry::{ButtonVisual, KeypadModelGeometry};

pub fn geometry() -> KeypadModelGeometry {
    build(
        "PKP-2200-SI",
        1000.0,
        580.0,
        ButtonVisual {
            ring_diameter_pct_of_slot: 145.0,
            icon_diameter_pct_of_slot: 60.0,
        },
        0.0583,
        &[
            (1, 0.3750, 0.2509),
            (2, 0.6250, 0.2529),
            (3, 0.3780, 0.7579),
            (4, 0.6230, 0.7549),
        ],
    )
}
