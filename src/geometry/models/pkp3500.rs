//! PKP-3500-SI: 15 slots in a 5x3 grid, the tallest shell of the family.

use super::build;
use crate::geometry::{ButtonVisual, KeypadModelGeometry};

pub fn geometry() -> KeypadModelGeometry {
    build(
        "PKP-3500-SI",
        1000.0,
        688.0,
        ButtonVisual {
            ring_diameter_pct_of_slot: 121.6,
            icon_diameter_pct_of_slot: 60.0,
        },
        0.0370,
        &[
            (1, 0.1150, 0.1715),
            (2, 0.3070, 0.1730),
            (3, 0.5000, 0.1730),
            (4, 0.6940, 0.1759),
            (5, 0.8860, 0.1730),
            (6, 0.1160, 0.5015),
            (7, 0.3070, 0.5029),
            (8, 0.5000, 0.5044),
            (9, 0.6930, 0.5058),
            (10, 0.8850, 0.5044),
            (11, 0.1180, 0.8387),
            (12, 0.3090, 0.8387),
            (13, 0.5010, 0.8372),
            (14, 0.6930, 0.8387),
            (15, 0.8850, 0.8372),
        ],
    )
}
