//! PKP-2600-SI: 12 slots in a 6x2 grid, the widest shell of the family.

use super::build;
use crate::geometry::{ButtonVisual, KeypadModelGeometry};

pub fn geometry() -> KeypadModelGeometry {
    build(
        "PKP-2600-SI",
        1000.0,
        383.0,
        ButtonVisual {
            ring_diameter_pct_of_slot: 114.7,
            icon_diameter_pct_of_slot: 60.0,
        },
        0.0325,
        &[
            (1, 0.0965, 0.2546),
            (2, 0.2575, 0.2572),
            (3, 0.4185, 0.2598),
            (4, 0.5805, 0.2598),
            (5, 0.7425, 0.2598),
            (6, 0.9035, 0.2598),
            (7, 0.0975, 0.7637),
            (8, 0.2585, 0.7611),
            (9, 0.4195, 0.7611),
            (10, 0.5815, 0.7611),
            (11, 0.7425, 0.7611),
            (12, 0.9015, 0.7611),
        ],
    )
}
