//! PKP-2300-SI: 6 slots in a 3x2 grid.

use super::build;
use crate::geometry::{ButtonVisual, KeypadModelGeometry};

pub fn geometry() -> KeypadModelGeometry {
    build(
        "PKP-2300-SI",
        1000.0,
        580.0,
        ButtonVisual {
            ring_diameter_pct_of_slot: 114.7,
            icon_diameter_pct_of_slot: 60.0,
        },
        0.0470,
        &[
            (1, 0.2540, 0.2517),
            (2, 0.5030, 0.2534),
            (3, 0.7470, 0.2534),
            (4, 0.2580, 0.7586),
            (5, 0.5040, 0.7569),
            (6, 0.7460, 0.7586),
        ],
    )
}
