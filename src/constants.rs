//! Application-wide constants
//!
//! This module contains the magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Keypad model constants
pub mod model {
    /// Fallback model when a code is missing or unrecognized (4-slot base model)
    pub const DEFAULT_MODEL_CODE: &str = "PKP-2200-SI";
}

/// Wire-format constants for the JSON configuration payload
pub mod wire {
    /// Reserved key carrying presentation-only metadata next to slot entries
    pub const META_KEY: &str = "_meta";

    /// Rotation field inside the `_meta` record, in degrees
    pub const META_ROTATION_KEY: &str = "rotation";

    /// Per-slot icon field
    pub const ICON_ID_KEY: &str = "iconId";

    /// Per-slot glow color field
    pub const COLOR_KEY: &str = "color";
}

/// Saved-design store constants
pub mod store {
    /// Directory under the platform data dir holding application state
    pub const APP_DIR: &str = "keypad-configurator";

    /// Saved-design store filename
    pub const FILENAME: &str = "designs.json";

    /// Design names are capped to this many characters on save
    pub const MAX_NAME_LEN: usize = 160;
}

/// Icon asset constants
pub mod assets {
    /// Base path for synthesized matte icon assets
    /// (`<base>/<category-slug>/<icon_id>.png`)
    pub const MATTE_BASE_PATH: &str = "/assets/icons/matte";

    /// File extension of matte icon renders
    pub const MATTE_EXTENSION: &str = "png";
}
