//! Preview transform engine
//!
//! Turns a resolved configuration into renderer-agnostic placement data:
//! per-slot percent boxes (pixel-independent, anchored at their own center)
//! and the whole-unit rotation/scale transform that keeps a rotated shell
//! from clipping inside a fixed-aspect container.

use serde::Serialize;
use tracing::debug;

use crate::codec::{self, ConfigError, DecodeMode};
use crate::geometry::{self, KeypadModelGeometry};
use crate::icons::IconLookup;
use crate::resolver;
use crate::types::{Configuration, GlowColor, Rotation, SlotId};

/// Renderable bounding box for one slot, as percentages of the shell box.
/// The box is anchored at its own center (translate -50%/-50%).
#[derive(Debug, Clone, Serialize)]
pub struct SlotPlacement {
    pub left_pct: f64,
    pub top_pct: f64,
    pub size_pct: f64,
    /// Ring marker diameter, percent of the slot box.
    pub ring_diameter_pct: f64,
    /// Icon marker diameter, percent of the slot box.
    pub icon_diameter_pct: f64,
}

/// Placement for one slot of a model, if that model's geometry defines it.
pub fn slot_placement(geometry: &KeypadModelGeometry, slot_id: SlotId) -> Option<SlotPlacement> {
    let slot = geometry.slots.get(&slot_id)?;
    Some(SlotPlacement {
        left_pct: slot.cx * 100.0,
        top_pct: slot.cy * 100.0,
        size_pct: slot.r * 200.0,
        ring_diameter_pct: geometry.button_visual.ring_diameter_pct_of_slot,
        icon_diameter_pct: geometry.button_visual.icon_diameter_pct_of_slot,
    })
}

/// Scale factor that keeps a rotated shell inside its container.
///
/// Turning a landscape shell onto its side makes its visual height equal its
/// original width, so shrinking by the inverse aspect ratio keeps the
/// rotated silhouette within the original bounding box. The rule applies
/// only to landscape shells on their side; everything else renders at 1.
/// This exact heuristic is load-bearing for the surrounding styling; do not
/// replace it with a general bounding-box computation.
pub fn compensating_scale(rotation: Rotation, aspect_ratio: f64) -> f64 {
    let is_landscape = aspect_ratio > 1.0;
    if rotation.is_side() && is_landscape {
        1.0 / aspect_ratio
    } else {
        1.0
    }
}

/// Whole-unit display transform: rotate about the center first, then scale
/// about the same center. The scale is computed from the post-rotation
/// bounding box, which is why the order matters.
#[derive(Debug, Clone, Serialize)]
pub struct ShellTransform {
    pub rotation_deg: u16,
    pub scale: f64,
}

impl ShellTransform {
    pub fn new(rotation: Rotation, aspect_ratio: f64) -> Self {
        Self {
            rotation_deg: rotation.degrees(),
            scale: compensating_scale(rotation, aspect_ratio),
        }
    }
}

/// One slot of a render plan. `placement` is absent for slot ids outside
/// the resolved model's geometry (best-effort layouts); `icon_*` fields are
/// absent for unconfigured slots or unknown catalog ids.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedSlot {
    pub slot_id: SlotId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<SlotPlacement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matte_asset_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<GlowColor>,
}

/// Complete renderable layout for one configuration, consumed by thumbnail,
/// cart/checkout preview and export rendering.
#[derive(Debug, Clone, Serialize)]
pub struct RenderPlan {
    pub model_code: String,
    pub aspect_ratio: f64,
    pub transform: ShellTransform,
    pub slots: Vec<PlannedSlot>,
}

impl RenderPlan {
    /// Build a plan. Total: unknown models, unknown icons and partial
    /// configurations all degrade to renderable output.
    pub fn build(
        configuration: &Configuration,
        model_code: Option<&str>,
        lookup: Option<&IconLookup>,
    ) -> Self {
        let geometry = effective_geometry(model_code, configuration);
        let slot_ids = resolver::resolve_slot_ids(model_code, Some(configuration));

        let slots = slot_ids
            .into_iter()
            .map(|slot_id| {
                let configured = configuration.get(slot_id);
                let icon_id = configured.map(|slot| slot.icon_id.clone());
                let resolved = icon_id
                    .as_deref()
                    .and_then(|id| lookup.and_then(|l| l.get(id)));
                PlannedSlot {
                    slot_id,
                    placement: slot_placement(geometry, slot_id),
                    icon_name: resolved.map(|entry| entry.icon_name.clone()),
                    matte_asset_path: icon_id
                        .as_deref()
                        .and_then(|id| lookup.and_then(|l| l.matte_asset_path_for(id))),
                    icon_id,
                    color: configured.and_then(|slot| slot.color),
                }
            })
            .collect();

        Self {
            model_code: geometry.model_code.to_string(),
            aspect_ratio: geometry.aspect_ratio,
            transform: ShellTransform::new(configuration.rotation, geometry.aspect_ratio),
            slots,
        }
    }
}

/// Lenient decode for preview paths. The expected slot set comes from the
/// model when recognized, else from the payload's own slot keys, else from
/// the default model.
pub fn decode_for_preview(raw: &str, model_code: Option<&str>) -> Result<Configuration, ConfigError> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(ConfigError::MalformedJson)?;

    let expected = if let Some(code) = model_code
        && geometry::known_model(code)
    {
        geometry::slot_ids_for(code)
    } else {
        let own_ids = codec::slot_ids_in_value(&value);
        if own_ids.is_empty() {
            geometry::slot_ids_for("")
        } else {
            own_ids
        }
    };

    codec::decode_value(&value, DecodeMode::Lenient(&expected))
}

/// Preview rendering must always show something: decode failures (garbled
/// text from older saves) yield an empty configuration instead of an error.
pub fn parse_for_preview(raw: &str, model_code: Option<&str>) -> Configuration {
    decode_for_preview(raw, model_code).unwrap_or_else(|error| {
        debug!(%error, "configuration text unusable for preview, rendering unconfigured");
        Configuration::default()
    })
}

/// Geometry backing a plan: explicit model if recognized, else the model
/// inferred from the configuration's slot count, else the default.
fn effective_geometry(
    model_code: Option<&str>,
    configuration: &Configuration,
) -> &'static KeypadModelGeometry {
    if let Some(code) = model_code
        && geometry::known_model(code)
    {
        return geometry::geometry_for(code);
    }
    if let Some(inferred) = geometry::model_from_slot_count(configuration.slots.len()) {
        return geometry::geometry_for(inferred);
    }
    geometry::geometry_for("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{self, DecodeMode};
    use crate::icons::IconCatalogEntry;
    use crate::types::SlotConfig;

    #[test]
    fn test_slot_placement_formula() {
        let geometry = geometry::geometry_for("PKP-2200-SI");
        let placement = slot_placement(geometry, SlotId::new(1)).unwrap();
        assert!((placement.left_pct - 37.50).abs() < 1e-9);
        assert!((placement.top_pct - 25.09).abs() < 1e-9);
        assert!((placement.size_pct - 11.66).abs() < 1e-9);
        assert!((placement.ring_diameter_pct - 145.0).abs() < 1e-9);
        assert!((placement.icon_diameter_pct - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_slot_placement_none_outside_model() {
        let geometry = geometry::geometry_for("PKP-2200-SI");
        assert!(slot_placement(geometry, SlotId::new(9)).is_none());
    }

    #[test]
    fn test_scale_landscape_rotated_side() {
        assert!((compensating_scale(Rotation::R90, 1.5) - 1.0 / 1.5).abs() < 1e-12);
        assert!((compensating_scale(Rotation::R270, 1.5) - 1.0 / 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_scale_unrotated_landscape_is_one() {
        assert_eq!(compensating_scale(Rotation::R0, 1.5), 1.0);
        assert_eq!(compensating_scale(Rotation::R180, 1.5), 1.0);
    }

    #[test]
    fn test_scale_portrait_rotated_is_one() {
        assert_eq!(compensating_scale(Rotation::R90, 0.8), 1.0);
        assert_eq!(compensating_scale(Rotation::R270, 0.8), 1.0);
    }

    #[test]
    fn test_scale_square_shell_is_one() {
        assert_eq!(compensating_scale(Rotation::R90, 1.0), 1.0);
    }

    fn configured(numbers: &[u16]) -> Configuration {
        let mut configuration = Configuration::default();
        for &number in numbers {
            configuration.slots.insert(
                SlotId::new(number),
                SlotConfig {
                    icon_id: format!("i{number}"),
                    color: None,
                },
            );
        }
        configuration
    }

    #[test]
    fn test_render_plan_lists_every_model_slot() {
        let configuration = configured(&[1, 3]);
        let plan = RenderPlan::build(&configuration, Some("PKP-2300-SI"), None);
        assert_eq!(plan.model_code, "PKP-2300-SI");
        assert_eq!(plan.slots.len(), 6);
        assert!(plan.slots[0].icon_id.is_some());
        assert!(plan.slots[1].icon_id.is_none());
        assert!(plan.slots.iter().all(|slot| slot.placement.is_some()));
    }

    #[test]
    fn test_render_plan_infers_model_without_code() {
        let configuration = configured(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let plan = RenderPlan::build(&configuration, None, None);
        assert_eq!(plan.model_code, "PKP-2400-SI");
    }

    #[test]
    fn test_render_plan_transform_uses_configuration_rotation() {
        let raw = r#"{"slot_1": {"iconId": "a1"}, "_meta": {"rotation": 90}}"#;
        let slot_ids = geometry::slot_ids_for("PKP-2200-SI");
        let configuration = codec::decode_str(raw, DecodeMode::Lenient(&slot_ids)).unwrap();
        let plan = RenderPlan::build(&configuration, Some("PKP-2200-SI"), None);
        assert_eq!(plan.transform.rotation_deg, 90);
        assert!((plan.transform.scale - 580.0 / 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_render_plan_resolves_icon_metadata() {
        let catalog = [IconCatalogEntry {
            icon_id: "a1".to_string(),
            name: "Anchor".to_string(),
            matte_asset_path: None,
            categories: vec!["Marine".to_string()],
        }];
        let lookup = IconLookup::build(&catalog);

        let mut configuration = configured(&[1]);
        configuration.slots.get_mut(&SlotId::new(1)).unwrap().icon_id = "a1".to_string();

        let plan = RenderPlan::build(&configuration, Some("PKP-2200-SI"), Some(&lookup));
        let first = &plan.slots[0];
        assert_eq!(first.icon_name.as_deref(), Some("Anchor"));
        assert_eq!(
            first.matte_asset_path.as_deref(),
            Some("/assets/icons/matte/marine/a1.png")
        );
    }

    #[test]
    fn test_decode_for_preview_uses_payload_keys_without_model() {
        let raw = r#"{"slot_7": {"iconId": "g7"}, "slot_2": {"iconId": "b2"}}"#;
        let configuration = decode_for_preview(raw, None).unwrap();
        assert_eq!(
            configuration.slot_ids(),
            vec![SlotId::new(2), SlotId::new(7)]
        );
    }

    #[test]
    fn test_decode_for_preview_model_limits_slot_set() {
        let raw = r#"{"slot_1": {"iconId": "a1"}, "slot_9": {"iconId": "z9"}}"#;
        let configuration = decode_for_preview(raw, Some("PKP-2200-SI")).unwrap();
        assert_eq!(configuration.slot_ids(), vec![SlotId::new(1)]);
    }

    #[test]
    fn test_parse_for_preview_swallows_garbage() {
        assert!(parse_for_preview("{broken", None).is_empty());
        assert!(parse_for_preview("[1,2,3]", None).is_empty());
        let configuration = parse_for_preview(r#"{"slot_1": {"iconId": "a1"}}"#, None);
        assert_eq!(configuration.slots.len(), 1);
    }

    #[test]
    fn test_render_plan_unknown_icon_keeps_id_without_metadata() {
        let lookup = IconLookup::build(&[]);
        let configuration = configured(&[1]);
        let plan = RenderPlan::build(&configuration, Some("PKP-2200-SI"), Some(&lookup));
        let first = &plan.slots[0];
        assert_eq!(first.icon_id.as_deref(), Some("i1"));
        assert_eq!(first.icon_name, None);
        assert_eq!(first.matte_asset_path, None);
    }
}
