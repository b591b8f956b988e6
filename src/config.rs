//! Map configuration: layout constants with partial JSON overrides.

use serde::Deserialize;

use crate::labels::NudgeTable;
use crate::model::BoundingBox;

/// Geographic point the projection centers on.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CentroidPolicy {
    /// A hand-picked `[lon, lat]`.
    Fixed([f64; 2]),
    /// Center of the topology bbox, falling back to `Fixed` default when absent.
    BoundingBox,
}

impl CentroidPolicy {
    pub const DEFAULT_CENTER: [f64; 2] = [-64.0, 28.5];

    pub fn resolve(&self, bbox: Option<&BoundingBox>) -> [f64; 2] {
        match self {
            CentroidPolicy::Fixed(c) => *c,
            CentroidPolicy::BoundingBox => bbox.map(BoundingBox::center).unwrap_or(Self::DEFAULT_CENTER),
        }
    }
}

impl Default for CentroidPolicy {
    fn default() -> Self {
        CentroidPolicy::Fixed(Self::DEFAULT_CENTER)
    }
}

/// Element the app mounts into; it also carries the `data-config` overrides.
pub const MOUNT_SELECTOR: &str = "#graphic";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Element whose width drives the layout.
    pub width_source: String,
    pub data_url: String,
    /// Width used when `width_source` is missing or has no width yet.
    pub default_width: u32,
    /// Widths at or below this use the mobile layout.
    pub mobile_breakpoint: u32,
    /// Width over height.
    pub aspect_ratio: f64,
    /// Projection scale per pixel of width.
    pub scale_factor: f64,
    /// Point radius in projection units (multiplied by the map scale).
    pub dot_radius: f64,
    /// Standard parallel of the equal-area projection, degrees.
    pub parallel: f64,
    pub centroid: CentroidPolicy,
    pub scale_bar_miles: f64,
    /// `[left, bottom]` pixel inset of the scale bar start.
    pub scale_bar_inset: [f64; 2],
    /// Footer sits this many pixels above the bottom of the map.
    pub footer_inset: f64,
    pub resize_throttle_ms: u32,
    /// Track reveal duration per pixel of path at unit map scale (data is 6-hourly).
    pub animation_ms_per_unit: f64,
    pub nudges: NudgeTable,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width_source: "#interactive-content".to_string(),
            data_url: "data/geodata.json".to_string(),
            default_width: 600,
            mobile_breakpoint: 600,
            aspect_ratio: 16.0 / 9.0,
            scale_factor: 0.5,
            dot_radius: 0.002,
            parallel: crate::geometry::CylindricalEqualArea::DEFAULT_PARALLEL,
            centroid: CentroidPolicy::default(),
            scale_bar_miles: 1000.0,
            scale_bar_inset: [10.0, 35.0],
            footer_inset: 25.0,
            resize_throttle_ms: 250,
            animation_ms_per_unit: 1200.0,
            nudges: NudgeTable::default(),
        }
    }
}

impl MapConfig {
    /// Defaults overlaid with whatever fields `json` sets.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads overrides from the `data-config` attribute of the mount element.
    pub fn from_element(mount: &web_sys::Element) -> Self {
        let defaults = Self::default();
        match mount.get_attribute("data-config") {
            Some(raw) => match Self::from_json(&raw) {
                Ok(cfg) => cfg,
                Err(e) => {
                    log::warn!("ignoring invalid data-config: {}", e);
                    defaults
                }
            },
            None => defaults,
        }
    }

    pub fn is_mobile(&self, width: u32) -> bool {
        width <= self.mobile_breakpoint
    }

    pub fn map_height(&self, width: u32) -> u32 {
        (width as f64 / self.aspect_ratio).ceil() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mobile_threshold_is_inclusive() {
        let cfg = MapConfig::default();
        assert!(cfg.is_mobile(600));
        assert!(!cfg.is_mobile(601));
        assert!(cfg.is_mobile(320));
    }

    #[test]
    fn height_rounds_up() {
        let cfg = MapConfig::default();
        assert_eq!(cfg.map_height(1200), 675);
        assert_eq!(cfg.map_height(500), 282);
        assert_eq!(cfg.map_height(601), 339);
        assert_eq!(cfg.map_height(1600), 900);
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let cfg = MapConfig::from_json(r#"{ "data_url": "geo/matthew.json", "mobile_breakpoint": 480 }"#)
            .unwrap();
        assert_eq!(cfg.data_url, "geo/matthew.json");
        assert_eq!(cfg.mobile_breakpoint, 480);
        assert_eq!(cfg.scale_bar_miles, 1000.0);
        assert_eq!(cfg.nudges, NudgeTable::default());
    }

    #[test]
    fn mount_point_is_not_overridable() {
        // the overrides live on the mount element, so they cannot move it
        let cfg = MapConfig::from_json(r##"{ "container": "#elsewhere", "default_width": 480 }"##).unwrap();
        assert_eq!(cfg.default_width, 480);
        assert_eq!(cfg, MapConfig { default_width: 480, ..MapConfig::default() });
        assert_eq!(MOUNT_SELECTOR, "#graphic");
    }

    #[test]
    fn centroid_policies() {
        let bbox = BoundingBox([-100.0, 0.0, -40.0, 40.0]);
        assert_eq!(CentroidPolicy::default().resolve(Some(&bbox)), [-64.0, 28.5]);
        assert_eq!(CentroidPolicy::BoundingBox.resolve(Some(&bbox)), [-70.0, 20.0]);
        assert_eq!(CentroidPolicy::BoundingBox.resolve(None), [-64.0, 28.5]);
        let cfg = MapConfig::from_json(r#"{ "centroid": "bounding_box" }"#).unwrap();
        assert_eq!(cfg.centroid, CentroidPolicy::BoundingBox);
    }
}
