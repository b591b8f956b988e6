//! Label placement: anchor point plus a manual nudge, both in degrees.

use geo::Centroid;
use geo_types::{Coord, Geometry};
use serde::Deserialize;
use std::collections::HashMap;

use crate::model::{Feature, FeatureGroup};

/// Key of the per-group fallback nudge.
pub const DEFAULT_NUDGE_KEY: &str = "default";

/// Per-group `[dlon, dlat]` label offsets keyed by feature id or [`DEFAULT_NUDGE_KEY`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct NudgeTable(pub HashMap<String, HashMap<String, [f64; 2]>>);

impl Default for NudgeTable {
    fn default() -> Self {
        let mut table = HashMap::new();
        table.insert(
            FeatureGroup::Cities.name().to_string(),
            HashMap::from([
                (DEFAULT_NUDGE_KEY.to_string(), [0.15, -0.02]),
                ("Raleigh".to_string(), [0.15, -0.5]),
            ]),
        );
        table.insert(FeatureGroup::Countries.name().to_string(), HashMap::new());
        table.insert(
            FeatureGroup::Points.name().to_string(),
            HashMap::from([(DEFAULT_NUDGE_KEY.to_string(), [0.15, -0.01])]),
        );
        Self(table)
    }
}

impl NudgeTable {
    /// Feature entry, else the group default, else no offset.
    pub fn resolve(&self, group: FeatureGroup, id: Option<&str>) -> [f64; 2] {
        let Some(entries) = self.0.get(group.name()) else {
            return [0.0, 0.0];
        };
        id.and_then(|id| entries.get(id))
            .or_else(|| entries.get(DEFAULT_NUDGE_KEY))
            .copied()
            .unwrap_or([0.0, 0.0])
    }
}

/// Planar centroid of a geometry with longitude/latitude treated as x/y.
pub fn geographic_centroid(geometry: &Geometry<f64>) -> Option<Coord<f64>> {
    geometry.centroid().map(|p| p.0)
}

/// Unprojected label position: the point itself or the geometry centroid, then nudged.
///
/// Returns `None` when the feature has no geometry or an empty one.
pub fn label_anchor(group: FeatureGroup, feature: &Feature, nudges: &NudgeTable) -> Option<Coord<f64>> {
    let geometry = feature.geometry.as_ref()?;
    let base = match geometry {
        Geometry::Point(p) => p.0,
        other => geographic_centroid(other)?,
    };
    let [dx, dy] = nudges.resolve(group, feature.id.as_deref());
    Some(Coord {
        x: base.x + dx,
        y: base.y + dy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{LineString, Point, polygon};
    use serde_json::Map;

    fn feature(id: &str, geometry: Geometry<f64>) -> Feature {
        Feature {
            id: Some(id.to_string()),
            geometry: Some(geometry),
            properties: Map::new(),
        }
    }

    fn close(a: Coord<f64>, x: f64, y: f64) -> bool {
        (a.x - x).abs() < 1e-9 && (a.y - y).abs() < 1e-9
    }

    #[test]
    fn nudge_precedence() {
        let table = NudgeTable::default();
        assert_eq!(table.resolve(FeatureGroup::Cities, Some("Raleigh")), [0.15, -0.5]);
        assert_eq!(table.resolve(FeatureGroup::Cities, Some("Miami")), [0.15, -0.02]);
        assert_eq!(table.resolve(FeatureGroup::Cities, None), [0.15, -0.02]);
        assert_eq!(table.resolve(FeatureGroup::Countries, Some("Cuba")), [0.0, 0.0]);
        assert_eq!(table.resolve(FeatureGroup::Tracks, Some("x")), [0.0, 0.0]);
    }

    #[test]
    fn point_anchor_is_coordinate_plus_nudge() {
        let f = feature("Miami", Point::new(-80.19, 25.76).into());
        let anchor = label_anchor(FeatureGroup::Cities, &f, &NudgeTable::default()).unwrap();
        assert!(close(anchor, -80.19 + 0.15, 25.76 - 0.02), "{anchor:?}");
        // source geometry untouched
        assert_eq!(f.geometry, Some(Point::new(-80.19, 25.76).into()));
    }

    #[test]
    fn polygon_anchor_is_centroid_plus_nudge() {
        let square: Geometry<f64> = polygon![
            (x: -80.0, y: 20.0),
            (x: -70.0, y: 20.0),
            (x: -70.0, y: 30.0),
            (x: -80.0, y: 30.0),
        ]
        .into();
        let f = feature("Somewhere", square);
        let anchor = label_anchor(FeatureGroup::Countries, &f, &NudgeTable::default()).unwrap();
        assert!(close(anchor, -75.0, 25.0), "{anchor:?}");

        let mut table = NudgeTable::default();
        table.0.insert(
            "countries".to_string(),
            HashMap::from([("Somewhere".to_string(), [1.0, -2.0])]),
        );
        let anchor = label_anchor(FeatureGroup::Countries, &f, &table).unwrap();
        assert!(close(anchor, -74.0, 23.0), "{anchor:?}");
    }

    #[test]
    fn line_centroid_is_length_weighted() {
        let line: Geometry<f64> = LineString::from(vec![(0.0, 0.0), (10.0, 0.0)]).into();
        assert!(close(geographic_centroid(&line).unwrap(), 5.0, 0.0));
    }

    #[test]
    fn no_geometry_no_anchor() {
        let f = Feature {
            id: Some("ghost".to_string()),
            geometry: None,
            properties: Map::new(),
        };
        assert!(label_anchor(FeatureGroup::Cities, &f, &NudgeTable::default()).is_none());
    }
}
