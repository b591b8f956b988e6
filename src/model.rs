//! Core data models for the locator map.
//! Feature data is decoded once from the topology and never mutated afterwards.

use geo_types::Geometry;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::error::{MapError, Result};

/// The named feature groups of the geodata, in draw (z) order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeatureGroup {
    Countries,
    States,
    Cities,
    Tracks,
    /// The highlighted storm track drawn over the historical tracks.
    Matthew,
    /// Label-only group; carries nudges but is never drawn.
    Points,
}

impl FeatureGroup {
    /// Groups drawn as paths, bottom to top.
    pub const DRAW_ORDER: [FeatureGroup; 5] = [
        FeatureGroup::Countries,
        FeatureGroup::States,
        FeatureGroup::Cities,
        FeatureGroup::Tracks,
        FeatureGroup::Matthew,
    ];

    /// Groups that get a text label per feature, bottom to top.
    pub const LABEL_ORDER: [FeatureGroup; 2] = [FeatureGroup::Countries, FeatureGroup::Cities];

    pub fn name(&self) -> &'static str {
        match self {
            FeatureGroup::Countries => "countries",
            FeatureGroup::States => "states",
            FeatureGroup::Cities => "cities",
            FeatureGroup::Tracks => "tracks",
            FeatureGroup::Matthew => "matthew",
            FeatureGroup::Points => "points",
        }
    }

    /// Whether the group survives the reduced mobile layout.
    pub fn mobile_visible(&self) -> bool {
        !matches!(self, FeatureGroup::Cities)
    }

    /// Whether paths of this group get the stroke-dash reveal on desktop.
    pub fn animated(&self) -> bool {
        matches!(self, FeatureGroup::Tracks | FeatureGroup::Matthew)
    }

    pub fn labeled(&self) -> bool {
        Self::LABEL_ORDER.contains(self)
    }
}

/// `[min_lon, min_lat, max_lon, max_lat]` of the source data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox(pub [f64; 4]);

impl BoundingBox {
    pub fn center(&self) -> [f64; 2] {
        let [x0, y0, x1, y1] = self.0;
        [(x0 + x1) / 2.0, (y0 + y1) / 2.0]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    pub id: Option<String>,
    /// `None` for a null-typed topology object.
    pub geometry: Option<Geometry<f64>>,
    /// Insertion-ordered, so class strings follow the source order.
    pub properties: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

/// Application state: everything the render pipeline reads besides width and config.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeoData {
    pub bbox: Option<BoundingBox>,
    pub groups: HashMap<String, FeatureCollection>,
}

impl GeoData {
    pub fn group(&self, group: FeatureGroup) -> Result<&FeatureCollection> {
        self.groups
            .get(group.name())
            .ok_or_else(|| MapError::MissingGroup(group.name().to_string()))
    }
}
