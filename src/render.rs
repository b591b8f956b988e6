//! Render pipeline: resolves one render pass into a [`MapScene`].
//!
//! Everything here is pure; the components in `crate::components` turn the
//! scene into SVG nodes and run the track animations.

use geo_types::Coord;

use crate::classify::classify_feature;
use crate::config::MapConfig;
use crate::error::{MapError, Result};
use crate::geometry::{CylindricalEqualArea, PathGenerator, Projection, calculate_scale_bar_end_point};
use crate::labels::label_anchor;
use crate::model::{FeatureGroup, GeoData};
use crate::state::TrackAnimation;

/// Fixed text placed at a geographic position.
struct Annotation {
    /// Label sub-group the text sits in, if any.
    layer: Option<&'static str>,
    class: &'static str,
    lon_lat: [f64; 2],
    text: &'static str,
}

const ANNOTATIONS: [Annotation; 4] = [
    Annotation {
        layer: Some("water"),
        class: "atlantic-ocean",
        lon_lat: [-54.0, 26.0],
        text: "Atlantic Ocean",
    },
    Annotation {
        layer: Some("water"),
        class: "pacific-ocean",
        lon_lat: [-130.0, 15.0],
        text: "Pacific Ocean",
    },
    Annotation {
        layer: None,
        class: "matthew",
        lon_lat: [-60.0, 16.0],
        text: "Hurricane Matthew",
    },
    Annotation {
        layer: None,
        class: "previous",
        lon_lat: [-64.0, 33.0],
        text: "Category 5 Hurricanes since 1965",
    },
];

#[derive(Clone, Debug, PartialEq)]
pub struct ScenePath {
    pub class: String,
    pub d: String,
    /// Set only for animated groups on desktop.
    pub animation: Option<TrackAnimation>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PathLayer {
    pub group: FeatureGroup,
    pub paths: Vec<ScenePath>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneLabel {
    pub class: String,
    /// Projected pixel position.
    pub position: Coord<f64>,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelLayer {
    pub class: String,
    pub labels: Vec<SceneLabel>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScaleBar {
    pub start: Coord<f64>,
    pub end: Coord<f64>,
    pub label: String,
    pub label_position: Coord<f64>,
}

/// One fully resolved render pass.
#[derive(Clone, Debug, PartialEq)]
pub struct MapScene {
    pub width: u32,
    pub height: u32,
    pub is_mobile: bool,
    pub map_scale: f64,
    pub path_layers: Vec<PathLayer>,
    /// Per-group label layers followed by the fixed sub-groups (e.g. `water`).
    pub label_layers: Vec<LabelLayer>,
    /// Fixed labels placed directly in the label group.
    pub annotations: Vec<SceneLabel>,
    pub scale_bar: ScaleBar,
    pub footer_top: f64,
}

impl MapScene {
    pub fn animations(&self) -> impl Iterator<Item = &TrackAnimation> {
        self.path_layers
            .iter()
            .flat_map(|l| l.paths.iter())
            .filter_map(|p| p.animation.as_ref())
    }
}

/// Builds the projection for a map `width` pixels wide.
pub fn projection_for(data: &GeoData, width: u32, config: &MapConfig) -> CylindricalEqualArea {
    let height = config.map_height(width) as f64;
    let [lon, lat] = config.centroid.resolve(data.bbox.as_ref());
    CylindricalEqualArea::new(config.parallel)
        .center(lon, lat)
        .scale(width as f64 * config.scale_factor)
        .translate(width as f64 / 2.0, height / 2.0)
}

pub fn build_scene(data: &GeoData, width: u32, config: &MapConfig) -> Result<MapScene> {
    let height = config.map_height(width);
    let is_mobile = config.is_mobile(width);
    let projection = projection_for(data, width, config);
    let map_scale = projection.map_scale();
    let paths = PathGenerator::new(&projection, config.dot_radius * map_scale);

    let mut path_layers = Vec::with_capacity(FeatureGroup::DRAW_ORDER.len());
    for group in FeatureGroup::DRAW_ORDER {
        if is_mobile && !group.mobile_visible() {
            continue;
        }
        let animate = !is_mobile && group.animated();
        let collection = data.group(group)?;
        let mut layer = PathLayer {
            group,
            paths: Vec::with_capacity(collection.features.len()),
        };
        for (index, feature) in collection.features.iter().enumerate() {
            let geometry = feature.geometry.as_ref().ok_or_else(|| MapError::MissingGeometry {
                group: group.name().to_string(),
                index,
            })?;
            let animation = animate.then(|| {
                TrackAnimation::for_path(
                    paths.length(geometry),
                    map_scale,
                    config.animation_ms_per_unit,
                )
            });
            layer.paths.push(ScenePath {
                class: classify_feature(feature),
                d: paths.d(geometry),
                animation,
            });
        }
        path_layers.push(layer);
    }

    let mut label_layers = Vec::new();
    for group in FeatureGroup::DRAW_ORDER.into_iter().filter(FeatureGroup::labeled) {
        if is_mobile && !group.mobile_visible() {
            continue;
        }
        let collection = data.group(group)?;
        let mut layer = LabelLayer {
            class: group.name().to_string(),
            labels: Vec::with_capacity(collection.features.len()),
        };
        for (index, feature) in collection.features.iter().enumerate() {
            let err_group = || group.name().to_string();
            let text = feature.id.clone().ok_or_else(|| MapError::MissingIdentifier {
                group: err_group(),
                index,
            })?;
            if feature.geometry.is_none() {
                return Err(MapError::MissingGeometry {
                    group: err_group(),
                    index,
                });
            }
            let anchor = label_anchor(group, feature, &config.nudges).ok_or_else(|| {
                MapError::EmptyGeometry {
                    group: err_group(),
                    index,
                }
            })?;
            layer.labels.push(SceneLabel {
                class: classify_feature(feature),
                position: projection.project(anchor),
                text,
            });
        }
        label_layers.push(layer);
    }

    let mut annotations = Vec::new();
    for a in &ANNOTATIONS {
        let label = SceneLabel {
            class: a.class.to_string(),
            position: projection.project(Coord {
                x: a.lon_lat[0],
                y: a.lon_lat[1],
            }),
            text: a.text.to_string(),
        };
        match a.layer {
            Some(name) => match label_layers.iter_mut().find(|l| l.class == name) {
                Some(layer) => layer.labels.push(label),
                None => label_layers.push(LabelLayer {
                    class: name.to_string(),
                    labels: vec![label],
                }),
            },
            None => annotations.push(label),
        }
    }

    let [inset_x, inset_y] = config.scale_bar_inset;
    let start = Coord {
        x: inset_x,
        y: height as f64 - inset_y,
    };
    let end = calculate_scale_bar_end_point(&projection, start, config.scale_bar_miles);
    let scale_bar = ScaleBar {
        start,
        end,
        label: format!("{} miles", config.scale_bar_miles),
        label_position: Coord {
            x: end.x + 5.0,
            y: end.y,
        },
    };

    Ok(MapScene {
        width,
        height,
        is_mobile,
        map_scale,
        path_layers,
        label_layers,
        annotations,
        scale_bar,
        footer_top: height as f64 - config.footer_inset,
    })
}
