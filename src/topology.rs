//! TopoJSON decoding into per-group feature collections.
//!
//! Arcs may be quantized (a `transform` is present), in which case their
//! positions are delta-encoded integers. Geometry objects reference arcs by
//! index; a negative index `i` means arc `!i` traversed backwards.

use geo_types::{
    Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::error::{MapError, Result};
use crate::model::{BoundingBox, Feature, FeatureCollection, GeoData};

#[derive(Debug, Clone, Deserialize)]
pub struct Topology {
    #[serde(default)]
    pub bbox: Option<Vec<f64>>,
    #[serde(default)]
    pub transform: Option<Transform>,
    #[serde(default)]
    pub arcs: Vec<Vec<Vec<f64>>>,
    #[serde(default)]
    pub objects: HashMap<String, GeometryObject>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Transform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeometryObject {
    /// `None` (JSON null) for an object without geometry.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
    #[serde(default)]
    pub coordinates: Option<Value>,
    #[serde(default)]
    pub arcs: Option<Value>,
    #[serde(default)]
    pub geometries: Vec<GeometryObject>,
}

/// A geometry object with its coordinates or arc references typed by kind.
#[derive(Debug, Clone)]
pub enum Shape<'a> {
    Null,
    Point(Vec<f64>),
    MultiPoint(Vec<Vec<f64>>),
    LineString(Vec<i64>),
    MultiLineString(Vec<Vec<i64>>),
    Polygon(Vec<Vec<i64>>),
    MultiPolygon(Vec<Vec<Vec<i64>>>),
    GeometryCollection(&'a [GeometryObject]),
}

impl GeometryObject {
    pub fn shape(&self) -> Result<Shape<'_>> {
        let Some(kind) = self.kind.as_deref() else {
            return Ok(Shape::Null);
        };
        Ok(match kind {
            "Point" => Shape::Point(field(&self.coordinates, "coordinates", kind)?),
            "MultiPoint" => Shape::MultiPoint(field(&self.coordinates, "coordinates", kind)?),
            "LineString" => Shape::LineString(field(&self.arcs, "arcs", kind)?),
            "MultiLineString" => Shape::MultiLineString(field(&self.arcs, "arcs", kind)?),
            "Polygon" => Shape::Polygon(field(&self.arcs, "arcs", kind)?),
            "MultiPolygon" => Shape::MultiPolygon(field(&self.arcs, "arcs", kind)?),
            "GeometryCollection" => Shape::GeometryCollection(&self.geometries),
            other => {
                return Err(MapError::Topology(format!("unknown geometry type '{}'", other)));
            }
        })
    }
}

fn field<T: DeserializeOwned>(value: &Option<Value>, name: &str, kind: &str) -> Result<T> {
    let value = value
        .as_ref()
        .ok_or_else(|| MapError::Topology(format!("{} without '{}'", kind, name)))?;
    T::deserialize(value)
        .map_err(|e| MapError::Topology(format!("{} has malformed '{}': {}", kind, name, e)))
}

/// Parses a topology document and decodes every named object.
pub fn decode_str(json: &str) -> Result<GeoData> {
    let topology: Topology = serde_json::from_str(json)?;
    topology.into_geo_data()
}

impl Topology {
    pub fn into_geo_data(self) -> Result<GeoData> {
        let bbox = match self.bbox.as_deref() {
            Some([x0, y0, x1, y1, ..]) => Some(BoundingBox([*x0, *y0, *x1, *y1])),
            Some(other) => {
                return Err(MapError::Topology(format!(
                    "bbox needs four numbers, got {}",
                    other.len()
                )));
            }
            None => None,
        };
        let mut groups = HashMap::with_capacity(self.objects.len());
        for (name, object) in &self.objects {
            groups.insert(name.clone(), self.feature_collection(object)?);
        }
        Ok(GeoData { bbox, groups })
    }

    /// A GeometryCollection becomes one feature per member, anything else a single feature.
    pub fn feature_collection(&self, object: &GeometryObject) -> Result<FeatureCollection> {
        let features = match object.shape()? {
            Shape::GeometryCollection(geometries) => geometries
                .iter()
                .map(|g| self.feature(g))
                .collect::<Result<Vec<_>>>()?,
            _ => vec![self.feature(object)?],
        };
        Ok(FeatureCollection { features })
    }

    pub fn feature(&self, object: &GeometryObject) -> Result<Feature> {
        Ok(Feature {
            id: object.id.as_ref().and_then(id_text),
            geometry: self.geometry(object)?,
            properties: object.properties.clone().unwrap_or_default(),
        })
    }

    fn geometry(&self, object: &GeometryObject) -> Result<Option<Geometry<f64>>> {
        let geometry = match object.shape()? {
            Shape::Null => return Ok(None),
            Shape::Point(coordinates) => Point(self.point(&coordinates)?).into(),
            Shape::MultiPoint(coordinates) => MultiPoint(
                coordinates
                    .iter()
                    .map(|c| self.point(c).map(Point))
                    .collect::<Result<Vec<_>>>()?,
            )
            .into(),
            Shape::LineString(arcs) => self.line(&arcs)?.into(),
            Shape::MultiLineString(arcs) => MultiLineString(
                arcs.iter()
                    .map(|a| self.line(a))
                    .collect::<Result<Vec<_>>>()?,
            )
            .into(),
            Shape::Polygon(arcs) => self.polygon(&arcs)?.into(),
            Shape::MultiPolygon(arcs) => MultiPolygon(
                arcs.iter()
                    .map(|p| self.polygon(p))
                    .collect::<Result<Vec<_>>>()?,
            )
            .into(),
            Shape::GeometryCollection(geometries) => {
                let mut members = Vec::with_capacity(geometries.len());
                for g in geometries {
                    if let Some(geometry) = self.geometry(g)? {
                        members.push(geometry);
                    }
                }
                Geometry::GeometryCollection(GeometryCollection(members))
            }
        };
        Ok(Some(geometry))
    }

    /// Absolute position; quantized but never delta-encoded.
    fn point(&self, position: &[f64]) -> Result<Coord<f64>> {
        let [x, y] = xy(position)?;
        Ok(match self.transform {
            Some(t) => Coord {
                x: x * t.scale[0] + t.translate[0],
                y: y * t.scale[1] + t.translate[1],
            },
            None => Coord { x, y },
        })
    }

    /// Decoded positions of one arc, in stored order.
    fn arc(&self, index: usize) -> Result<Vec<Coord<f64>>> {
        let raw = self.arcs.get(index).ok_or_else(|| {
            MapError::Topology(format!(
                "arc {} out of range ({} arcs)",
                index,
                self.arcs.len()
            ))
        })?;
        let mut out = Vec::with_capacity(raw.len());
        match self.transform {
            Some(t) => {
                let (mut x, mut y) = (0.0, 0.0);
                for position in raw {
                    let [dx, dy] = xy(position)?;
                    x += dx;
                    y += dy;
                    out.push(Coord {
                        x: x * t.scale[0] + t.translate[0],
                        y: y * t.scale[1] + t.translate[1],
                    });
                }
            }
            None => {
                for position in raw {
                    let [x, y] = xy(position)?;
                    out.push(Coord { x, y });
                }
            }
        }
        Ok(out)
    }

    /// Stitches arcs end to end, dropping the shared joint between consecutive arcs.
    fn stitch(&self, arcs: &[i64]) -> Result<Vec<Coord<f64>>> {
        let mut points: Vec<Coord<f64>> = Vec::new();
        for &i in arcs {
            let (index, reversed) = if i < 0 { (!i, true) } else { (i, false) };
            let mut arc = self.arc(index as usize)?;
            if reversed {
                arc.reverse();
            }
            if !points.is_empty() {
                points.pop();
            }
            points.extend(arc);
        }
        Ok(points)
    }

    fn line(&self, arcs: &[i64]) -> Result<LineString<f64>> {
        let mut points = self.stitch(arcs)?;
        if points.len() == 1 {
            points.push(points[0]);
        }
        Ok(LineString(points))
    }

    fn ring(&self, arcs: &[i64]) -> Result<LineString<f64>> {
        let mut points = self.line(arcs)?.0;
        if let Some(&first) = points.first() {
            while points.len() < 4 {
                points.push(first);
            }
        }
        Ok(LineString(points))
    }

    fn polygon(&self, rings: &[Vec<i64>]) -> Result<Polygon<f64>> {
        let mut rings = rings.iter().map(|r| self.ring(r));
        let exterior = match rings.next() {
            Some(r) => r?,
            None => LineString(Vec::new()),
        };
        let interiors = rings.collect::<Result<Vec<_>>>()?;
        Ok(Polygon::new(exterior, interiors))
    }
}

fn xy(position: &[f64]) -> Result<[f64; 2]> {
    match position {
        [x, y, ..] => Ok([*x, *y]),
        _ => Err(MapError::Topology(format!(
            "position needs two ordinates, got {}",
            position.len()
        ))),
    }
}

fn id_text(id: &Value) -> Option<String> {
    match id {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
