//! Map projection between geographic (lon, lat) degrees and SVG pixels.

use geo_types::Coord;

/// A forward map from (lon, lat) to pixels together with its inverse.
pub trait Projection {
    fn project(&self, lon_lat: Coord<f64>) -> Coord<f64>;
    fn invert(&self, pixel: Coord<f64>) -> Coord<f64>;
}

/// Cylindrical equal-area projection with a configurable standard parallel.
///
/// Pixel y grows downward. `center` is the geographic point that lands on
/// `translate`.
#[derive(Debug, Clone, PartialEq)]
pub struct CylindricalEqualArea {
    cos_parallel: f64,
    scale: f64,
    translate: Coord<f64>,
    center: Coord<f64>,
    /// Raw (unscaled) projected center, cached for each call.
    raw_center: Coord<f64>,
}

impl CylindricalEqualArea {
    /// Standard parallel used by the d3 `cylindricalEqualArea` default.
    pub const DEFAULT_PARALLEL: f64 = 38.58;

    pub fn new(parallel_deg: f64) -> Self {
        let mut p = Self {
            cos_parallel: parallel_deg.to_radians().cos(),
            scale: 150.0,
            translate: Coord { x: 480.0, y: 250.0 },
            center: Coord { x: 0.0, y: 0.0 },
            raw_center: Coord { x: 0.0, y: 0.0 },
        };
        p.raw_center = p.raw(p.center);
        p
    }

    pub fn center(mut self, lon: f64, lat: f64) -> Self {
        self.center = Coord { x: lon, y: lat };
        self.raw_center = self.raw(self.center);
        self
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn translate(mut self, x: f64, y: f64) -> Self {
        self.translate = Coord { x, y };
        self
    }

    pub fn map_scale(&self) -> f64 {
        self.scale
    }

    fn raw(&self, c: Coord<f64>) -> Coord<f64> {
        Coord {
            x: c.x.to_radians() * self.cos_parallel,
            y: c.y.to_radians().sin() / self.cos_parallel,
        }
    }

    fn raw_invert(&self, c: Coord<f64>) -> Coord<f64> {
        Coord {
            x: (c.x / self.cos_parallel).to_degrees(),
            y: (c.y * self.cos_parallel).clamp(-1.0, 1.0).asin().to_degrees(),
        }
    }
}

impl Default for CylindricalEqualArea {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PARALLEL)
    }
}

impl Projection for CylindricalEqualArea {
    fn project(&self, lon_lat: Coord<f64>) -> Coord<f64> {
        let r = self.raw(lon_lat);
        Coord {
            x: self.translate.x + self.scale * (r.x - self.raw_center.x),
            y: self.translate.y - self.scale * (r.y - self.raw_center.y),
        }
    }

    fn invert(&self, pixel: Coord<f64>) -> Coord<f64> {
        let r = Coord {
            x: (pixel.x - self.translate.x) / self.scale + self.raw_center.x,
            y: -(pixel.y - self.translate.y) / self.scale + self.raw_center.y,
        };
        self.raw_invert(r)
    }
}
