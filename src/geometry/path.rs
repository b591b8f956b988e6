//! SVG path generation for projected geometries.

use geo_types::{Coord, Geometry, LineString, Polygon};
use std::fmt::Write;

use super::projection::Projection;
use crate::util::fmt_num;

/// Builds SVG `d` strings for geometries through a projection.
///
/// Points (and the members of multi-points) are drawn as circles of
/// `point_radius` pixels.
pub struct PathGenerator<'a, P: Projection + ?Sized> {
    projection: &'a P,
    point_radius: f64,
}

impl<'a, P: Projection + ?Sized> PathGenerator<'a, P> {
    pub fn new(projection: &'a P, point_radius: f64) -> Self {
        Self {
            projection,
            point_radius,
        }
    }

    pub fn d(&self, geometry: &Geometry<f64>) -> String {
        let mut out = String::new();
        self.write_geometry(&mut out, geometry);
        out
    }

    /// Total drawn length in pixels; moves between subpaths do not count.
    pub fn length(&self, geometry: &Geometry<f64>) -> f64 {
        match geometry {
            Geometry::Point(_) => self.circle_length(),
            Geometry::MultiPoint(mp) => self.circle_length() * mp.0.len() as f64,
            Geometry::Line(l) => self.line_length(&[l.start, l.end], false),
            Geometry::LineString(ls) => self.line_length(&ls.0, false),
            Geometry::MultiLineString(mls) => {
                mls.0.iter().map(|ls| self.line_length(&ls.0, false)).sum()
            }
            Geometry::Polygon(p) => self.polygon_length(p),
            Geometry::MultiPolygon(mp) => mp.0.iter().map(|p| self.polygon_length(p)).sum(),
            Geometry::GeometryCollection(gc) => gc.0.iter().map(|g| self.length(g)).sum(),
            Geometry::Rect(r) => self.polygon_length(&r.to_polygon()),
            Geometry::Triangle(t) => self.polygon_length(&t.to_polygon()),
        }
    }

    fn write_geometry(&self, out: &mut String, geometry: &Geometry<f64>) {
        match geometry {
            Geometry::Point(p) => self.write_point(out, p.0),
            Geometry::MultiPoint(mp) => {
                for p in &mp.0 {
                    self.write_point(out, p.0);
                }
            }
            Geometry::Line(l) => self.write_line(out, &[l.start, l.end], false),
            Geometry::LineString(ls) => self.write_line(out, &ls.0, false),
            Geometry::MultiLineString(mls) => {
                for ls in &mls.0 {
                    self.write_line(out, &ls.0, false);
                }
            }
            Geometry::Polygon(p) => self.write_polygon(out, p),
            Geometry::MultiPolygon(mp) => {
                for p in &mp.0 {
                    self.write_polygon(out, p);
                }
            }
            Geometry::GeometryCollection(gc) => {
                for g in &gc.0 {
                    self.write_geometry(out, g);
                }
            }
            Geometry::Rect(r) => self.write_polygon(out, &r.to_polygon()),
            Geometry::Triangle(t) => self.write_polygon(out, &t.to_polygon()),
        }
    }

    fn write_point(&self, out: &mut String, c: Coord<f64>) {
        let p = self.projection.project(c);
        let r = self.point_radius;
        let _ = write!(
            out,
            "M{},{}m0,{}a{},{} 0 1,1 0,{}a{},{} 0 1,1 0,{}Z",
            fmt_num(p.x),
            fmt_num(p.y),
            fmt_num(r),
            fmt_num(r),
            fmt_num(r),
            fmt_num(-2.0 * r),
            fmt_num(r),
            fmt_num(r),
            fmt_num(2.0 * r),
        );
    }

    fn write_line(&self, out: &mut String, coords: &[Coord<f64>], closed: bool) {
        for (i, c) in coords.iter().enumerate() {
            let p = self.projection.project(*c);
            let cmd = if i == 0 { 'M' } else { 'L' };
            let _ = write!(out, "{}{},{}", cmd, fmt_num(p.x), fmt_num(p.y));
        }
        if closed && !coords.is_empty() {
            out.push('Z');
        }
    }

    fn write_polygon(&self, out: &mut String, polygon: &Polygon<f64>) {
        for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors()) {
            self.write_line(out, open_ring(ring), true);
        }
    }

    fn line_length(&self, coords: &[Coord<f64>], closed: bool) -> f64 {
        let projected: Vec<Coord<f64>> = coords.iter().map(|c| self.projection.project(*c)).collect();
        let mut total: f64 = projected
            .windows(2)
            .map(|w| (w[1].x - w[0].x).hypot(w[1].y - w[0].y))
            .sum();
        if closed {
            if let (Some(first), Some(last)) = (projected.first(), projected.last()) {
                total += (first.x - last.x).hypot(first.y - last.y);
            }
        }
        total
    }

    fn polygon_length(&self, polygon: &Polygon<f64>) -> f64 {
        std::iter::once(polygon.exterior())
            .chain(polygon.interiors())
            .map(|ring| self.line_length(open_ring(ring), true))
            .sum()
    }

    fn circle_length(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.point_radius
    }
}

/// Ring coordinates without the repeated closing position; `Z` draws that edge.
fn open_ring(ring: &LineString<f64>) -> &[Coord<f64>] {
    let coords = ring.0.as_slice();
    match (coords.first(), coords.last()) {
        (Some(first), Some(last)) if coords.len() > 1 && first == last => {
            &coords[..coords.len() - 1]
        }
        _ => coords,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{LineString, Point, polygon};

    /// Pixels equal degrees, y flipped like a screen.
    struct Flip;

    impl Projection for Flip {
        fn project(&self, c: Coord<f64>) -> Coord<f64> {
            Coord { x: c.x, y: -c.y }
        }
        fn invert(&self, p: Coord<f64>) -> Coord<f64> {
            Coord { x: p.x, y: -p.y }
        }
    }

    #[test]
    fn line_string_path() {
        let paths = PathGenerator::new(&Flip, 1.0);
        let ls: Geometry<f64> = LineString::from(vec![(0.0, 0.0), (3.0, 4.0), (3.0, 10.0)]).into();
        assert_eq!(paths.d(&ls), "M0,0L3,-4L3,-10");
        assert!((paths.length(&ls) - 11.0).abs() < 1e-9);
    }

    #[test]
    fn polygon_path_is_closed_once() {
        let paths = PathGenerator::new(&Flip, 1.0);
        let square: Geometry<f64> =
            polygon![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 2.0), (x: 0.0, y: 2.0)].into();
        assert_eq!(paths.d(&square), "M0,0L2,0L2,-2L0,-2Z");
        assert!((paths.length(&square) - 8.0).abs() < 1e-9);
    }

    #[test]
    fn point_is_a_circle() {
        let paths = PathGenerator::new(&Flip, 1.5);
        let p: Geometry<f64> = Point::new(10.0, 20.0).into();
        assert_eq!(paths.d(&p), "M10,-20m0,1.5a1.5,1.5 0 1,1 0,-3a1.5,1.5 0 1,1 0,3Z");
        assert!((paths.length(&p) - 3.0 * std::f64::consts::PI).abs() < 1e-9);
    }
}
