use geo_types::Coord;

use super::projection::Projection;

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Point reached from `start` (lon, lat degrees) after travelling `distance_miles`
/// along the great circle leaving at `bearing_deg` (clockwise from north).
pub fn destination_point(start: Coord<f64>, bearing_deg: f64, distance_miles: f64) -> Coord<f64> {
    let delta = distance_miles / EARTH_RADIUS_MILES;
    let theta = bearing_deg.to_radians();
    let phi1 = start.y.to_radians();
    let lambda1 = start.x.to_radians();

    let phi2 = (phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos()).asin();
    let lambda2 = lambda1
        + (theta.sin() * delta.sin() * phi1.cos()).atan2(delta.cos() - phi1.sin() * phi2.sin());

    Coord {
        x: lambda2.to_degrees(),
        y: phi2.to_degrees(),
    }
}

/// Pixel end of a scale bar starting at `start` and spanning `distance_miles` due east.
pub fn calculate_scale_bar_end_point<P: Projection + ?Sized>(
    projection: &P,
    start: Coord<f64>,
    distance_miles: f64,
) -> Coord<f64> {
    let start_geo = projection.invert(start);
    let end_geo = destination_point(start_geo, 90.0, distance_miles);
    projection.project(end_geo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::projection::CylindricalEqualArea;

    fn map() -> CylindricalEqualArea {
        CylindricalEqualArea::default()
            .center(-64.0, 28.5)
            .scale(600.0)
            .translate(600.0, 338.0)
    }

    fn close(a: Coord<f64>, b: Coord<f64>, tol: f64) -> bool {
        (a.x - b.x).abs() < tol && (a.y - b.y).abs() < tol
    }

    #[test]
    fn zero_distance_returns_start() {
        let proj = map();
        let start = Coord { x: 10.0, y: 640.0 };
        let end = calculate_scale_bar_end_point(&proj, start, 0.0);
        assert!(close(start, end, 1e-6), "{end:?}");
    }

    #[test]
    fn east_then_west_along_equator_returns() {
        let proj = map();
        let start = proj.project(Coord { x: -100.0, y: 0.0 });
        for d in [10.0, 1000.0, 5000.0] {
            let east = calculate_scale_bar_end_point(&proj, start, d);
            assert!(east.x > start.x);
            let back = calculate_scale_bar_end_point(&proj, east, -d);
            assert!(close(start, back, 1e-6), "d={d}: {back:?}");
        }
    }

    #[test]
    fn short_round_trip_off_equator_stays_within_a_pixel() {
        let proj = map();
        let start = Coord { x: 10.0, y: 640.0 };
        let east = calculate_scale_bar_end_point(&proj, start, 10.0);
        let back = calculate_scale_bar_end_point(&proj, east, -10.0);
        assert!(close(start, back, 0.5), "{back:?}");
    }

    #[test]
    fn quarter_circumference_along_equator() {
        let quarter = std::f64::consts::FRAC_PI_2 * EARTH_RADIUS_MILES;
        let end = destination_point(Coord { x: 0.0, y: 0.0 }, 90.0, quarter);
        assert!(close(end, Coord { x: 90.0, y: 0.0 }, 1e-9), "{end:?}");
    }

    #[test]
    fn eastward_bar_grows_with_distance() {
        let proj = map();
        let start = Coord { x: 10.0, y: 640.0 };
        let short = calculate_scale_bar_end_point(&proj, start, 500.0);
        let long = calculate_scale_bar_end_point(&proj, start, 1000.0);
        assert!(long.x > short.x && short.x > start.x);
    }
}
