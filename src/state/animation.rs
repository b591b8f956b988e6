// Stroke-dash reveal timing for track paths
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackAnimation {
    /// Drawn path length in pixels.
    pub length: f64,
    pub duration_ms: f64,
}

impl TrackAnimation {
    /// Duration scales with the path length and shrinks as the map zooms in.
    pub fn for_path(length: f64, map_scale: f64, ms_per_unit: f64) -> Self {
        Self {
            length,
            duration_ms: length * (1.0 / map_scale) * ms_per_unit,
        }
    }

    /// `"L L"`: one dash exactly as long as the path, one gap as long again.
    pub fn dash_array(&self) -> String {
        let l = crate::util::fmt_num(self.length);
        format!("{} {}", l, l)
    }

    /// Linear ease from fully hidden (offset = length) to fully drawn (offset = 0).
    pub fn dash_offset_at(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 0.0;
        }
        let t = (elapsed_ms / self.duration_ms).clamp(0.0, 1.0);
        self.length * (1.0 - t)
    }

    pub fn is_finished(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_formula() {
        let a = TrackAnimation::for_path(300.0, 600.0, 1200.0);
        assert!((a.duration_ms - 600.0).abs() < 1e-9);
    }

    #[test]
    fn offset_is_linear_and_clamped() {
        let a = TrackAnimation {
            length: 200.0,
            duration_ms: 1000.0,
        };
        assert_eq!(a.dash_offset_at(-5.0), 200.0);
        assert_eq!(a.dash_offset_at(0.0), 200.0);
        assert!((a.dash_offset_at(250.0) - 150.0).abs() < 1e-9);
        assert!((a.dash_offset_at(500.0) - 100.0).abs() < 1e-9);
        assert_eq!(a.dash_offset_at(1000.0), 0.0);
        assert_eq!(a.dash_offset_at(5000.0), 0.0);
        assert!(!a.is_finished(999.0));
        assert!(a.is_finished(1000.0));
    }

    #[test]
    fn zero_length_finishes_immediately() {
        let a = TrackAnimation::for_path(0.0, 600.0, 1200.0);
        assert_eq!(a.dash_offset_at(0.0), 0.0);
        assert!(a.is_finished(0.0));
    }

    #[test]
    fn dash_array_repeats_length() {
        let a = TrackAnimation::for_path(123.4567, 600.0, 1200.0);
        assert_eq!(a.dash_array(), "123.457 123.457");
    }
}
