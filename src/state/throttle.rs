// Leading + trailing throttle for resize events; the caller owns the timer.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThrottleDecision {
    /// Run now; the window just opened.
    RunNow,
    /// Schedule one trailing run after this many milliseconds.
    RunAfter(u32),
    /// A trailing run is already scheduled and will see the latest state.
    Coalesced,
}

#[derive(Debug, Clone)]
pub struct Throttle {
    interval_ms: f64,
    last_run: Option<f64>,
    trailing_pending: bool,
}

impl Throttle {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms as f64,
            last_run: None,
            trailing_pending: false,
        }
    }

    pub fn on_event(&mut self, now_ms: f64) -> ThrottleDecision {
        if self.trailing_pending {
            return ThrottleDecision::Coalesced;
        }
        match self.last_run {
            Some(last) if now_ms - last < self.interval_ms => {
                self.trailing_pending = true;
                let wait = (self.interval_ms - (now_ms - last)).ceil().max(0.0);
                ThrottleDecision::RunAfter(wait as u32)
            }
            _ => {
                self.last_run = Some(now_ms);
                ThrottleDecision::RunNow
            }
        }
    }

    /// Call when the scheduled trailing run fires.
    pub fn on_trailing(&mut self, now_ms: f64) {
        self.trailing_pending = false;
        self.last_run = Some(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_then_trailing() {
        let mut t = Throttle::new(250);
        assert_eq!(t.on_event(1000.0), ThrottleDecision::RunNow);
        assert_eq!(t.on_event(1010.0), ThrottleDecision::RunAfter(240));
        assert_eq!(t.on_event(1100.0), ThrottleDecision::Coalesced);
        assert_eq!(t.on_event(1200.0), ThrottleDecision::Coalesced);
        t.on_trailing(1250.0);
        // next burst inside the new window is deferred again
        assert_eq!(t.on_event(1300.0), ThrottleDecision::RunAfter(200));
    }

    #[test]
    fn quiet_period_runs_immediately() {
        let mut t = Throttle::new(250);
        assert_eq!(t.on_event(0.0), ThrottleDecision::RunNow);
        assert_eq!(t.on_event(250.0), ThrottleDecision::RunNow);
        assert_eq!(t.on_event(900.0), ThrottleDecision::RunNow);
    }

    #[test]
    fn never_more_than_one_run_per_interval() {
        let mut t = Throttle::new(250);
        let mut runs: Vec<f64> = Vec::new();
        let mut scheduled: Option<f64> = None;
        let mut now = 0.0;
        while now < 3000.0 {
            if let Some(at) = scheduled {
                if now >= at {
                    t.on_trailing(now);
                    runs.push(now);
                    scheduled = None;
                }
            }
            match t.on_event(now) {
                ThrottleDecision::RunNow => runs.push(now),
                ThrottleDecision::RunAfter(ms) => scheduled = Some(now + ms as f64),
                ThrottleDecision::Coalesced => {}
            }
            now += 16.0;
        }
        // events stopped; let the trailing run fire
        if let Some(at) = scheduled {
            t.on_trailing(at);
            runs.push(at);
        }
        for pair in runs.windows(2) {
            assert!(pair[1] - pair[0] >= 250.0 - 1e-9, "{:?}", pair);
        }
        // the last event was covered by a run at or after it
        assert!(*runs.last().unwrap() >= now - 16.0);
    }
}
