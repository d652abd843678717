use std::time::{Duration, Instant};

/// Tick source driven by the game loop. The loop only starts and stops it;
/// whoever owns the real clock decides when a tick is due.
pub trait Scheduler {
    fn start(&mut self);
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

/// Fires once per `period` while running. Missed ticks are dropped, the next
/// deadline is always measured from the tick that fired.
#[derive(Debug, Clone)]
pub struct FixedInterval {
    period: Duration,
    deadline: Option<Instant>,
}

impl FixedInterval {
    pub fn new(period: Duration) -> Self {
        FixedInterval {
            period,
            deadline: None,
        }
    }

    /// Returns true if a tick is due at `now` and re-arms for `now + period`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = Some(now + self.period);
                true
            }
            _ => false,
        }
    }
}

impl Scheduler for FixedInterval {
    fn start(&mut self) {
        self.deadline = Some(Instant::now() + self.period);
    }

    fn stop(&mut self) {
        self.deadline = None;
    }

    fn is_running(&self) -> bool {
        self.deadline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_never_fires() {
        let mut timer = FixedInterval::new(Duration::from_millis(70));
        assert!(!timer.is_running());
        assert!(!timer.poll(Instant::now() + Duration::from_secs(10)));
    }

    #[test]
    fn test_fires_after_period() {
        let mut timer = FixedInterval::new(Duration::from_millis(70));
        let started = Instant::now();
        timer.start();
        assert!(timer.is_running());
        assert!(!timer.poll(started));
        assert!(timer.poll(started + Duration::from_millis(200)));
    }

    #[test]
    fn test_no_catch_up() {
        let mut timer = FixedInterval::new(Duration::from_millis(70));
        timer.start();
        let late = Instant::now() + Duration::from_secs(1);
        assert!(timer.poll(late));
        assert!(!timer.poll(late));
        assert!(!timer.poll(late + Duration::from_millis(69)));
        assert!(timer.poll(late + Duration::from_millis(70)));
    }

    #[test]
    fn test_stop_disarms() {
        let mut timer = FixedInterval::new(Duration::from_millis(70));
        timer.start();
        timer.stop();
        assert!(!timer.is_running());
        assert!(!timer.poll(Instant::now() + Duration::from_secs(1)));
    }
}
