use std::time::{Duration, Instant};

/// Spaces frames out to hit a target frame rate.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Option<Duration>,
    next_frame: Instant,
}

impl FramePacer {
    /// `target_fps == 0` disables pacing.
    pub fn new(target_fps: u32, now: Instant) -> Self {
        let interval = (target_fps > 0).then(|| Duration::from_secs_f64(1.0 / target_fps as f64));
        FramePacer { interval, next_frame: now }
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.interval.map(|_| self.next_frame)
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.interval.is_none() || now >= self.next_frame
    }

    /// Schedules the frame after the one drawn at `now`.
    pub fn advance(&mut self, now: Instant) {
        let Some(interval) = self.interval else {
            return;
        };
        self.next_frame += interval;
        // More than a whole interval behind: don't burst to catch up.
        if self.next_frame <= now {
            self.next_frame = now + interval;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_for_120_fps() {
        let pacer = FramePacer::new(120, Instant::now());
        let interval = pacer.interval().unwrap();
        assert!((interval.as_secs_f64() - 1.0 / 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_first_frame_is_due_immediately() {
        let now = Instant::now();
        let pacer = FramePacer::new(60, now);
        assert!(pacer.is_due(now));
        assert_eq!(pacer.deadline(), Some(now));
    }

    #[test]
    fn test_advance_moves_deadline_by_one_interval() {
        let start = Instant::now();
        let mut pacer = FramePacer::new(100, start);
        pacer.advance(start);
        let step = Duration::from_millis(10);
        assert_eq!(pacer.deadline(), Some(start + step));
        assert!(!pacer.is_due(start + Duration::from_millis(5)));
        assert!(pacer.is_due(start + step));

        pacer.advance(start + step + Duration::from_millis(1));
        assert_eq!(pacer.deadline(), Some(start + step * 2));
    }

    #[test]
    fn test_late_frame_reanchors_deadline() {
        let start = Instant::now();
        let mut pacer = FramePacer::new(100, start);
        let late = start + Duration::from_millis(250);
        pacer.advance(late);
        assert_eq!(pacer.deadline(), Some(late + Duration::from_millis(10)));
    }

    #[test]
    fn test_unpaced_is_always_due() {
        let now = Instant::now();
        let mut pacer = FramePacer::new(0, now);
        assert_eq!(pacer.interval(), None);
        assert_eq!(pacer.deadline(), None);
        pacer.advance(now);
        assert!(pacer.is_due(now));
    }
}
