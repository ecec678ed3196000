use foundation::time::Time;

/// Schedule-or-replace timer holding at most one pending deadline.
///
/// Driven by explicit [`Time`] values so it stays deterministic and
/// replayable: callers `schedule` on every trigger and `poll` when they get a
/// chance to run deferred work. Rapid triggers collapse into a single firing
/// `delay_s` after the last one.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Debouncer {
    delay_s: f64,
    deadline: Option<Time>,
}

impl Debouncer {
    pub fn new(delay_s: f64) -> Self {
        Self {
            delay_s: delay_s.max(0.0),
            deadline: None,
        }
    }

    pub fn delay_s(&self) -> f64 {
        self.delay_s
    }

    /// Replaces any pending deadline with `now + delay`.
    pub fn schedule(&mut self, now: Time) {
        self.deadline = Some(now.after(self.delay_s));
    }

    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Time> {
        self.deadline
    }

    /// Returns `true` exactly once per scheduled window, when `now` has
    /// reached the deadline.
    pub fn poll(&mut self, now: Time) -> bool {
        match self.deadline {
            Some(deadline) if now.0 >= deadline.0 => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Debouncer;
    use foundation::time::Time;

    #[test]
    fn fires_once_after_delay() {
        let mut d = Debouncer::new(1.0);
        d.schedule(Time(0.0));
        assert!(!d.poll(Time(0.5)));
        assert!(d.poll(Time(1.0)));
        assert!(!d.poll(Time(2.0)));
        assert!(!d.is_pending());
    }

    #[test]
    fn rescheduling_pushes_deadline_back() {
        let mut d = Debouncer::new(1.0);
        d.schedule(Time(0.0));
        d.schedule(Time(0.5));
        d.schedule(Time(0.75));
        assert!(!d.poll(Time(1.5)));
        assert_eq!(d.deadline(), Some(Time(1.75)));
        assert!(d.poll(Time(1.75)));
    }

    #[test]
    fn cancel_clears_pending() {
        let mut d = Debouncer::new(1.0);
        assert!(!d.cancel());
        d.schedule(Time(0.0));
        assert!(d.cancel());
        assert!(!d.poll(Time(5.0)));
    }

    #[test]
    fn negative_delay_is_clamped() {
        let mut d = Debouncer::new(-3.0);
        assert_eq!(d.delay_s(), 0.0);
        d.schedule(Time(1.0));
        assert!(d.poll(Time(1.0)));
    }
}
