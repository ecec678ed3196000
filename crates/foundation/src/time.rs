/// Time primitives
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Default)]
pub struct Time(pub f64); // seconds

impl Time {
    pub fn after(self, seconds: f64) -> Self {
        Time(self.0 + seconds)
    }

    /// Seconds elapsed since `earlier`, never negative.
    pub fn since(self, earlier: Time) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }

    /// Whole milliseconds, the resolution used for cache-busting stamps.
    pub fn as_millis(self) -> u64 {
        (self.0.max(0.0) * 1000.0).round() as u64
    }
}
