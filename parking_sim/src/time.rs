//! Frame clock to fixed-interval tick conversion

/// Accumulates frame time and hands out whole ticks of a fixed interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timer {
    /// Tick interval [s]
    interval: f32,
    accumulated: f32,
}

impl Timer {
    /// Upper bound on ticks returned by one [`advance`](Self::advance), so a
    /// stalled frame doesn't fast-forward the whole run
    pub const MAX_TICKS_PER_ADVANCE: u32 = 10;

    pub fn from_millis(interval_ms: u32) -> Self {
        Self {
            interval: interval_ms.max(1) as f32 / 1000.0,
            accumulated: 0.0,
        }
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Add `dt` seconds and return how many ticks have elapsed
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulated += dt.max(0.0);
        let ticks = (self.accumulated / self.interval).floor();
        self.accumulated -= ticks * self.interval;
        if ticks > Self::MAX_TICKS_PER_ADVANCE as f32 {
            tracing::trace!(ticks, "frame clock fell behind, dropping ticks");
            Self::MAX_TICKS_PER_ADVANCE
        } else {
            ticks as u32
        }
    }

    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }
}
