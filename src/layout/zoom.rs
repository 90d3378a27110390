/// Turns continuous wheel/pinch deltas into whole zoom steps.
///
/// Deltas accumulate until they reach `units_per_step`; the remainder is
/// carried into the next event so slow gestures still zoom eventually.
/// Positive deltas zoom in.
#[derive(Debug, Clone)]
pub struct WheelQuantizer {
    units_per_step: f32,
    carry: f32,
}

impl WheelQuantizer {
    pub fn new(units_per_step: f32) -> Self {
        Self {
            units_per_step: units_per_step.abs().max(f32::EPSILON),
            carry: 0.0,
        }
    }

    /// Feeds one delta and returns the whole steps it completes (may be 0).
    pub fn feed(&mut self, delta: f32) -> i32 {
        if !delta.is_finite() {
            return 0;
        }
        self.carry += delta;
        let steps = (self.carry / self.units_per_step).trunc();
        self.carry -= steps * self.units_per_step;
        steps as i32
    }

    /// Drops any partial step, e.g. when a gesture ends.
    pub fn reset(&mut self) {
        self.carry = 0.0;
    }
}
