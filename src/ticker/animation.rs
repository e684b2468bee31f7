// Per-frame exponential smoothing toward a target value.

/// Default fraction of the remaining distance covered per frame.
pub const DEFAULT_SMOOTHING: f64 = 0.15;

/// Distance under which the display snaps to the target.
pub const SETTLE_EPSILON: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedNumber {
    display: f64,
    target: f64,
}

impl AnimatedNumber {
    /// Starts settled at `value`.
    pub fn new(value: f64) -> Self {
        Self {
            display: value,
            target: value,
        }
    }

    pub fn display(&self) -> f64 {
        self.display
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.display == self.target || (self.display.is_nan() && self.target.is_nan())
    }

    /// Changes the target; the displayed value continues from where it is.
    pub fn retarget(&mut self, target: f64) {
        self.target = target;
        if !self.display.is_finite() {
            self.display = target;
        }
    }

    /// Jumps straight to the target (reduced motion).
    pub fn settle(&mut self) {
        self.display = self.target;
    }

    /// Advances one frame. Returns true once settled.
    pub fn step(&mut self, smoothing: f64) -> bool {
        let delta = self.target - self.display;
        if !delta.is_finite() || delta.abs() < SETTLE_EPSILON {
            self.display = self.target;
        } else {
            self.display += delta * smoothing;
        }
        self.is_settled()
    }
}
