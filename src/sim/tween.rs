//! Time-based interpolation of a single value
//!
//! Enemies shrink smoothly after a hit instead of snapping to the new radius.

/// Easing curves, `t` in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Decelerating quadratic (`1 - (1 - t)^2`)
    #[default]
    QuadOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// Interpolates from `from` to `to` over `duration` seconds
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub duration: f32,
    pub elapsed: f32,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
            easing: Easing::default(),
        }
    }

    /// Current interpolated value
    pub fn value(&self) -> f32 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = self.easing.apply(self.elapsed / self.duration);
        self.from + (self.to - self.from) * t
    }

    /// Advance by `dt` seconds and return the new value
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration.max(0.0));
        self.value()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
