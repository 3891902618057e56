//! Two-arc S-curve for reverse parallel parking
//!
//! The curve consists of two circular arcs of radius `a` joined tangentially:
//! ```text
//! y(x) = -sqrt(2ax - x^2)              for 0 <= x <= b
//! y(x) = 2 y(b) + sqrt(2au - u^2)      for b < x <= 2b, u = 2b - x
//! ```
//! The first arc is centred at `(a, 0)` and leaves the origin tangent to the
//! lateral axis. The second arc is the point reflection of the first through
//! the inflection `(b, y(b))`, so the curve ends at `x = 2b` tangent to the
//! lateral axis again, `2b` being the distance to the slot's center.
//!
//! Below `x = 0` the curve continues point-symmetric through the origin,
//! `y(-x) = -y(x)`, so the tangent stays continuous when a pose is seeded from
//! a negative frame.

use super::{ParamSlots, PathProvider};
use crate::error::Result;

/// Closed-form two-arc path
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TwoArcPath {
    params: ParamSlots,
}

impl TwoArcPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point on the first arc, `x` measured from its start
    fn arc(a: f32, x: f32) -> f32 {
        (2.0 * a * x - x * x).max(0.0).sqrt()
    }

    /// The curve on `[0, 2b]`
    fn forward(a: f32, b: f32, x: f32) -> f32 {
        if x <= b {
            -Self::arc(a, x)
        } else {
            let inflection = -Self::arc(a, b);
            2.0 * inflection + Self::arc(a, 2.0 * b - x)
        }
    }
}

impl PathProvider for TwoArcPath {
    fn name(&self) -> &str {
        "two-arc"
    }

    fn configure_primary(&mut self, a: f32) {
        self.params.set_primary(a);
    }

    fn configure_offset(&mut self, b: f32) {
        self.params.set_offset(b);
    }

    /// Past `2b` the curve holds its end value; below `-2b` it holds the
    /// mirrored one.
    fn evaluate(&self, x: f32) -> Result<f32> {
        let (a, b) = self.params.require(self.name())?;
        let end = (2.0 * b).max(0.0);
        let x = x.clamp(-end, end);

        if x < 0.0 {
            return Ok(-Self::forward(a, b, -x));
        }
        Ok(Self::forward(a, b, x))
    }
}
