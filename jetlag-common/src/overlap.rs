use std::collections::HashMap;

use crate::Coordinate;

/// Something with a position the overlap resolver may move.
pub trait Positioned {
    /// Current position, or `None` when the handle has nothing usable.
    fn position(&self) -> Option<Coordinate>;
    fn set_position(&mut self, position: Coordinate);
}

/// Separates points that land in the same rounding bucket.
///
/// Points are bucketed by rounding to `precision` decimal places. Walking the
/// input in order, the k-th point that lands in an already occupied bucket is
/// shifted by `k * step` degrees on both axes. The result only depends on the
/// input order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapResolver {
    precision: u32,
    step: f64,
}

impl Default for OverlapResolver {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PRECISION, Self::DEFAULT_STEP)
    }
}

impl OverlapResolver {
    /// Four decimal places, roughly 11 m at the equator.
    pub const DEFAULT_PRECISION: u32 = 4;
    pub const DEFAULT_STEP: f64 = 1e-4;
    /// Beyond this the scaled coordinates no longer fit a bucket key.
    pub const MAX_PRECISION: u32 = 10;

    /// `precision` is capped at [`Self::MAX_PRECISION`].
    pub fn new(precision: u32, step: f64) -> Self {
        Self {
            precision: precision.min(Self::MAX_PRECISION),
            step,
        }
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Shift colliding points in place. Returns how many points were moved.
    ///
    /// Handles without a placeable position are skipped.
    pub fn resolve<P: Positioned>(&self, points: &mut [P]) -> usize {
        let mut seen: HashMap<(i64, i64), u32> = HashMap::new();
        let mut moved = 0;

        for point in points.iter_mut() {
            let Some(position) = point.position().filter(Coordinate::is_placeable) else {
                continue;
            };
            let count = seen.entry(position.bucket(self.precision)).or_insert(0);
            let k = *count;
            *count += 1;
            if k > 0 {
                point.set_position(position.offset_by(f64::from(k) * self.step));
                moved += 1;
            }
        }

        moved
    }
}

/// Resolve overlaps with the default precision and step.
pub fn resolve_overlaps<P: Positioned>(points: &mut [P]) -> usize {
    OverlapResolver::default().resolve(points)
}
