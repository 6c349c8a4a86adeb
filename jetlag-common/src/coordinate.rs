/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Build a coordinate that can be placed on the map.
    ///
    /// Returns `None` for non-finite components and for `(0, 0)`, which the
    /// geocoding step emits when it found nothing.
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        let coordinate = Self { lat, lng };
        coordinate.is_placeable().then_some(coordinate)
    }

    /// Build a coordinate from a `[lat, lng]` pair. Anything that isn't
    /// exactly two components is rejected.
    pub fn from_pair(pair: &[f64]) -> Option<Self> {
        match pair {
            [lat, lng] => Self::new(*lat, *lng),
            _ => None,
        }
    }

    /// Whether both components are finite and the point is not the null island.
    pub fn is_placeable(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite() && !(self.lat == 0.0 && self.lng == 0.0)
    }

    /// Rounding bucket at `precision` decimal places.
    pub fn bucket(&self, precision: u32) -> (i64, i64) {
        let scale = 10f64.powi(precision as i32);
        (
            (self.lat * scale).round() as i64,
            (self.lng * scale).round() as i64,
        )
    }

    /// Shift both components by `delta` degrees.
    pub fn offset_by(&self, delta: f64) -> Self {
        Self {
            lat: self.lat + delta,
            lng: self.lng + delta,
        }
    }

    /// Sidebar label, four significant digits per component.
    pub fn label(&self) -> String {
        format!("{}, {}", to_precision(self.lat, 4), to_precision(self.lng, 4))
    }

    /// Pointer readout, four decimal places per component.
    pub fn readout(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lng)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coordinate: Coordinate) -> Self {
        [coordinate.lat, coordinate.lng]
    }
}

/// Format with a fixed number of significant digits.
fn to_precision(value: f64, digits: i32) -> String {
    if value == 0.0 || !value.is_finite() {
        let decimals = (digits - 1).max(0) as usize;
        return format!("{value:.decimals$}");
    }
    let mut exponent = value.abs().log10().floor() as i32;
    let scale = 10f64.powi(digits - 1 - exponent);
    // Rounding can carry into a new leading digit (9.9999 -> 10.00)
    if (value.abs() * scale).round() >= 10f64.powi(digits) {
        exponent += 1;
    }
    let decimals = (digits - 1 - exponent).max(0) as usize;
    format!("{value:.decimals$}")
}
