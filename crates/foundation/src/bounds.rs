use serde::{Deserialize, Serialize};

/// Geographic position in degrees.
///
/// Serialized as a `[lat, lon]` pair, the shape map configurations use.
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lon: f64) -> Self {
        LatLng { lat, lon }
    }
}

impl From<[f64; 2]> for LatLng {
    fn from(v: [f64; 2]) -> Self {
        LatLng::new(v[0], v[1])
    }
}

impl From<LatLng> for [f64; 2] {
    fn from(v: LatLng) -> Self {
        [v.lat, v.lon]
    }
}

/// South-west / north-east corner pair.
///
/// Serialized as `[[sw_lat, sw_lon], [ne_lat, ne_lon]]`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[LatLng; 2]", into = "[LatLng; 2]")]
pub struct LatLngBounds {
    pub sw: LatLng,
    pub ne: LatLng,
}

impl LatLngBounds {
    pub const fn new(sw: LatLng, ne: LatLng) -> Self {
        LatLngBounds { sw, ne }
    }

    /// Arithmetic midpoint of the two corners.
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.sw.lat + self.ne.lat) / 2.0,
            (self.sw.lon + self.ne.lon) / 2.0,
        )
    }
}

impl From<[LatLng; 2]> for LatLngBounds {
    fn from(v: [LatLng; 2]) -> Self {
        LatLngBounds::new(v[0], v[1])
    }
}

impl From<LatLngBounds> for [LatLng; 2] {
    fn from(v: LatLngBounds) -> Self {
        [v.sw, v.ne]
    }
}

/// Viewport size in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: f64,
    pub height: f64,
}

impl PixelSize {
    pub const fn new(width: f64, height: f64) -> Self {
        PixelSize { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::{LatLng, LatLngBounds};

    #[test]
    fn center_is_corner_midpoint() {
        let b = LatLngBounds::new(LatLng::new(10.0, -20.0), LatLng::new(30.0, 40.0));
        assert_eq!(b.center(), LatLng::new(20.0, 10.0));
    }

    #[test]
    fn serializes_as_nested_pairs() {
        let b = LatLngBounds::new(LatLng::new(1.0, 2.0), LatLng::new(3.0, 4.0));
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(json, "[[1.0,2.0],[3.0,4.0]]");
        let back: LatLngBounds = serde_json::from_str(&json).unwrap();
        assert_eq!(back, b);
    }
}
