use std::f64::consts::PI;

use crate::bounds::LatLng;

/// WGS84 semi-major axis (meters), the sphere radius of EPSG:3857.
pub const WGS84_A: f64 = 6_378_137.0;
/// Latitude where spherical Mercator turns the world into a square.
pub const MAX_LATITUDE: f64 = 85.051_128_779_8;
/// Pixel size of the world at zoom 0.
pub const TILE_SIZE: f64 = 256.0;

/// Pixel coordinates in the global (EPSG:3857) pixel space of a zoom level.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// World width in pixels at `zoom`; doubles with every level.
pub fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * 2f64.powf(zoom)
}

/// Spherical Mercator projection to meters. Latitude is clamped to
/// [`MAX_LATITUDE`].
pub fn project(ll: LatLng) -> (f64, f64) {
    let lat = ll.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = WGS84_A * ll.lon.to_radians();
    let y = WGS84_A * (PI / 4.0 + lat / 2.0).tan().ln();
    (x, y)
}

pub fn unproject(x: f64, y: f64) -> LatLng {
    let lon = (x / WGS84_A).to_degrees();
    let lat = (2.0 * (y / WGS84_A).exp().atan() - PI / 2.0).to_degrees();
    LatLng::new(lat, lon)
}

/// Lat/lon to global pixel coordinates at `zoom` (origin top-left).
pub fn latlng_to_point(ll: LatLng, zoom: f64) -> PixelPoint {
    let (x, y) = project(ll);
    let k = 0.5 / (PI * WGS84_A);
    let scale = world_size(zoom);
    PixelPoint::new(scale * (k * x + 0.5), scale * (-k * y + 0.5))
}

pub fn point_to_latlng(p: PixelPoint, zoom: f64) -> LatLng {
    let k = 0.5 / (PI * WGS84_A);
    let scale = world_size(zoom);
    let x = (p.x / scale - 0.5) / k;
    let y = (p.y / scale - 0.5) / -k;
    unproject(x, y)
}
