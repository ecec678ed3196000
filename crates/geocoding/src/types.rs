use foundation::bounds::LatLng;
use serde::{Deserialize, Serialize};

/// Kind of place a result names.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceType {
    Country,
    Region,
    #[serde(rename = "postal-area")]
    PostalArea,
    LocalAdmin,
    Locality,
    Neighbourhood,
    Address,
    Venue,
}

impl PlaceType {
    /// Maps a Mapbox `place_type` entry; unknown kinds are venues.
    pub fn from_mapbox(kind: &str) -> Self {
        match kind {
            "country" => PlaceType::Country,
            "region" => PlaceType::Region,
            "postcode" => PlaceType::PostalArea,
            "district" => PlaceType::LocalAdmin,
            "locality" => PlaceType::Locality,
            "neighborhood" => PlaceType::Neighbourhood,
            "address" => PlaceType::Address,
            _ => PlaceType::Venue,
        }
    }
}

/// Extent of a result. Filled positionally from the provider's four-number
/// `bbox`, so `south`/`north` carry its first and third entries.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl From<[f64; 4]> for BoundingBox {
    fn from(b: [f64; 4]) -> Self {
        BoundingBox {
            south: b[0],
            west: b[1],
            north: b[2],
            east: b[3],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodeResult {
    pub center: LatLng,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,
    #[serde(rename = "type")]
    pub place_type: PlaceType,
}
