use std::fmt;

use foundation::bounds::{LatLng, LatLngBounds};
use layers::Layer;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ZOOM: u8 = 3;
pub const DEFAULT_MIN_ZOOM: u8 = 0;
pub const DEFAULT_MAX_ZOOM: u8 = 20;

/// Mapping library a view renders through.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Leaflet,
    GoogleMaps,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Leaflet => write!(f, "leaflet"),
            Provider::GoogleMaps => write!(f, "googlemaps"),
        }
    }
}

/// Serializable map state, used both as configuration input and as the
/// snapshot handed to a [`MapStore`](crate::MapStore).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapOptions {
    pub center: LatLng,
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub provider: Provider,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
    /// Last viewport bounds reported by a view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<LatLngBounds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<LatLngBounds>,
    pub layers: Vec<Layer>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            center: LatLng::new(0.0, 0.0),
            zoom: DEFAULT_ZOOM,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            provider: Provider::Leaflet,
            attribution: None,
            bounds: None,
            bounding_box: None,
            layers: Vec::new(),
        }
    }
}

impl MapOptions {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{MapOptions, Provider, DEFAULT_MAX_ZOOM};
    use foundation::bounds::LatLng;
    use layers::LayerType;

    #[test]
    fn empty_object_yields_defaults() {
        let opts = MapOptions::from_json("{}").unwrap();
        assert_eq!(opts.center, LatLng::new(0.0, 0.0));
        assert_eq!(opts.zoom, 3);
        assert_eq!(opts.max_zoom, DEFAULT_MAX_ZOOM);
        assert_eq!(opts.provider, Provider::Leaflet);
        assert!(opts.layers.is_empty());
    }

    #[test]
    fn parses_camel_case_config() {
        let opts = MapOptions::from_json(
            r#"{
                "center": [41.4, 2.17],
                "zoom": 6,
                "minZoom": 2,
                "provider": "googlemaps",
                "layers": [
                    {"type": "Tiled", "urlTemplate": "https://t/{z}/{x}/{y}.png", "maxZoom": 18},
                    {"type": "CartoDB", "query": "select * from t"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(opts.center, LatLng::new(41.4, 2.17));
        assert_eq!(opts.min_zoom, 2);
        assert_eq!(opts.provider, Provider::GoogleMaps);
        assert_eq!(opts.layers.len(), 2);
        assert_eq!(opts.layers[0].layer_type(), LayerType::Tiled);
        assert_eq!(opts.layers[0].max_zoom, Some(18));
        assert_eq!(opts.layers[1].layer_type(), LayerType::CartoDb);
    }

    #[test]
    fn provider_names_are_lowercase() {
        assert_eq!(serde_json::to_string(&Provider::GoogleMaps).unwrap(), "\"googlemaps\"");
        assert_eq!(Provider::Leaflet.to_string(), "leaflet");
    }
}
