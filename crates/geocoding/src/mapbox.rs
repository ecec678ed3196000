use foundation::bounds::LatLng;
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use crate::error::GeocodeError;
use crate::http::HttpClient;
use crate::types::{BoundingBox, GeocodeResult, PlaceType};

pub const MAPBOX_PLACES_URL: &str = "https://api.mapbox.com/geocoding/v5/mapbox.places";

#[derive(Deserialize)]
struct PlacesResponse {
    #[serde(default)]
    features: Vec<PlaceFeature>,
}

#[derive(Deserialize)]
struct PlaceFeature {
    /// `[lon, lat]`
    center: [f64; 2],
    #[serde(default)]
    bbox: Option<[f64; 4]>,
    #[serde(default)]
    place_type: Vec<String>,
}

impl From<PlaceFeature> for GeocodeResult {
    fn from(f: PlaceFeature) -> Self {
        GeocodeResult {
            center: LatLng::new(f.center[1], f.center[0]),
            bbox: f.bbox.map(BoundingBox::from),
            place_type: f
                .place_type
                .first()
                .map(|kind| PlaceType::from_mapbox(kind))
                .unwrap_or(PlaceType::Venue),
        }
    }
}

/// Forward geocoding against the Mapbox places API.
#[derive(Debug, Clone)]
pub struct MapboxGeocoder<C> {
    client: C,
    base_url: String,
}

impl<C: HttpClient> MapboxGeocoder<C> {
    pub fn new(client: C) -> Self {
        Self::with_base_url(client, MAPBOX_PLACES_URL)
    }

    pub fn with_base_url(client: C, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// `{base}/{address}.json?access_token={token}`, path-encoded.
    pub fn request_url(&self, address: &str, token: &str) -> Result<Url, GeocodeError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| GeocodeError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| GeocodeError::InvalidUrl(format!("{} cannot take a path", self.base_url)))?
            .pop_if_empty()
            .push(&format!("{address}.json"));
        url.query_pairs_mut().append_pair("access_token", token);
        Ok(url)
    }

    /// Results in response order; an empty `features` list is an empty vec.
    pub async fn geocode(
        &self,
        address: &str,
        token: &str,
    ) -> Result<Vec<GeocodeResult>, GeocodeError> {
        let url = self.request_url(address, token)?;
        debug!(address, "geocoding");
        let body = self.client.get(url.as_str()).await?;
        let response: PlacesResponse =
            serde_json::from_slice(&body).map_err(|e| GeocodeError::Decode(e.to_string()))?;
        Ok(response.features.into_iter().map(GeocodeResult::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::MapboxGeocoder;
    use crate::error::GeocodeError;
    use crate::http::HttpClient;
    use crate::types::{BoundingBox, PlaceType};
    use foundation::bounds::LatLng;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    const TOKEN: &str = "fake_token";

    const LOS_ANGELES: &str = r#"{
        "type": "FeatureCollection",
        "query": ["vigo"],
        "features": [{
            "id": "place.9962989141465270",
            "type": "Feature",
            "place_type": ["place"],
            "text": "Los Angeles",
            "bbox": [-118.529221009603, 33.901599990108, -118.121099990025, 34.1612200099034],
            "center": [-118.2439, 34.0544],
            "geometry": {"type": "Point", "coordinates": [-118.2439, 34.0544]}
        }]
    }"#;

    const PLAZA: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "text": "Plaza de Barcelos",
            "center": [9.754478, 47.920347]
        }]
    }"#;

    struct FakeClient {
        body: &'static str,
        requests: Mutex<Vec<String>>,
    }

    impl FakeClient {
        fn new(body: &'static str) -> Self {
            Self {
                body,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl HttpClient for FakeClient {
        async fn get(&self, url: &str) -> Result<Vec<u8>, GeocodeError> {
            self.requests.lock().unwrap().push(url.to_string());
            Ok(self.body.as_bytes().to_vec())
        }
    }

    #[tokio::test]
    async fn builds_places_url() {
        let geocoder = MapboxGeocoder::new(FakeClient::new(LOS_ANGELES));
        geocoder.geocode("fake_address", TOKEN).await.unwrap();
        assert_eq!(
            geocoder.client.requests(),
            vec!["https://api.mapbox.com/geocoding/v5/mapbox.places/fake_address.json?access_token=fake_token"]
        );
    }

    #[test]
    fn encodes_address_into_path() {
        let geocoder = MapboxGeocoder::new(FakeClient::new(PLAZA));
        let url = geocoder.request_url("Plaza de Barcelos", TOKEN).unwrap();
        assert_eq!(url.path(), "/geocoding/v5/mapbox.places/Plaza%20de%20Barcelos.json");
    }

    #[tokio::test]
    async fn maps_city_result() {
        let geocoder = MapboxGeocoder::new(FakeClient::new(LOS_ANGELES));
        let results = geocoder.geocode("Vigo", TOKEN).await.unwrap();
        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert_eq!(result.center, LatLng::new(34.0544, -118.2439));
        assert_eq!(
            result.bbox,
            Some(BoundingBox {
                south: -118.529221009603,
                west: 33.901599990108,
                north: -118.121099990025,
                east: 34.1612200099034,
            })
        );
        assert_eq!(result.place_type, PlaceType::Venue);
    }

    #[tokio::test]
    async fn result_without_bbox() {
        let geocoder = MapboxGeocoder::new(FakeClient::new(PLAZA));
        let results = geocoder.geocode("Plaza de Barcelos", TOKEN).await.unwrap();
        assert_eq!(results[0].center, LatLng::new(47.920347, 9.754478));
        assert_eq!(results[0].bbox, None);
        assert_eq!(results[0].place_type, PlaceType::Venue);
    }

    #[tokio::test]
    async fn empty_response_is_empty() {
        let geocoder = MapboxGeocoder::new(FakeClient::new(r#"{"features": []}"#));
        assert!(geocoder.geocode("Vigo", TOKEN).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let geocoder = MapboxGeocoder::new(FakeClient::new("<html>"));
        assert!(matches!(
            geocoder.geocode("Vigo", TOKEN).await,
            Err(GeocodeError::Decode(_))
        ));
    }

    #[test]
    fn place_types_map_to_tags() {
        assert_eq!(PlaceType::from_mapbox("postcode"), PlaceType::PostalArea);
        assert_eq!(PlaceType::from_mapbox("poi.landmark"), PlaceType::Venue);
        assert_eq!(
            serde_json::to_string(&PlaceType::PostalArea).unwrap(),
            "\"postal-area\""
        );
        assert_eq!(serde_json::to_string(&PlaceType::LocalAdmin).unwrap(), "\"localadmin\"");
    }
}
