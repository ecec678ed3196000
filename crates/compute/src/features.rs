use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DataviewError;

/// GeoJSON feature; geometry is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub geometry: Option<Value>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

impl Feature {
    pub fn with_properties(properties: Map<String, Value>) -> Self {
        Self {
            geometry: None,
            properties: Some(properties),
        }
    }

    /// Property value, `None` when missing or JSON `null`.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties
            .as_ref()?
            .get(name)
            .filter(|v| !v.is_null())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FeatureInput {
    Collection { features: Vec<Feature> },
    Bare(Vec<Feature>),
}

/// Reads a `FeatureCollection` or a bare array of features.
pub fn parse_features(text: &str) -> Result<Vec<Feature>, DataviewError> {
    let input: FeatureInput =
        serde_json::from_str(text).map_err(|e| DataviewError::InvalidFeatures(e.to_string()))?;
    Ok(match input {
        FeatureInput::Collection { features } => features,
        FeatureInput::Bare(features) => features,
    })
}

#[cfg(test)]
mod tests {
    use super::parse_features;
    use crate::error::DataviewError;
    use serde_json::json;

    #[test]
    fn reads_feature_collection() {
        let features = parse_features(
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [2.1, 41.4]},
                 "properties": {"name": "Barcelona", "pop": 1620000}},
                {"type": "Feature", "geometry": null, "properties": null}
            ]}"#,
        )
        .unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].property("pop"), Some(&json!(1620000)));
        assert!(features[1].property("pop").is_none());
    }

    #[test]
    fn reads_bare_array() {
        let features = parse_features(r#"[{"properties": {"a": null}}]"#).unwrap();
        assert_eq!(features.len(), 1);
        assert!(features[0].property("a").is_none());
    }

    #[test]
    fn rejects_other_json() {
        assert!(matches!(
            parse_features(r#"{"type": "Point"}"#),
            Err(DataviewError::InvalidFeatures(_))
        ));
    }
}
