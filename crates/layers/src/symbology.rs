use serde::{Deserialize, Serialize};

fn default_plain_base_type() -> String {
    "plain".to_string()
}

fn default_plain_color() -> String {
    "#FFFFFF".to_string()
}

/// Solid color (or single image) drawn instead of tiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlainOptions {
    #[serde(default = "default_plain_base_type")]
    pub base_type: String,
    #[serde(default = "default_plain_color")]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl PlainOptions {
    pub fn with_color(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            ..Self::default()
        }
    }
}

impl Default for PlainOptions {
    fn default() -> Self {
        Self {
            base_type: default_plain_base_type(),
            color: default_plain_color(),
            image: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PlainOptions;

    #[test]
    fn defaults_to_white() {
        let p = PlainOptions::default();
        assert_eq!(p.color, "#FFFFFF");
        assert_eq!(p.base_type, "plain");
        assert_eq!(p.image, None);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let p: PlainOptions = serde_json::from_str(r##"{"color": "#f00"}"##).unwrap();
        assert_eq!(p, PlainOptions::with_color("#f00"));
    }
}
