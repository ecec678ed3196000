use serde::{Deserialize, Serialize};

/// Plain XYZ tile layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TiledOptions {
    #[serde(rename = "urlTemplate")]
    pub url_template: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,
    #[serde(default)]
    pub tms: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdomains: Option<String>,
}

impl TiledOptions {
    pub fn new(url_template: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
            base_type: None,
            tms: false,
            subdomains: None,
        }
    }

    /// Expands `{z}`, `{x}`, `{y}` and `{s}` placeholders.
    ///
    /// With `tms` set the row is flipped to the bottom-left origin scheme.
    /// `None` when the flipped row does not fit a `u32`.
    pub fn tile_url(&self, z: u8, x: u32, y: u32) -> Option<String> {
        let row = if self.tms {
            let last = 1u64.checked_shl(u32::from(z))? - 1;
            u32::try_from(last.saturating_sub(u64::from(y))).ok()?
        } else {
            y
        };
        let subdomain = self
            .subdomains
            .as_deref()
            .and_then(|s| {
                let n = s.chars().count();
                if n == 0 {
                    return None;
                }
                s.chars().nth((x as usize + row as usize) % n)
            })
            .map(String::from)
            .unwrap_or_default();
        Some(
            self.url_template
                .replace("{z}", &z.to_string())
                .replace("{x}", &x.to_string())
                .replace("{y}", &row.to_string())
                .replace("{s}", &subdomain),
        )
    }
}

fn default_gmaps_base_type() -> String {
    "gray_roadmap".to_string()
}

/// Google Maps native base map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GMapsBaseOptions {
    #[serde(default = "default_gmaps_base_type")]
    pub base_type: String,
    /// Styled-map definition, passed through to the engine untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<serde_json::Value>,
}

impl GMapsBaseOptions {
    pub fn new(base_type: impl Into<String>) -> Self {
        Self {
            base_type: base_type.into(),
            style: None,
        }
    }
}

impl Default for GMapsBaseOptions {
    fn default() -> Self {
        Self::new(default_gmaps_base_type())
    }
}

#[cfg(test)]
mod tests {
    use super::{GMapsBaseOptions, TiledOptions};

    #[test]
    fn expands_xyz_placeholders() {
        let t = TiledOptions::new("https://tiles/{z}/{x}/{y}.png");
        assert_eq!(t.tile_url(3, 4, 5).as_deref(), Some("https://tiles/3/4/5.png"));
    }

    #[test]
    fn tms_flips_rows() {
        let mut t = TiledOptions::new("{z}/{x}/{y}");
        t.tms = true;
        assert_eq!(t.tile_url(2, 0, 0).as_deref(), Some("2/0/3"));
    }

    #[test]
    fn tms_rows_beyond_u32_have_no_url() {
        let mut t = TiledOptions::new("{z}/{x}/{y}");
        t.tms = true;
        assert_eq!(t.tile_url(33, 0, 0), None);
        assert_eq!(t.tile_url(64, 0, 0), None);
        assert_eq!(t.tile_url(u8::MAX, 0, 0), None);
        assert_eq!(t.tile_url(31, 0, 0).as_deref(), Some("31/0/2147483647"));
        t.tms = false;
        assert_eq!(t.tile_url(64, 1, 2).as_deref(), Some("64/1/2"));
    }

    #[test]
    fn rotates_subdomains() {
        let mut t = TiledOptions::new("https://{s}.tiles/{z}/{x}/{y}.png");
        t.subdomains = Some("abc".to_string());
        assert_eq!(t.tile_url(1, 0, 0).as_deref(), Some("https://a.tiles/1/0/0.png"));
        assert_eq!(t.tile_url(1, 1, 1).as_deref(), Some("https://c.tiles/1/1/1.png"));
    }

    #[test]
    fn gmaps_default_base_type() {
        assert_eq!(GMapsBaseOptions::default().base_type, "gray_roadmap");
        let parsed: GMapsBaseOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.base_type, "gray_roadmap");
    }
}
