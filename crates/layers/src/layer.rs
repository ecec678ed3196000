use std::fmt;

use foundation::ids::ClientId;
use serde::{Deserialize, Serialize};

use crate::cartodb::CartoDbOptions;
use crate::raster::{GMapsBaseOptions, TiledOptions};
use crate::symbology::PlainOptions;

/// Client-side identity of a layer; unique per process, never serialized.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerCid(pub ClientId);

impl LayerCid {
    pub fn fresh() -> Self {
        LayerCid(ClientId::fresh())
    }
}

impl fmt::Display for LayerCid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identity assigned by the persistence backend.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub String);

impl LayerId {
    pub fn new(id: impl Into<String>) -> Self {
        LayerId(id.into())
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LayerType {
    Tiled,
    GMapsBase,
    Plain,
    CartoDb,
}

impl fmt::Display for LayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayerType::Tiled => "Tiled",
            LayerType::GMapsBase => "GMapsBase",
            LayerType::Plain => "Plain",
            LayerType::CartoDb => "CartoDB",
        };
        f.write_str(name)
    }
}

/// Type-specific layer attributes, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LayerKind {
    Tiled(TiledOptions),
    GMapsBase(GMapsBaseOptions),
    Plain(PlainOptions),
    #[serde(rename = "CartoDB")]
    CartoDb(CartoDbOptions),
}

impl LayerKind {
    pub fn layer_type(&self) -> LayerType {
        match self {
            LayerKind::Tiled(_) => LayerType::Tiled,
            LayerKind::GMapsBase(_) => LayerType::GMapsBase,
            LayerKind::Plain(_) => LayerType::Plain,
            LayerKind::CartoDb(_) => LayerType::CartoDb,
        }
    }
}

fn default_visible() -> bool {
    true
}

/// Declarative state of a single map layer.
///
/// `order` is owned by the [`LayerCollection`](crate::LayerCollection) the
/// layer lives in and only changes when that collection's membership does.
/// `Clone` keeps the client id; use [`Layer::detached`] for a copy with a new
/// identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    #[serde(skip, default = "LayerCid::fresh")]
    cid: LayerCid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<LayerId>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    order: usize,
    #[serde(rename = "minZoom", default, skip_serializing_if = "Option::is_none")]
    pub min_zoom: Option<u8>,
    #[serde(rename = "maxZoom", default, skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
    #[serde(flatten)]
    pub kind: LayerKind,
}

impl Layer {
    pub fn new(kind: LayerKind) -> Self {
        Self {
            cid: LayerCid::fresh(),
            id: None,
            visible: true,
            order: 0,
            min_zoom: None,
            max_zoom: None,
            attribution: None,
            kind,
        }
    }

    pub fn tiled(url_template: impl Into<String>) -> Self {
        Self::new(LayerKind::Tiled(TiledOptions::new(url_template)))
    }

    pub fn gmaps_base(base_type: impl Into<String>) -> Self {
        Self::new(LayerKind::GMapsBase(GMapsBaseOptions::new(base_type)))
    }

    pub fn plain(color: impl Into<String>) -> Self {
        Self::new(LayerKind::Plain(PlainOptions::with_color(color)))
    }

    pub fn cartodb(query: impl Into<String>) -> Self {
        let mut opts = CartoDbOptions::default();
        opts.query = Some(query.into());
        let mut layer = Self::new(LayerKind::CartoDb(opts));
        layer.attribution = Some("CartoDB".to_string());
        layer
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(LayerId::new(id));
        self
    }

    pub fn with_zoom_range(mut self, min_zoom: Option<u8>, max_zoom: Option<u8>) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = Some(attribution.into());
        self
    }

    pub fn cid(&self) -> LayerCid {
        self.cid
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub(crate) fn set_order(&mut self, order: usize) {
        self.order = order;
    }

    /// Takes over the persisted id and order of the layer being replaced.
    pub fn inherit_slot(&mut self, from: &Layer) {
        self.id = from.id.clone();
        self.order = from.order;
    }

    pub fn layer_type(&self) -> LayerType {
        self.kind.layer_type()
    }

    pub fn url_template(&self) -> Option<&str> {
        match &self.kind {
            LayerKind::Tiled(t) => Some(t.url_template.as_str()),
            _ => None,
        }
    }

    /// URL of tile `z/x/y` for tiled layers.
    pub fn tile_url(&self, z: u8, x: u32, y: u32) -> Option<String> {
        match &self.kind {
            LayerKind::Tiled(t) => t.tile_url(z, x, y),
            _ => None,
        }
    }

    pub fn base_type(&self) -> Option<&str> {
        match &self.kind {
            LayerKind::Tiled(t) => t.base_type.as_deref(),
            LayerKind::GMapsBase(g) => Some(g.base_type.as_str()),
            LayerKind::Plain(p) => Some(p.base_type.as_str()),
            LayerKind::CartoDb(_) => None,
        }
    }

    /// Same attributes under a new client id, without the persisted id.
    pub fn detached(&self) -> Layer {
        let mut copy = self.clone();
        copy.cid = LayerCid::fresh();
        copy.id = None;
        copy
    }

    /// Base-map equivalence: tiled layers compare URL templates, other types
    /// compare `base_type` when this layer declares one.
    pub fn same_as(&self, other: &Layer) -> bool {
        if self.layer_type() != other.layer_type() {
            return false;
        }
        match (&self.kind, &other.kind) {
            (LayerKind::Tiled(a), LayerKind::Tiled(b)) => a.url_template == b.url_template,
            _ => match self.base_type() {
                Some(mine) => other.base_type() == Some(mine),
                None => true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Layer, LayerKind, LayerType};

    const OSM: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

    #[test]
    fn tiled_layers_compare_templates() {
        let a = Layer::tiled(OSM);
        let b = Layer::tiled(OSM).with_id("remote-1");
        let c = Layer::tiled("https://tiles.example.com/{z}/{x}/{y}.png");
        assert!(a.same_as(&b));
        assert!(!a.same_as(&c));
    }

    #[test]
    fn different_types_never_match() {
        let tiled = Layer::tiled(OSM);
        let plain = Layer::plain("#000000");
        assert!(!tiled.same_as(&plain));
        assert!(!plain.same_as(&tiled));
    }

    #[test]
    fn base_types_must_match_when_declared() {
        let roadmap = Layer::gmaps_base("roadmap");
        let satellite = Layer::gmaps_base("satellite");
        assert!(roadmap.same_as(&Layer::gmaps_base("roadmap")));
        assert!(!roadmap.same_as(&satellite));
        // Plain layers share the default base type regardless of color.
        assert!(Layer::plain("#FFFFFF").same_as(&Layer::plain("#000000")));
    }

    #[test]
    fn cartodb_layers_match_on_type() {
        let a = Layer::cartodb("select * from a");
        let b = Layer::cartodb("select * from b");
        assert!(a.same_as(&b));
        assert_eq!(a.layer_type(), LayerType::CartoDb);
        assert_eq!(a.attribution.as_deref(), Some("CartoDB"));
    }

    #[test]
    fn detached_copy_has_new_identity() {
        let a = Layer::tiled(OSM).with_id("42").with_zoom_range(Some(2), Some(18));
        let b = a.detached();
        assert_ne!(a.cid(), b.cid());
        assert!(b.id.is_none());
        assert_eq!(b.min_zoom, Some(2));
        assert_eq!(b.kind, a.kind);
    }

    #[test]
    fn only_tiled_layers_have_tile_urls() {
        let tiled = Layer::tiled("https://a/{z}/{x}/{y}.png");
        assert_eq!(tiled.tile_url(2, 1, 3).as_deref(), Some("https://a/2/1/3.png"));
        assert_eq!(Layer::plain("#000").tile_url(2, 1, 3), None);
    }

    #[test]
    fn deserializes_wire_format() {
        let json = r#"{
            "type": "Tiled",
            "urlTemplate": "https://a/{z}/{x}/{y}.png",
            "minZoom": 1,
            "maxZoom": 10,
            "id": "abc"
        }"#;
        let layer: Layer = serde_json::from_str(json).unwrap();
        assert_eq!(layer.url_template(), Some("https://a/{z}/{x}/{y}.png"));
        assert_eq!(layer.max_zoom, Some(10));
        assert!(layer.visible);
        assert_eq!(layer.id.as_ref().map(|i| i.0.as_str()), Some("abc"));
        assert!(matches!(layer.kind, LayerKind::Tiled(_)));
    }

    #[test]
    fn serializes_type_tag() {
        let layer = Layer::gmaps_base("satellite");
        let value = serde_json::to_value(&layer).unwrap();
        assert_eq!(value["type"], "GMapsBase");
        assert_eq!(value["base_type"], "satellite");
        assert!(value.get("cid").is_none());
    }
}
