use foundation::bounds::{LatLng, LatLngBounds};
use layers::LayerCid;
use runtime::event_bus::Topic;

use crate::geometry::GeometryCid;

/// Notifications published by [`MapModel`](crate::MapModel).
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    ZoomChanged { zoom: u8 },
    CenterChanged { center: LatLng },
    /// Center and zoom replaced together by `set_view`; no per-attribute
    /// events accompany it.
    ViewChanged { center: LatLng, zoom: u8 },
    /// Both corners of the viewport bounds, reported once.
    ViewBoundsChanged { bounds: LatLngBounds },
    ZoomRangeChanged { min_zoom: u8, max_zoom: u8 },
    AttributionChanged {
        previous: Option<String>,
        current: Option<String>,
    },
    LayerAdded { cid: LayerCid, index: usize },
    FirstLayerAdded { cid: LayerCid },
    LayerRemoved { cid: LayerCid },
    LayerChanged { cid: LayerCid },
    LayersReset,
    BaseLayerAdded { cid: LayerCid },
    GeometryAdded { cid: GeometryCid },
    GeometryRemoved { cid: GeometryCid },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MapEventKind {
    Zoom,
    Center,
    View,
    ViewBounds,
    ZoomRange,
    Attribution,
    LayerAdded,
    FirstLayerAdded,
    LayerRemoved,
    LayerChanged,
    LayersReset,
    BaseLayerAdded,
    GeometryAdded,
    GeometryRemoved,
}

impl MapEventKind {
    /// Viewport attributes a bound view mirrors into its engine.
    pub const VIEWPORT: [MapEventKind; 5] = [
        MapEventKind::Zoom,
        MapEventKind::Center,
        MapEventKind::View,
        MapEventKind::ViewBounds,
        MapEventKind::Attribution,
    ];

    /// Layer-stack and geometry membership.
    pub const CONTENT: [MapEventKind; 6] = [
        MapEventKind::LayerAdded,
        MapEventKind::LayerRemoved,
        MapEventKind::LayerChanged,
        MapEventKind::LayersReset,
        MapEventKind::GeometryAdded,
        MapEventKind::GeometryRemoved,
    ];
}

impl Topic for MapEvent {
    type Kind = MapEventKind;

    fn kind(&self) -> MapEventKind {
        match self {
            MapEvent::ZoomChanged { .. } => MapEventKind::Zoom,
            MapEvent::CenterChanged { .. } => MapEventKind::Center,
            MapEvent::ViewChanged { .. } => MapEventKind::View,
            MapEvent::ViewBoundsChanged { .. } => MapEventKind::ViewBounds,
            MapEvent::ZoomRangeChanged { .. } => MapEventKind::ZoomRange,
            MapEvent::AttributionChanged { .. } => MapEventKind::Attribution,
            MapEvent::LayerAdded { .. } => MapEventKind::LayerAdded,
            MapEvent::FirstLayerAdded { .. } => MapEventKind::FirstLayerAdded,
            MapEvent::LayerRemoved { .. } => MapEventKind::LayerRemoved,
            MapEvent::LayerChanged { .. } => MapEventKind::LayerChanged,
            MapEvent::LayersReset => MapEventKind::LayersReset,
            MapEvent::BaseLayerAdded { .. } => MapEventKind::BaseLayerAdded,
            MapEvent::GeometryAdded { .. } => MapEventKind::GeometryAdded,
            MapEvent::GeometryRemoved { .. } => MapEventKind::GeometryRemoved,
        }
    }
}
