use foundation::bounds::{LatLng, LatLngBounds, PixelSize};
use foundation::math::latlng_to_point;
use layers::{AddOptions, Layer, LayerCid, LayerCollection, LayerId};
use runtime::event_bus::EventBus;
use tracing::{debug, error, warn};

use crate::error::MapError;
use crate::events::MapEvent;
use crate::geometry::{Geometry, GeometryCid, GeometryCollection};
use crate::options::{MapOptions, Provider, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, DEFAULT_ZOOM};
use crate::persistence::MapStore;

/// How a `set_base_layer` call ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BaseLayerOutcome {
    /// An equal layer already sits at the base; nothing changed.
    AlreadyAdded,
    /// The previous base layer was swapped out and the new one persisted.
    Replaced,
    /// There was no base layer; the new one was installed without a save.
    Installed,
}

/// Authoritative map state: viewport, zoom range, attribution, layer stack
/// and geometries. Every mutation is published on [`MapModel::events`].
#[derive(Debug)]
pub struct MapModel {
    center: LatLng,
    zoom: u8,
    min_zoom: u8,
    max_zoom: u8,
    provider: Provider,
    attribution: Option<String>,
    view_bounds: Option<LatLngBounds>,
    bounding_box: Option<LatLngBounds>,
    layers: LayerCollection,
    geometries: GeometryCollection,
    events: EventBus<MapEvent>,
}

impl Default for MapModel {
    fn default() -> Self {
        Self {
            center: LatLng::new(0.0, 0.0),
            zoom: DEFAULT_ZOOM,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            provider: Provider::default(),
            attribution: None,
            view_bounds: None,
            bounding_box: None,
            layers: LayerCollection::new(),
            geometries: GeometryCollection::new(),
            events: EventBus::new(),
        }
    }
}

impl MapModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(options: MapOptions) -> Result<Self, MapError> {
        let mut model = Self {
            provider: options.provider,
            attribution: options.attribution,
            view_bounds: options.bounds,
            bounding_box: options.bounding_box,
            ..Self::default()
        };
        model.set_zoom_range(options.min_zoom, options.max_zoom);
        for layer in options.layers {
            model.add_layer(layer, AddOptions::default())?;
        }
        // Layer ranges are adopted first; explicit viewport wins afterwards.
        model.set_view(options.center, options.zoom);
        Ok(model)
    }

    pub fn snapshot(&self) -> MapOptions {
        MapOptions {
            center: self.center,
            zoom: self.zoom,
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            provider: self.provider,
            attribution: self.attribution.clone(),
            bounds: self.view_bounds,
            bounding_box: self.bounding_box,
            layers: self.layers.iter().cloned().collect(),
        }
    }

    pub fn events(&self) -> &EventBus<MapEvent> {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventBus<MapEvent> {
        &mut self.events
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn min_zoom(&self) -> u8 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> u8 {
        self.max_zoom
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn attribution(&self) -> Option<&str> {
        self.attribution.as_deref()
    }

    pub fn view_bounds(&self) -> Option<LatLngBounds> {
        self.view_bounds
    }

    pub fn bounding_box(&self) -> Option<LatLngBounds> {
        self.bounding_box
    }

    pub fn layers(&self) -> &LayerCollection {
        &self.layers
    }

    pub fn geometries(&self) -> &GeometryCollection {
        &self.geometries
    }

    fn clamp_zoom(&self, zoom: u8) -> u8 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    // ---- viewport ----

    /// Replaces center and zoom at once; only `ViewChanged` is published.
    pub fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.center = center;
        self.zoom = self.clamp_zoom(zoom);
        self.events.emit(MapEvent::ViewChanged {
            center: self.center,
            zoom: self.zoom,
        });
    }

    pub fn set_zoom(&mut self, zoom: u8) {
        let zoom = self.clamp_zoom(zoom);
        if zoom == self.zoom {
            return;
        }
        self.zoom = zoom;
        self.events.emit(MapEvent::ZoomChanged { zoom });
    }

    pub fn set_center(&mut self, center: LatLng) {
        if center == self.center {
            return;
        }
        self.center = center;
        self.events.emit(MapEvent::CenterChanged { center });
    }

    /// Sets the allowed zoom range, reordering reversed bounds, and pulls
    /// the current zoom inside it.
    pub fn set_zoom_range(&mut self, min_zoom: u8, max_zoom: u8) {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            warn!(min_zoom, max_zoom, "reversed zoom range");
            (max_zoom, min_zoom)
        };
        if (min_zoom, max_zoom) == (self.min_zoom, self.max_zoom) {
            return;
        }
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.events.emit(MapEvent::ZoomRangeChanged { min_zoom, max_zoom });
        self.set_zoom(self.zoom);
    }

    /// Stores the viewport bounds reported by a view.
    pub fn set_bounds(&mut self, bounds: LatLngBounds) {
        self.view_bounds = Some(bounds);
        self.events.emit(MapEvent::ViewBoundsChanged { bounds });
    }

    pub fn set_bounding_box(&mut self, bounds: Option<LatLngBounds>) {
        self.bounding_box = bounds;
    }

    pub fn set_attribution(&mut self, attribution: Option<String>) {
        if attribution == self.attribution {
            return;
        }
        let previous = std::mem::replace(&mut self.attribution, attribution);
        self.events.emit(MapEvent::AttributionChanged {
            previous,
            current: self.attribution.clone(),
        });
    }

    /// Deepest zoom at which `bounds` still fits in `viewport`.
    ///
    /// Levels are probed from `min_zoom + 1` to `max_zoom + 1`. Returns the
    /// level before the first overflowing one, or `None` when the first
    /// probe already overflows or nothing overflows at all.
    pub fn bounds_zoom(&self, bounds: LatLngBounds, viewport: PixelSize) -> Option<u8> {
        let first = u16::from(self.min_zoom) + 1;
        let last = u16::from(self.max_zoom) + 1;
        for zoom in first..=last {
            let ne = latlng_to_point(bounds.ne, f64::from(zoom));
            let sw = latlng_to_point(bounds.sw, f64::from(zoom));
            let width = (ne.x - sw.x).abs();
            let height = (sw.y - ne.y).abs();
            if width > viewport.width || height > viewport.height {
                if zoom == first {
                    return None;
                }
                return u8::try_from(zoom - 1).ok();
            }
        }
        None
    }

    /// Centers on `bounds` at [`bounds_zoom`](Self::bounds_zoom). Returns
    /// the applied zoom; does nothing when no level fits.
    pub fn fit_bounds(&mut self, bounds: LatLngBounds, viewport: PixelSize) -> Option<u8> {
        let zoom = self.bounds_zoom(bounds, viewport)?;
        let zoom = self.clamp_zoom(zoom);
        let center = bounds.center();
        let center_changed = center != self.center;
        let zoom_changed = zoom != self.zoom;
        self.center = center;
        self.zoom = zoom;
        if center_changed {
            self.events.emit(MapEvent::CenterChanged { center });
        }
        if zoom_changed {
            self.events.emit(MapEvent::ZoomChanged { zoom });
        }
        Some(zoom)
    }

    // ---- layers ----

    pub fn layer(&self, cid: LayerCid) -> Option<&Layer> {
        self.layers.get(cid)
    }

    pub fn layer_at(&self, index: usize) -> Option<&Layer> {
        self.layers.at(index)
    }

    pub fn base_layer(&self) -> Option<&Layer> {
        self.layers.base()
    }

    /// URL template of the base layer when it is tiled.
    pub fn layer_template(&self) -> Option<&str> {
        self.layers.base().and_then(Layer::url_template)
    }

    pub fn is_base_layer_added(&self, layer: &Layer) -> bool {
        self.layers.base().is_some_and(|base| layer.same_as(base))
    }

    fn adopt_zoom_range(&mut self, min_zoom: Option<u8>, max_zoom: Option<u8>) {
        let min_zoom = min_zoom.unwrap_or(self.min_zoom);
        let max_zoom = max_zoom.unwrap_or(self.max_zoom);
        self.set_zoom_range(min_zoom, max_zoom);
    }

    fn insert_layer(&mut self, layer: Layer, opts: AddOptions) -> Result<LayerCid, MapError> {
        let cid = layer.cid();
        let index = self.layers.add(layer, opts)?;
        self.events.emit(MapEvent::LayerAdded { cid, index });
        Ok(cid)
    }

    /// The first layer on an empty map sets the zoom range.
    pub fn add_layer(&mut self, layer: Layer, opts: AddOptions) -> Result<LayerCid, MapError> {
        if self.layers.contains(layer.cid()) {
            return Err(MapError::DuplicateLayer(layer.cid()));
        }
        if self.layers.is_empty() {
            self.adopt_zoom_range(layer.min_zoom, layer.max_zoom);
        }
        let cid = self.insert_layer(layer, opts)?;
        if self.layers.len() == 1 {
            self.events.emit(MapEvent::FirstLayerAdded { cid });
        }
        Ok(cid)
    }

    pub fn remove_layer(&mut self, cid: LayerCid) -> Option<Layer> {
        let Some(layer) = self.layers.remove(cid) else {
            error!(%cid, "layer to remove does not exist");
            return None;
        };
        self.events.emit(MapEvent::LayerRemoved { cid });
        Some(layer)
    }

    pub fn remove_layer_by_id(&mut self, id: &LayerId) -> Option<Layer> {
        let Some(cid) = self.layers.find_by_id(id).map(Layer::cid) else {
            error!(id = %id.0, "layer to remove does not exist");
            return None;
        };
        self.remove_layer(cid)
    }

    pub fn remove_layer_at(&mut self, index: usize) -> Option<Layer> {
        let Some(cid) = self.layers.at(index).map(Layer::cid) else {
            error!(index, "layer to remove does not exist");
            return None;
        };
        self.remove_layer(cid)
    }

    /// Removes every layer, publishing one `LayerRemoved` per member.
    pub fn clear_layers(&mut self) -> Vec<Layer> {
        let removed = self.layers.drain();
        for layer in &removed {
            self.events.emit(MapEvent::LayerRemoved { cid: layer.cid() });
        }
        removed
    }

    /// Swaps the whole stack. The new base layer's zoom range is adopted.
    pub fn reset_layers(&mut self, layers: Vec<Layer>) -> Vec<Layer> {
        let previous = self.layers.reset(layers);
        if let Some((min_zoom, max_zoom)) = self.layers.base().map(|l| (l.min_zoom, l.max_zoom)) {
            self.adopt_zoom_range(min_zoom, max_zoom);
        }
        self.events.emit(MapEvent::LayersReset);
        previous
    }

    /// Edits a layer in place and publishes `LayerChanged`.
    pub fn update_layer<R>(&mut self, cid: LayerCid, edit: impl FnOnce(&mut Layer) -> R) -> Option<R> {
        let Some(layer) = self.layers.get_mut(cid) else {
            error!(%cid, "layer to update does not exist");
            return None;
        };
        let out = edit(layer);
        self.events.emit(MapEvent::LayerChanged { cid });
        Some(out)
    }

    /// Puts `layer` at the base of the stack.
    ///
    /// Replacing an existing base layer persists the new one through `store`
    /// before zoom range and attribution follow it. A failed save is
    /// returned as-is: the swap already happened and is not undone.
    pub async fn set_base_layer<S: MapStore>(
        &mut self,
        mut layer: Layer,
        store: &mut S,
    ) -> Result<BaseLayerOutcome, MapError> {
        if self.is_base_layer_added(&layer) {
            debug!(layer_type = %layer.layer_type(), "base layer already added");
            return Ok(BaseLayerOutcome::AlreadyAdded);
        }
        if self.layers.contains(layer.cid()) {
            return Err(MapError::DuplicateLayer(layer.cid()));
        }

        let Some(old) = self.layers.remove_at(0) else {
            let cid = self.insert_layer(layer, AddOptions::at(0))?;
            self.finish_base_layer(cid);
            return Ok(BaseLayerOutcome::Installed);
        };
        self.events.emit(MapEvent::LayerRemoved { cid: old.cid() });
        layer.inherit_slot(&old);
        let cid = self.insert_layer(layer, AddOptions::at(0))?;

        if let Some(saved) = self.layers.get(cid) {
            if let Err(err) = store.save_layer(saved).await {
                error!(%cid, %err, "base layer save failed");
                return Err(err.into());
            }
        }
        self.finish_base_layer(cid);
        Ok(BaseLayerOutcome::Replaced)
    }

    fn finish_base_layer(&mut self, cid: LayerCid) {
        let Some((min_zoom, max_zoom, attribution)) = self
            .layers
            .get(cid)
            .map(|l| (l.min_zoom, l.max_zoom, l.attribution.clone()))
        else {
            return;
        };
        self.adopt_zoom_range(min_zoom, max_zoom);
        self.set_attribution(attribution);
        self.events.emit(MapEvent::BaseLayerAdded { cid });
    }

    // ---- geometries ----

    pub fn add_geometry(&mut self, geometry: Geometry) -> Option<GeometryCid> {
        let cid = geometry.cid();
        if !self.geometries.add(geometry) {
            warn!(%cid, "geometry already on the map");
            return None;
        }
        self.events.emit(MapEvent::GeometryAdded { cid });
        Some(cid)
    }

    pub fn remove_geometry(&mut self, cid: GeometryCid) -> Option<Geometry> {
        let Some(geometry) = self.geometries.remove(cid) else {
            error!(%cid, "geometry to remove does not exist");
            return None;
        };
        self.events.emit(MapEvent::GeometryRemoved { cid });
        Some(geometry)
    }
}

/// Duplicate for a new map: same viewport and attributes, layers with fresh
/// identities, no geometries and no subscribers.
impl Clone for MapModel {
    fn clone(&self) -> Self {
        Self {
            center: self.center,
            zoom: self.zoom,
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            provider: self.provider,
            attribution: self.attribution.clone(),
            view_bounds: self.view_bounds,
            bounding_box: self.bounding_box,
            layers: self.layers.clone(),
            geometries: GeometryCollection::new(),
            events: EventBus::new(),
        }
    }
}
