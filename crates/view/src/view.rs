use std::collections::BTreeMap;

use foundation::bounds::LatLngBounds;
use foundation::time::Time;
use layers::LayerCid;
use map::{GeometryCid, MapEvent, MapEventKind, MapModel, MapStore, PersistError};
use runtime::debounce::Debouncer;
use runtime::event_bus::SubscriberId;
use tracing::{debug, error};

use crate::engine::{RenderEngine, RenderHandle};

/// Quiet period before a moved viewport is saved.
pub const AUTO_SAVE_DELAY_S: f64 = 1.0;

/// Keeps a [`RenderEngine`] and a [`MapModel`] in agreement.
///
/// The view listens on two subscriptions of the model's event bus. The
/// viewport binding (zoom, center, bounds, attribution) is dropped while
/// the view writes engine-originated changes back, so those writes are
/// never echoed to the engine. The content subscription (layers and
/// geometries) lives as long as the view.
#[derive(Debug)]
pub struct MapView<E: RenderEngine> {
    engine: E,
    binding: Option<SubscriberId>,
    content: SubscriberId,
    layer_handles: BTreeMap<LayerCid, RenderHandle>,
    geometry_handles: BTreeMap<GeometryCid, RenderHandle>,
    auto_save: Option<Debouncer>,
}

impl<E: RenderEngine> MapView<E> {
    /// Attaches `engine` to `model` and draws the model's current state.
    pub fn new(model: &mut MapModel, engine: E) -> Self {
        let content = model.events_mut().subscribe(MapEventKind::CONTENT);
        let mut view = Self {
            engine,
            binding: None,
            content,
            layer_handles: BTreeMap::new(),
            geometry_handles: BTreeMap::new(),
            auto_save: None,
        };
        view.engine.set_center(model.center());
        view.engine.set_zoom(model.zoom());
        if model.attribution().is_some() {
            view.engine.set_attribution(None, model.attribution());
        }
        view.add_all_layers(model);
        let geometries: Vec<GeometryCid> = model.geometries().iter().map(|g| g.cid()).collect();
        for cid in geometries {
            view.add_geometry(model, cid);
        }
        view.bind(model);
        view
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    pub fn bind(&mut self, model: &mut MapModel) {
        self.unbind(model);
        self.binding = Some(model.events_mut().subscribe(MapEventKind::VIEWPORT));
    }

    pub fn unbind(&mut self, model: &mut MapModel) {
        if let Some(id) = self.binding.take() {
            model.events_mut().unsubscribe(id);
        }
    }

    pub fn set_auto_save_bounds(&mut self, enabled: bool) {
        self.auto_save = enabled.then(|| Debouncer::new(AUTO_SAVE_DELAY_S));
    }

    pub fn auto_save_pending(&self) -> bool {
        self.auto_save.as_ref().is_some_and(Debouncer::is_pending)
    }

    /// Applies every event the model queued for this view. Returns the
    /// number of events handled.
    pub fn sync(&mut self, model: &mut MapModel) -> usize {
        let mut handled = 0;
        for event in model.events_mut().drain(self.content) {
            self.apply_content(model, event);
            handled += 1;
        }
        // Fitting bounds feeds center/zoom back into the binding queue.
        while let Some(id) = self.binding {
            let events = model.events_mut().drain(id);
            if events.is_empty() {
                break;
            }
            for event in events {
                self.apply_viewport(model, event);
                handled += 1;
            }
        }
        handled
    }

    /// Fits the model, and through the binding the engine, to `bounds`.
    pub fn show_bounds(&mut self, model: &mut MapModel, bounds: LatLngBounds) {
        model.fit_bounds(bounds, self.engine.size());
    }

    /// Writes an engine-side pan or zoom back to the model. A zoom outside
    /// the model's range is clamped and the engine is moved to the clamped
    /// level.
    pub fn on_engine_view_changed(&mut self, model: &mut MapModel, now: Time) {
        self.sync(model);
        self.unbind(model);
        model.set_zoom(self.engine.zoom());
        if model.zoom() != self.engine.zoom() {
            debug!(engine = self.engine.zoom(), model = model.zoom(), "engine zoom clamped");
            self.engine.set_zoom(model.zoom());
        }
        model.set_center(self.engine.center());
        model.set_bounds(self.engine.bounds());
        if let Some(debouncer) = self.auto_save.as_mut() {
            debouncer.schedule(now);
        }
        self.bind(model);
    }

    /// Saves the map once the auto-save window has passed without further
    /// viewport changes. Returns whether a save happened.
    pub async fn poll_auto_save<S: MapStore>(
        &mut self,
        model: &MapModel,
        store: &mut S,
        now: Time,
    ) -> Result<bool, PersistError> {
        let due = self.auto_save.as_mut().is_some_and(|d| d.poll(now));
        if !due {
            return Ok(false);
        }
        debug!(zoom = model.zoom(), "auto-saving map location");
        store.save_map(&model.snapshot()).await?;
        Ok(true)
    }

    pub fn layer_handle(&self, cid: LayerCid) -> Option<RenderHandle> {
        let handle = self.layer_handles.get(&cid).copied();
        if handle.is_none() {
            error!(%cid, "no engine layer for this layer");
        }
        handle
    }

    pub fn geometry_handle(&self, cid: GeometryCid) -> Option<RenderHandle> {
        self.geometry_handles.get(&cid).copied()
    }

    pub fn layer_count(&self) -> usize {
        self.layer_handles.len()
    }

    /// Unbinds from the model, removes everything it drew from the engine
    /// and hands the engine back.
    pub fn detach(mut self, model: &mut MapModel) -> E {
        self.unbind(model);
        model.events_mut().unsubscribe(self.content);
        self.remove_all_layers();
        for (cid, handle) in std::mem::take(&mut self.geometry_handles) {
            if let Err(err) = self.engine.remove_geometry(handle) {
                error!(%cid, %err, "engine failed to remove geometry");
            }
        }
        self.engine
    }

    fn apply_viewport(&mut self, model: &mut MapModel, event: MapEvent) {
        match event {
            MapEvent::ZoomChanged { zoom } => self.engine.set_zoom(zoom),
            MapEvent::CenterChanged { center } => self.engine.set_center(center),
            MapEvent::ViewChanged { center, zoom } => {
                self.engine.set_center(center);
                self.engine.set_zoom(zoom);
            }
            MapEvent::ViewBoundsChanged { bounds } => self.show_bounds(model, bounds),
            MapEvent::AttributionChanged { previous, current } => {
                self.engine
                    .set_attribution(previous.as_deref(), current.as_deref());
            }
            other => debug!(?other, "viewport binding ignores event"),
        }
    }

    fn apply_content(&mut self, model: &mut MapModel, event: MapEvent) {
        match event {
            MapEvent::LayerAdded { cid, .. } => self.add_layer(model, cid),
            MapEvent::LayerRemoved { cid } => self.remove_layer(cid),
            MapEvent::LayerChanged { cid } => {
                let (Some(handle), Some(layer)) = (self.layer_handles.get(&cid), model.layer(cid))
                else {
                    debug!(%cid, "changed layer is not drawn");
                    return;
                };
                if let Err(err) = self.engine.update_layer(*handle, layer) {
                    error!(%cid, %err, "engine failed to update layer");
                }
            }
            MapEvent::LayersReset => {
                self.remove_all_layers();
                self.add_all_layers(model);
            }
            MapEvent::GeometryAdded { cid } => self.add_geometry(model, cid),
            MapEvent::GeometryRemoved { cid } => {
                let Some(handle) = self.geometry_handles.remove(&cid) else {
                    return;
                };
                if let Err(err) = self.engine.remove_geometry(handle) {
                    error!(%cid, %err, "engine failed to remove geometry");
                }
            }
            other => debug!(?other, "content subscription ignores event"),
        }
    }

    // The engine position is taken from the model at apply time: queued
    // indices go stale when earlier layers are removed or never drawn.
    fn add_layer(&mut self, model: &MapModel, cid: LayerCid) {
        if self.layer_handles.contains_key(&cid) {
            return;
        }
        let Some(layer) = model.layer(cid) else {
            debug!(%cid, "layer left the map before it was drawn");
            return;
        };
        let index = model
            .layers()
            .iter()
            .take_while(|l| l.cid() != cid)
            .filter(|l| self.layer_handles.contains_key(&l.cid()))
            .count();
        match self.engine.add_layer(layer, index) {
            Ok(handle) => {
                self.layer_handles.insert(cid, handle);
            }
            Err(err) => error!(%cid, %err, "engine failed to add layer"),
        }
    }

    fn add_all_layers(&mut self, model: &MapModel) {
        let cids: Vec<LayerCid> = model.layers().iter().map(|l| l.cid()).collect();
        for cid in cids {
            self.add_layer(model, cid);
        }
    }

    // The handle entry goes first so a failing engine call cannot leave a
    // stale mapping behind.
    fn remove_layer(&mut self, cid: LayerCid) {
        let Some(handle) = self.layer_handles.remove(&cid) else {
            return;
        };
        if let Err(err) = self.engine.remove_layer(handle) {
            error!(%cid, %err, "engine failed to remove layer");
        }
    }

    fn remove_all_layers(&mut self) {
        let cids: Vec<LayerCid> = self.layer_handles.keys().copied().collect();
        for cid in cids {
            self.remove_layer(cid);
        }
    }

    fn add_geometry(&mut self, model: &MapModel, cid: GeometryCid) {
        if self.geometry_handles.contains_key(&cid) {
            return;
        }
        let Some(geometry) = model.geometries().get(cid) else {
            return;
        };
        match self.engine.add_geometry(geometry) {
            Ok(handle) => {
                self.geometry_handles.insert(cid, handle);
            }
            Err(err) => error!(%cid, %err, "engine failed to add geometry"),
        }
    }
}
