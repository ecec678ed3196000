use std::collections::BTreeMap;

use foundation::bounds::{LatLng, LatLngBounds, PixelSize};
use foundation::math::{latlng_to_point, point_to_latlng, PixelPoint};
use layers::{Layer, LayerType};
use map::{Geometry, GeometryKind, Provider};

use crate::engine::{RenderEngine, RenderHandle};
use crate::error::EngineError;

/// Every adapter call a [`HeadlessEngine`] received, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    SetZoom(u8),
    SetCenter(LatLng),
    SetAttribution {
        previous: Option<String>,
        current: Option<String>,
    },
    AddLayer {
        handle: RenderHandle,
        index: usize,
        layer_type: LayerType,
    },
    UpdateLayer(RenderHandle),
    RemoveLayer(RenderHandle),
    AddGeometry {
        handle: RenderHandle,
        kind: GeometryKind,
    },
    RemoveGeometry(RenderHandle),
}

/// In-process engine: keeps a viewport, draws nothing.
#[derive(Debug)]
pub struct HeadlessEngine {
    provider: Provider,
    size: PixelSize,
    center: LatLng,
    zoom: u8,
    attribution: Option<String>,
    next_handle: u64,
    /// Bottom to top.
    layers: Vec<(RenderHandle, Layer)>,
    geometries: BTreeMap<RenderHandle, Geometry>,
    calls: Vec<EngineCall>,
}

impl HeadlessEngine {
    pub fn new(provider: Provider, size: PixelSize) -> Self {
        Self {
            provider,
            size,
            center: LatLng::new(0.0, 0.0),
            zoom: 0,
            attribution: None,
            next_handle: 1,
            layers: Vec::new(),
            geometries: BTreeMap::new(),
            calls: Vec::new(),
        }
    }

    pub fn calls(&self) -> &[EngineCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<EngineCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn attribution(&self) -> Option<&str> {
        self.attribution.as_deref()
    }

    /// Layers currently drawn, bottom first.
    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().map(|(_, layer)| layer)
    }

    pub fn geometry_count(&self) -> usize {
        self.geometries.len()
    }

    pub fn resize(&mut self, size: PixelSize) {
        self.size = size;
    }

    /// Simulated user pan; not recorded as an adapter call.
    pub fn pan_to(&mut self, center: LatLng) {
        self.center = center;
    }

    /// Simulated user zoom; not recorded as an adapter call.
    pub fn zoom_to(&mut self, zoom: u8) {
        self.zoom = zoom;
    }

    fn allocate(&mut self) -> RenderHandle {
        let handle = RenderHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    fn supports(&self, layer_type: LayerType) -> bool {
        match self.provider {
            Provider::Leaflet => layer_type != LayerType::GMapsBase,
            Provider::GoogleMaps => true,
        }
    }
}

impl RenderEngine for HeadlessEngine {
    fn provider(&self) -> Provider {
        self.provider
    }

    fn size(&self) -> PixelSize {
        self.size
    }

    fn bounds(&self) -> LatLngBounds {
        let zoom = f64::from(self.zoom);
        let c = latlng_to_point(self.center, zoom);
        let half_w = self.size.width / 2.0;
        let half_h = self.size.height / 2.0;
        let sw = point_to_latlng(PixelPoint::new(c.x - half_w, c.y + half_h), zoom);
        let ne = point_to_latlng(PixelPoint::new(c.x + half_w, c.y - half_h), zoom);
        LatLngBounds::new(sw, ne)
    }

    fn zoom(&self) -> u8 {
        self.zoom
    }

    fn center(&self) -> LatLng {
        self.center
    }

    fn set_zoom(&mut self, zoom: u8) {
        self.zoom = zoom;
        self.calls.push(EngineCall::SetZoom(zoom));
    }

    fn set_center(&mut self, center: LatLng) {
        self.center = center;
        self.calls.push(EngineCall::SetCenter(center));
    }

    fn set_attribution(&mut self, previous: Option<&str>, current: Option<&str>) {
        self.attribution = current.map(str::to_string);
        self.calls.push(EngineCall::SetAttribution {
            previous: previous.map(str::to_string),
            current: current.map(str::to_string),
        });
    }

    fn add_layer(&mut self, layer: &Layer, index: usize) -> Result<RenderHandle, EngineError> {
        let layer_type = layer.layer_type();
        if !self.supports(layer_type) {
            return Err(EngineError::UnsupportedLayer {
                provider: self.provider,
                layer_type,
            });
        }
        let handle = self.allocate();
        let index = index.min(self.layers.len());
        self.layers.insert(index, (handle, layer.clone()));
        self.calls.push(EngineCall::AddLayer {
            handle,
            index,
            layer_type,
        });
        Ok(handle)
    }

    fn update_layer(&mut self, handle: RenderHandle, layer: &Layer) -> Result<(), EngineError> {
        let slot = self
            .layers
            .iter_mut()
            .find(|(h, _)| *h == handle)
            .ok_or(EngineError::UnknownHandle(handle))?;
        slot.1 = layer.clone();
        self.calls.push(EngineCall::UpdateLayer(handle));
        Ok(())
    }

    fn remove_layer(&mut self, handle: RenderHandle) -> Result<(), EngineError> {
        let index = self
            .layers
            .iter()
            .position(|(h, _)| *h == handle)
            .ok_or(EngineError::UnknownHandle(handle))?;
        self.layers.remove(index);
        self.calls.push(EngineCall::RemoveLayer(handle));
        Ok(())
    }

    fn add_geometry(&mut self, geometry: &Geometry) -> Result<RenderHandle, EngineError> {
        let handle = self.allocate();
        self.geometries.insert(handle, geometry.clone());
        self.calls.push(EngineCall::AddGeometry {
            handle,
            kind: geometry.kind(),
        });
        Ok(handle)
    }

    fn remove_geometry(&mut self, handle: RenderHandle) -> Result<(), EngineError> {
        self.geometries
            .remove(&handle)
            .ok_or(EngineError::UnknownHandle(handle))?;
        self.calls.push(EngineCall::RemoveGeometry(handle));
        Ok(())
    }
}
