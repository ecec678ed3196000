use std::fmt;

use foundation::bounds::{LatLng, LatLngBounds, PixelSize};
use layers::Layer;
use map::{Geometry, Provider};

use crate::error::EngineError;

/// Engine-side object created for a layer or geometry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RenderHandle(pub u64);

impl fmt::Display for RenderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{}", self.0)
    }
}

/// Adapter over a concrete mapping library.
///
/// Viewport setters are expected to be cheap and infallible; object
/// creation can fail when the engine cannot draw a layer type.
pub trait RenderEngine {
    fn provider(&self) -> Provider;
    fn size(&self) -> PixelSize;
    fn bounds(&self) -> LatLngBounds;
    fn zoom(&self) -> u8;
    fn center(&self) -> LatLng;

    fn set_zoom(&mut self, zoom: u8);
    fn set_center(&mut self, center: LatLng);
    fn set_attribution(&mut self, previous: Option<&str>, current: Option<&str>);

    /// `index` is the layer's position in the stack, 0 at the bottom.
    fn add_layer(&mut self, layer: &Layer, index: usize) -> Result<RenderHandle, EngineError>;
    fn update_layer(&mut self, handle: RenderHandle, layer: &Layer) -> Result<(), EngineError>;
    fn remove_layer(&mut self, handle: RenderHandle) -> Result<(), EngineError>;

    fn add_geometry(&mut self, geometry: &Geometry) -> Result<RenderHandle, EngineError>;
    fn remove_geometry(&mut self, handle: RenderHandle) -> Result<(), EngineError>;
}

impl<E: RenderEngine + ?Sized> RenderEngine for Box<E> {
    fn provider(&self) -> Provider {
        (**self).provider()
    }

    fn size(&self) -> PixelSize {
        (**self).size()
    }

    fn bounds(&self) -> LatLngBounds {
        (**self).bounds()
    }

    fn zoom(&self) -> u8 {
        (**self).zoom()
    }

    fn center(&self) -> LatLng {
        (**self).center()
    }

    fn set_zoom(&mut self, zoom: u8) {
        (**self).set_zoom(zoom)
    }

    fn set_center(&mut self, center: LatLng) {
        (**self).set_center(center)
    }

    fn set_attribution(&mut self, previous: Option<&str>, current: Option<&str>) {
        (**self).set_attribution(previous, current)
    }

    fn add_layer(&mut self, layer: &Layer, index: usize) -> Result<RenderHandle, EngineError> {
        (**self).add_layer(layer, index)
    }

    fn update_layer(&mut self, handle: RenderHandle, layer: &Layer) -> Result<(), EngineError> {
        (**self).update_layer(handle, layer)
    }

    fn remove_layer(&mut self, handle: RenderHandle) -> Result<(), EngineError> {
        (**self).remove_layer(handle)
    }

    fn add_geometry(&mut self, geometry: &Geometry) -> Result<RenderHandle, EngineError> {
        (**self).add_geometry(geometry)
    }

    fn remove_geometry(&mut self, handle: RenderHandle) -> Result<(), EngineError> {
        (**self).remove_geometry(handle)
    }
}
