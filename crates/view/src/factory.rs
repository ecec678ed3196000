use std::collections::BTreeMap;

use foundation::bounds::PixelSize;
use map::{MapModel, MapOptions, Provider};
use tracing::{debug, error};

use crate::engine::RenderEngine;
use crate::error::ViewError;
use crate::headless::HeadlessEngine;
use crate::view::MapView;

pub type DynEngine = Box<dyn RenderEngine>;
pub type EngineBuilder = Box<dyn Fn(PixelSize) -> DynEngine>;

/// Engines available to this process, keyed by provider.
#[derive(Default)]
pub struct EngineCatalog {
    builders: BTreeMap<Provider, EngineBuilder>,
}

impl std::fmt::Debug for EngineCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineCatalog")
            .field("providers", &self.builders.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl EngineCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Headless engines for every provider.
    pub fn headless() -> Self {
        let mut catalog = Self::new();
        for provider in [Provider::Leaflet, Provider::GoogleMaps] {
            catalog.register(
                provider,
                Box::new(move |size| Box::new(HeadlessEngine::new(provider, size)) as DynEngine),
            );
        }
        catalog
    }

    pub fn register(&mut self, provider: Provider, builder: EngineBuilder) {
        self.builders.insert(provider, builder);
    }

    pub fn contains(&self, provider: Provider) -> bool {
        self.builders.contains_key(&provider)
    }

    /// Builds the engine for `provider`. A missing Google Maps engine falls
    /// back to Leaflet; a missing Leaflet engine is an error.
    pub fn build(&self, provider: Provider, size: PixelSize) -> Result<DynEngine, ViewError> {
        if let Some(builder) = self.builders.get(&provider) {
            debug!(%provider, "building map engine");
            return Ok(builder(size));
        }
        if provider == Provider::GoogleMaps {
            error!("Google Maps engine is not available, falling back to Leaflet");
        }
        self.builders
            .get(&Provider::Leaflet)
            .map(|builder| builder(size))
            .ok_or(ViewError::EngineUnavailable(Provider::Leaflet))
    }
}

/// View for `model` on the engine matching its provider.
pub fn create_map_view(
    model: &mut MapModel,
    catalog: &EngineCatalog,
    size: PixelSize,
) -> Result<MapView<DynEngine>, ViewError> {
    let engine = catalog.build(model.provider(), size)?;
    Ok(MapView::new(model, engine))
}

/// Model built from `options` together with its view.
pub fn create_map(
    options: MapOptions,
    catalog: &EngineCatalog,
    size: PixelSize,
) -> Result<(MapModel, MapView<DynEngine>), ViewError> {
    let mut model = MapModel::from_options(options)?;
    let view = create_map_view(&mut model, catalog, size)?;
    Ok((model, view))
}
