use compute::{parse_features, Dataview, GeoJsonDataProvider};
use foundation::bounds::{LatLng, LatLngBounds, PixelSize};
use foundation::math::{latlng_to_point, TILE_SIZE};
use map::{MapModel, MapOptions};
use serde::Serialize;
use tracing::info;
use view::{create_map, EngineCatalog, RenderEngine};

use crate::config::ToolError;

pub fn bounds_zoom(
    options: MapOptions,
    bounds: LatLngBounds,
    viewport: PixelSize,
) -> Result<Option<u8>, ToolError> {
    let model = MapModel::from_options(options).map_err(|e| ToolError::Config(e.to_string()))?;
    Ok(model.bounds_zoom(bounds, viewport))
}

/// Runs `dataview` over the features of one layer of a GeoJSON document.
pub fn run_dataview(
    geojson: &str,
    dataview: &Dataview,
    layer_index: usize,
) -> Result<serde_json::Value, ToolError> {
    let features = parse_features(geojson).map_err(|e| ToolError::Argument(e.to_string()))?;
    let mut per_layer = vec![Vec::new(); layer_index];
    per_layer.push(features);

    let mut provider = GeoJsonDataProvider::new(layer_index);
    provider.on_features_changed(&per_layer);
    let result = provider
        .generate(dataview)
        .map_err(|e| ToolError::Failed(e.to_string()))?;
    serde_json::to_value(&result).map_err(|e| ToolError::Failed(e.to_string()))
}

#[derive(Debug, Serialize)]
pub struct MapSummary {
    pub provider: String,
    pub zoom: u8,
    pub layers: usize,
    pub drawn_layers: usize,
    pub bounds: LatLngBounds,
    /// Base layer tile under the map center, for tiled base layers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_tile: Option<String>,
}

/// Column and row of the tile containing `center` at `zoom`.
fn tile_at(center: LatLng, zoom: u8) -> (u32, u32) {
    let p = latlng_to_point(center, f64::from(zoom));
    let last = f64::from(u32::MAX);
    let index = |v: f64| (v / TILE_SIZE).floor().clamp(0.0, last) as u32;
    (index(p.x), index(p.y))
}

/// Builds the map on a headless engine and reports what was drawn.
pub fn describe_map(options: MapOptions, viewport: PixelSize) -> Result<MapSummary, ToolError> {
    let (model, view) = create_map(options, &EngineCatalog::headless(), viewport)
        .map_err(|e| ToolError::Config(e.to_string()))?;
    info!(provider = %model.provider(), layers = model.layers().len(), "map created");
    let (x, y) = tile_at(model.center(), model.zoom());
    let center_tile = model
        .base_layer()
        .and_then(|base| base.tile_url(model.zoom(), x, y));
    Ok(MapSummary {
        provider: view.engine().provider().to_string(),
        zoom: model.zoom(),
        layers: model.layers().len(),
        drawn_layers: view.layer_count(),
        bounds: view.engine().bounds(),
        center_tile,
    })
}
