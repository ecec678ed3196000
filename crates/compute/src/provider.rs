use tracing::debug;

use crate::dataviews::{generate, Dataview, DataviewResult};
use crate::error::DataviewError;
use crate::features::Feature;

/// Feeds the stat generators with the features of one layer of a vector
/// layer view.
///
/// The source reports features for all of its layers at once; the provider
/// keeps the set at its own index.
#[derive(Debug, Clone, Default)]
pub struct GeoJsonDataProvider {
    layer_index: usize,
    features: Vec<Feature>,
    revision: u64,
}

impl GeoJsonDataProvider {
    pub fn new(layer_index: usize) -> Self {
        Self {
            layer_index,
            ..Self::default()
        }
    }

    pub fn layer_index(&self) -> usize {
        self.layer_index
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Bumped on every accepted feature update.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Takes this provider's slice of a per-layer feature update. Returns
    /// `false` when the update has no entry for this layer.
    pub fn on_features_changed(&mut self, per_layer: &[Vec<Feature>]) -> bool {
        let Some(features) = per_layer.get(self.layer_index) else {
            debug!(layer_index = self.layer_index, layers = per_layer.len(), "no features for layer");
            return false;
        };
        self.features = features.clone();
        self.revision += 1;
        true
    }

    pub fn generate(&self, dataview: &Dataview) -> Result<DataviewResult, DataviewError> {
        generate(dataview, &self.features)
    }
}
