use std::future::{ready, Future};

use layers::Layer;

use crate::error::PersistError;
use crate::options::MapOptions;

/// Remote (or local) persistence for layers and map state.
///
/// Saves are the only suspension points of the model.
pub trait MapStore {
    fn save_layer(&mut self, layer: &Layer) -> impl Future<Output = Result<(), PersistError>>;
    fn save_map(&mut self, snapshot: &MapOptions) -> impl Future<Output = Result<(), PersistError>>;
}

/// Records every save; can be armed to reject the next one.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    layer_saves: Vec<Layer>,
    map_saves: Vec<MapOptions>,
    fail_next: Option<PersistError>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next save (of either kind) returns `err` and records nothing.
    pub fn fail_next(&mut self, err: PersistError) {
        self.fail_next = Some(err);
    }

    pub fn layer_saves(&self) -> &[Layer] {
        &self.layer_saves
    }

    pub fn map_saves(&self) -> &[MapOptions] {
        &self.map_saves
    }

    pub fn last_map(&self) -> Option<&MapOptions> {
        self.map_saves.last()
    }
}

impl MapStore for InMemoryStore {
    fn save_layer(&mut self, layer: &Layer) -> impl Future<Output = Result<(), PersistError>> {
        let result = match self.fail_next.take() {
            Some(err) => Err(err),
            None => {
                self.layer_saves.push(layer.clone());
                Ok(())
            }
        };
        ready(result)
    }

    fn save_map(&mut self, snapshot: &MapOptions) -> impl Future<Output = Result<(), PersistError>> {
        let result = match self.fail_next.take() {
            Some(err) => Err(err),
            None => {
                self.map_saves.push(snapshot.clone());
                Ok(())
            }
        };
        ready(result)
    }
}
