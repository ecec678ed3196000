use layers::LayerType;
use map::{MapError, Provider};

use crate::engine::RenderHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    UnsupportedLayer {
        provider: Provider,
        layer_type: LayerType,
    },
    UnknownHandle(RenderHandle),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::UnsupportedLayer {
                provider,
                layer_type,
            } => write!(f, "{provider} cannot render {layer_type} layers"),
            EngineError::UnknownHandle(handle) => write!(f, "unknown render handle {handle}"),
        }
    }
}

impl std::error::Error for EngineError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    EngineUnavailable(Provider),
    Map(MapError),
}

impl std::fmt::Display for ViewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewError::EngineUnavailable(provider) => {
                write!(f, "no {provider} engine registered")
            }
            ViewError::Map(err) => write!(f, "invalid map: {err}"),
        }
    }
}

impl std::error::Error for ViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewError::Map(err) => Some(err),
            ViewError::EngineUnavailable(_) => None,
        }
    }
}

impl From<MapError> for ViewError {
    fn from(err: MapError) -> Self {
        ViewError::Map(err)
    }
}
