use layers::{CollectionError, LayerCid};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistError {
    Unavailable,
    Rejected(String),
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistError::Unavailable => write!(f, "persistence backend unavailable"),
            PersistError::Rejected(msg) => write!(f, "save rejected: {msg}"),
        }
    }
}

impl std::error::Error for PersistError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    DuplicateLayer(LayerCid),
    Persist(PersistError),
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::DuplicateLayer(cid) => write!(f, "layer {cid} is already on the map"),
            MapError::Persist(err) => write!(f, "layer persistence failed: {err}"),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::Persist(err) => Some(err),
            MapError::DuplicateLayer(_) => None,
        }
    }
}

impl From<CollectionError> for MapError {
    fn from(err: CollectionError) -> Self {
        match err {
            CollectionError::Duplicate(cid) => MapError::DuplicateLayer(cid),
        }
    }
}

impl From<PersistError> for MapError {
    fn from(err: PersistError) -> Self {
        MapError::Persist(err)
    }
}
