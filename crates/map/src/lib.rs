pub mod error;
pub mod events;
pub mod geometry;
pub mod model;
pub mod options;
pub mod persistence;

pub use error::*;
pub use events::*;
pub use geometry::*;
pub use model::*;
pub use options::*;
pub use persistence::*;
