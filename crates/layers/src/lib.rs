pub mod cartodb;
pub mod collection;
pub mod layer;
pub mod raster;
pub mod symbology;

pub use cartodb::*;
pub use collection::*;
pub use layer::*;
pub use raster::*;
pub use symbology::*;
