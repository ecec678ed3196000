pub mod analysis;
pub mod dataviews;
pub mod error;
pub mod features;
pub mod provider;

pub use dataviews::*;
pub use error::*;
pub use features::*;
pub use provider::*;
