pub mod error;
pub mod http;
pub mod mapbox;
pub mod types;

pub use error::*;
pub use http::*;
pub use mapbox::*;
pub use types::*;
