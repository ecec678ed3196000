pub mod engine;
pub mod error;
pub mod factory;
pub mod headless;
pub mod view;

pub use engine::*;
pub use error::*;
pub use factory::*;
pub use headless::*;
pub use view::*;
