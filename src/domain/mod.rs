pub mod cache;
pub mod error;
pub mod model;
pub mod traits;
pub mod transform;
pub mod wire;
