pub mod cache_aside;
pub mod dashboard;
pub mod datalab;
pub mod images;
pub mod news;
pub mod videos;

pub use cache_aside::CacheAside;
