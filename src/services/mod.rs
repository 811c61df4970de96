pub mod cache;
pub mod maas;
pub mod normalize;
pub mod weather;
