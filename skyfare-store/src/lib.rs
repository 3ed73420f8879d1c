pub mod app_config;
pub mod duffel;
pub mod mapping;

pub use duffel::DuffelClient;
