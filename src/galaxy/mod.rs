mod galaxy_config;
mod generation;

pub use galaxy_config::{GalaxyConfig, GalaxyConfigPlugin};
pub use generation::{GalaxyBuffer, GenerationControl, GenerationPlugin};
