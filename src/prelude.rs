pub use crate::galaxy::{GalaxyBuffer, GalaxyConfig, GenerationControl};
pub use galaxy_points::prelude::*;
