//! Procedural spiral galaxy point clouds.
//!
//! [`generate`] turns a [`GalaxyParameters`] set into a [`ParticleBuffer`]:
//! one position and one color per particle, laid out along evenly spaced
//! spiral branches with randomized jitter.
mod buffer;
mod error;
pub mod generator;
mod parameters;
pub mod prelude;
pub mod random;

pub use buffer::ParticleBuffer;
pub use error::{GalaxyError, GalaxyResult};
pub use generator::{generate, generate_cancellable, generate_with};
pub use parameters::GalaxyParameters;
pub use random::{FixedSequence, RandomSource, RngSource};
