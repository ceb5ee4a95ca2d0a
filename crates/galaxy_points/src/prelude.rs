pub use crate::{
    FixedSequence, GalaxyError, GalaxyParameters, GalaxyResult, ParticleBuffer, RandomSource,
    RngSource, generate, generate_cancellable, generate_with,
};
