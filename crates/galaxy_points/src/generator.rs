//! Spiral branch point cloud generation.
//!
//! Each particle gets a random distance from the center, sits on one of
//! `branches` evenly spaced arms chosen by its index, is twisted by `spin`
//! proportionally to that distance and finally pushed off the arm by a
//! per-axis jitter. Raising the jitter draw to `randomness_power` keeps most
//! particles close to the arm while letting a few stray far away.
use std::f32::consts::TAU;
use std::sync::atomic::{AtomicBool, Ordering};

use bevy::color::{LinearRgba, Mix};
use rayon::prelude::*;

use crate::{GalaxyError, GalaxyParameters, GalaxyResult, ParticleBuffer, RandomSource, RngSource};

/// Particles generated per rayon work item in [`generate`].
const CHUNK_SIZE: usize = 4096;

/// Generates a galaxy using thread-local randomness, in parallel.
pub fn generate(params: &GalaxyParameters) -> GalaxyResult<ParticleBuffer> {
    generate_cancellable(params, &AtomicBool::new(false))
}

/// Like [`generate`], but gives up with [`GalaxyError::Cancelled`] once
/// `cancel` is set. The flag is checked before every chunk of particles.
pub fn generate_cancellable(
    params: &GalaxyParameters,
    cancel: &AtomicBool,
) -> GalaxyResult<ParticleBuffer> {
    params.validate()?;
    let colors = RadialColors::new(params);
    let mut buffer = ParticleBuffer::zeroed(params.count as usize);

    buffer
        .positions
        .par_chunks_mut(CHUNK_SIZE)
        .zip(buffer.colors.par_chunks_mut(CHUNK_SIZE))
        .enumerate()
        .for_each(|(chunk, (positions, chunk_colors))| {
            if cancel.load(Ordering::Relaxed) {
                return;
            }
            let mut rng = RngSource::thread();
            let first = chunk * CHUNK_SIZE;
            for (offset, (position, color)) in
                positions.iter_mut().zip(chunk_colors.iter_mut()).enumerate()
            {
                (*position, *color) = place_particle(params, &colors, first + offset, &mut rng);
            }
        });

    if cancel.load(Ordering::Relaxed) {
        return Err(GalaxyError::Cancelled);
    }
    Ok(buffer)
}

/// Generates a galaxy sequentially, drawing every random value from `rng`.
pub fn generate_with<R: RandomSource + ?Sized>(
    params: &GalaxyParameters,
    rng: &mut R,
) -> GalaxyResult<ParticleBuffer> {
    params.validate()?;
    let colors = RadialColors::new(params);
    let count = params.count as usize;
    let mut buffer = ParticleBuffer {
        positions: Vec::with_capacity(count),
        colors: Vec::with_capacity(count),
    };
    for index in 0..count {
        let (position, color) = place_particle(params, &colors, index, rng);
        buffer.positions.push(position);
        buffer.colors.push(color);
    }
    Ok(buffer)
}

/// Position and color of particle `index`.
///
/// Consumes seven draws from `rng`: the radius, then a magnitude and a sign
/// for each of x, y and z. Does not validate `params`.
pub(crate) fn sample_particle<R: RandomSource + ?Sized>(
    params: &GalaxyParameters,
    index: usize,
    rng: &mut R,
) -> ([f32; 3], [f32; 3]) {
    place_particle(params, &RadialColors::new(params), index, rng)
}

/// Angle of the arm particle `index` belongs to. Arms are assigned round-robin.
/// `branches` must be non-zero.
pub(crate) fn branch_angle(index: usize, branches: u32) -> f32 {
    let branches = branches as usize;
    (index % branches) as f32 / branches as f32 * TAU
}

/// Interpolation weight between the inside and outside colors, 0 at the
/// center and 1 at `max_radius`. A zero `max_radius` yields the inside color.
pub fn color_mix_factor(radius: f32, max_radius: f32) -> f32 {
    if max_radius > 0.0 {
        (radius / max_radius).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

struct RadialColors {
    inside: LinearRgba,
    outside: LinearRgba,
}

impl RadialColors {
    fn new(params: &GalaxyParameters) -> Self {
        Self {
            inside: LinearRgba::from(params.inside_color),
            outside: LinearRgba::from(params.outside_color),
        }
    }

    fn at(&self, factor: f32) -> [f32; 3] {
        let mixed = self.inside.mix(&self.outside, factor);
        [mixed.red, mixed.green, mixed.blue]
    }
}

fn place_particle<R: RandomSource + ?Sized>(
    params: &GalaxyParameters,
    colors: &RadialColors,
    index: usize,
    rng: &mut R,
) -> ([f32; 3], [f32; 3]) {
    let radius = rng.next_unit() * params.radius;
    let angle = branch_angle(index, params.branches) + radius * params.spin;

    let jitter_x = jitter(params, radius, rng);
    let jitter_y = jitter(params, radius, rng);
    let jitter_z = jitter(params, radius, rng);

    let position = [
        angle.cos() * radius + jitter_x,
        jitter_y,
        angle.sin() * radius + jitter_z,
    ];
    let color = colors.at(color_mix_factor(radius, params.radius));
    (position, color)
}

fn jitter<R: RandomSource + ?Sized>(params: &GalaxyParameters, radius: f32, rng: &mut R) -> f32 {
    let magnitude = rng.next_unit().powf(params.randomness_power);
    let sign = if rng.next_unit() < 0.5 { 1.0 } else { -1.0 };
    magnitude * sign * params.randomness * radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedSequence;

    #[test]
    fn branch_angles_are_evenly_spaced() {
        assert_eq!(branch_angle(0, 4), 0.0);
        assert!((branch_angle(1, 4) - TAU / 4.0).abs() < 1e-6);
        assert!((branch_angle(3, 4) - 3.0 * TAU / 4.0).abs() < 1e-6);
        assert_eq!(branch_angle(4, 4), 0.0);
        assert_eq!(branch_angle(17, 1), 0.0);
    }

    #[test]
    fn mix_factor_guards_zero_radius() {
        assert_eq!(color_mix_factor(0.0, 0.0), 0.0);
        assert_eq!(color_mix_factor(2.5, 5.0), 0.5);
        assert_eq!(color_mix_factor(6.0, 5.0), 1.0);
    }

    #[test]
    fn jitter_follows_power_and_sign() {
        let params = GalaxyParameters {
            randomness: 0.5,
            randomness_power: 2.0,
            ..Default::default()
        };
        // magnitude 0.5^2, sign draw >= 0.5 flips to negative
        let mut rng = FixedSequence::new([0.5, 0.75]);
        assert!((jitter(&params, 4.0, &mut rng) + 0.5).abs() < 1e-6);
        let mut rng = FixedSequence::new([0.5, 0.25]);
        assert!((jitter(&params, 4.0, &mut rng) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn sample_consumes_seven_draws() {
        let params = GalaxyParameters::default();
        // radius draw 0.5, then six jitter draws, then the next radius draw
        let mut rng = FixedSequence::new([0.5, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.0]);
        sample_particle(&params, 0, &mut rng);
        assert_eq!(rng.next_unit(), 0.0);
    }

    #[test]
    fn cancelled_generation_produces_nothing() {
        let params = GalaxyParameters::default();
        let cancel = AtomicBool::new(true);
        assert_eq!(
            generate_cancellable(&params, &cancel),
            Err(GalaxyError::Cancelled)
        );
    }

    #[test]
    fn cancellation_does_not_mask_invalid_parameters() {
        let params = GalaxyParameters {
            branches: 0,
            ..Default::default()
        };
        let cancel = AtomicBool::new(true);
        assert!(matches!(
            generate_cancellable(&params, &cancel),
            Err(GalaxyError::InvalidParameter { field: "branches", .. })
        ));
    }

    #[test]
    fn sampling_matches_sequential_generation() {
        let params = GalaxyParameters {
            count: 1,
            ..Default::default()
        };
        let draws = [0.4, 0.3, 0.2, 0.6, 0.7, 0.1, 0.9];
        let sampled = sample_particle(&params, 0, &mut FixedSequence::new(draws));
        let buffer = generate_with(&params, &mut FixedSequence::new(draws)).unwrap();
        assert_eq!(sampled, (buffer.positions[0], buffer.colors[0]));
    }

    #[test]
    fn parallel_chunks_cover_every_index() {
        let params = GalaxyParameters {
            count: (CHUNK_SIZE * 2 + 17) as u32,
            randomness: 0.0,
            spin: 0.0,
            branches: 5,
            ..Default::default()
        };
        let buffer = generate(&params).unwrap();
        assert_eq!(buffer.len(), params.count as usize);
        for (index, position) in buffer.positions.iter().enumerate() {
            let angle = branch_angle(index, params.branches);
            let radius = (position[0].powi(2) + position[2].powi(2)).sqrt();
            if radius > 1e-3 {
                let measured = position[2].atan2(position[0]).rem_euclid(TAU);
                let delta = (measured - angle).abs();
                assert!(delta < 1e-3 || (TAU - delta) < 1e-3, "particle {index}");
            }
        }
    }
}
