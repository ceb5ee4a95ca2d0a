use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bevy::prelude::*;
use bevy::tasks::{block_on, futures_lite::future, AsyncComputeTaskPool, Task};
use galaxy_points::{GalaxyError, GalaxyParameters, GalaxyResult, ParticleBuffer};

use super::GalaxyConfig;

pub struct GenerationPlugin;

impl Plugin for GenerationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GenerationControl>()
            .add_systems(PostUpdate, (dispatch_generation, poll_generation).chain());
    }
}

/// The point cloud currently installed, with the parameters it was built from.
///
/// Replaced wholesale whenever a generation finishes.
#[derive(Resource)]
pub struct GalaxyBuffer {
    pub generation: i32,
    pub params: GalaxyParameters,
    pub particles: ParticleBuffer,
}

struct InFlight {
    task: Task<GalaxyResult<GalaxyBuffer>>,
    cancel: Arc<AtomicBool>,
}

#[derive(Resource)]
pub struct GenerationControl {
    generation: i32,
    in_flight: Option<InFlight>,
}

impl Default for GenerationControl {
    fn default() -> Self {
        Self {
            generation: -1,
            in_flight: None,
        }
    }
}

impl GenerationControl {
    pub fn is_generating(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Last generation handed to the task pool.
    #[cfg(test)]
    pub fn dispatched(&self) -> i32 {
        self.generation
    }

    #[cfg(test)]
    fn cancel_flag(&self) -> Option<Arc<AtomicBool>> {
        self.in_flight.as_ref().map(|in_flight| in_flight.cancel.clone())
    }
}

/// Starts generating the current config on the async compute pool.
///
/// A task still working on an older generation is told to stop and dropped,
/// so at most one generation occupies the pool.
fn dispatch_generation(galaxy_config: Res<GalaxyConfig>, mut control: ResMut<GenerationControl>) {
    if control.generation == galaxy_config.generation {
        return;
    }
    control.generation = galaxy_config.generation;

    if let Some(stale) = control.in_flight.take() {
        stale.cancel.store(true, Ordering::Relaxed);
        debug!("Superseding in-flight galaxy generation");
    }

    let generation = galaxy_config.generation;
    let params = galaxy_config.params.clone();
    let cancel = Arc::new(AtomicBool::new(false));
    let task_cancel = cancel.clone();
    let task = AsyncComputeTaskPool::get().spawn(async move {
        let particles = galaxy_points::generate_cancellable(&params, &task_cancel)?;
        GalaxyResult::Ok(GalaxyBuffer {
            generation,
            params,
            particles,
        })
    });
    control.in_flight = Some(InFlight { task, cancel });
}

fn poll_generation(mut commands: Commands, mut control: ResMut<GenerationControl>) {
    let Some(in_flight) = control.in_flight.as_mut() else {
        return;
    };
    let Some(result) = block_on(future::poll_once(&mut in_flight.task)) else {
        return;
    };
    control.in_flight = None;

    match result {
        Ok(buffer) => {
            info!(
                "Generated galaxy {} with {} particles",
                buffer.generation,
                buffer.particles.len()
            );
            commands.insert_resource(buffer);
        }
        Err(GalaxyError::Cancelled) => debug!("Galaxy generation cancelled"),
        Err(err) => warn!("Galaxy generation rejected, keeping previous galaxy: {err}"),
    }
}
