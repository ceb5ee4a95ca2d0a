use bevy::prelude::*;
use galaxy_points::GalaxyParameters;

/// The committed galaxy parameters.
///
/// `generation` increases every time the parameters change (or a regeneration
/// is requested); everything downstream keys off it.
#[derive(Resource, Clone, PartialEq, Debug)]
pub struct GalaxyConfig {
    pub generation: i32,
    pub params: GalaxyParameters,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            generation: 1,
            params: GalaxyParameters::default(),
        }
    }
}

impl GalaxyConfig {
    /// Requests a fresh point cloud with unchanged parameters.
    pub fn regenerate(&mut self) {
        self.generation += 1;
    }
}

#[derive(Resource, Default)]
struct GalaxyConfigOld(Option<GalaxyParameters>);

pub struct GalaxyConfigPlugin;

impl Plugin for GalaxyConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GalaxyConfig>()
            .init_resource::<GalaxyConfigOld>()
            .add_systems(Update, apply_ui_updates);
    }
}

fn apply_ui_updates(
    mut galaxy_config_old: ResMut<GalaxyConfigOld>,
    mut galaxy_config: ResMut<GalaxyConfig>,
) {
    if !galaxy_config.is_changed() {
        return;
    }
    match &galaxy_config_old.0 {
        // first sighting, the initial generation stands
        None => {}
        Some(old) if *old == galaxy_config.params => return,
        Some(_) => {
            galaxy_config.generation += 1;
            debug!(
                "Galaxy parameters changed, generation {}",
                galaxy_config.generation
            );
        }
    }
    galaxy_config_old.0 = Some(galaxy_config.params.clone());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(GalaxyConfigPlugin);
        app.update();
        app
    }

    fn generation(app: &App) -> i32 {
        app.world().resource::<GalaxyConfig>().generation
    }

    #[test]
    fn initial_generation_is_kept() {
        let app = app();
        assert_eq!(generation(&app), 1);
    }

    #[test]
    fn parameter_edit_bumps_generation_once() {
        let mut app = app();
        app.world_mut().resource_mut::<GalaxyConfig>().params.spin = 2.0;
        app.update();
        assert_eq!(generation(&app), 2);
        app.update();
        assert_eq!(generation(&app), 2);
    }

    #[test]
    fn rewriting_same_values_is_ignored() {
        let mut app = app();
        app.world_mut().resource_mut::<GalaxyConfig>().params = GalaxyParameters::default();
        app.update();
        assert_eq!(generation(&app), 1);
    }

    #[test]
    fn regenerate_bumps_without_edits() {
        let mut app = app();
        app.world_mut().resource_mut::<GalaxyConfig>().regenerate();
        app.update();
        assert_eq!(generation(&app), 2);
    }
}
