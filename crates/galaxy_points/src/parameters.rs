use bevy::color::Srgba;

use crate::{GalaxyError, GalaxyResult};

#[derive(Clone, Debug, PartialEq)]
pub struct GalaxyParameters {
    pub count: u32,
    /// Point size handed to the renderer; the generator ignores it.
    pub size: f32,
    pub radius: f32,
    pub branches: u32,
    /// Angular twist per unit of radius.
    pub spin: f32,
    pub randomness: f32,
    /// Higher values pull jitter magnitudes towards zero.
    pub randomness_power: f32,
    pub inside_color: Srgba,
    pub outside_color: Srgba,
}

impl Default for GalaxyParameters {
    fn default() -> Self {
        Self {
            count: 100_000,
            size: 0.01,
            radius: 5.0,
            branches: 3,
            spin: 1.0,
            randomness: 0.2,
            randomness_power: 3.0,
            inside_color: Srgba::rgb_u8(0xff, 0x60, 0x30),
            outside_color: Srgba::rgb_u8(0x1b, 0x39, 0x84),
        }
    }
}

// Editing ranges for the parameter panel. Colors have no range and are left
// at black.
impl GalaxyParameters {
    pub const MIN: Self = Self {
        count: 100,
        size: 0.001,
        radius: 0.01,
        branches: 2,
        spin: -5.0,
        randomness: 0.0,
        randomness_power: 1.0,
        inside_color: Srgba::BLACK,
        outside_color: Srgba::BLACK,
    };
    pub const MAX: Self = Self {
        count: 1_000_000,
        size: 0.1,
        radius: 20.0,
        branches: 20,
        spin: 5.0,
        randomness: 2.0,
        randomness_power: 10.0,
        inside_color: Srgba::BLACK,
        outside_color: Srgba::BLACK,
    };
    pub const STEP: Self = Self {
        count: 100,
        size: 0.001,
        radius: 0.01,
        branches: 1,
        spin: 0.001,
        randomness: 0.001,
        randomness_power: 0.001,
        inside_color: Srgba::BLACK,
        outside_color: Srgba::BLACK,
    };

    /// Hard ceiling on particle count, shared with the panel's slider.
    pub const MAX_COUNT: u32 = Self::MAX.count;

    /// Checks every field against the domain the generator accepts.
    ///
    /// This is wider than the editing ranges above: a single branch, a radius
    /// of zero or a handful of particles are all valid inputs.
    pub fn validate(&self) -> GalaxyResult<()> {
        if self.count == 0 {
            return Err(GalaxyError::invalid("count", "must be at least 1"));
        }
        if self.count > Self::MAX_COUNT {
            return Err(GalaxyError::invalid(
                "count",
                format!("must not exceed {}", Self::MAX_COUNT),
            ));
        }
        if self.branches == 0 {
            return Err(GalaxyError::invalid("branches", "must be at least 1"));
        }
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(GalaxyError::invalid("size", "must be a positive number"));
        }
        if !(self.radius.is_finite() && self.radius >= 0.0) {
            return Err(GalaxyError::invalid("radius", "must be zero or positive"));
        }
        if !self.spin.is_finite() {
            return Err(GalaxyError::invalid("spin", "must be finite"));
        }
        if !(self.randomness.is_finite() && self.randomness >= 0.0) {
            return Err(GalaxyError::invalid(
                "randomness",
                "must be zero or positive",
            ));
        }
        if !(self.randomness_power.is_finite() && self.randomness_power >= 1.0) {
            return Err(GalaxyError::invalid(
                "randomness_power",
                "must be at least 1",
            ));
        }
        check_color("inside_color", self.inside_color)?;
        check_color("outside_color", self.outside_color)?;
        Ok(())
    }
}

fn check_color(field: &'static str, color: Srgba) -> GalaxyResult<()> {
    let in_gamut = [color.red, color.green, color.blue]
        .iter()
        .all(|c| (0.0..=1.0).contains(c));
    if in_gamut {
        Ok(())
    } else {
        Err(GalaxyError::invalid(
            field,
            "color channels must lie in [0, 1]",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(result: GalaxyResult<()>) -> &'static str {
        match result {
            Err(GalaxyError::InvalidParameter { field, .. }) => field,
            Ok(()) | Err(GalaxyError::Cancelled) => panic!("expected an invalid parameter"),
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GalaxyParameters::default().validate(), Ok(()));
    }

    #[test]
    fn editing_bounds_are_valid() {
        assert_eq!(GalaxyParameters::MIN.validate(), Ok(()));
        assert_eq!(GalaxyParameters::MAX.validate(), Ok(()));
    }

    #[test]
    fn zero_count_is_rejected() {
        let params = GalaxyParameters {
            count: 0,
            ..default_params()
        };
        assert_eq!(field_of(params.validate()), "count");
    }

    #[test]
    fn oversized_count_is_rejected() {
        let params = GalaxyParameters {
            count: GalaxyParameters::MAX_COUNT + 1,
            ..default_params()
        };
        assert_eq!(field_of(params.validate()), "count");
    }

    #[test]
    fn zero_branches_is_rejected() {
        let params = GalaxyParameters {
            branches: 0,
            ..default_params()
        };
        assert_eq!(field_of(params.validate()), "branches");
    }

    #[test]
    fn single_branch_and_zero_radius_are_accepted() {
        let params = GalaxyParameters {
            branches: 1,
            radius: 0.0,
            ..default_params()
        };
        assert_eq!(params.validate(), Ok(()));
    }

    #[test]
    fn numeric_domains_are_enforced() {
        let cases = [
            (
                GalaxyParameters {
                    radius: -1.0,
                    ..default_params()
                },
                "radius",
            ),
            (
                GalaxyParameters {
                    size: 0.0,
                    ..default_params()
                },
                "size",
            ),
            (
                GalaxyParameters {
                    spin: f32::NAN,
                    ..default_params()
                },
                "spin",
            ),
            (
                GalaxyParameters {
                    randomness: -0.1,
                    ..default_params()
                },
                "randomness",
            ),
            (
                GalaxyParameters {
                    randomness_power: 0.5,
                    ..default_params()
                },
                "randomness_power",
            ),
            (
                GalaxyParameters {
                    outside_color: Srgba::rgb(1.5, 0.0, 0.0),
                    ..default_params()
                },
                "outside_color",
            ),
        ];
        for (params, expected) in cases {
            assert_eq!(field_of(params.validate()), expected);
        }
    }

    fn default_params() -> GalaxyParameters {
        GalaxyParameters::default()
    }
}
