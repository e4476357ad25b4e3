//! Runtime configuration for the swarm.

use bevy::prelude::*;

use crate::{BEE_CHANCE, BEE_SPEED, INITIAL_BEES, SCENE_HALF_WIDTH, SPAWN_PERIOD_SECS};

/// Tunable swarm parameters.
///
/// Defaults come from the crate constants. Insert a customised value before
/// adding [`crate::SwarmPlugin`] to override them.
///
/// # Examples
///
/// ```
/// use bevy::prelude::*;
/// use buzz::{SwarmPlugin, SwarmSettings};
///
/// let mut app = App::new();
/// app.insert_resource(SwarmSettings {
///     spawn_chance: 0.0,
///     seed: Some(7),
///     ..SwarmSettings::default()
/// });
/// app.add_plugins(SwarmPlugin);
/// ```
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct SwarmSettings {
    /// Probability in `[0, 1]` that a spawn tick produces a bee.
    pub spawn_chance: f64,
    /// Bees created once the models are available.
    pub initial_bees: usize,
    /// Half of the visible scene width in world units.
    pub half_width: f32,
    /// Base flight speed in world units per second.
    pub base_speed: f32,
    /// Seconds between spawn ticks.
    pub spawn_period_secs: f32,
    /// Seed for the swarm's random source; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for SwarmSettings {
    fn default() -> Self {
        Self {
            spawn_chance: BEE_CHANCE,
            initial_bees: INITIAL_BEES,
            half_width: SCENE_HALF_WIDTH,
            base_speed: BEE_SPEED,
            spawn_period_secs: SPAWN_PERIOD_SECS,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_constants() {
        let settings = SwarmSettings::default();
        assert!((settings.spawn_chance - 1.0).abs() < f64::EPSILON);
        assert_eq!(settings.initial_bees, 10);
        assert!((settings.half_width - 5.0).abs() < f32::EPSILON);
        assert!((settings.base_speed - 5.0).abs() < f32::EPSILON);
        assert!((settings.spawn_period_secs - 1.0).abs() < f32::EPSILON);
        assert_eq!(settings.seed, None);
    }
}
