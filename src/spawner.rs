//! Swarm population: the initial flight and the periodic spawner.

use std::time::Duration;

use bevy::prelude::*;
use log::info;
use rand::Rng;

use crate::bee::{BeeRng, BeeTemplates};
use crate::factory::{plan_bee, spawn_bee};
use crate::settings::SwarmSettings;
use crate::viewport::ViewportBounds;

/// Repeating timer driving periodic spawn attempts.
#[derive(Resource, Debug, Clone, Deref, DerefMut)]
pub struct BeeSpawnTimer(pub Timer);

impl BeeSpawnTimer {
    /// Timer firing every `period_secs` seconds.
    ///
    /// Periods too long for a [`Duration`] never fire; non-positive ones fire
    /// as often as the clock allows.
    #[must_use]
    pub fn every(period_secs: f32) -> Self {
        let period =
            Duration::try_from_secs_f32(period_secs.max(f32::EPSILON)).unwrap_or(Duration::MAX);
        Self(Timer::new(period, TimerMode::Repeating))
    }
}

/// Read-only inputs the factory needs, bundled for spawning systems.
#[derive(bevy::ecs::system::SystemParam)]
pub struct BeeFactoryContext<'w> {
    templates: Res<'w, BeeTemplates>,
    viewport: Res<'w, ViewportBounds>,
    settings: Res<'w, SwarmSettings>,
    rng: ResMut<'w, BeeRng>,
}

impl BeeFactoryContext<'_> {
    /// Plans and spawns one bee.
    pub fn spawn(&mut self, commands: &mut Commands) -> Entity {
        let blueprint = plan_bee(
            &mut self.rng.0,
            &self.viewport,
            &self.templates,
            &self.settings,
        );
        spawn_bee(commands, blueprint)
    }

    /// Draws against the configured spawn chance.
    pub fn roll(&mut self) -> bool {
        self.rng.gen::<f64>() < self.settings.spawn_chance
    }
}

/// Spawns the initial population the frame the templates become available.
pub fn spawn_initial_bees_system(mut commands: Commands, mut factory: BeeFactoryContext) {
    let count = factory.settings.initial_bees;
    for _ in 0..count {
        factory.spawn(&mut commands);
    }
    info!("released {count} bees");
}

/// Spawns a bee for every completed timer period that wins the spawn roll.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn bee_spawn_system(
    mut commands: Commands,
    time: Res<Time>,
    mut timer: ResMut<BeeSpawnTimer>,
    mut factory: BeeFactoryContext,
) {
    timer.tick(time.delta());
    for _ in 0..timer.times_finished_this_tick() {
        if factory.roll() {
            factory.spawn(&mut commands);
        }
    }
}
