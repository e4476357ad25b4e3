//! Bevy plugin wiring the swarm simulation into the schedule.

use bevy::prelude::*;
use log::info;

use crate::bee::{BeeRng, BeeTemplates};
use crate::flight::bee_flight_system;
use crate::settings::SwarmSettings;
use crate::spawner::{bee_spawn_system, spawn_initial_bees_system, BeeSpawnTimer};
use crate::viewport::{apply_display_resize_system, DisplaySize, ViewportBounds};

/// Ordered stages of a swarm frame.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwarmSet {
    /// Display size changes are folded into the viewport.
    Viewport,
    /// New bees are created.
    Spawn,
    /// Existing bees move, animate and leave.
    Flight,
}

/// Headless simulation plugin: viewport, spawner and flight.
///
/// Bees are only spawned once a [`BeeTemplates`] resource exists. With the
/// `render` feature the models plugin inserts it after loading; headless
/// apps insert it themselves.
///
/// # Examples
///
/// ```
/// use bevy::prelude::*;
/// use buzz::bee::BeeTemplates;
/// use buzz::bounds::BoundingBox;
/// use buzz::SwarmPlugin;
///
/// let mut app = App::new();
/// app.add_plugins(MinimalPlugins).add_plugins(SwarmPlugin);
/// app.insert_resource(BeeTemplates::new(BoundingBox::from_center_and_size(
///     Vec3::ZERO,
///     Vec3::splat(0.02),
/// )));
/// app.update();
/// ```
#[derive(Debug, Default)]
pub struct SwarmPlugin;

impl Plugin for SwarmPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SwarmSettings>();
        app.init_resource::<DisplaySize>();

        let settings = app.world().resource::<SwarmSettings>().clone();
        let rng = settings.seed.map_or_else(BeeRng::from_entropy, BeeRng::seeded);
        if let Some(seed) = settings.seed {
            info!("swarm seeded with {seed}");
        }

        let aspect = app
            .world()
            .resource::<DisplaySize>()
            .aspect()
            .unwrap_or(1.0);
        app.insert_resource(ViewportBounds::for_aspect(settings.half_width, aspect));
        app.insert_resource(rng);
        app.insert_resource(BeeSpawnTimer::every(settings.spawn_period_secs));

        app.configure_sets(
            Update,
            (SwarmSet::Viewport, SwarmSet::Spawn, SwarmSet::Flight).chain(),
        );
        app.add_systems(
            Update,
            apply_display_resize_system
                .run_if(resource_changed::<DisplaySize>)
                .in_set(SwarmSet::Viewport),
        );
        app.add_systems(
            Update,
            (
                spawn_initial_bees_system.run_if(resource_added::<BeeTemplates>),
                bee_spawn_system,
            )
                .chain()
                .run_if(resource_exists::<BeeTemplates>)
                .in_set(SwarmSet::Spawn),
        );
        app.add_systems(Update, bee_flight_system.in_set(SwarmSet::Flight));
    }
}
