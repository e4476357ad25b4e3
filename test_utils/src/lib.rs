//! Utility helpers for swarm tests.
//!
//! Builds headless apps with a fixed frame step so behavioural tests can
//! reason about elapsed time exactly.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use buzz::{Bee, BeeBounds, BoundingBox, DisplaySize, Glasses, SwarmPlugin, SwarmSettings};

/// Edge length of the footprint used by [`small_templates`].
pub const TEST_FOOTPRINT_SIZE: f32 = 0.02;

/// Templates with a small cubic footprint, standing in for the bee model.
///
/// # Examples
/// ```
/// let templates = test_utils::small_templates();
/// assert!(templates.footprint.size().x > 0.0);
/// ```
#[must_use]
pub fn small_templates() -> buzz::BeeTemplates {
    buzz::BeeTemplates::new(BoundingBox::from_center_and_size(
        Vec3::ZERO,
        Vec3::splat(TEST_FOOTPRINT_SIZE),
    ))
}

/// Builds a headless swarm app advancing `step` per update.
///
/// The first update always sees a zero delta; every later one sees `step`.
/// Templates are inserted, so the initial population appears on the first
/// update.
#[must_use]
pub fn swarm_app(settings: SwarmSettings, display: DisplaySize, step: Duration) -> App {
    let mut app = App::new();
    app.insert_resource(settings);
    app.insert_resource(display);
    app.add_plugins(MinimalPlugins).add_plugins(SwarmPlugin);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(step));
    app.insert_resource(small_templates());
    app
}

/// Number of live bees.
pub fn bee_count(world: &mut World) -> usize {
    world.query::<&Bee>().iter(world).count()
}

/// Snapshot of every live bee.
pub fn bees(world: &mut World) -> Vec<(Entity, Bee, Transform, BeeBounds)> {
    world
        .query::<(Entity, &Bee, &Transform, &BeeBounds)>()
        .iter(world)
        .map(|(entity, bee, transform, bounds)| (entity, bee.clone(), *transform, *bounds))
        .collect()
}

/// Number of glasses children attached to `bee`.
pub fn glasses_on(world: &World, bee: Entity) -> usize {
    let children: Vec<Entity> = world
        .get::<Children>(bee)
        .map(|c| c.to_vec())
        .unwrap_or_default();
    children
        .into_iter()
        .filter(|child| world.get::<Glasses>(*child).is_some())
        .count()
}
