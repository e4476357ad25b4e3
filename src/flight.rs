//! Per-frame bee simulation: entry, wandering, culling and animation.
//!
//! A bee flies straight in from its spawn point at the base speed until its
//! footprint first touches the viewport. From then on it travels along a
//! heading derived from its orientation and up-reference while a constant
//! drift and a periodically resampled random spin curve its path. A
//! wandering bee whose footprint leaves the viewport is removed.
//!
//! The up-reference is co-rotated with the spin using axes sampled before
//! the spin is applied, so stepping by `Δ` and then by `-Δ` does not in
//! general restore the original up-reference.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use log::debug;
use rand::Rng;

use crate::bee::{Bee, BeeAnimation, BeeBounds, BeeRng, FlightPhase};
use crate::factory::random_unit_vector;
use crate::settings::SwarmSettings;
use crate::viewport::ViewportBounds;

/// Result of advancing a single bee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightOutcome {
    /// The bee is still part of the scene.
    Flying,
    /// The bee left the viewport after entering it and must be removed.
    Exited,
}

/// Parameters shared by every bee during one simulation step.
#[derive(Debug, Clone, Copy)]
pub struct FlightStep<'a> {
    /// Seconds elapsed since the previous step.
    pub delta: f32,
    /// Entry speed in world units per second.
    pub base_speed: f32,
    /// Visible region bees enter and leave.
    pub viewport: &'a ViewportBounds,
}

/// Orientation-derived axes of a bee.
#[derive(Debug, Clone, Copy)]
struct TravelAxes {
    /// Local +Z in world space.
    world_forward: Vec3,
    /// Direction of travel: `world_forward` turned a quarter back about the
    /// up-reference.
    heading: Vec3,
}

impl TravelAxes {
    fn of(transform: &Transform, up: Vec3) -> Self {
        let world_forward = transform.local_z().as_vec3();
        let heading = Quat::from_axis_angle(up, -FRAC_PI_2) * world_forward;
        Self {
            world_forward,
            heading,
        }
    }
}

/// Rotates the bee about its local X, Y then Z axes by `angular * delta`
/// and co-rotates `up` about the supplied axes.
fn spin(transform: &mut Transform, up: &mut Vec3, angular: Vec3, delta: f32, axes: TravelAxes) {
    let angles = angular * delta;
    transform.rotate_local_x(angles.x);
    transform.rotate_local_y(angles.y);
    transform.rotate_local_z(angles.z);
    *up = Quat::from_axis_angle(axes.heading, angles.x) * *up;
    *up = Quat::from_axis_angle(axes.world_forward, angles.z) * *up;
}

impl FlightStep<'_> {
    /// Advances one bee by `self.delta` seconds.
    ///
    /// Returns [`FlightOutcome::Exited`] once a wandering bee no longer
    /// touches the viewport; the caller is responsible for removing it.
    pub fn advance(
        &self,
        transform: &mut Transform,
        bee: &mut Bee,
        bounds: &mut BeeBounds,
        animation: &mut BeeAnimation,
        rng: &mut impl Rng,
    ) -> FlightOutcome {
        match bee.phase {
            FlightPhase::Entering => self.enter(transform, bee, bounds),
            FlightPhase::Wandering => {
                if self.wander(transform, bee, bounds, rng) == FlightOutcome::Exited {
                    return FlightOutcome::Exited;
                }
            }
        }

        animation.advance(self.delta);
        FlightOutcome::Flying
    }

    fn enter(&self, transform: &mut Transform, bee: &mut Bee, bounds: &mut BeeBounds) {
        let offset = bee.direction * self.delta * self.base_speed;
        transform.translation.x += offset.x;
        transform.translation.y += offset.y;
        bounds.translate(offset);

        if bounds.intersects(self.viewport.bounds()) {
            bee.phase = FlightPhase::Wandering;
        }
    }

    fn wander(
        &self,
        transform: &mut Transform,
        bee: &mut Bee,
        bounds: &mut BeeBounds,
        rng: &mut impl Rng,
    ) -> FlightOutcome {
        let axes = TravelAxes::of(transform, bee.up);
        let offset = axes.heading.truncate().extend(0.0) * self.delta * bee.speed;
        transform.translation.x += offset.x;
        transform.translation.y += offset.y;
        bounds.translate(offset);

        spin(transform, &mut bee.up, bee.rotation_drift, self.delta, axes);

        if bee.random_rotation_progress >= 1.0 {
            bee.random_rotation = random_unit_vector(rng);
            bee.random_rotation_progress = 0.0;
        } else {
            let fresh = TravelAxes::of(transform, bee.up);
            bee.random_rotation_progress += self.delta;
            spin(transform, &mut bee.up, bee.random_rotation, self.delta, fresh);
        }

        if bounds.intersects(self.viewport.bounds()) {
            FlightOutcome::Flying
        } else {
            FlightOutcome::Exited
        }
    }
}

/// Advances every bee by the frame delta and despawns those that left.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn bee_flight_system(
    mut commands: Commands,
    time: Res<Time>,
    viewport: Res<ViewportBounds>,
    settings: Res<SwarmSettings>,
    mut rng: ResMut<BeeRng>,
    mut bees: Query<(
        Entity,
        &mut Transform,
        &mut Bee,
        &mut BeeBounds,
        &mut BeeAnimation,
    )>,
) {
    let step = FlightStep {
        delta: time.delta_secs(),
        base_speed: settings.base_speed,
        viewport: &viewport,
    };

    for (entity, mut transform, mut bee, mut bounds, mut animation) in &mut bees {
        let outcome = step.advance(
            &mut transform,
            &mut bee,
            &mut bounds,
            &mut animation,
            &mut rng.0,
        );
        if outcome == FlightOutcome::Exited {
            commands.entity(entity).despawn();
            debug!(
                "bee {entity:?} left the viewport at ({:.2}, {:.2})",
                transform.translation.x, transform.translation.y
            );
        }
    }
}
