//! Bee factory: randomised entry trajectories and entity assembly.
//!
//! Planning and spawning are split so the maths can be exercised without a
//! world. [`plan_bee`] draws every random attribute and returns a
//! [`BeeBlueprint`]; [`spawn_bee`] turns a blueprint into an entity with its
//! glasses attached.

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::prelude::*;
use log::debug;
use rand::Rng;

use crate::bee::{Bee, BeeAnimation, BeeBounds, BeeTemplates, FlightPhase, Glasses};
use crate::settings::SwarmSettings;
use crate::viewport::ViewportBounds;
use crate::{
    BEE_SCALE_MAX, BEE_SCALE_MIN, ENTRY_DISTANCE_FACTOR, ROTATION_DRIFT_MAGNITUDE,
    SPEED_SCALE_MAX, SPEED_SCALE_MIN,
};

/// Everything needed to spawn one bee.
#[derive(Debug, Clone, PartialEq)]
pub struct BeeBlueprint {
    /// Placement, scale and base orientation.
    pub transform: Transform,
    /// Flight record.
    pub bee: Bee,
    /// Footprint at the spawn point.
    pub bounds: BeeBounds,
}

/// Components making up a bee entity.
#[derive(Bundle)]
pub struct BeeBundle {
    /// Human-readable name for debugging.
    pub name: Name,
    /// Flight record.
    pub bee: Bee,
    /// Approximate footprint.
    pub bounds: BeeBounds,
    /// Wing clip playback.
    pub animation: BeeAnimation,
    /// World-space transform.
    pub transform: Transform,
}

impl From<BeeBlueprint> for BeeBundle {
    fn from(blueprint: BeeBlueprint) -> Self {
        Self {
            name: Name::new("Bee"),
            bee: blueprint.bee,
            bounds: blueprint.bounds,
            animation: BeeAnimation::default(),
            transform: blueprint.transform,
        }
    }
}

/// Components making up the glasses child of a bee.
#[derive(Bundle)]
pub struct GlassesBundle {
    /// Human-readable name for debugging.
    pub name: Name,
    /// Accessory marker.
    pub glasses: Glasses,
    /// Fixed offset relative to the bee.
    pub transform: Transform,
}

impl Default for GlassesBundle {
    fn default() -> Self {
        Self {
            name: Name::new("Glasses"),
            glasses: Glasses,
            transform: Glasses::transform(),
        }
    }
}

/// Uniformly random unit vector built from components in `[-1, 1)`.
///
/// A zero draw is astronomically unlikely and is not guarded.
pub(crate) fn random_unit_vector(rng: &mut impl Rng) -> Vec3 {
    Vec3::new(
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
    )
    .normalize()
}

/// Plans a bee with a random heading.
///
/// # Examples
///
/// ```
/// use buzz::bee::{BeeRng, BeeTemplates};
/// use buzz::bounds::BoundingBox;
/// use buzz::factory::plan_bee;
/// use buzz::viewport::ViewportBounds;
/// use buzz::SwarmSettings;
/// use glam::Vec3;
///
/// let mut rng = BeeRng::seeded(1);
/// let templates = BeeTemplates::new(BoundingBox::from_center_and_size(Vec3::ZERO, Vec3::splat(0.02)));
/// let blueprint = plan_bee(&mut *rng, &ViewportBounds::default(), &templates, &SwarmSettings::default());
/// assert!((blueprint.bee.direction.length() - 1.0).abs() < 1e-5);
/// assert!(!blueprint.bee.has_entered());
/// ```
#[must_use]
pub fn plan_bee(
    rng: &mut impl Rng,
    viewport: &ViewportBounds,
    templates: &BeeTemplates,
    settings: &SwarmSettings,
) -> BeeBlueprint {
    let direction = Vec3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), 0.0).normalize();
    plan_bee_heading(direction, rng, viewport, templates, settings)
}

/// Plans a bee travelling along `direction`, drawing the remaining
/// attributes from `rng`.
///
/// `direction` is expected to be a unit vector in the XY plane.
#[must_use]
pub fn plan_bee_heading(
    direction: Vec3,
    rng: &mut impl Rng,
    viewport: &ViewportBounds,
    templates: &BeeTemplates,
    settings: &SwarmSettings,
) -> BeeBlueprint {
    let entry = ENTRY_DISTANCE_FACTOR
        * Vec3::new(
            viewport.half_width() * -direction.x,
            viewport.half_height() * -direction.y,
            0.0,
        );
    let scale = rng.gen_range(BEE_SCALE_MIN..BEE_SCALE_MAX);
    let mut transform = Transform::from_translation(entry).with_scale(Vec3::splat(scale));

    // Footprint is taken before any orientation is applied.
    let bounds = BeeBounds(templates.footprint.transformed_by(&transform));

    let speed = rng.gen_range(SPEED_SCALE_MIN..SPEED_SCALE_MAX) * settings.base_speed;
    let rotation_drift = random_unit_vector(rng) * ROTATION_DRIFT_MAGNITUDE;

    let mut up = Quat::from_rotation_z(FRAC_PI_2) * direction;
    let mut mirrored = false;

    // Turn the model to face the camera.
    transform.rotate_local_x(PI);
    if direction.x < 0.0 {
        transform.rotate_local_y(PI);
        up = -up;
        mirrored = true;
    }
    // Bank towards the direction of travel.
    transform.rotate_local_z(-direction.y);

    BeeBlueprint {
        transform,
        bee: Bee {
            direction,
            up,
            speed,
            rotation_drift,
            random_rotation: Vec3::ZERO,
            random_rotation_progress: 1.0,
            phase: FlightPhase::Entering,
            mirrored,
        },
        bounds,
    }
}

/// Inserts a planned bee and its glasses into the world.
pub fn spawn_bee(commands: &mut Commands, blueprint: BeeBlueprint) -> Entity {
    let translation = blueprint.transform.translation;
    let direction = blueprint.bee.direction;
    let entity = commands
        .spawn(BeeBundle::from(blueprint))
        .with_child(GlassesBundle::default())
        .id();

    debug!(
        "spawned bee {entity:?} at ({:.2}, {:.2}) heading ({:.2}, {:.2})",
        translation.x, translation.y, direction.x, direction.y
    );
    entity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bee::BeeRng;
    use crate::bounds::BoundingBox;
    use crate::SCENE_HALF_WIDTH;
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn templates() -> BeeTemplates {
        BeeTemplates::new(BoundingBox::from_center_and_size(
            Vec3::ZERO,
            Vec3::splat(0.02),
        ))
    }

    #[fixture]
    fn viewport() -> ViewportBounds {
        ViewportBounds::for_aspect(SCENE_HALF_WIDTH, 2.0)
    }

    #[rstest]
    fn random_attributes_stay_in_range(templates: BeeTemplates, viewport: ViewportBounds) {
        let mut rng = BeeRng::seeded(9);
        let settings = SwarmSettings::default();
        for _ in 0..200 {
            let blueprint = plan_bee(&mut *rng, &viewport, &templates, &settings);
            let bee = &blueprint.bee;
            assert_relative_eq!(bee.direction.length(), 1.0, epsilon = 1e-5);
            assert_relative_eq!(bee.direction.z, 0.0);
            assert_relative_eq!(bee.rotation_drift.length(), 5.0, epsilon = 1e-4);
            assert!((2.5..5.0).contains(&bee.speed), "speed {}", bee.speed);
            let scale = blueprint.transform.scale.x;
            assert!((20.0..40.0).contains(&scale), "scale {scale}");
            assert_eq!(bee.random_rotation, Vec3::ZERO);
            assert_relative_eq!(bee.random_rotation_progress, 1.0);
            assert!(!bee.has_entered());
        }
    }

    #[rstest]
    fn entry_point_is_opposite_the_heading(templates: BeeTemplates, viewport: ViewportBounds) {
        let mut rng = BeeRng::seeded(3);
        let blueprint = plan_bee_heading(
            Vec3::X,
            &mut *rng,
            &viewport,
            &templates,
            &SwarmSettings::default(),
        );
        assert_relative_eq!(blueprint.transform.translation.x, -1.5 * SCENE_HALF_WIDTH);
        assert_relative_eq!(blueprint.transform.translation.y, 0.0);
        assert_relative_eq!(blueprint.transform.translation.z, 0.0);
    }

    #[rstest]
    fn entry_point_scales_with_half_height(templates: BeeTemplates, viewport: ViewportBounds) {
        let mut rng = BeeRng::seeded(3);
        let blueprint = plan_bee_heading(
            Vec3::NEG_Y,
            &mut *rng,
            &viewport,
            &templates,
            &SwarmSettings::default(),
        );
        assert_relative_eq!(blueprint.transform.translation.y, 1.5 * viewport.half_height());
        assert!(!blueprint.bounds.intersects(viewport.bounds()));
    }

    #[rstest]
    fn bounds_follow_spawn_translation_and_scale(
        templates: BeeTemplates,
        viewport: ViewportBounds,
    ) {
        let mut rng = BeeRng::seeded(5);
        let blueprint = plan_bee(&mut *rng, &viewport, &templates, &SwarmSettings::default());
        let scale = blueprint.transform.scale.x;
        assert_relative_eq!(
            blueprint.bounds.center().distance(blueprint.transform.translation),
            0.0,
            epsilon = 1e-4
        );
        assert_relative_eq!(blueprint.bounds.size().x, 0.02 * scale, epsilon = 1e-4);
    }

    #[rstest]
    #[case::rightwards(Vec3::X, false, Vec3::Y)]
    #[case::upwards(Vec3::Y, false, Vec3::NEG_X)]
    #[case::leftwards(Vec3::NEG_X, true, Vec3::Y)]
    fn up_reference_is_perpendicular_and_mirrored(
        templates: BeeTemplates,
        viewport: ViewportBounds,
        #[case] direction: Vec3,
        #[case] mirrored: bool,
        #[case] expected_up: Vec3,
    ) {
        let mut rng = BeeRng::seeded(11);
        let blueprint = plan_bee_heading(
            direction,
            &mut *rng,
            &viewport,
            &templates,
            &SwarmSettings::default(),
        );
        assert_eq!(blueprint.bee.mirrored, mirrored);
        assert_relative_eq!(blueprint.bee.up.distance(expected_up), 0.0, epsilon = 1e-6);
        assert_relative_eq!(blueprint.bee.up.dot(direction), 0.0, epsilon = 1e-6);
    }

    #[rstest]
    fn base_orientation_faces_the_camera(templates: BeeTemplates, viewport: ViewportBounds) {
        let mut rng = BeeRng::seeded(2);
        let blueprint = plan_bee_heading(
            Vec3::X,
            &mut *rng,
            &viewport,
            &templates,
            &SwarmSettings::default(),
        );
        // Flipped half a turn about X with no banking for a level heading.
        let forward = blueprint.transform.local_z().as_vec3();
        assert_relative_eq!(forward.distance(Vec3::NEG_Z), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn spawned_bee_wears_glasses() {
        let mut world = World::new();
        let mut rng = BeeRng::seeded(4);
        let blueprint = plan_bee(
            &mut *rng,
            &ViewportBounds::default(),
            &BeeTemplates::new(BoundingBox::from_center_and_size(Vec3::ZERO, Vec3::ONE)),
            &SwarmSettings::default(),
        );
        let mut queue = bevy::ecs::world::CommandQueue::default();
        let entity = {
            let mut commands = Commands::new(&mut queue, &world);
            spawn_bee(&mut commands, blueprint)
        };
        queue.apply(&mut world);

        let children = world
            .get::<Children>(entity)
            .unwrap_or_else(|| panic!("bee should have children"));
        assert_eq!(children.len(), 1);
        let glasses = children.first().copied().unwrap_or_else(|| panic!("missing child"));
        assert!(world.get::<Glasses>(glasses).is_some());
        assert_eq!(world.get::<Transform>(glasses), Some(&Glasses::transform()));
        assert!(world.get::<BeeAnimation>(entity).is_some());
    }
}
