//! Bee entity data: the per-bee flight record and its companions.
//!
//! Every field a bee needs is declared here up front. The factory fills them
//! in once and the flight system mutates them every frame.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::bounds::BoundingBox;
use crate::{GLASSES_OFFSET, GLASSES_SCALE, GLASSES_WIDTH_FACTOR};

/// Which leg of its trip a bee is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlightPhase {
    /// Flying in a straight line from the off-screen spawn point.
    #[default]
    Entering,
    /// Drifting around after first touching the viewport.
    Wandering,
}

/// Flight state of a single bee.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Bee {
    /// Unit heading picked at spawn (z is always zero).
    pub direction: Vec3,
    /// Roll axis, co-rotated with the drift while wandering.
    pub up: Vec3,
    /// Wandering speed in world units per second.
    pub speed: f32,
    /// Constant angular velocity around the local axes while wandering.
    pub rotation_drift: Vec3,
    /// Periodically resampled extra angular velocity.
    pub random_rotation: Vec3,
    /// Seconds spent on the current `random_rotation`; resampled at `1.0`.
    pub random_rotation_progress: f32,
    /// Entry or wandering.
    pub phase: FlightPhase,
    /// Set when the model was flipped to face left at spawn.
    pub mirrored: bool,
}

impl Bee {
    /// Whether the bee has reached the viewport.
    #[must_use]
    pub fn has_entered(&self) -> bool {
        self.phase == FlightPhase::Wandering
    }
}

/// Approximate world footprint of a bee.
///
/// Computed from the model once at spawn and translated with the bee
/// afterwards.
#[derive(Component, Debug, Clone, Copy, PartialEq, Deref, DerefMut)]
pub struct BeeBounds(pub BoundingBox);

/// Clip playback state of a bee's wing animation.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct BeeAnimation {
    /// Seconds of animation played since the bee spawned.
    pub elapsed: f32,
}

impl BeeAnimation {
    /// Advances playback by `delta` seconds.
    pub const fn advance(&mut self, delta: f32) {
        self.elapsed += delta;
    }

    /// Playback position inside a looping clip of `duration` seconds.
    ///
    /// # Examples
    ///
    /// ```
    /// use buzz::bee::BeeAnimation;
    ///
    /// let anim = BeeAnimation { elapsed: 2.5 };
    /// assert!((anim.clip_time(1.0) - 0.5).abs() < 1e-6);
    /// assert_eq!(anim.clip_time(0.0), 0.0);
    /// ```
    #[must_use]
    pub fn clip_time(&self, duration: f32) -> f32 {
        if duration > 0.0 {
            self.elapsed.rem_euclid(duration)
        } else {
            0.0
        }
    }
}

/// Marker for the glasses accessory attached to every bee.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Glasses;

impl Glasses {
    /// Local transform of the glasses relative to the bee model.
    #[must_use]
    pub fn transform() -> Transform {
        let rotation = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        Transform {
            translation: rotation * Vec3::Z * GLASSES_OFFSET,
            rotation,
            scale: Vec3::new(GLASSES_SCALE * GLASSES_WIDTH_FACTOR, GLASSES_SCALE, GLASSES_SCALE),
        }
    }
}

/// Models the factory needs before it can spawn bees.
///
/// The presentation layer inserts this once the bee and glasses models have
/// loaded; headless apps insert it directly.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct BeeTemplates {
    /// Bounds of the unscaled bee model in its own space.
    pub footprint: BoundingBox,
}

impl BeeTemplates {
    /// Creates templates for a bee model with the given local bounds.
    #[must_use]
    pub const fn new(footprint: BoundingBox) -> Self {
        Self { footprint }
    }
}

/// Random source shared by the factory and the flight system.
#[derive(Resource, Debug, Deref, DerefMut)]
pub struct BeeRng(pub StdRng);

impl BeeRng {
    /// Deterministic source for reproducible swarms.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }
}
