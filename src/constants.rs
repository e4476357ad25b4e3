//! Scene constants shared by the simulation and presentation systems.
//!
//! Runtime-tunable values are mirrored by [`crate::SwarmSettings`]; the rest
//! are fixed properties of the scene.

/// Probability that a spawn tick produces a bee.
pub const BEE_CHANCE: f64 = 1.0;
/// Number of bees spawned as soon as the models are available.
pub const INITIAL_BEES: usize = 10;
/// Half of the visible scene width in world units.
pub const SCENE_HALF_WIDTH: f32 = 5.0;
/// Base flight speed in world units per second.
pub const BEE_SPEED: f32 = 5.0;
/// Seconds between spawn ticks.
pub const SPAWN_PERIOD_SECS: f32 = 1.0;

/// Smallest uniform scale applied to a bee model (inclusive).
pub const BEE_SCALE_MIN: f32 = 20.0;
/// Largest uniform scale applied to a bee model (exclusive).
pub const BEE_SCALE_MAX: f32 = 40.0;
/// Lower bound of the per-bee speed multiplier.
pub const SPEED_SCALE_MIN: f32 = 0.5;
/// Upper bound of the per-bee speed multiplier.
pub const SPEED_SCALE_MAX: f32 = 1.0;
/// How far outside the visible half-extents bees start, as a multiple.
pub const ENTRY_DISTANCE_FACTOR: f32 = 1.5;
/// Angular speed of the constant drift, in radians per second.
pub const ROTATION_DRIFT_MAGNITUDE: f32 = 5.0;
/// Depth of the viewport box; bees never leave along this axis.
pub const VIEWPORT_DEPTH: f32 = 100.0;

/// Distance of the camera from the scene plane.
pub const CAMERA_DISTANCE: f32 = 5.0;
/// Near clip plane of the orthographic camera.
pub const CAMERA_NEAR: f32 = 1.0;
/// Far clip plane of the orthographic camera.
pub const CAMERA_FAR: f32 = 1000.0;

/// Uniform scale of the glasses model relative to the bee.
pub const GLASSES_SCALE: f32 = 0.000_15;
/// Horizontal squash applied to the glasses after scaling.
pub const GLASSES_WIDTH_FACTOR: f32 = 0.5;
/// Distance the glasses sit in front of the bee's head along the glasses' own Z axis.
pub const GLASSES_OFFSET: f32 = 0.007;

/// Width of the display assumed before the first window poll.
pub const DEFAULT_DISPLAY_WIDTH: f32 = 1280.0;
/// Height of the display assumed before the first window poll.
pub const DEFAULT_DISPLAY_HEIGHT: f32 = 720.0;
