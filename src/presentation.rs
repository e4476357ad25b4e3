//! Presentation layer plugin owning the camera, lighting and window polling.
//!
//! `PresentationPlugin` sets up an orthographic camera looking at the scene
//! plane and keeps its projection matched to [`ViewportBounds`]. It is a
//! passive observer of the simulation: the only state it writes back is the
//! [`DisplaySize`] polled from the primary window.

use bevy::camera::ScalingMode;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::plugin::SwarmSet;
use crate::viewport::{DisplaySize, ViewportBounds};
use crate::{CAMERA_DISTANCE, CAMERA_FAR, CAMERA_NEAR};

/// Brightness of the ambient light filling the scene.
const AMBIENT_BRIGHTNESS: f32 = 2500.0;

/// Marker component for the scene camera.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct SceneCamera;

/// Orthographic projection covering exactly the viewport.
///
/// # Examples
///
/// ```
/// use bevy::camera::ScalingMode;
/// use buzz::presentation::orthographic_projection;
/// use buzz::viewport::ViewportBounds;
///
/// let projection = orthographic_projection(&ViewportBounds::for_aspect(5.0, 2.0));
/// match projection.scaling_mode {
///     ScalingMode::Fixed { width, height } => {
///         assert!((width - 10.0).abs() < f32::EPSILON);
///         assert!((height - 5.0).abs() < f32::EPSILON);
///     }
///     _ => panic!("expected a fixed scaling mode"),
/// }
/// ```
#[must_use]
pub fn orthographic_projection(viewport: &ViewportBounds) -> OrthographicProjection {
    OrthographicProjection {
        near: CAMERA_NEAR,
        far: CAMERA_FAR,
        scaling_mode: ScalingMode::Fixed {
            width: viewport.half_width() * 2.0,
            height: viewport.half_height() * 2.0,
        },
        ..OrthographicProjection::default_3d()
    }
}

/// Spawns the scene camera with its ambient light.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
fn camera_setup(mut commands: Commands, viewport: Res<ViewportBounds>) {
    commands.spawn((
        Camera3d::default(),
        Projection::Orthographic(orthographic_projection(&viewport)),
        Transform::from_xyz(0.0, 0.0, CAMERA_DISTANCE),
        AmbientLight {
            color: Color::WHITE,
            brightness: AMBIENT_BRIGHTNESS,
            ..default()
        },
        SceneCamera,
        Name::new("SceneCamera"),
    ));
}

/// Copies the primary window's logical size into [`DisplaySize`].
///
/// Runs every frame; the resource only changes when the size does.
pub fn poll_window_size_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut display: ResMut<DisplaySize>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    display.set_if_neq(DisplaySize::new(window.width(), window.height()));
}

/// Refits the camera projection after the viewport changed.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn sync_camera_projection_system(
    viewport: Res<ViewportBounds>,
    mut cameras: Query<&mut Projection, With<SceneCamera>>,
) {
    for mut projection in &mut cameras {
        if let Projection::Orthographic(ortho) = projection.as_mut() {
            ortho.scaling_mode = orthographic_projection(&viewport).scaling_mode;
        }
    }
}

/// Plugin owning camera setup and window plumbing.
///
/// # Responsibilities
///
/// - Spawns the orthographic `Camera3d` with a white ambient light.
/// - Clears to a transparent colour so the bees float over the desktop.
/// - Polls the primary window size before the swarm updates its viewport.
/// - Keeps the camera projection in step with the viewport.
#[derive(Debug)]
pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<SceneCamera>();
        app.insert_resource(ClearColor(Color::NONE));
        app.add_systems(Startup, camera_setup);
        app.add_systems(
            Update,
            (
                poll_window_size_system.before(SwarmSet::Viewport),
                sync_camera_projection_system
                    .after(SwarmSet::Viewport)
                    .run_if(resource_changed::<ViewportBounds>),
            ),
        );
    }
}
