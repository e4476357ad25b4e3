//! Viewport bookkeeping: the visible box bees enter and leave.
//!
//! The viewport is the footprint of the orthographic camera. Its half-width
//! is fixed; its half-height follows the display aspect ratio and is
//! recomputed whenever [`DisplaySize`] changes.

use bevy::prelude::*;
use log::debug;

use crate::bounds::BoundingBox;
use crate::settings::SwarmSettings;
use crate::{DEFAULT_DISPLAY_HEIGHT, DEFAULT_DISPLAY_WIDTH, SCENE_HALF_WIDTH, VIEWPORT_DEPTH};

/// Axis-aligned box centred on the origin covering the visible scene.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewportBounds {
    half_width: f32,
    aspect: f32,
    bounds: BoundingBox,
}

impl ViewportBounds {
    /// Builds the viewport for a display with the given aspect ratio.
    ///
    /// # Examples
    ///
    /// ```
    /// use buzz::viewport::ViewportBounds;
    ///
    /// let viewport = ViewportBounds::for_aspect(5.0, 2.0);
    /// assert!((viewport.half_height() - 2.5).abs() < f32::EPSILON);
    /// assert!((viewport.bounds().max.x - 5.0).abs() < f32::EPSILON);
    /// ```
    #[must_use]
    pub fn for_aspect(half_width: f32, aspect: f32) -> Self {
        let size = Vec3::new(half_width * 2.0, half_width * 2.0 / aspect, VIEWPORT_DEPTH);
        Self {
            half_width,
            aspect,
            bounds: BoundingBox::from_center_and_size(Vec3::ZERO, size),
        }
    }

    /// Half of the visible width.
    #[must_use]
    pub const fn half_width(&self) -> f32 {
        self.half_width
    }

    /// Half of the visible height.
    #[must_use]
    pub fn half_height(&self) -> f32 {
        self.half_width / self.aspect
    }

    /// Width over height of the display the viewport was built for.
    #[must_use]
    pub const fn aspect(&self) -> f32 {
        self.aspect
    }

    /// The box itself.
    #[must_use]
    pub const fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }
}

impl Default for ViewportBounds {
    fn default() -> Self {
        Self::for_aspect(
            SCENE_HALF_WIDTH,
            DEFAULT_DISPLAY_WIDTH / DEFAULT_DISPLAY_HEIGHT,
        )
    }
}

/// Last observed size of the display surface in logical pixels.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct DisplaySize {
    /// Surface width.
    pub width: f32,
    /// Surface height.
    pub height: f32,
}

impl DisplaySize {
    /// Creates a display size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height, or `None` while the surface is collapsed.
    ///
    /// # Examples
    ///
    /// ```
    /// use buzz::viewport::DisplaySize;
    ///
    /// assert_eq!(DisplaySize::new(800.0, 400.0).aspect(), Some(2.0));
    /// assert_eq!(DisplaySize::new(800.0, 0.0).aspect(), None);
    /// ```
    #[must_use]
    pub fn aspect(&self) -> Option<f32> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        (valid(self.width) && valid(self.height)).then(|| self.width / self.height)
    }
}

impl Default for DisplaySize {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_WIDTH, DEFAULT_DISPLAY_HEIGHT)
    }
}

/// Rebuilds [`ViewportBounds`] after the display size changed.
///
/// Collapsed surfaces (zero width or height) keep the previous viewport.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn apply_display_resize_system(
    display: Res<DisplaySize>,
    settings: Res<SwarmSettings>,
    mut viewport: ResMut<ViewportBounds>,
) {
    let Some(aspect) = display.aspect() else {
        return;
    };

    let next = ViewportBounds::for_aspect(settings.half_width, aspect);
    if *viewport != next {
        debug!(
            "viewport resized to {}x{} half-extents",
            next.half_width(),
            next.half_height()
        );
        *viewport = next;
    }
}
