//! Axis-aligned bounding boxes used for entry and exit checks.
//!
//! Bee footprints are deliberately approximate: a box is computed once from
//! the model at spawn time and then only translated, never re-derived from
//! the rotated mesh.

use bevy::prelude::Transform;
use glam::Vec3;

/// Axis-aligned box described by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Corner with the smallest coordinates.
    pub min: Vec3,
    /// Corner with the largest coordinates.
    pub max: Vec3,
}

impl BoundingBox {
    /// Creates a box from two corners, ordering them component-wise.
    #[must_use]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Creates a box of `size` centred on `center`.
    ///
    /// # Examples
    ///
    /// ```
    /// use buzz::bounds::BoundingBox;
    /// use glam::Vec3;
    ///
    /// let b = BoundingBox::from_center_and_size(Vec3::ZERO, Vec3::new(2.0, 4.0, 6.0));
    /// assert_eq!(b.min, Vec3::new(-1.0, -2.0, -3.0));
    /// assert_eq!(b.max, Vec3::new(1.0, 2.0, 3.0));
    /// ```
    #[must_use]
    pub fn from_center_and_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Midpoint of the box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Extent of the box along each axis.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Moves the box by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        self.min += offset;
        self.max += offset;
    }

    /// Returns `true` when the boxes overlap; touching faces count.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }

    /// Smallest box containing both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// World-space box enclosing this local box after `transform` is applied.
    #[must_use]
    pub fn transformed_by(&self, transform: &Transform) -> Self {
        let corners = [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ];
        let first = transform.transform_point(self.min);
        corners
            .iter()
            .map(|corner| transform.transform_point(*corner))
            .fold(Self::new(first, first), |acc, point| Self {
                min: acc.min.min(point),
                max: acc.max.max(point),
            })
    }
}
