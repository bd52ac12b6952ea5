// Camera / entity transform for IntSar-3D

use glam::{Mat4, Vec2, Vec3};
use log::trace;

use crate::angle::Angle;
use crate::error::{check_finite, TransformError};
use crate::euler::{euler_to_quaternion, AxisSinCos};
use crate::quaternion::Quaternion;

/// Position and orientation of a camera or entity, plus everything derived
/// from them.
///
/// The sine/cosine pairs, rotation quaternion and `world_to_view` matrix are
/// recomputed by every setter, so they can never disagree with `angle` or
/// `position`. There is no way to write the derived fields directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    position: Vec3,
    angle: Angle,
    axes: AxisSinCos,
    rotation: Quaternion,
    world_to_view: Mat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            angle: Angle::ZERO,
            axes: AxisSinCos::default(),
            rotation: Quaternion::IDENTITY,
            world_to_view: Mat4::IDENTITY,
        }
    }
}

impl Transform {
    /// Create a transform at `position` looking along `angle`.
    pub fn new(position: Vec3, angle: Angle) -> Result<Self, TransformError> {
        let mut transform = Self::default();
        transform.set_position(position)?;
        transform.update_from_angle(angle)?;
        Ok(transform)
    }

    /// Store a new orientation and rebuild the derived state. A non-finite
    /// angle is rejected and the transform is left as it was.
    pub fn update_from_angle(&mut self, angle: Angle) -> Result<(), TransformError> {
        angle.validate()?;
        self.angle = angle;
        self.axes = AxisSinCos::from_angle(&angle);
        self.rotation = euler_to_quaternion(&angle);
        self.rebuild_world_to_view();
        Ok(())
    }

    /// Alias of [`Transform::update_from_angle`].
    pub fn set_angle(&mut self, angle: Angle) -> Result<(), TransformError> {
        self.update_from_angle(angle)
    }

    pub fn set_position(&mut self, position: Vec3) -> Result<(), TransformError> {
        check_finite("position", position.to_array())?;
        self.position = position;
        self.rebuild_world_to_view();
        Ok(())
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn angle(&self) -> Angle {
        self.angle
    }

    /// Per-axis sine/cosine of the current angle.
    pub fn axes(&self) -> &AxisSinCos {
        &self.axes
    }

    /// Current orientation as a unit quaternion.
    pub fn rotation(&self) -> Quaternion {
        self.rotation
    }

    /// `R(angle) * T(-position)`, column-major.
    pub fn world_to_view(&self) -> Mat4 {
        self.world_to_view
    }

    /// Move a world-space point into view space.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.world_to_view.transform_point3(point)
    }

    /// Move a view-space point back into world space.
    pub fn transform_point_inverse(&self, view_point: Vec3) -> Vec3 {
        self.rotation.rotate_inverse(view_point) + self.position
    }

    /// Project a world-space point onto the screen.
    ///
    /// Returns `(screen_x, screen_y, view_depth)`, or `None` when the point
    /// lies on or behind the near plane.
    pub fn project(&self, point: Vec3, projection: &Projection) -> Option<Vec3> {
        let view = self.transform_point(point);
        if view.z <= projection.near {
            return None;
        }
        let scale = projection.focal / view.z;
        let screen = projection.center + Vec2::new(view.x, view.y) * scale;
        Some(screen.extend(view.z))
    }

    /// `world_to_view` as four columns, ready for a uniform upload.
    pub fn world_to_view_cols(&self) -> [[f32; 4]; 4] {
        self.world_to_view.to_cols_array_2d()
    }

    fn rebuild_world_to_view(&mut self) {
        self.world_to_view = self.axes.to_mat4() * Mat4::from_translation(-self.position);
        trace!(
            "transform rebuilt: position={:?} angle={:?}",
            self.position,
            self.angle
        );
    }
}

/// Perspective parameters used by [`Transform::project`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Projection {
    /// Screen position of the optical axis, in pixels.
    pub center: Vec2,
    /// Distance from the eye to the image plane, in pixels.
    pub focal: f32,
    /// Points with view depth at or below this are not projected.
    pub near: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            center: Vec2::new(320.0, 240.0),
            focal: 310.0,
            near: 1.0,
        }
    }
}

impl Projection {
    /// Centered projection for a viewport of the given size.
    pub fn for_viewport(width: f32, height: f32, focal: f32) -> Self {
        Self {
            center: Vec2::new(width * 0.5, height * 0.5),
            focal,
            ..Self::default()
        }
    }
}
