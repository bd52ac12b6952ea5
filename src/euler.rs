// Euler angle conversions for IntSar-3D
//
// Axis convention shared by every path in this module:
//   pitch -> Y axis, yaw -> Z axis, roll -> X axis
//   R = Ry(pitch) * Rz(yaw) * Rx(roll)
// so a point is rotated by roll first, then yaw, then pitch. Quaternions,
// matrices and the per-axis helpers must all follow this order or they stop
// agreeing with each other.

use glam::{Mat4, Vec3, Vec4};

use crate::angle::Angle;
use crate::error::TransformError;
use crate::quaternion::Quaternion;

/// Below this `|cos(yaw/2) -+ sin(yaw/2)|` yaw is exactly +-90 degrees and
/// pitch and roll can no longer be told apart.
const GIMBAL_LOCK_EPSILON: f32 = 1.0e-6;

/// Precomputed sine and cosine of one rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinCos {
    pub sin: f32,
    pub cos: f32,
}

impl SinCos {
    pub const IDENTITY: Self = Self { sin: 0.0, cos: 1.0 };

    pub fn from_degrees(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self { sin, cos }
    }
}

/// Sine/cosine pairs for all three axes of an [`Angle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSinCos {
    pub x: SinCos,
    pub y: SinCos,
    pub z: SinCos,
}

impl Default for AxisSinCos {
    fn default() -> Self {
        Self {
            x: SinCos::IDENTITY,
            y: SinCos::IDENTITY,
            z: SinCos::IDENTITY,
        }
    }
}

impl AxisSinCos {
    pub fn from_angle(angle: &Angle) -> Self {
        debug_assert!(angle.is_finite(), "non-finite angle {angle:?}");
        Self {
            x: SinCos::from_degrees(angle.roll),
            y: SinCos::from_degrees(angle.pitch),
            z: SinCos::from_degrees(angle.yaw),
        }
    }

    /// Rotation matrix composed from the three per-axis matrices.
    pub fn to_mat4(&self) -> Mat4 {
        rotation_y(self.y) * rotation_z(self.z) * rotation_x(self.x)
    }

    /// Rotate a point with the per-axis helpers in the fixed order.
    pub fn rotate(&self, point: Vec3) -> Vec3 {
        let p = rotate_around_x(point, self.x.sin, self.x.cos);
        let p = rotate_around_z(p, self.z.sin, self.z.cos);
        rotate_around_y(p, self.y.sin, self.y.cos)
    }
}

pub fn rotate_around_x(point: Vec3, sin: f32, cos: f32) -> Vec3 {
    Vec3::new(
        point.x,
        point.y * cos - point.z * sin,
        point.y * sin + point.z * cos,
    )
}

pub fn rotate_around_y(point: Vec3, sin: f32, cos: f32) -> Vec3 {
    Vec3::new(
        point.x * cos + point.z * sin,
        point.y,
        point.z * cos - point.x * sin,
    )
}

pub fn rotate_around_z(point: Vec3, sin: f32, cos: f32) -> Vec3 {
    Vec3::new(
        point.x * cos - point.y * sin,
        point.x * sin + point.y * cos,
        point.z,
    )
}

pub fn rotation_x(sc: SinCos) -> Mat4 {
    let SinCos { sin: s, cos: c } = sc;
    Mat4::from_cols(
        Vec4::X,
        Vec4::new(0.0, c, s, 0.0),
        Vec4::new(0.0, -s, c, 0.0),
        Vec4::W,
    )
}

pub fn rotation_y(sc: SinCos) -> Mat4 {
    let SinCos { sin: s, cos: c } = sc;
    Mat4::from_cols(
        Vec4::new(c, 0.0, -s, 0.0),
        Vec4::Y,
        Vec4::new(s, 0.0, c, 0.0),
        Vec4::W,
    )
}

pub fn rotation_z(sc: SinCos) -> Mat4 {
    let SinCos { sin: s, cos: c } = sc;
    Mat4::from_cols(
        Vec4::new(c, s, 0.0, 0.0),
        Vec4::new(-s, c, 0.0, 0.0),
        Vec4::Z,
        Vec4::W,
    )
}

/// Quaternion for `angle`, composed as `Qy(pitch) * Qz(yaw) * Qx(roll)`.
///
/// NaN or infinite components trip a debug assertion; use
/// [`try_euler_to_quaternion`] to get an error instead.
pub fn euler_to_quaternion(angle: &Angle) -> Quaternion {
    debug_assert!(angle.is_finite(), "non-finite angle {angle:?}");
    let half = |degrees: f32| (degrees.to_radians() * 0.5).sin_cos();
    let (sy, cy) = half(angle.pitch);
    let (sz, cz) = half(angle.yaw);
    let (sx, cx) = half(angle.roll);

    let qy = Quaternion::new(cy, 0.0, sy, 0.0);
    let qz = Quaternion::new(cz, 0.0, 0.0, sz);
    let qx = Quaternion::new(cx, sx, 0.0, 0.0);
    qy * qz * qx
}

/// Pure rotation matrix for `angle`.
pub fn euler_to_matrix(angle: &Angle) -> Mat4 {
    AxisSinCos::from_angle(angle).to_mat4()
}

pub fn try_euler_to_quaternion(angle: &Angle) -> Result<Quaternion, TransformError> {
    angle.validate()?;
    Ok(euler_to_quaternion(angle))
}

pub fn try_euler_to_matrix(angle: &Angle) -> Result<Mat4, TransformError> {
    angle.validate()?;
    Ok(euler_to_matrix(angle))
}

/// Recover Euler angles from a quaternion, yaw in `[-90, 90]`.
///
/// Works on half-angle sums and differences so accuracy holds right up to
/// yaw = +-90 degrees. Exactly there pitch and roll share an axis; the whole
/// turn is reported as pitch and roll is 0.
pub fn quaternion_to_euler(q: &Quaternion) -> Angle {
    let Quaternion { w, x, y, z } = q.normalize();

    // For q = Qy(pitch) Qz(yaw) Qx(roll), with p, h, r the half angles:
    //   (w + z, x + y) = (cos h + sin h) * (cos(p + r), sin(p + r))
    //   (w - z, y - x) = (cos h - sin h) * (cos(p - r), sin(p - r))
    let plus = (w + z).hypot(x + y);
    let minus = (w - z).hypot(y - x);
    let yaw = 2.0 * (plus - minus).atan2(plus + minus);

    let (sum, diff) = if minus < GIMBAL_LOCK_EPSILON {
        let sum = (x + y).atan2(w + z);
        (sum, sum)
    } else if plus < GIMBAL_LOCK_EPSILON {
        let diff = (y - x).atan2(w - z);
        (diff, diff)
    } else {
        ((x + y).atan2(w + z), (y - x).atan2(w - z))
    };

    Angle::new(
        (sum + diff).to_degrees(),
        yaw.to_degrees(),
        (sum - diff).to_degrees(),
    )
    .normalized_signed()
}

impl From<Angle> for Quaternion {
    fn from(angle: Angle) -> Self {
        euler_to_quaternion(&angle)
    }
}
