// Quaternion algebra for IntSar-3D

use std::ops::{Mul, Neg};

use glam::{Mat4, Quat, Vec3, Vec4};
use log::warn;

use crate::error::{check_finite, check_finite_scalar, TransformError};

/// Above this dot product slerp switches to normalized lerp.
pub const SLERP_LERP_THRESHOLD: f32 = 0.9995;

/// Squared norms below this are treated as zero.
const NORM_SQUARED_EPSILON: f32 = 1.0e-12;

/// Axis lengths below this cannot describe a rotation.
const AXIS_LENGTH_EPSILON: f32 = 1.0e-6;

/// Rotation quaternion with the scalar part first: `(w, x, y, z)`.
///
/// Everything produced by the conversion functions has unit norm. `slerp`,
/// `rotate` and `rotate_inverse` expect unit input; feeding them anything else
/// gives scaled results rather than an error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quaternion {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// No rotation.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0);

    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// Rotation of `degrees` around `axis`. The axis does not need to be unit
    /// length but must be finite and non-zero.
    pub fn from_axis_angle(axis: Vec3, degrees: f32) -> Result<Self, TransformError> {
        check_finite("axis", axis.to_array())?;
        check_finite_scalar("axis angle", degrees)?;
        let length = axis.length();
        if length < AXIS_LENGTH_EPSILON {
            return Err(TransformError::DegenerateAxis { length });
        }
        let axis = axis / length;
        let (s, c) = (degrees.to_radians() * 0.5).sin_cos();
        Ok(Self::new(c, axis.x * s, axis.y * s, axis.z * s))
    }

    /// Vector part `(x, y, z)`.
    pub fn vector(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn norm_squared(&self) -> f32 {
        self.dot(self)
    }

    pub fn norm(&self) -> f32 {
        self.norm_squared().sqrt()
    }

    /// Negated vector part.
    pub fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    pub fn try_normalize(&self) -> Option<Self> {
        let norm_squared = self.norm_squared();
        if !norm_squared.is_finite() || norm_squared < NORM_SQUARED_EPSILON {
            return None;
        }
        Some(self.scale(norm_squared.sqrt().recip()))
    }

    /// Unit-length copy; zero or non-finite input collapses to identity.
    pub fn normalize(&self) -> Self {
        self.try_normalize().unwrap_or_else(|| {
            warn!("normalizing degenerate quaternion {:?}, using identity", self);
            Self::IDENTITY
        })
    }

    /// Hamilton product. `a.multiply(&b)` rotates by `b` first, then by `a`.
    pub fn multiply(&self, other: &Self) -> Self {
        let (a, b) = (self, other);
        Self::new(
            a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
            a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
        )
    }

    /// Reverse rotation. For unit quaternions this is the conjugate; a
    /// zero-norm quaternion has no inverse and yields identity.
    pub fn inverse(&self) -> Self {
        let norm_squared = self.norm_squared();
        if !norm_squared.is_finite() || norm_squared < NORM_SQUARED_EPSILON {
            warn!("inverting degenerate quaternion {:?}, using identity", self);
            return Self::IDENTITY;
        }
        self.conjugate().scale(norm_squared.recip())
    }

    /// Like [`Quaternion::slerp`], but rejects a NaN or infinite `t`.
    pub fn try_slerp(&self, other: &Self, t: f32) -> Result<Self, TransformError> {
        check_finite_scalar("slerp factor", t)?;
        Ok(self.slerp(other, t))
    }

    /// Spherical interpolation along the shortest arc. `t` is clamped to
    /// `[0, 1]`; a non-finite `t` trips a debug assertion.
    pub fn slerp(&self, other: &Self, t: f32) -> Self {
        debug_assert!(t.is_finite(), "non-finite slerp factor {t}");
        let t = t.clamp(0.0, 1.0);
        let mut end = *other;
        let mut dot = self.dot(other);

        // q and -q are the same rotation; pick the one on our hemisphere.
        if dot < 0.0 {
            end = -end;
            dot = -dot;
        }

        if dot > SLERP_LERP_THRESHOLD {
            let lerped = self.scale(1.0 - t).plus(&end.scale(t));
            return lerped.normalize();
        }

        let theta = dot.min(1.0).acos();
        let sin_theta = theta.sin();
        let start_weight = ((1.0 - t) * theta).sin() / sin_theta;
        let end_weight = (t * theta).sin() / sin_theta;
        self.scale(start_weight).plus(&end.scale(end_weight))
    }

    /// Rotate `v` by this quaternion (`q v q⁻¹`).
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        let u = self.vector();
        let t = 2.0 * u.cross(v);
        v + self.w * t + u.cross(t)
    }

    /// Rotate `v` by the reverse rotation, e.g. from world space back into
    /// the local frame this quaternion describes.
    pub fn rotate_inverse(&self, v: Vec3) -> Vec3 {
        self.conjugate().rotate(v)
    }

    /// Column-major rotation matrix, the same rotation as [`Quaternion::rotate`].
    pub fn to_mat4(&self) -> Mat4 {
        let Self { w, x, y, z } = *self;
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);

        Mat4::from_cols(
            Vec4::new(1.0 - 2.0 * (yy + zz), 2.0 * (xy + wz), 2.0 * (xz - wy), 0.0),
            Vec4::new(2.0 * (xy - wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz + wx), 0.0),
            Vec4::new(2.0 * (xz + wy), 2.0 * (yz - wx), 1.0 - 2.0 * (xx + yy), 0.0),
            Vec4::W,
        )
    }

    /// Extract the rotation from the upper 3x3 block of `m`.
    pub fn from_rotation_matrix(m: &Mat4) -> Self {
        let (m00, m10, m20) = (m.x_axis.x, m.x_axis.y, m.x_axis.z);
        let (m01, m11, m21) = (m.y_axis.x, m.y_axis.y, m.y_axis.z);
        let (m02, m12, m22) = (m.z_axis.x, m.z_axis.y, m.z_axis.z);

        let trace = m00 + m11 + m22;
        let q = if trace > 0.0 {
            let s = 2.0 * (trace + 1.0).sqrt();
            Self::new(0.25 * s, (m21 - m12) / s, (m02 - m20) / s, (m10 - m01) / s)
        } else if m00 > m11 && m00 > m22 {
            let s = 2.0 * (1.0 + m00 - m11 - m22).sqrt();
            Self::new((m21 - m12) / s, 0.25 * s, (m01 + m10) / s, (m02 + m20) / s)
        } else if m11 > m22 {
            let s = 2.0 * (1.0 + m11 - m00 - m22).sqrt();
            Self::new((m02 - m20) / s, (m01 + m10) / s, 0.25 * s, (m12 + m21) / s)
        } else {
            let s = 2.0 * (1.0 + m22 - m00 - m11).sqrt();
            Self::new((m10 - m01) / s, (m02 + m20) / s, (m12 + m21) / s, 0.25 * s)
        };
        q.normalize()
    }

    /// Component-wise comparison with an absolute tolerance.
    pub fn abs_diff_eq(&self, other: &Self, max_abs_diff: f32) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array())
            .all(|(a, b)| (a - b).abs() <= max_abs_diff)
    }

    /// True when both describe the same rotation, treating `q` and `-q` alike.
    pub fn same_rotation(&self, other: &Self, max_abs_diff: f32) -> bool {
        self.abs_diff_eq(other, max_abs_diff) || self.abs_diff_eq(&-*other, max_abs_diff)
    }

    /// Components in `(w, x, y, z)` order.
    pub const fn to_array(&self) -> [f32; 4] {
        [self.w, self.x, self.y, self.z]
    }

    fn scale(&self, factor: f32) -> Self {
        Self::new(self.w * factor, self.x * factor, self.y * factor, self.z * factor)
    }

    fn plus(&self, other: &Self) -> Self {
        Self::new(self.w + other.w, self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: Quaternion) -> Quaternion {
        self.multiply(&rhs)
    }
}

impl Mul<Vec3> for Quaternion {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Vec3 {
        self.rotate(rhs)
    }
}

impl Neg for Quaternion {
    type Output = Quaternion;

    fn neg(self) -> Quaternion {
        self.scale(-1.0)
    }
}

impl From<Quat> for Quaternion {
    fn from(q: Quat) -> Self {
        let [x, y, z, w] = q.to_array();
        Self::new(w, x, y, z)
    }
}

impl From<Quaternion> for Quat {
    fn from(q: Quaternion) -> Self {
        Quat::from_xyzw(q.x, q.y, q.z, q.w)
    }
}
