// Euler angle storage for IntSar-3D

use crate::error::{check_finite, TransformError};

/// Authored orientation as three rotations in degrees.
///
/// Axis mapping (see `euler`): pitch turns about Y, yaw about Z, roll about X.
/// The type does not restrict the range; use [`Angle::normalized`] or
/// [`Angle::normalized_signed`] when a canonical range is needed.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Angle {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

/// Size of the packed on-disk angle record.
pub const PACKED_ANGLE_LEN: usize = 12;

impl Angle {
    /// No rotation.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create an angle from pitch, yaw and roll in degrees.
    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Like [`Angle::new`], but rejects NaN and infinite components.
    pub fn try_new(pitch: f32, yaw: f32, roll: f32) -> Result<Self, TransformError> {
        let angle = Self::new(pitch, yaw, roll);
        angle.validate()?;
        Ok(angle)
    }

    pub fn validate(&self) -> Result<(), TransformError> {
        check_finite("angle", self.to_array())
    }

    pub fn is_finite(&self) -> bool {
        self.validate().is_ok()
    }

    pub const fn to_array(&self) -> [f32; 3] {
        [self.pitch, self.yaw, self.roll]
    }

    /// Components in radians, same order as [`Angle::to_array`].
    pub fn to_radians(&self) -> [f32; 3] {
        self.to_array().map(f32::to_radians)
    }

    /// Every component wrapped into `[0, 360)`.
    pub fn normalized(&self) -> Self {
        let [pitch, yaw, roll] = self.to_array().map(wrap_unsigned);
        Self::new(pitch, yaw, roll)
    }

    /// Every component wrapped into `[-180, 180)`.
    pub fn normalized_signed(&self) -> Self {
        let [pitch, yaw, roll] = self.to_array().map(|deg| wrap_unsigned(deg + 180.0) - 180.0);
        Self::new(pitch, yaw, roll)
    }

    /// Component-wise comparison with an absolute tolerance in degrees.
    pub fn abs_diff_eq(&self, other: &Self, max_abs_diff: f32) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array())
            .all(|(a, b)| (a - b).abs() <= max_abs_diff)
    }

    /// Packed little-endian layout: pitch, yaw, roll as `f32`.
    pub fn to_le_bytes(&self) -> [u8; PACKED_ANGLE_LEN] {
        let mut out = [0u8; PACKED_ANGLE_LEN];
        for (chunk, value) in out.chunks_exact_mut(4).zip(self.to_array()) {
            chunk.copy_from_slice(&value.to_le_bytes());
        }
        out
    }

    pub fn from_le_bytes(bytes: &[u8; PACKED_ANGLE_LEN]) -> Self {
        let mut fields = [0.0f32; 3];
        for (field, chunk) in fields.iter_mut().zip(bytes.chunks_exact(4)) {
            *field = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        let [pitch, yaw, roll] = fields;
        Self::new(pitch, yaw, roll)
    }
}

impl From<[f32; 3]> for Angle {
    fn from([pitch, yaw, roll]: [f32; 3]) -> Self {
        Self::new(pitch, yaw, roll)
    }
}

impl From<Angle> for [f32; 3] {
    fn from(angle: Angle) -> Self {
        angle.to_array()
    }
}

fn wrap_unsigned(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
