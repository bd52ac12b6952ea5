// IntSar-3D transform core
//
// Rotation and transform math: Euler angles, unit quaternions and 4x4
// matrices that all agree on the same rotation, plus the world-to-view
// pipeline a renderer projects through. Vectors and matrices are glam types,
// column-major with vectors as columns.

pub mod angle;
pub mod error;
pub mod euler;
pub mod quaternion;
pub mod transform;

pub use angle::Angle;
pub use error::TransformError;
pub use euler::{
    euler_to_matrix, euler_to_quaternion, quaternion_to_euler, rotate_around_x, rotate_around_y,
    rotate_around_z, try_euler_to_matrix, try_euler_to_quaternion, AxisSinCos, SinCos,
};
pub use quaternion::Quaternion;
pub use transform::{Projection, Transform};

/// Tolerance used when checking that rotation representations agree.
pub const EPSILON: f32 = 1.0e-4;
