// IntSar-3D: headless transform demo
//
// Orbits a camera around a unit cube and logs where its corners land on
// screen. Run with RUST_LOG=info (or trace for per-update detail).

use glam::Vec3;
use log::{info, warn};

use intsar_transform::{Angle, Projection, Transform, TransformError};

const FRAMES: u32 = 8;
const ORBIT_RADIUS: f32 = 4.0;

fn cube_corners() -> [Vec3; 8] {
    let mut corners = [Vec3::ZERO; 8];
    for (i, corner) in corners.iter_mut().enumerate() {
        let pick = |bit: usize| if i & bit == 0 { -0.5 } else { 0.5 };
        *corner = Vec3::new(pick(1), pick(2), pick(4));
    }
    corners
}

/// Camera on a circle around the origin, turned to face it.
fn orbit_camera(camera: &mut Transform, degrees: f32) -> Result<(), TransformError> {
    let (sin, cos) = degrees.to_radians().sin_cos();
    camera.set_position(Vec3::new(-ORBIT_RADIUS * sin, 0.0, -ORBIT_RADIUS * cos))?;
    camera.update_from_angle(Angle::new(-degrees, 0.0, 0.0))
}

fn main() -> Result<(), TransformError> {
    // Initialize logging
    env_logger::init();

    let projection = Projection::for_viewport(640.0, 480.0, 310.0);
    let mut camera = Transform::default();

    for frame in 0..FRAMES {
        let degrees = frame as f32 * 360.0 / FRAMES as f32;
        orbit_camera(&mut camera, degrees)?;
        info!("frame {frame}: camera at {:?}, angle {:?}", camera.position(), camera.angle());

        for corner in cube_corners() {
            match camera.project(corner, &projection) {
                Some(screen) => info!("  {corner:?} -> ({:.1}, {:.1}) depth {:.3}", screen.x, screen.y, screen.z),
                None => warn!("  {corner:?} is behind the camera"),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbit_keeps_cube_center_in_front() {
        let projection = Projection::for_viewport(640.0, 480.0, 310.0);
        let mut camera = Transform::default();
        for step in 0..12 {
            orbit_camera(&mut camera, step as f32 * 30.0).unwrap();
            let screen = camera.project(Vec3::ZERO, &projection).unwrap();
            assert!(screen.truncate().abs_diff_eq(projection.center, 1e-3), "{screen:?}");
            assert!((screen.z - ORBIT_RADIUS).abs() < 1e-3);
        }
    }

    #[test]
    fn corners_are_distinct() {
        let corners = cube_corners();
        for (i, a) in corners.iter().enumerate() {
            for b in &corners[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
