// Property checks over arbitrary angles, vectors and interpolation factors.

use glam::Vec3;
use intsar_transform::{
    euler_to_matrix, euler_to_quaternion, quaternion_to_euler, Angle, AxisSinCos, Quaternion,
    Transform, EPSILON,
};
use proptest::prelude::*;

fn degrees() -> impl Strategy<Value = f32> {
    -360.0f32..360.0
}

fn angle() -> impl Strategy<Value = Angle> {
    (degrees(), degrees(), degrees()).prop_map(|(p, y, r)| Angle::new(p, y, r))
}

fn unit_quaternion() -> impl Strategy<Value = Quaternion> {
    angle().prop_map(|a| euler_to_quaternion(&a))
}

fn vector() -> impl Strategy<Value = Vec3> {
    prop::array::uniform3(-100.0f32..100.0).prop_map(Vec3::from_array)
}

/// Tolerance scaled to the magnitude of the values compared.
fn close(a: Vec3, b: Vec3, magnitude: f32) -> bool {
    a.abs_diff_eq(b, EPSILON * magnitude.max(1.0))
}

proptest! {
    #[test]
    fn conversions_produce_unit_quaternions(a in angle()) {
        prop_assert!((euler_to_quaternion(&a).norm() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn times_inverse_is_identity(q in unit_quaternion()) {
        prop_assert!((q * q.inverse()).abs_diff_eq(&Quaternion::IDENTITY, EPSILON));
    }

    #[test]
    fn double_inverse_is_original(q in unit_quaternion()) {
        prop_assert!(q.inverse().inverse().abs_diff_eq(&q, EPSILON));
    }

    #[test]
    fn quaternion_matches_matrix(a in angle(), v in vector()) {
        let by_quat = euler_to_quaternion(&a).rotate(v);
        let by_matrix = euler_to_matrix(&a).transform_vector3(v);
        prop_assert!(close(by_quat, by_matrix, v.length()), "{:?} vs {:?}", by_quat, by_matrix);
    }

    #[test]
    fn axis_helpers_match_matrix(a in angle(), v in vector()) {
        let by_helpers = AxisSinCos::from_angle(&a).rotate(v);
        let by_matrix = euler_to_matrix(&a).transform_vector3(v);
        prop_assert!(close(by_helpers, by_matrix, v.length()));
    }

    #[test]
    fn rotate_inverse_undoes_rotate(q in unit_quaternion(), v in vector()) {
        prop_assert!(close(q.rotate_inverse(q.rotate(v)), v, v.length()));
    }

    #[test]
    fn slerp_hits_endpoints(a in unit_quaternion(), b in unit_quaternion()) {
        prop_assert!(a.slerp(&b, 0.0).same_rotation(&a, EPSILON));
        prop_assert!(a.slerp(&b, 1.0).same_rotation(&b, EPSILON));
    }

    #[test]
    fn slerp_stays_unit(a in unit_quaternion(), b in unit_quaternion(), t in 0.0f32..=1.0) {
        let q = a.slerp(&b, t);
        prop_assert!(q.to_array().iter().all(|c| c.is_finite()));
        prop_assert!((q.norm() - 1.0).abs() < EPSILON);

        let opposite = a.slerp(&-a, t);
        prop_assert!((opposite.norm() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn matrix_round_trip(q in unit_quaternion()) {
        let back = Quaternion::from_rotation_matrix(&q.to_mat4());
        prop_assert!(back.same_rotation(&q, EPSILON), "{:?} vs {:?}", back, q);
    }

    #[test]
    fn euler_extraction_round_trip(p in -180.0f32..180.0, y in -90.0f32..=90.0, r in -180.0f32..180.0) {
        let q = euler_to_quaternion(&Angle::new(p, y, r));
        let back = euler_to_quaternion(&quaternion_to_euler(&q));
        prop_assert!(back.same_rotation(&q, EPSILON));
    }

    #[test]
    fn transform_round_trips_points(a in angle(), pos in vector(), p in vector()) {
        let t = Transform::new(pos, a).unwrap();
        let back = t.transform_point_inverse(t.transform_point(p));
        prop_assert!(close(back, p, p.length() + pos.length()));
    }
}
