use glam::Vec3;

use super::{CoordinateSystem, XYZ, YUp};

#[test]
fn xyz_is_identity() {
  let point = Vec3::new(1.0, -2.0, 3.0);
  assert_eq!(XYZ::to_falldown(&point), point);
  assert_eq!(XYZ::from_falldown(&point), point);
}

#[test]
fn y_up_maps_height_to_z() {
  assert_eq!(YUp::to_falldown(&Vec3::new(0.0, 5.0, 0.0)), Vec3::Z * 5.0);
  // Backward in the host is backward in the standard system.
  assert_eq!(YUp::to_falldown(&Vec3::new(0.0, 0.0, 2.0)), Vec3::NEG_Y * 2.0);
}

#[test]
fn y_up_round_trips() {
  let point = Vec3::new(1.5, 2.5, -3.5);
  assert_eq!(YUp::from_falldown(&YUp::to_falldown(&point)), point);
  assert_eq!(YUp::to_falldown(&YUp::from_falldown(&point)), point);
}
