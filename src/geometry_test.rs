use std::f32::consts::{FRAC_1_SQRT_2, PI};

use glam::Vec3;
use googletest::{expect_that, matchers::*};

use super::{
  edge_heading, edge_normal_from_triangle, rotate_normal_between_headings,
  vertex_normal,
};

#[test]
fn edge_normal_points_away_from_triangle() {
  let a = Vec3::new(0.0, 0.0, 0.0);
  let b = Vec3::new(2.0, 0.0, 0.0);

  assert_eq!(
    edge_normal_from_triangle(a, b, Vec3::new(1.0, 1.0, 0.0)),
    Vec3::new(0.0, -1.0, 0.0)
  );
  assert_eq!(
    edge_normal_from_triangle(a, b, Vec3::new(1.0, -1.0, 0.0)),
    Vec3::new(0.0, 1.0, 0.0)
  );
  // Reversing the edge does not change which side is outward.
  assert_eq!(
    edge_normal_from_triangle(b, a, Vec3::new(1.0, 1.0, 0.0)),
    Vec3::new(0.0, -1.0, 0.0)
  );
}

#[test]
fn edge_normal_ignores_height() {
  let normal = edge_normal_from_triangle(
    Vec3::new(0.0, 0.0, 5.0),
    Vec3::new(0.0, 3.0, -5.0),
    Vec3::new(-1.0, 1.0, 100.0),
  );
  assert_eq!(normal, Vec3::new(1.0, 0.0, 0.0));
}

#[googletest::test]
fn heading_is_counter_clockwise_from_x() {
  expect_that!(edge_heading(Vec3::ZERO, Vec3::X), approx_eq(0.0));
  expect_that!(edge_heading(Vec3::ZERO, Vec3::Y * 3.0), approx_eq(PI * 0.5));
  expect_that!(edge_heading(Vec3::ZERO, Vec3::NEG_Y), approx_eq(-PI * 0.5));
}

#[test]
fn normal_follows_turns() {
  // Square walked counter-clockwise, starting along +X with the outward
  // normal pointing -Y.
  let along_x = edge_heading(Vec3::ZERO, Vec3::X);
  let along_y = edge_heading(Vec3::X, Vec3::X + Vec3::Y);
  let rotated =
    rotate_normal_between_headings(Vec3::NEG_Y, along_x, along_y);
  assert!(rotated.abs_diff_eq(Vec3::X, 1e-6), "{rotated}");

  // Turning back the other way restores the original normal.
  let restored = rotate_normal_between_headings(rotated, along_y, along_x);
  assert!(restored.abs_diff_eq(Vec3::NEG_Y, 1e-6), "{restored}");
}

#[test]
fn vertex_normal_averages_neighbours() {
  let normal = vertex_normal(Vec3::NEG_Y, Vec3::X);
  assert!(
    normal.abs_diff_eq(Vec3::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2, 0.0), 1e-6),
    "{normal}"
  );
  assert_eq!(vertex_normal(Vec3::X, Vec3::X), Vec3::X);
}
