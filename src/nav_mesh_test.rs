use glam::Vec3;
use googletest::{expect_that, matchers::*};

use crate::coords::{XYZ, YUp};

use super::{
  AgentProfile, AgentProfileError, NavMeshGeometry, TriangleLookupError,
  ValidationError,
};

fn square_geometry() -> NavMeshGeometry<XYZ> {
  let vertices = vec![
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(1.0, 1.0, 0.0),
    Vec3::new(0.0, 1.0, 0.0),
  ];
  NavMeshGeometry {
    boundary_edges: vec![
      (vertices[0], vertices[1]),
      (vertices[1], vertices[2]),
      (vertices[2], vertices[3]),
      (vertices[3], vertices[0]),
    ],
    vertices,
    area_triangles: vec![vec![], vec![0, 1, 2, 0, 2, 3]],
  }
}

#[test]
fn validation_copies_vertices_and_edges() {
  let source = square_geometry();
  let valid = source.clone().validate().expect("Validation succeeds.");
  assert_eq!(valid.vertices(), source.vertices.as_slice());
  assert_eq!(valid.boundary_edges(), source.boundary_edges.as_slice());
}

#[test]
fn validation_converts_coordinate_system() {
  let geometry = NavMeshGeometry::<YUp> {
    vertices: vec![Vec3::new(1.0, 2.0, 3.0)],
    area_triangles: vec![],
    boundary_edges: vec![(Vec3::new(0.0, 5.0, 0.0), Vec3::new(1.0, 5.0, 0.0))],
  };
  let valid = geometry.validate().expect("Validation succeeds.");
  assert_eq!(valid.vertices(), &[Vec3::new(1.0, -3.0, 2.0)]);
  assert_eq!(
    valid.boundary_edges(),
    &[(Vec3::new(0.0, 0.0, 5.0), Vec3::new(1.0, 0.0, 5.0))]
  );
}

#[googletest::test]
fn validation_rejects_malformed_geometry() {
  let mut geometry = square_geometry();
  geometry.area_triangles[1].push(0);
  expect_that!(
    geometry.validate().map(|_| ()),
    err(eq(ValidationError::TriangleIndicesNotMultipleOfThree(1)))
  );

  let mut geometry = square_geometry();
  geometry.area_triangles[0] = vec![0, 1, 7];
  expect_that!(
    geometry.validate().map(|_| ()),
    err(eq(ValidationError::InvalidVertexIndex(0, 7)))
  );

  let mut geometry = square_geometry();
  geometry.vertices[2].z = f32::NAN;
  expect_that!(
    geometry.validate().map(|_| ()),
    err(eq(ValidationError::NonFiniteVertex(2)))
  );

  let mut geometry = square_geometry();
  geometry.boundary_edges[3].1.x = f32::INFINITY;
  expect_that!(
    geometry.validate().map(|_| ()),
    err(eq(ValidationError::NonFiniteBoundaryEdge(3)))
  );
}

#[googletest::test]
fn agent_profile_validation() {
  let agent =
    AgentProfile { radius: 35.0, height: 180.0, max_step_height: 45.0 };
  expect_that!(agent.validate(), ok(eq(())));
  expect_that!(
    AgentProfile { radius: 0.0, ..agent }.validate(),
    err(eq(AgentProfileError::NonPositiveRadius(0.0)))
  );
  expect_that!(
    AgentProfile { height: -2.0, ..agent }.validate(),
    err(eq(AgentProfileError::NegativeHeight(-2.0)))
  );
  expect_that!(
    AgentProfile { max_step_height: -1.0, ..agent }.validate(),
    err(eq(AgentProfileError::NegativeMaxStepHeight(-1.0)))
  );
  expect_that!(
    AgentProfile { height: f32::NAN, ..agent }.validate(),
    err(eq(AgentProfileError::NonFinite))
  );
}

#[googletest::test]
fn finds_third_vertex_for_any_edge_order() {
  let valid = square_geometry().validate().expect("Validation succeeds.");
  let v = valid.vertices().to_vec();

  // First edge of the first triangle, both orders.
  expect_that!(valid.find_triangle_third_vertex(v[0], v[1]), ok(eq(v[2])));
  expect_that!(valid.find_triangle_third_vertex(v[1], v[0]), ok(eq(v[2])));
  // Second edge of the first triangle.
  expect_that!(valid.find_triangle_third_vertex(v[2], v[1]), ok(eq(v[0])));
  // Third edge of the second triangle.
  expect_that!(valid.find_triangle_third_vertex(v[3], v[2]), ok(eq(v[0])));
  // The shared diagonal is found in the first triangle.
  expect_that!(valid.find_triangle_third_vertex(v[2], v[0]), ok(eq(v[1])));
}

#[googletest::test]
fn missing_triangle_is_an_error() {
  let valid = square_geometry().validate().expect("Validation succeeds.");
  expect_that!(
    valid.find_triangle_third_vertex(
      Vec3::new(5.0, 5.0, 0.0),
      Vec3::new(6.0, 5.0, 0.0)
    ),
    err(eq(TriangleLookupError::NoTriangleForEdge))
  );
}
