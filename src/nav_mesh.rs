use std::marker::PhantomData;

use glam::Vec3;
use thiserror::Error;

use crate::coords::CoordinateSystem;

/// The agent that links are generated for. These are usually the same values
/// the navigation mesh was built with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentProfile {
  /// The radius of the agent's capsule.
  pub radius: f32,
  /// The full height of the agent's capsule.
  pub height: f32,
  /// The maximum height the agent can step up (or down) without falling.
  pub max_step_height: f32,
}

impl AgentProfile {
  /// Checks that every value is finite, the radius is positive and the other
  /// values are non-negative.
  pub fn validate(&self) -> Result<(), AgentProfileError> {
    if !(self.radius.is_finite()
      && self.height.is_finite()
      && self.max_step_height.is_finite())
    {
      return Err(AgentProfileError::NonFinite);
    }
    if self.radius <= 0.0 {
      return Err(AgentProfileError::NonPositiveRadius(self.radius));
    }
    if self.height < 0.0 {
      return Err(AgentProfileError::NegativeHeight(self.height));
    }
    if self.max_step_height < 0.0 {
      return Err(AgentProfileError::NegativeMaxStepHeight(
        self.max_step_height,
      ));
    }
    Ok(())
  }
}

/// An error when validating an [`AgentProfile`].
#[derive(Debug, Copy, Clone, PartialEq, Error)]
pub enum AgentProfileError {
  #[error("The agent profile has a non-finite value.")]
  NonFinite,
  #[error("The agent radius must be positive, but was {0}.")]
  NonPositiveRadius(f32),
  #[error("The agent height must be non-negative, but was {0}.")]
  NegativeHeight(f32),
  #[error("The agent max step height must be non-negative, but was {0}.")]
  NegativeMaxStepHeight(f32),
}

/// A snapshot of the navigation mesh geometry the generator runs against.
pub struct NavMeshGeometry<CS: CoordinateSystem> {
  /// Every vertex of the mesh. These are also the candidate landing points.
  pub vertices: Vec<CS::Coordinate>,
  /// One flat triangle list per area (or spatial bucket). Every three
  /// consecutive entries are indices into `vertices` forming one triangle.
  pub area_triangles: Vec<Vec<usize>>,
  /// The boundary edges of the mesh, in no particular order. The order of the
  /// two points of an edge is also arbitrary.
  pub boundary_edges: Vec<(CS::Coordinate, CS::Coordinate)>,
}

impl<CS: CoordinateSystem> Clone for NavMeshGeometry<CS> {
  fn clone(&self) -> Self {
    Self {
      vertices: self.vertices.clone(),
      area_triangles: self.area_triangles.clone(),
      boundary_edges: self.boundary_edges.clone(),
    }
  }
}

/// An error when validating navigation mesh geometry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  /// Stores the index of the area.
  #[error(
    "The triangle list of area {0} does not have a multiple of 3 indices."
  )]
  TriangleIndicesNotMultipleOfThree(usize),
  /// Stores the index of the area and the offending vertex index.
  #[error("The triangle list of area {0} references out-of-bounds vertex {1}.")]
  InvalidVertexIndex(usize, usize),
  /// Stores the index of the vertex.
  #[error("The vertex at index {0} is not finite.")]
  NonFiniteVertex(usize),
  /// Stores the index of the boundary edge.
  #[error("The boundary edge at index {0} has a non-finite point.")]
  NonFiniteBoundaryEdge(usize),
}

/// An error from looking up the triangle that owns a boundary edge.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum TriangleLookupError {
  #[error("No triangle in the mesh contains the boundary edge.")]
  NoTriangleForEdge,
}

impl<CS: CoordinateSystem> NavMeshGeometry<CS> {
  /// Converts the geometry into the standard coordinate system and checks
  /// that the triangle lists are well formed. Returns an error if the geometry
  /// is invalid in some way.
  pub fn validate(
    self,
  ) -> Result<ValidNavMeshGeometry<CS>, ValidationError> {
    let vertices =
      self.vertices.iter().map(CS::to_falldown).collect::<Vec<_>>();
    if let Some(index) = vertices.iter().position(|v| !v.is_finite()) {
      return Err(ValidationError::NonFiniteVertex(index));
    }

    for (area_index, triangles) in self.area_triangles.iter().enumerate() {
      if triangles.len() % 3 != 0 {
        return Err(ValidationError::TriangleIndicesNotMultipleOfThree(
          area_index,
        ));
      }
      if let Some(&vertex_index) =
        triangles.iter().find(|&&index| index >= vertices.len())
      {
        return Err(ValidationError::InvalidVertexIndex(
          area_index,
          vertex_index,
        ));
      }
    }

    let boundary_edges = self
      .boundary_edges
      .iter()
      .map(|(a, b)| (CS::to_falldown(a), CS::to_falldown(b)))
      .collect::<Vec<_>>();
    if let Some(index) =
      boundary_edges.iter().position(|(a, b)| !a.is_finite() || !b.is_finite())
    {
      return Err(ValidationError::NonFiniteBoundaryEdge(index));
    }

    Ok(ValidNavMeshGeometry {
      vertices,
      area_triangles: self.area_triangles,
      boundary_edges,
      marker: PhantomData,
    })
  }
}

/// Navigation mesh geometry which has been validated and converted into the
/// standard coordinate system.
pub struct ValidNavMeshGeometry<CS: CoordinateSystem> {
  /// The vertices of the mesh.
  pub(crate) vertices: Vec<Vec3>,
  /// The per-area flat triangle lists. Every index is in bounds of `vertices`.
  pub(crate) area_triangles: Vec<Vec<usize>>,
  /// The boundary edges of the mesh.
  pub(crate) boundary_edges: Vec<(Vec3, Vec3)>,
  /// Marker for the CoordinateSystem.
  pub(crate) marker: PhantomData<CS>,
}

// Manual Clone impl to avoid Clone bound on CoordinateSystem.
impl<CS: CoordinateSystem> Clone for ValidNavMeshGeometry<CS> {
  fn clone(&self) -> Self {
    Self {
      vertices: self.vertices.clone(),
      area_triangles: self.area_triangles.clone(),
      boundary_edges: self.boundary_edges.clone(),
      marker: self.marker,
    }
  }
}

// Manual Debug impl to avoid Debug bound on CoordinateSystem.
impl<CS: CoordinateSystem> std::fmt::Debug for ValidNavMeshGeometry<CS> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ValidNavMeshGeometry")
      .field("vertices", &self.vertices)
      .field("area_triangles", &self.area_triangles)
      .field("boundary_edges", &self.boundary_edges)
      .field("marker", &self.marker)
      .finish()
  }
}

impl<CS: CoordinateSystem> ValidNavMeshGeometry<CS> {
  /// The vertices of the mesh in the standard coordinate system.
  pub fn vertices(&self) -> &[Vec3] {
    &self.vertices
  }

  /// The boundary edges of the mesh in the standard coordinate system.
  pub fn boundary_edges(&self) -> &[(Vec3, Vec3)] {
    &self.boundary_edges
  }

  /// Given a boundary edge `(a, b)`, finds the third vertex of the first
  /// triangle (scanning areas in order) that has `a` and `b` as two of its
  /// corners, in either order.
  pub fn find_triangle_third_vertex(
    &self,
    a: Vec3,
    b: Vec3,
  ) -> Result<Vec3, TriangleLookupError> {
    let is_edge = |p: Vec3, q: Vec3| (p == a && q == b) || (p == b && q == a);

    for triangles in self.area_triangles.iter() {
      for triangle in triangles.chunks_exact(3) {
        let corners = (
          self.vertices[triangle[0]],
          self.vertices[triangle[1]],
          self.vertices[triangle[2]],
        );
        if is_edge(corners.0, corners.1) {
          return Ok(corners.2);
        }
        if is_edge(corners.0, corners.2) {
          return Ok(corners.1);
        }
        if is_edge(corners.1, corners.2) {
          return Ok(corners.0);
        }
      }
    }
    Err(TriangleLookupError::NoTriangleForEdge)
  }
}

#[cfg(test)]
#[path = "nav_mesh_test.rs"]
mod test;
