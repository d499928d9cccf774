use glam::Vec3;

use crate::util::{rotate_about_z, safe_normal_xy};

/// Computes the outward (horizontal) normal of edge `(a, b)`, given `c`, the
/// third corner of the triangle that owns the edge. The normal points away
/// from `c`, so it points out of the mesh.
pub(crate) fn edge_normal_from_triangle(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
  let edge_dir = safe_normal_xy(b - a);
  let normal = Vec3::new(edge_dir.y, -edge_dir.x, 0.0);
  if normal.dot(safe_normal_xy(c - a)) > 0.0 { -normal } else { normal }
}

/// The horizontal heading of the edge `(a, b)` in radians, measured
/// counter-clockwise from +X.
pub(crate) fn edge_heading(a: Vec3, b: Vec3) -> f32 {
  (b.y - a.y).atan2(b.x - a.x)
}

/// Rotates `normal` (belonging to an edge with heading `from_heading`) so that
/// it belongs to an edge with heading `to_heading`. The normal keeps the same
/// side of the edge, so an outward normal stays outward as a contour turns.
pub(crate) fn rotate_normal_between_headings(
  normal: Vec3,
  from_heading: f32,
  to_heading: f32,
) -> Vec3 {
  rotate_about_z(normal, to_heading - from_heading)
}

/// The normal at the vertex shared by two consecutive segments: the
/// horizontal average of the two segment normals.
pub(crate) fn vertex_normal(incoming: Vec3, outgoing: Vec3) -> Vec3 {
  safe_normal_xy((incoming + outgoing) * 0.5)
}

#[cfg(test)]
#[path = "geometry_test.rs"]
mod test;
