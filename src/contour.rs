use std::collections::HashMap;

use glam::Vec3;
use tracing::{debug, warn};

use crate::{
  coords::CoordinateSystem,
  geometry::{
    edge_heading, edge_normal_from_triangle, rotate_normal_between_headings,
    vertex_normal,
  },
  nav_mesh::ValidNavMeshGeometry,
};

/// One directed edge of a contour, along with its outward normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeSegment {
  /// The start of the segment.
  pub a: Vec3,
  /// The end of the segment. This is the start of the next segment in the
  /// contour.
  pub b: Vec3,
  /// The horizontal unit normal, pointing out of the mesh.
  pub normal: Vec3,
}

/// An ordered loop of boundary segments. The segment after the last segment
/// is the first segment.
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
  segments: Vec<EdgeSegment>,
  closed: bool,
}

impl Contour {
  /// The segments of the contour, in order.
  pub fn segments(&self) -> &[EdgeSegment] {
    &self.segments
  }

  pub fn len(&self) -> usize {
    self.segments.len()
  }

  pub fn is_empty(&self) -> bool {
    self.segments.is_empty()
  }

  /// Whether the end of the last segment met the start of the first segment
  /// when the contour was built. Open contours come from malformed boundary
  /// data; they are still processed as if they wrapped around.
  pub fn is_closed(&self) -> bool {
    self.closed
  }

  /// The outward normal at the end (`b`) of segment `index`, shared with the
  /// following segment. Panics if `index` is out of bounds.
  pub fn vertex_normal(&self, index: usize) -> Vec3 {
    let next = &self.segments[(index + 1) % self.segments.len()];
    vertex_normal(self.segments[index].normal, next.normal)
  }
}

/// The result of reconstructing contours from a pool of boundary edges.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ContourSet {
  /// The reconstructed contours. Every boundary edge belongs to exactly one
  /// contour, unless its contour was dropped.
  pub contours: Vec<Contour>,
  /// The number of boundary edges that no triangle in the mesh contained.
  pub unmatched_edges: usize,
  /// The number of contours that were dropped because none of their edges
  /// could be matched to a triangle (so no outward normal could be derived).
  pub dropped_contours: usize,
}

impl ContourSet {
  /// The number of contours that did not close into a loop.
  pub fn open_contours(&self) -> usize {
    self.contours.iter().filter(|contour| !contour.is_closed()).count()
  }
}

/// Key for exact horizontal matching of endpoints. Adding zero folds `-0.0`
/// into `0.0`.
fn horizontal_key(point: Vec3) -> (u32, u32) {
  ((point.x + 0.0).to_bits(), (point.y + 0.0).to_bits())
}

/// Whether `p` and `q` are the same contour vertex: exactly equal
/// horizontally, and within `vertical_tolerance` vertically.
fn same_vertex(p: Vec3, q: Vec3, vertical_tolerance: f32) -> bool {
  p.x == q.x && p.y == q.y && (p.z - q.z).abs() <= vertical_tolerance
}

/// A fixed pool of boundary edges. Edges are never removed; they are claimed
/// by flipping their consumed bit.
struct EdgePool<'a> {
  edges: &'a [(Vec3, Vec3)],
  consumed: Vec<bool>,
  /// Maps the horizontal position of each endpoint to the edges touching it,
  /// as (edge index, whether the endpoint is the edge's second point). Entries
  /// are in ascending edge order.
  endpoints: HashMap<(u32, u32), Vec<(usize, bool)>>,
  /// Every edge before this index is consumed.
  first_unconsumed: usize,
}

impl<'a> EdgePool<'a> {
  fn new(edges: &'a [(Vec3, Vec3)]) -> Self {
    let mut endpoints = HashMap::<_, Vec<_>>::new();
    for (index, (a, b)) in edges.iter().enumerate() {
      endpoints.entry(horizontal_key(*a)).or_default().push((index, false));
      endpoints.entry(horizontal_key(*b)).or_default().push((index, true));
    }
    Self {
      edges,
      consumed: vec![false; edges.len()],
      endpoints,
      first_unconsumed: 0,
    }
  }

  /// Claims the lowest-index unconsumed edge, in its stored orientation.
  fn claim_any(&mut self) -> Option<(Vec3, Vec3)> {
    while self.first_unconsumed < self.edges.len() {
      let index = self.first_unconsumed;
      self.first_unconsumed += 1;
      if !self.consumed[index] {
        self.consumed[index] = true;
        return Some(self.edges[index]);
      }
    }
    None
  }

  /// Claims an unconsumed edge with an endpoint at `search`, oriented so that
  /// it starts at that endpoint.
  fn claim_next(
    &mut self,
    search: Vec3,
    vertical_tolerance: f32,
  ) -> Option<(Vec3, Vec3)> {
    let candidates = self.endpoints.get(&horizontal_key(search))?;
    for &(index, is_second) in candidates.iter() {
      if self.consumed[index] {
        continue;
      }
      let (a, b) = self.edges[index];
      let (start, end) = if is_second { (b, a) } else { (a, b) };
      if !same_vertex(start, search, vertical_tolerance) {
        continue;
      }
      self.consumed[index] = true;
      return Some((start, end));
    }
    None
  }
}

/// Reconstructs ordered, closed contours from the unordered boundary edges of
/// `geometry`. Consecutive segments are joined when their shared endpoints
/// match exactly horizontally and within `vertical_tolerance` vertically
/// (authoring data can drift slightly in height).
///
/// Outward normals are derived from the triangle owning the first segment of
/// each contour, then carried around the contour by rotating through each
/// turn. If that triangle cannot be found, the next segment is tried, and so
/// on. Every edge of the contour that belongs to no triangle is counted in
/// [`ContourSet::unmatched_edges`].
pub fn build_contours<CS: CoordinateSystem>(
  geometry: &ValidNavMeshGeometry<CS>,
  vertical_tolerance: f32,
) -> ContourSet {
  let mut pool = EdgePool::new(geometry.boundary_edges());
  let mut contour_set = ContourSet::default();

  while let Some(first) = pool.claim_any() {
    let mut edges = vec![first];
    let mut last = first.1;
    while let Some(next) = pool.claim_next(last, vertical_tolerance) {
      last = next.1;
      edges.push(next);
    }
    let closed = same_vertex(last, first.0, vertical_tolerance);

    // Every edge is looked up, but only the first match seeds the normals.
    let mut seed = None;
    for (index, &(a, b)) in edges.iter().enumerate() {
      match geometry.find_triangle_third_vertex(a, b) {
        Ok(c) => {
          if seed.is_none() {
            seed = Some((index, edge_normal_from_triangle(a, b, c)));
          }
        }
        Err(err) => {
          warn!("Boundary edge {a} -> {b} has no triangle: {err}");
          contour_set.unmatched_edges += 1;
        }
      }
    }
    let Some((seed_index, seed_normal)) = seed else {
      warn!(
        "Dropping contour of {} edges starting at {}: no edge belongs to a triangle.",
        edges.len(),
        first.0
      );
      contour_set.dropped_contours += 1;
      continue;
    };

    let seed_heading = edge_heading(edges[seed_index].0, edges[seed_index].1);
    let segments = edges
      .iter()
      .map(|&(a, b)| EdgeSegment {
        a,
        b,
        normal: rotate_normal_between_headings(
          seed_normal,
          seed_heading,
          edge_heading(a, b),
        ),
      })
      .collect::<Vec<_>>();

    debug!(
      "Built contour {} with {} segments (closed: {closed}).",
      contour_set.contours.len(),
      segments.len()
    );
    contour_set.contours.push(Contour { segments, closed });
  }

  contour_set
}

#[cfg(test)]
#[path = "contour_test.rs"]
mod test;
