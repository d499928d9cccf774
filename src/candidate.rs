use glam::Vec3;
use kdtree::{KdTree, distance::squared_euclidean};

/// The cached result of probing the open space above a [`NavPoint`].
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Clearance {
  /// The point has not been probed yet.
  #[default]
  Unknown,
  /// Something was hit this far above the point's probe start.
  Limited(f32),
  /// Nothing was hit for the full length of the probe.
  Unbounded,
}

impl Clearance {
  /// Whether the clear space above a point at height `base_z` reaches
  /// `target_z`. Returns [`None`] if the point has not been probed.
  pub fn reaches(&self, base_z: f32, target_z: f32) -> Option<bool> {
    match self {
      Self::Unknown => None,
      Self::Limited(height) => Some(base_z + height >= target_z),
      Self::Unbounded => Some(true),
    }
  }
}

/// A potential landing location for a falldown link.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavPoint {
  /// Where the point is.
  pub position: Vec3,
  /// The clear space above the point, filled in the first time the point is
  /// validated as a destination.
  pub clearance: Clearance,
}

/// Every mesh vertex as a potential destination, shared across all source
/// vertices of a generation pass. The clearance cache is written by whichever
/// source vertex probes a point first.
pub struct CandidatePointIndex {
  points: Vec<NavPoint>,
  /// The horizontal positions of `points`, holding their indices.
  tree: KdTree<f32, usize, [f32; 2]>,
}

impl CandidatePointIndex {
  /// Creates an index with one unprobed point per vertex. `vertices` must be
  /// finite.
  pub fn new(vertices: &[Vec3]) -> Self {
    let mut tree = KdTree::new(/* dimensions= */ 2);
    for (index, vertex) in vertices.iter().enumerate() {
      tree.add([vertex.x, vertex.y], index).expect("Vertex is finite");
    }
    Self {
      points: vertices
        .iter()
        .map(|&position| NavPoint { position, clearance: Clearance::Unknown })
        .collect(),
      tree,
    }
  }

  pub fn len(&self) -> usize {
    self.points.len()
  }

  pub fn is_empty(&self) -> bool {
    self.points.is_empty()
  }

  /// Gets the point at `index`.
  pub fn get(&self, index: usize) -> &NavPoint {
    &self.points[index]
  }

  /// All points, in vertex order.
  pub fn points(&self) -> &[NavPoint] {
    &self.points
  }

  /// Records the probed clearance of the point at `index`.
  pub(crate) fn set_clearance(&mut self, index: usize, clearance: Clearance) {
    self.points[index].clearance = clearance;
  }

  /// Finds the indices of every point within `radius` of `center`, measured
  /// horizontally. Indices are returned in ascending order. A non-finite
  /// radius returns every point.
  pub fn within_xy(&self, center: Vec3, radius: f32) -> Vec<usize> {
    if !radius.is_finite() {
      return (0..self.points.len()).collect();
    }
    let mut indices: Vec<usize> = self
      .tree
      .within(&[center.x, center.y], radius * radius, &squared_euclidean)
      .map(|found| found.into_iter().map(|(_, &index)| index).collect())
      .unwrap_or_else(|_| (0..self.points.len()).collect());
    indices.sort_unstable();
    indices
  }
}

#[cfg(test)]
#[path = "candidate_test.rs"]
mod test;
