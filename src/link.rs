use glam::Vec3;

use crate::{coords::CoordinateSystem, util::BoundingBox};

/// A link where an agent can step off the navigation mesh at `start` and fall
/// down to `end`.
///
/// Both points are relative to the origin of the generator that created the
/// link.
pub struct FalldownLink<CS: CoordinateSystem> {
  /// The point on the edge of the mesh where the agent steps off.
  pub start: CS::Coordinate,
  /// The point where the agent lands.
  pub end: CS::Coordinate,
  /// Whether the link may also be taken from `end` to `start`. Always false
  /// for generated links, since agents cannot climb back up.
  pub bidirectional: bool,
  /// How far below `end` the navigation system may search for the mesh. Always
  /// zero for generated links, since `end` is already on the mesh.
  pub max_fall_down_length: f32,
}

// Manual Clone impl to avoid Clone bound on CoordinateSystem.
impl<CS: CoordinateSystem> Clone for FalldownLink<CS> {
  fn clone(&self) -> Self {
    Self {
      start: self.start.clone(),
      end: self.end.clone(),
      bidirectional: self.bidirectional,
      max_fall_down_length: self.max_fall_down_length,
    }
  }
}

impl<CS: CoordinateSystem<Coordinate: std::fmt::Debug>> std::fmt::Debug
  for FalldownLink<CS>
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("FalldownLink")
      .field("start", &self.start)
      .field("end", &self.end)
      .field("bidirectional", &self.bidirectional)
      .field("max_fall_down_length", &self.max_fall_down_length)
      .finish()
  }
}

/// The links produced by one generation pass.
pub struct FalldownLinks<CS: CoordinateSystem> {
  links: Vec<FalldownLink<CS>>,
}

impl<CS: CoordinateSystem> Default for FalldownLinks<CS> {
  fn default() -> Self {
    Self { links: Vec::new() }
  }
}

// Manual Clone impl to avoid Clone bound on CoordinateSystem.
impl<CS: CoordinateSystem> Clone for FalldownLinks<CS> {
  fn clone(&self) -> Self {
    Self { links: self.links.clone() }
  }
}

impl<CS: CoordinateSystem<Coordinate: std::fmt::Debug>> std::fmt::Debug
  for FalldownLinks<CS>
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("FalldownLinks").field("links", &self.links).finish()
  }
}

impl<CS: CoordinateSystem> FalldownLinks<CS> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds a one-way link from `source` to `destination`. All points are in
  /// the standard coordinate system, and the link is stored relative to
  /// `origin`.
  pub(crate) fn push(&mut self, origin: Vec3, source: Vec3, destination: Vec3) {
    self.links.push(FalldownLink {
      start: CS::from_falldown(&(source - origin)),
      end: CS::from_falldown(&(destination - origin)),
      bidirectional: false,
      max_fall_down_length: 0.0,
    });
  }

  pub fn iter(&self) -> impl ExactSizeIterator<Item = &FalldownLink<CS>> + '_ {
    self.links.iter()
  }

  pub fn len(&self) -> usize {
    self.links.len()
  }

  pub fn is_empty(&self) -> bool {
    self.links.is_empty()
  }

  /// The bounds of every link endpoint, relative to the generator's origin and
  /// in the standard coordinate system.
  pub fn navigation_bounds(&self) -> BoundingBox {
    self.links.iter().fold(BoundingBox::Empty, |bounds, link| {
      bounds
        .expand_to_point(CS::to_falldown(&link.start))
        .expand_to_point(CS::to_falldown(&link.end))
    })
  }

  /// Whether the navigation system needs to know about these links at all.
  pub fn is_navigation_relevant(&self) -> bool {
    !self.links.is_empty()
  }

  /// Finds the first link that ends at `point` (relative to the generator's
  /// origin). The horizontal position must match exactly, but the height only
  /// needs to be within `z_tolerance`, since agents following the link do not
  /// land exactly on the mesh.
  pub fn find_link_ending_at(
    &self,
    point: &CS::Coordinate,
    z_tolerance: f32,
  ) -> Option<&FalldownLink<CS>> {
    let point = CS::to_falldown(point);
    self.links.iter().find(|link| {
      let end = CS::to_falldown(&link.end);
      end.x == point.x
        && end.y == point.y
        && (end.z - point.z).abs() < z_tolerance
    })
  }
}

#[cfg(test)]
#[path = "link_test.rs"]
mod test;
