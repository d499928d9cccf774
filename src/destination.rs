use std::cmp::Reverse;

use glam::Vec3;
use ord_subset::OrdVar;

use crate::{
  GeneratorOptions,
  candidate::{CandidatePointIndex, Clearance},
  coords::CoordinateSystem,
  debug::TraceType,
  falloff::{AgentShapes, OutgoingSweep},
  sweep::Tracer,
  util::{distance_squared_xy, distance_xy, safe_normal_xy},
};

/// The landing points chosen for one boundary vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Destinations {
  /// The viable destination horizontally nearest to the vertex.
  pub(crate) first: Vec3,
  /// The viable destination furthest from `first`, at least the minimum
  /// destination distance away from it.
  pub(crate) second: Option<Vec3>,
}

impl Destinations {
  pub(crate) fn iter(&self) -> impl Iterator<Item = Vec3> + '_ {
    std::iter::once(self.first).chain(self.second)
  }
}

/// The furthest a destination may be horizontally from the source, when it is
/// `drop` below the source.
fn max_distance_for_drop(options: &GeneratorOptions, drop: f32) -> f32 {
  options.distance_by_height_mult * drop.powf(options.distance_by_height_exp)
}

/// Finds the candidate points that could be destinations without sweeping
/// anything. Points whose cached clearance does not reach the source are
/// skipped.
fn filter_candidates(
  shapes: &AgentShapes,
  options: &GeneratorOptions,
  points: &CandidatePointIndex,
  vertex: Vec3,
  normal: Vec3,
  capsule_bottom: Vec3,
) -> Vec<usize> {
  let min_z = capsule_bottom.z - options.max_falldown_height;
  let max_z = capsule_bottom.z - shapes.max_step_height;
  let min_dot = options.min_link_angle_dot.clamp(-1.0, 1.0);
  let search_radius =
    max_distance_for_drop(options, options.max_falldown_height)
      .max(max_distance_for_drop(options, shapes.max_step_height));

  points
    .within_xy(capsule_bottom, search_radius)
    .into_iter()
    .filter(|&index| {
      let point = points.get(index);
      let position = point.position;
      if position.z < min_z || position.z > max_z {
        return false;
      }
      if point.clearance.reaches(position.z, capsule_bottom.z) == Some(false) {
        return false;
      }
      if normal.dot(safe_normal_xy(position - vertex)) < min_dot {
        return false;
      }
      distance_xy(position, capsule_bottom)
        <= max_distance_for_drop(options, capsule_bottom.z - position.z)
    })
    .collect()
}

/// Checks whether the point at `index` is a viable destination. The first
/// check of each point probes and caches the clear space above it.
fn is_viable<CS: CoordinateSystem>(
  tracer: &mut Tracer<'_, CS>,
  shapes: &AgentShapes,
  points: &mut CandidatePointIndex,
  index: usize,
  outgoing: &OutgoingSweep,
) -> bool {
  let point = *points.get(index);
  let position = point.position;

  let clearance = match point.clearance {
    Clearance::Unknown => {
      let start = position + Vec3::Z * shapes.destination_z_offset;
      let end = start + Vec3::Z * shapes.vertical_probe_length;
      let hit =
        tracer.sweep(TraceType::VerticalSphere, shapes.sphere, start, end);
      let clearance = match hit {
        Some(hit) => Clearance::Limited((hit.z - start.z).max(0.1)),
        None => Clearance::Unbounded,
      };
      points.set_clearance(index, clearance);
      clearance
    }
    clearance => clearance,
  };
  if clearance.reaches(position.z, outgoing.capsule_bottom.z) != Some(true) {
    return false;
  }

  // Points right below the end of the outgoing sweep are reached by falling
  // straight down.
  let distance = distance_xy(outgoing.end, position);
  if distance > shapes.capsule.radius() {
    let end =
      Vec3::new(position.x, position.y, outgoing.end.z - 0.5 * distance);
    if tracer
      .sweep(TraceType::DiagonalCapsule, shapes.capsule, outgoing.end, end)
      .is_some()
    {
      return false;
    }
  }
  true
}

/// Selects up to two destinations for the boundary `vertex` with outward
/// `normal`, whose outgoing sweep was unobstructed. Returns [`None`] if no
/// candidate point is viable.
///
/// Candidates are validated nearest first (horizontally) until one is viable.
/// Candidates closer to that first destination than
/// [`GeneratorOptions::min_distance_between_destinations`] are discarded, and
/// the rest are validated furthest first to find the second destination.
pub(crate) fn select_destinations<CS: CoordinateSystem>(
  tracer: &mut Tracer<'_, CS>,
  shapes: &AgentShapes,
  options: &GeneratorOptions,
  points: &mut CandidatePointIndex,
  vertex: Vec3,
  normal: Vec3,
  outgoing: &OutgoingSweep,
) -> Option<Destinations> {
  let capsule_bottom = outgoing.capsule_bottom;
  let mut candidates =
    filter_candidates(shapes, options, points, vertex, normal, capsule_bottom);

  // Furthest first, so the nearest can be popped off the end.
  candidates.sort_by_key(|&index| {
    Reverse(OrdVar::new_unchecked(distance_squared_xy(
      capsule_bottom,
      points.get(index).position,
    )))
  });

  let first = loop {
    let index = candidates.pop()?;
    if is_viable(tracer, shapes, points, index, outgoing) {
      break points.get(index).position;
    }
  };

  let min_distance_squared = options.min_distance_between_destinations
    * options.min_distance_between_destinations;
  candidates.retain(|&index| {
    points.get(index).position.distance_squared(first) >= min_distance_squared
  });
  candidates.sort_by_key(|&index| {
    Reverse(OrdVar::new_unchecked(
      points.get(index).position.distance_squared(first),
    ))
  });

  let second = candidates
    .into_iter()
    .find(|&index| is_viable(tracer, shapes, points, index, outgoing))
    .map(|index| points.get(index).position);

  Some(Destinations { first, second })
}

#[cfg(test)]
#[path = "destination_test.rs"]
mod test;
