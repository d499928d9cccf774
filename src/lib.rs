#![doc = include_str!("../README.md")]

mod candidate;
mod contour;
mod coords;
mod destination;
mod falloff;
mod geometry;
mod link;
mod nav_mesh;
mod sweep;
mod util;

#[cfg(test)]
mod test_util;

use thiserror::Error;
use tracing::{info, warn};

use destination::select_destinations;
use falloff::{AgentShapes, FallOff, evaluate_fall_off};
use sweep::Tracer;

pub use glam::Vec3;

pub mod debug;

pub use candidate::{CandidatePointIndex, Clearance, NavPoint};
pub use contour::{Contour, ContourSet, EdgeSegment, build_contours};
pub use coords::{CoordinateSystem, XYZ, YUp};
pub use link::{FalldownLink, FalldownLinks};
pub use nav_mesh::{
  AgentProfile, AgentProfileError, NavMeshGeometry, TriangleLookupError,
  ValidNavMeshGeometry, ValidationError,
};
pub use sweep::{AabbWorld, SweepHit, SweepQuery, SweepShape};
pub use util::BoundingBox;

use debug::TraceObserver;

/// Options controlling which falldown links are generated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeneratorOptions {
  /// The furthest an agent may fall, measured from the bottom of its capsule.
  /// The bottom of the capsule is one agent radius above the source vertex.
  /// The minimum fall (the agent's max step height) is also measured from
  /// there, so a destination can be less than a step below the vertex itself.
  pub max_falldown_height: f32,
  /// The minimum dot product between the outward normal of an edge and the
  /// horizontal direction to a destination. Values are clamped to [-1, 1].
  pub min_link_angle_dot: f32,
  /// Scales the furthest horizontal distance a destination may be for a given
  /// drop. See [`Self::distance_by_height_exp`].
  pub distance_by_height_mult: f32,
  /// A destination that is `drop` below the source may be at most
  /// `distance_by_height_mult * drop ^ distance_by_height_exp` away
  /// horizontally. Small drops only allow short links, while deep drops allow
  /// long ones.
  pub distance_by_height_exp: f32,
  /// The minimum distance between the two destinations of one source vertex.
  pub min_distance_between_destinations: f32,
  /// Only generate links for the contour at this index. Indices past the last
  /// contour select the last contour. Useful to debug a single contour.
  pub only_contour: Option<usize>,
  /// Whether to fail generation if any boundary edge does not belong to a
  /// triangle. Otherwise, those edges are only counted in the
  /// [`GenerationReport`].
  pub abort_on_unmatched_edges: bool,
}

impl Default for GeneratorOptions {
  fn default() -> Self {
    Self {
      max_falldown_height: 1200.0,
      min_link_angle_dot: 0.4,
      distance_by_height_mult: 15.0,
      distance_by_height_exp: 0.6,
      min_distance_between_destinations: 500.0,
      only_contour: None,
      abort_on_unmatched_edges: false,
    }
  }
}

/// An error with the [`GeneratorOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum OptionsError {
  #[error(
    "The max falldown height must be finite and non-negative, but was {0}."
  )]
  InvalidMaxFalldownHeight(f32),
  #[error("The min link angle dot must not be NaN.")]
  InvalidMinLinkAngleDot,
  #[error(
    "The distance by height multiplier must be finite and non-negative, but was {0}."
  )]
  InvalidDistanceByHeightMult(f32),
  #[error("The distance by height exponent must be finite, but was {0}.")]
  InvalidDistanceByHeightExp(f32),
  #[error(
    "The min distance between destinations must be finite and non-negative, but was {0}."
  )]
  InvalidMinDistanceBetweenDestinations(f32),
}

impl GeneratorOptions {
  /// Checks that the options can be used to generate links.
  pub fn validate(&self) -> Result<(), OptionsError> {
    let non_negative = |value: f32| value.is_finite() && value >= 0.0;
    if !non_negative(self.max_falldown_height) {
      return Err(OptionsError::InvalidMaxFalldownHeight(
        self.max_falldown_height,
      ));
    }
    if self.min_link_angle_dot.is_nan() {
      return Err(OptionsError::InvalidMinLinkAngleDot);
    }
    if !non_negative(self.distance_by_height_mult) {
      return Err(OptionsError::InvalidDistanceByHeightMult(
        self.distance_by_height_mult,
      ));
    }
    if !self.distance_by_height_exp.is_finite() {
      return Err(OptionsError::InvalidDistanceByHeightExp(
        self.distance_by_height_exp,
      ));
    }
    if !non_negative(self.min_distance_between_destinations) {
      return Err(OptionsError::InvalidMinDistanceBetweenDestinations(
        self.min_distance_between_destinations,
      ));
    }
    Ok(())
  }
}

/// The navigation mesh to generate links for, along with the agent it was
/// built for.
pub struct NavMeshSnapshot<CS: CoordinateSystem> {
  pub agent: AgentProfile,
  pub geometry: NavMeshGeometry<CS>,
}

// Manual Clone impl to avoid Clone bound on CoordinateSystem.
impl<CS: CoordinateSystem> Clone for NavMeshSnapshot<CS> {
  fn clone(&self) -> Self {
    Self { agent: self.agent, geometry: self.geometry.clone() }
  }
}

/// Statistics about a successful generation pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct GenerationReport {
  /// The number of contours built from the boundary edges.
  pub contours: usize,
  /// The number of contours that did not close into a loop.
  pub open_contours: usize,
  /// The number of boundary edges that did not belong to any triangle.
  pub unmatched_edges: usize,
  /// The number of contours dropped since none of their edges belonged to a
  /// triangle.
  pub dropped_contours: usize,
  /// The number of boundary vertices where the agent could not step off the
  /// mesh.
  pub blocked_vertices: usize,
  /// The number of links generated.
  pub links: usize,
}

/// An error while generating links. The previous links are kept whenever
/// generation fails.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GenerateError {
  #[error("No navigation mesh is available.")]
  MissingNavMesh,
  #[error("The navigation mesh is invalid: {0}")]
  InvalidGeometry(#[from] ValidationError),
  #[error("The agent profile is invalid: {0}")]
  InvalidAgentProfile(#[from] AgentProfileError),
  #[error("The generator options are invalid: {0}")]
  InvalidOptions(#[from] OptionsError),
  /// Stores the number of unmatched edges.
  #[error("{0} boundary edges do not belong to any triangle.")]
  UnmatchedBoundaryEdges(usize),
}

/// Generates falldown links: places where an agent can step off the edge of
/// the navigation mesh and land somewhere lower on the mesh.
pub struct FalldownGenerator<CS: CoordinateSystem> {
  pub options: GeneratorOptions,
  /// Links are stored relative to this point.
  origin: CS::Coordinate,
  links: FalldownLinks<CS>,
}

impl<CS: CoordinateSystem> FalldownGenerator<CS> {
  pub fn new(origin: CS::Coordinate) -> Self {
    Self {
      options: GeneratorOptions::default(),
      origin,
      links: FalldownLinks::new(),
    }
  }

  pub fn origin(&self) -> &CS::Coordinate {
    &self.origin
  }

  /// Moves the generator. Existing links stay relative to the generator, so
  /// they move along with it.
  pub fn set_origin(&mut self, origin: CS::Coordinate) {
    self.origin = origin;
  }

  /// The links from the last successful generation pass.
  pub fn links(&self) -> &FalldownLinks<CS> {
    &self.links
  }

  /// Replaces all links with links generated from `snapshot`, sweeping the
  /// agent through `sweeper`. Every sweep is reported to `observer`.
  ///
  /// If `snapshot` is [`None`] (the navigation mesh is not available), or
  /// anything is invalid, the existing links are kept and an error is
  /// returned.
  pub fn regenerate(
    &mut self,
    snapshot: Option<NavMeshSnapshot<CS>>,
    sweeper: &mut dyn SweepQuery<CS>,
    observer: &mut dyn TraceObserver<CS>,
  ) -> Result<GenerationReport, GenerateError> {
    let Some(snapshot) = snapshot else {
      warn!("No navigation mesh is available. Keeping the existing links.");
      return Err(GenerateError::MissingNavMesh);
    };
    self.options.validate().inspect_err(|err| {
      warn!("Invalid generator options: {err}");
    })?;
    snapshot.agent.validate().inspect_err(|err| {
      warn!("Invalid agent profile: {err}");
    })?;
    let geometry = snapshot.geometry.validate().inspect_err(|err| {
      warn!("Invalid navigation mesh: {err}");
    })?;

    let contour_set = build_contours(&geometry, snapshot.agent.max_step_height);
    if self.options.abort_on_unmatched_edges && contour_set.unmatched_edges > 0
    {
      warn!(
        "Aborting generation: {} boundary edges do not belong to any triangle.",
        contour_set.unmatched_edges
      );
      return Err(GenerateError::UnmatchedBoundaryEdges(
        contour_set.unmatched_edges,
      ));
    }

    let mut report = GenerationReport {
      contours: contour_set.contours.len(),
      open_contours: contour_set.open_contours(),
      unmatched_edges: contour_set.unmatched_edges,
      dropped_contours: contour_set.dropped_contours,
      ..Default::default()
    };

    let contours = match self.options.only_contour {
      None => &contour_set.contours[..],
      Some(index) => {
        let index = index.min(contour_set.contours.len().saturating_sub(1));
        contour_set.contours.get(index..=index).unwrap_or_default()
      }
    };

    let shapes =
      AgentShapes::new(&snapshot.agent, self.options.max_falldown_height);
    let mut points = CandidatePointIndex::new(geometry.vertices());
    let mut tracer = Tracer::new(sweeper, observer);
    let origin = CS::to_falldown(&self.origin);
    let mut links = FalldownLinks::new();

    for contour in contours {
      for (index, segment) in contour.segments().iter().enumerate() {
        tracer.contour_segment(segment.a, segment.b);

        let vertex = segment.b;
        let normal = contour.vertex_normal(index);
        tracer.source_vertex(vertex, normal);

        let outgoing =
          match evaluate_fall_off(&mut tracer, &shapes, vertex, normal) {
            FallOff::Blocked => {
              report.blocked_vertices += 1;
              continue;
            }
            FallOff::Open(outgoing) => outgoing,
          };
        let Some(destinations) = select_destinations(
          &mut tracer,
          &shapes,
          &self.options,
          &mut points,
          vertex,
          normal,
          &outgoing,
        ) else {
          continue;
        };
        for destination in destinations.iter() {
          links.push(origin, vertex, destination);
        }
      }
    }

    report.links = links.len();
    info!(
      "Generated {} falldown links from {} contours ({} blocked vertices).",
      report.links, report.contours, report.blocked_vertices
    );
    self.links = links;
    Ok(report)
  }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod test;
