use crate::{
  coords::CoordinateSystem,
  sweep::{SweepHit, SweepShape},
};

/// The kind of sweep performed during generation.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum TraceType {
  /// A capsule swept outward from a boundary vertex, testing whether the agent
  /// can step off the mesh there.
  OutgoingCapsule,
  /// A sphere swept upward from a candidate destination, measuring the clear
  /// space above it.
  VerticalSphere,
  /// A capsule swept from the end of the outgoing sweep down towards a
  /// candidate destination.
  DiagonalCapsule,
}

/// Trait to observe the work of the generator. Users should implement this to
/// visualize or debug how links were (or were not) generated. `()` observes
/// nothing.
pub trait TraceObserver<CS: CoordinateSystem> {
  /// Called after every sweep, with its result.
  fn on_trace(
    &mut self,
    trace_type: TraceType,
    shape: SweepShape,
    start: &CS::Coordinate,
    end: &CS::Coordinate,
    hit: Option<&SweepHit<CS>>,
  );

  /// Called for every segment of every processed contour.
  fn on_contour_segment(
    &mut self,
    _start: &CS::Coordinate,
    _end: &CS::Coordinate,
  ) {
  }

  /// Called for every processed source vertex, with its outward normal.
  fn on_source_vertex(
    &mut self,
    _vertex: &CS::Coordinate,
    _normal: &CS::Coordinate,
  ) {
  }
}

impl<CS: CoordinateSystem> TraceObserver<CS> for () {
  fn on_trace(
    &mut self,
    _trace_type: TraceType,
    _shape: SweepShape,
    _start: &CS::Coordinate,
    _end: &CS::Coordinate,
    _hit: Option<&SweepHit<CS>>,
  ) {
  }
}
