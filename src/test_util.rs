//! Helpers shared by the unit tests.

use glam::Vec3;

use crate::{
  coords::XYZ,
  debug::{TraceObserver, TraceType},
  sweep::{SweepHit, SweepShape},
};

/// A single recorded sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct RecordedTrace {
  pub(crate) trace_type: TraceType,
  pub(crate) shape: SweepShape,
  pub(crate) start: Vec3,
  pub(crate) end: Vec3,
  pub(crate) hit: Option<Vec3>,
}

/// Records everything the generator reports.
#[derive(Default)]
pub(crate) struct RecordingObserver {
  pub(crate) traces: Vec<RecordedTrace>,
  pub(crate) contour_segments: Vec<(Vec3, Vec3)>,
  pub(crate) source_vertices: Vec<(Vec3, Vec3)>,
}

impl RecordingObserver {
  /// The number of recorded sweeps of `trace_type`.
  pub(crate) fn count(&self, trace_type: TraceType) -> usize {
    self
      .traces
      .iter()
      .filter(|trace| trace.trace_type == trace_type)
      .count()
  }
}

impl TraceObserver<XYZ> for RecordingObserver {
  fn on_trace(
    &mut self,
    trace_type: TraceType,
    shape: SweepShape,
    start: &Vec3,
    end: &Vec3,
    hit: Option<&SweepHit<XYZ>>,
  ) {
    self.traces.push(RecordedTrace {
      trace_type,
      shape,
      start: *start,
      end: *end,
      hit: hit.map(|hit| hit.location),
    });
  }

  fn on_contour_segment(&mut self, start: &Vec3, end: &Vec3) {
    self.contour_segments.push((*start, *end));
  }

  fn on_source_vertex(&mut self, vertex: &Vec3, normal: &Vec3) {
    self.source_vertices.push((*vertex, *normal));
  }
}
