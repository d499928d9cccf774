use glam::Vec3;
use ord_subset::OrdVar;

use crate::{
  coords::{CoordinateSystem, XYZ},
  debug::{TraceObserver, TraceType},
  util::BoundingBox,
};

/// The shape swept through the world. Shapes are always upright.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SweepShape {
  /// A vertical capsule. `half_height` includes the hemispherical caps.
  Capsule { radius: f32, half_height: f32 },
  /// A sphere.
  Sphere { radius: f32 },
}

impl SweepShape {
  /// The radius of the shape.
  pub fn radius(&self) -> f32 {
    match self {
      Self::Capsule { radius, .. } | Self::Sphere { radius } => *radius,
    }
  }

  /// The half extents of the tightest upright box around the shape.
  pub fn half_extents(&self) -> Vec3 {
    match self {
      &Self::Capsule { radius, half_height } => {
        Vec3::new(radius, radius, half_height)
      }
      &Self::Sphere { radius } => Vec3::splat(radius),
    }
  }
}

/// The first blocking hit of a sweep.
pub struct SweepHit<CS: CoordinateSystem> {
  /// The location of the shape's center when it was blocked.
  pub location: CS::Coordinate,
}

// Manual Clone impl to avoid Clone bound on CoordinateSystem.
impl<CS: CoordinateSystem> Clone for SweepHit<CS> {
  fn clone(&self) -> Self {
    Self { location: self.location.clone() }
  }
}

impl<CS: CoordinateSystem<Coordinate: std::fmt::Debug>> std::fmt::Debug
  for SweepHit<CS>
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SweepHit").field("location", &self.location).finish()
  }
}

/// The collision world the generator sweeps shapes through. Users should
/// implement this on top of their physics engine, sweeping against whatever
/// blocks a walking agent.
pub trait SweepQuery<CS: CoordinateSystem> {
  /// Sweeps `shape` from `start` to `end` and returns the first blocking hit,
  /// if any. A shape that starts out overlapping something is blocked
  /// immediately.
  fn sweep(
    &mut self,
    shape: SweepShape,
    start: &CS::Coordinate,
    end: &CS::Coordinate,
  ) -> Option<SweepHit<CS>>;
}

/// A simple collision world made of axis-aligned boxes. Shapes are treated as
/// their bounding boxes, so sweeps are conservative around box corners.
#[derive(Clone, Debug, Default)]
pub struct AabbWorld {
  boxes: Vec<BoundingBox>,
}

impl AabbWorld {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds a solid box spanning `min` to `max`.
  pub fn add_box(&mut self, min: Vec3, max: Vec3) {
    self.boxes.push(BoundingBox::new_box(min.min(max), min.max(max)));
  }

  /// The solid boxes in the world.
  pub fn boxes(&self) -> &[BoundingBox] {
    &self.boxes
  }
}

impl SweepQuery<XYZ> for AabbWorld {
  fn sweep(
    &mut self,
    shape: SweepShape,
    start: &Vec3,
    end: &Vec3,
  ) -> Option<SweepHit<XYZ>> {
    let extents = shape.half_extents();
    let t = self
      .boxes
      .iter()
      .filter_map(|solid| {
        solid.expand_by_size(extents).segment_entry(*start, *end)
      })
      .min_by_key(|&t| OrdVar::new_unchecked(t))?;
    Some(SweepHit { location: start.lerp(*end, t) })
  }
}

/// Routes sweeps from the standard coordinate system to the host's
/// [`SweepQuery`], reporting every sweep to the [`TraceObserver`].
pub(crate) struct Tracer<'a, CS: CoordinateSystem> {
  sweeper: &'a mut dyn SweepQuery<CS>,
  observer: &'a mut dyn TraceObserver<CS>,
}

impl<'a, CS: CoordinateSystem> Tracer<'a, CS> {
  pub(crate) fn new(
    sweeper: &'a mut dyn SweepQuery<CS>,
    observer: &'a mut dyn TraceObserver<CS>,
  ) -> Self {
    Self { sweeper, observer }
  }

  /// Sweeps `shape` from `start` to `end`. Returns the hit location in the
  /// standard coordinate system.
  pub(crate) fn sweep(
    &mut self,
    trace_type: TraceType,
    shape: SweepShape,
    start: Vec3,
    end: Vec3,
  ) -> Option<Vec3> {
    let start = CS::from_falldown(&start);
    let end = CS::from_falldown(&end);
    let hit = self.sweeper.sweep(shape, &start, &end);
    self.observer.on_trace(trace_type, shape, &start, &end, hit.as_ref());
    hit.map(|hit| CS::to_falldown(&hit.location))
  }

  pub(crate) fn contour_segment(&mut self, a: Vec3, b: Vec3) {
    self
      .observer
      .on_contour_segment(&CS::from_falldown(&a), &CS::from_falldown(&b));
  }

  pub(crate) fn source_vertex(&mut self, vertex: Vec3, normal: Vec3) {
    self.observer.on_source_vertex(
      &CS::from_falldown(&vertex),
      &CS::from_falldown(&normal),
    );
  }
}

#[cfg(test)]
#[path = "sweep_test.rs"]
mod test;
