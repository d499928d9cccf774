use glam::Vec3;

use crate::{
  coords::CoordinateSystem,
  debug::TraceType,
  nav_mesh::AgentProfile,
  sweep::{SweepShape, Tracer},
};

/// The shapes and offsets used to sweep for an agent, derived from its
/// profile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct AgentShapes {
  /// The agent's body, used for the outgoing and diagonal sweeps.
  pub(crate) capsule: SweepShape,
  /// Used to probe the clear space above destinations.
  pub(crate) sphere: SweepShape,
  /// How far above a boundary vertex the bottom of the capsule sits.
  pub(crate) capsule_z_offset: f32,
  /// How far the capsule is swept outward from a boundary vertex.
  pub(crate) outgoing_distance: f32,
  /// How far above a destination the upward probe starts. Mesh vertices can
  /// sit slightly inside the ground.
  pub(crate) destination_z_offset: f32,
  /// How far the upward probe is swept.
  pub(crate) vertical_probe_length: f32,
  pub(crate) max_step_height: f32,
}

impl AgentShapes {
  pub(crate) fn new(agent: &AgentProfile, max_falldown_height: f32) -> Self {
    let half_height = agent.height * 0.5;
    Self {
      capsule: SweepShape::Capsule { radius: agent.radius, half_height },
      sphere: SweepShape::Sphere { radius: agent.radius },
      capsule_z_offset: agent.radius,
      outgoing_distance: agent.radius * 3.0,
      destination_z_offset: agent.radius + half_height,
      vertical_probe_length: max_falldown_height,
      max_step_height: agent.max_step_height,
    }
  }

  fn capsule_half_height(&self) -> f32 {
    match self.capsule {
      SweepShape::Capsule { half_height, .. } => half_height,
      SweepShape::Sphere { radius } => radius,
    }
  }
}

/// The unobstructed outgoing sweep from a boundary vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct OutgoingSweep {
  /// The center of the capsule after stepping off the mesh.
  pub(crate) end: Vec3,
  /// The bottom of the capsule standing on the vertex. Heights of
  /// destinations are measured from here.
  pub(crate) capsule_bottom: Vec3,
}

/// Whether an agent can step off the mesh at a boundary vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum FallOff {
  /// Something blocks the agent from leaving the mesh here.
  Blocked,
  /// The agent can leave the mesh along this sweep.
  Open(OutgoingSweep),
}

/// Sweeps the agent's capsule outward from `vertex` along `normal`, starting
/// with the capsule's bottom just above the vertex.
pub(crate) fn evaluate_fall_off<CS: CoordinateSystem>(
  tracer: &mut Tracer<'_, CS>,
  shapes: &AgentShapes,
  vertex: Vec3,
  normal: Vec3,
) -> FallOff {
  let capsule_bottom = vertex + Vec3::Z * shapes.capsule_z_offset;
  let start = capsule_bottom + Vec3::Z * shapes.capsule_half_height();
  let end = start + normal * shapes.outgoing_distance;
  match tracer.sweep(TraceType::OutgoingCapsule, shapes.capsule, start, end) {
    Some(_) => FallOff::Blocked,
    None => FallOff::Open(OutgoingSweep { end, capsule_bottom }),
  }
}

#[cfg(test)]
#[path = "falloff_test.rs"]
mod test;
