use glam::Vec3;

/// A coordinate system used to convert from a host-facing coordinate system
/// into the generator's standard coordinate system. The standard coordinate
/// system is [`crate::coords::XYZ`].
///
/// Conversions must be pure rotations (no translation or scaling), since they
/// are also applied to directions such as edge normals.
pub trait CoordinateSystem {
  /// The host-facing coordinate type.
  type Coordinate: Clone;

  /// Converts a coordinate in this system to the standard coordinate system.
  fn to_falldown(v: &Self::Coordinate) -> Vec3;

  /// Converts a standard coordinate into this system's coordinate.
  fn from_falldown(v: &Vec3) -> Self::Coordinate;
}

/// The standard coordinate system, where X points right, Y points forward, and
/// Z points up. Heights and "up" sweeps are always along Z in this system.
pub struct XYZ;

impl CoordinateSystem for XYZ {
  type Coordinate = Vec3;

  fn to_falldown(v: &Self::Coordinate) -> Vec3 {
    *v
  }

  fn from_falldown(v: &Vec3) -> Self::Coordinate {
    *v
  }
}

/// A Y-up coordinate system, where X points right, Y points up, and Z points
/// backward (towards the viewer).
pub struct YUp;

impl CoordinateSystem for YUp {
  type Coordinate = Vec3;

  fn to_falldown(v: &Self::Coordinate) -> Vec3 {
    Vec3::new(v.x, -v.z, v.y)
  }

  fn from_falldown(v: &Vec3) -> Self::Coordinate {
    Vec3::new(v.x, v.z, -v.y)
  }
}

#[cfg(test)]
#[path = "coords_test.rs"]
mod test;
