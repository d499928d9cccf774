use glam::{Vec2, Vec3, Vec3Swizzles};

/// A bounding box.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum BoundingBox {
  /// The bounding box has no points in it.
  Empty,
  /// The bounding box has some points in it.
  Box {
    /// The minimum bounds of the bounding box.
    min: Vec3,
    /// The maximum bounds of the bounding box. Must be component-wise greater
    /// than or equal to `min`.
    max: Vec3,
  },
}

impl BoundingBox {
  /// Creates a box already with some data in it. `min` and `max` must already
  /// be valid - this is unchecked.
  pub fn new_box(min: Vec3, max: Vec3) -> Self {
    Self::Box { min, max }
  }

  /// Returns whether the box is empty or not.
  pub fn is_empty(&self) -> bool {
    matches!(self, Self::Empty)
  }

  /// Returns the bounds of the box, or [`None`] if it is empty.
  pub fn as_box(&self) -> Option<(Vec3, Vec3)> {
    match self {
      Self::Empty => None,
      &Self::Box { min, max } => Some((min, max)),
    }
  }

  /// Computes the size of the bounding box. Returns 0 if the bounds are empty.
  pub fn size(&self) -> Vec3 {
    match self {
      Self::Empty => Vec3::ZERO,
      &Self::Box { min, max } => max - min,
    }
  }

  /// Determines if the bounding box is valid (min <= max).
  pub fn is_valid(&self) -> bool {
    let size = self.size();
    size.x >= 0.0 && size.y >= 0.0 && size.z >= 0.0
  }

  /// Expands the bounding box to contain `point`. If the box was empty, it will
  /// now hold only the `point`.
  pub fn expand_to_point(&self, point: Vec3) -> Self {
    match self {
      Self::Empty => Self::Box { min: point, max: point },
      &Self::Box { min, max } => {
        Self::Box { min: min.min(point), max: max.max(point) }
      }
    }
  }

  /// Expands the bounding box by `size` in each direction. An empty bounding
  /// box will still be empty after this.
  pub fn expand_by_size(&self, size: Vec3) -> BoundingBox {
    let expanded_box = match self {
      BoundingBox::Empty => BoundingBox::Empty,
      &BoundingBox::Box { min, max } => {
        BoundingBox::Box { min: min - size, max: max + size }
      }
    };

    if !expanded_box.is_valid() {
      return BoundingBox::Empty;
    }

    expanded_box
  }

  /// Determines if `point` is in `self`.
  pub fn contains_point(&self, point: Vec3) -> bool {
    match self {
      Self::Empty => false,
      Self::Box { min, max } => {
        min.x <= point.x
          && point.x <= max.x
          && min.y <= point.y
          && point.y <= max.y
          && min.z <= point.z
          && point.z <= max.z
      }
    }
  }

  /// Finds the first "time" (in [0, 1]) along the segment from `start` to `end`
  /// that is inside `self`. Returns [`None`] if the segment never enters the
  /// box. A segment starting inside the box returns 0.
  pub fn segment_entry(&self, start: Vec3, end: Vec3) -> Option<f32> {
    let (min, max) = self.as_box()?;
    let delta = end - start;

    let mut t_min: f32 = 0.0;
    let mut t_max: f32 = 1.0;
    for axis in 0..3 {
      if delta[axis] == 0.0 {
        if start[axis] < min[axis] || start[axis] > max[axis] {
          return None;
        }
        continue;
      }

      let t0 = (min[axis] - start[axis]) / delta[axis];
      let t1 = (max[axis] - start[axis]) / delta[axis];
      t_min = t_min.max(t0.min(t1));
      t_max = t_max.min(t0.max(t1));
      if t_min > t_max {
        return None;
      }
    }
    Some(t_min)
  }
}

/// Projects `v` onto the horizontal plane and normalizes it. Returns zero if
/// the horizontal part of `v` is (nearly) zero.
pub fn safe_normal_xy(v: Vec3) -> Vec3 {
  v.xy().normalize_or_zero().extend(0.0)
}

/// The horizontal distance between `a` and `b`.
pub fn distance_xy(a: Vec3, b: Vec3) -> f32 {
  a.xy().distance(b.xy())
}

/// The squared horizontal distance between `a` and `b`.
pub fn distance_squared_xy(a: Vec3, b: Vec3) -> f32 {
  a.xy().distance_squared(b.xy())
}

/// Rotates `v` counter-clockwise around the Z axis by `angle` radians.
pub fn rotate_about_z(v: Vec3, angle: f32) -> Vec3 {
  Vec2::from_angle(angle).rotate(v.xy()).extend(v.z)
}

#[cfg(test)]
#[path = "util_test.rs"]
mod test;
