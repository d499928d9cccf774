use glam::Vec3;
use googletest::{expect_that, matchers::*};

use crate::{
  coords::{XYZ, YUp},
  util::BoundingBox,
};

use super::FalldownLinks;

#[test]
fn links_are_relative_and_one_way() {
  let mut links = FalldownLinks::<XYZ>::new();
  links.push(
    Vec3::new(10.0, 20.0, 30.0),
    Vec3::new(11.0, 22.0, 33.0),
    Vec3::new(15.0, 20.0, -70.0),
  );

  assert_eq!(links.len(), 1);
  let link = links.iter().next().unwrap();
  assert_eq!(link.start, Vec3::new(1.0, 2.0, 3.0));
  assert_eq!(link.end, Vec3::new(5.0, 0.0, -100.0));
  assert!(!link.bidirectional);
  assert_eq!(link.max_fall_down_length, 0.0);
}

#[test]
fn links_convert_to_host_coordinates() {
  let mut links = FalldownLinks::<YUp>::new();
  links.push(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, -6.0));

  let link = links.iter().next().unwrap();
  assert_eq!(link.start, Vec3::new(1.0, 3.0, -2.0));
  assert_eq!(link.end, Vec3::new(4.0, -6.0, -5.0));
  assert_eq!(
    links.navigation_bounds(),
    BoundingBox::new_box(Vec3::new(1.0, 2.0, -6.0), Vec3::new(4.0, 5.0, 3.0))
  );
}

#[googletest::test]
fn empty_links_are_irrelevant() {
  let links = FalldownLinks::<XYZ>::new();
  expect_that!(links.is_empty(), eq(true));
  expect_that!(links.is_navigation_relevant(), eq(false));
  expect_that!(links.navigation_bounds().is_empty(), eq(true));
}

#[test]
fn bounds_cover_all_endpoints() {
  let mut links = FalldownLinks::<XYZ>::new();
  links.push(Vec3::ZERO, Vec3::new(0.0, 0.0, 0.0), Vec3::new(5.0, 1.0, -10.0));
  links.push(Vec3::ZERO, Vec3::new(-3.0, 4.0, 2.0), Vec3::new(1.0, 8.0, -1.0));

  assert!(links.is_navigation_relevant());
  assert_eq!(
    links.navigation_bounds(),
    BoundingBox::new_box(Vec3::new(-3.0, 0.0, -10.0), Vec3::new(5.0, 8.0, 2.0))
  );
}

#[googletest::test]
fn finds_link_by_end_point() {
  let mut links = FalldownLinks::<XYZ>::new();
  links.push(Vec3::ZERO, Vec3::ZERO, Vec3::new(5.0, 1.0, -10.0));
  links.push(Vec3::ZERO, Vec3::X, Vec3::new(7.0, 1.0, -10.0));

  let found = links
    .find_link_ending_at(&Vec3::new(7.0, 1.0, -8.5), /* z_tolerance= */ 2.0)
    .map(|link| link.start);
  expect_that!(found, some(eq(Vec3::X)));

  // Height is too different.
  expect_that!(
    links
      .find_link_ending_at(&Vec3::new(7.0, 1.0, -7.0), 2.0)
      .map(|link| link.start),
    none()
  );
  // Horizontal position must match exactly.
  expect_that!(
    links
      .find_link_ending_at(&Vec3::new(7.1, 1.0, -10.0), 2.0)
      .map(|link| link.start),
    none()
  );
}
