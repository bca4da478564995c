//! Ground detection from the player's trigger sensor.
//!
//! Enter/exit come from Rapier collision events and only maintain the set of
//! overlapped platforms. Every tick [`refresh_grounding`] re-evaluates that set
//! ("stay"), so walking from one platform onto the next keeps the slope axis
//! current and only leaving the last one drops the player into the air.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{GroundContacts, GroundSensor, StartingGravity};
use super::controller::MoverState;
use crate::visual_debug::{DebugMarkers, spawn_debug_marker};
use crate::world::Platform;

/// Closest point on a rotated box to `point`. Points inside the box are
/// returned unchanged.
pub fn closest_point_on_box(center: Vec2, angle: f32, half_extents: Vec2, point: Vec2) -> Vec2 {
  let local = Vec2::from_angle(-angle).rotate(point - center);
  let clamped = local.clamp(-half_extents, half_extents);
  center + Vec2::from_angle(angle).rotate(clamped)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundContact {
  pub grounded: bool,
  /// `None` when the contact point sits on the player's origin and no
  /// direction can be derived from it.
  pub slope_axis: Option<Vec2>,
}

/// Decides whether a platform point touching the sensor is underfoot.
///
/// The point has to lie below the sensor centre by at least a quarter of the
/// sensor height. The slope axis is the surface tangent, i.e. the contact
/// normal (player minus point) rotated a quarter turn clockwise.
pub fn evaluate_contact(player: Vec2, sensor_half_extents: Vec2, closest: Vec2) -> GroundContact {
  let grounded = closest.y <= player.y - sensor_half_extents.y / 2.0;
  if !grounded {
    return GroundContact {
      grounded,
      slope_axis: None,
    };
  }

  let normal = (player - closest).normalize_or_zero();
  let slope_axis = (normal != Vec2::ZERO).then(|| Vec2::new(normal.y, -normal.x));
  GroundContact {
    grounded,
    slope_axis,
  }
}

fn platform_closest_point(platform: &Platform, transform: &Transform, point: Vec2) -> Vec2 {
  let (angle, _, _) = transform.rotation.to_euler(EulerRot::ZYX);
  closest_point_on_box(
    transform.translation.truncate(),
    angle,
    platform.half_extents,
    point,
  )
}

/// Keeps [`GroundContacts`] in sync with sensor/platform collision events.
pub fn track_ground_contacts(
  mut collisions: MessageReader<CollisionEvent>,
  sensors: Query<&GroundSensor>,
  platforms: Query<(&Platform, &Transform)>,
  mut players: Query<(&Transform, &mut GroundContacts)>,
  markers: Option<Res<DebugMarkers>>,
  mut commands: Commands,
) {
  for event in collisions.read() {
    let (a, b, started) = match event {
      CollisionEvent::Started(a, b, _) => (*a, *b, true),
      CollisionEvent::Stopped(a, b, _) => (*a, *b, false),
    };

    let (sensor, platform_entity) = if let Ok(sensor) = sensors.get(a) {
      (sensor, b)
    } else if let Ok(sensor) = sensors.get(b) {
      (sensor, a)
    } else {
      continue;
    };

    let Ok((player_transform, mut contacts)) = players.get_mut(sensor.owner) else {
      continue;
    };

    if !started {
      // The platform may already be gone, so no tag check here
      contacts.remove(platform_entity);
      trace!("Sensor left {:?}", platform_entity);
      continue;
    }

    let Ok((platform, platform_transform)) = platforms.get(platform_entity) else {
      continue;
    };
    contacts.insert(platform_entity);
    trace!("Sensor entered {:?}", platform_entity);

    if let Some(markers) = markers.as_deref().filter(|m| m.enabled) {
      let player_pos = player_transform.translation.truncate();
      let closest = platform_closest_point(platform, platform_transform, player_pos);
      let contact = evaluate_contact(player_pos, contacts.sensor_half_extents, closest);
      spawn_debug_marker(&mut commands, markers, closest, contact.grounded);
    }
  }
}

/// Re-evaluates every overlapped platform and applies the grounding rules:
/// grounded bodies have zero gravity and a fresh slope axis, everything else
/// falls with its starting gravity.
pub fn refresh_grounding(
  mut players: Query<(
    &Transform,
    &GroundContacts,
    &mut MoverState,
    &Velocity,
    &mut GravityScale,
    &StartingGravity,
  )>,
  platforms: Query<(&Platform, &Transform)>,
) {
  for (transform, contacts, mut mover, velocity, mut gravity, starting) in &mut players {
    let player_pos = transform.translation.truncate();

    // A rising body only stays grounded, it can't land
    let can_land = mover.grounded || velocity.linvel.y <= 0.0;

    let mut best: Option<(f32, GroundContact)> = None;
    if can_land {
      for &entity in &contacts.platforms {
        let Ok((platform, platform_transform)) = platforms.get(entity) else {
          continue;
        };
        let closest = platform_closest_point(platform, platform_transform, player_pos);
        let contact = evaluate_contact(player_pos, contacts.sensor_half_extents, closest);
        if !contact.grounded {
          continue;
        }
        let distance = player_pos.distance_squared(closest);
        if best.is_none_or(|(d, _)| distance < d) {
          best = Some((distance, contact));
        }
      }
    }

    match best {
      Some((_, contact)) => {
        let slope_axis = contact.slope_axis.unwrap_or_else(|| {
          warn!("Degenerate ground contact, keeping previous slope axis");
          mover.slope_axis
        });
        mover.land(slope_axis);
        if gravity.0 != 0.0 {
          gravity.0 = 0.0;
        }
      }
      None => {
        mover.leave_ground();
        if gravity.0 != starting.0 {
          gravity.0 = starting.0;
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use std::f32::consts::FRAC_PI_6;

  use super::*;

  #[test]
  fn closest_point_on_flat_box() {
    let p = closest_point_on_box(Vec2::ZERO, 0.0, Vec2::new(50.0, 10.0), Vec2::new(20.0, 40.0));
    assert!((p - Vec2::new(20.0, 10.0)).length() < 1e-4);

    let corner =
      closest_point_on_box(Vec2::ZERO, 0.0, Vec2::new(50.0, 10.0), Vec2::new(80.0, 40.0));
    assert!((corner - Vec2::new(50.0, 10.0)).length() < 1e-4);
  }

  #[test]
  fn closest_point_inside_is_unchanged() {
    let p = closest_point_on_box(Vec2::ZERO, 0.3, Vec2::splat(10.0), Vec2::new(1.0, 2.0));
    assert!((p - Vec2::new(1.0, 2.0)).length() < 1e-4);
  }

  #[test]
  fn flat_ground_gives_horizontal_slope() {
    let contact = evaluate_contact(
      Vec2::new(0.0, 30.0),
      Vec2::new(11.0, 24.0),
      Vec2::new(0.0, 10.0),
    );
    assert!(contact.grounded);
    let axis = contact.slope_axis.unwrap();
    assert!((axis - Vec2::X).length() < 1e-5);
  }

  #[test]
  fn ramp_slope_axis_follows_incline() {
    // 30 degree ramp rising to the right, player standing above its middle
    let half = Vec2::new(120.0, 10.0);
    let normal = Vec2::from_angle(FRAC_PI_6).rotate(Vec2::Y);
    let player = normal * (half.y + 22.0);
    let closest = closest_point_on_box(Vec2::ZERO, FRAC_PI_6, half, player);

    let contact = evaluate_contact(player, Vec2::new(11.0, 24.0), closest);
    assert!(contact.grounded);
    let axis = contact.slope_axis.unwrap();
    let expected = Vec2::from_angle(FRAC_PI_6);
    assert!((axis - expected).length() < 1e-4, "axis {:?}", axis);
  }

  #[test]
  fn side_contact_is_not_ground() {
    let contact = evaluate_contact(
      Vec2::new(0.0, 0.0),
      Vec2::new(11.0, 24.0),
      Vec2::new(11.0, 0.0),
    );
    assert!(!contact.grounded);
    assert_eq!(contact.slope_axis, None);
  }

  #[test]
  fn contact_on_origin_has_no_slope() {
    let contact = evaluate_contact(Vec2::ZERO, Vec2::ZERO, Vec2::ZERO);
    assert!(contact.grounded);
    assert_eq!(contact.slope_axis, None);
  }
}
