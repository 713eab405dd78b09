use bevy::prelude::*;
use crate::farming::SoilGrid;
use crate::shared::*;
use super::{ActorController, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Pushes `hitbox` out of every obstacle it overlaps along one axis.
///
/// The side it is pushed to depends on the sign of `velocity`: moving right,
/// the hitbox's right edge is clamped to the obstacle's left edge, and so on.
/// A zero velocity resolves nothing.
pub fn resolve_axis(mut hitbox: Rect, axis: Axis, velocity: f32, obstacles: &[Rect]) -> Rect {
    for obstacle in obstacles {
        if !overlaps(&hitbox, obstacle) {
            continue;
        }
        let shift = match axis {
            Axis::Horizontal if velocity > 0.0 => Vec2::new(obstacle.min.x - hitbox.max.x, 0.0),
            Axis::Horizontal if velocity < 0.0 => Vec2::new(obstacle.max.x - hitbox.min.x, 0.0),
            Axis::Vertical if velocity > 0.0 => Vec2::new(0.0, obstacle.min.y - hitbox.max.y),
            Axis::Vertical if velocity < 0.0 => Vec2::new(0.0, obstacle.max.y - hitbox.min.y),
            _ => Vec2::ZERO,
        };
        hitbox.min += shift;
        hitbox.max += shift;
    }
    hitbox
}

impl ActorController {
    /// Moves by `direction * speed * dt`, horizontal axis first, resolving
    /// collisions after each axis.
    pub fn integrate(&mut self, dt: f32, obstacles: &[Rect]) {
        let step = self.direction * self.speed * dt;

        self.position.x += step.x;
        let hitbox = resolve_axis(self.hitbox(), Axis::Horizontal, step.x, obstacles);
        self.position.x = hitbox.center().x;

        self.position.y += step.y;
        let hitbox = resolve_axis(self.hitbox(), Axis::Vertical, step.y, obstacles);
        self.position.y = hitbox.center().y;
    }
}

/// Integrates player movement against colliders and solid plants.
pub fn move_player(
    time: Res<Time>,
    soil: Res<SoilGrid>,
    colliders: Query<&Collider>,
    mut query: Query<&mut ActorController, With<Player>>,
) {
    let Ok(mut controller) = query.get_single_mut() else {
        return;
    };
    if controller.direction == Vec2::ZERO {
        return;
    }

    let obstacles: Vec<Rect> = colliders
        .iter()
        .map(|c| c.hitbox)
        .chain(soil.solid_plant_hitboxes())
        .collect();
    controller.integrate(time.delta_secs(), &obstacles);
}
