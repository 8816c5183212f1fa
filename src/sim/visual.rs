//! Sprite selection and draw placement for the parachuter

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::ActorState;
use crate::approx_eq;

/// Which sprite the presentation layer should draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VisualState {
    #[default]
    Normal,
    ThrusterUp,
    ThrusterDown,
    ParachuteUp,
    ParachuteDown,
}

impl VisualState {
    pub const ALL: [VisualState; 5] = [
        VisualState::Normal,
        VisualState::ThrusterUp,
        VisualState::ThrusterDown,
        VisualState::ParachuteUp,
        VisualState::ParachuteDown,
    ];

    /// Sprite asset name
    pub fn as_str(&self) -> &'static str {
        match self {
            VisualState::Normal => "normal",
            VisualState::ThrusterUp => "thruster_up",
            VisualState::ThrusterDown => "thruster_down",
            VisualState::ParachuteUp => "parachute_up",
            VisualState::ParachuteDown => "parachute_down",
        }
    }

    /// "Down" sprites carry extra art above the body and are drawn raised
    pub fn is_down(&self) -> bool {
        matches!(self, VisualState::ThrusterDown | VisualState::ParachuteDown)
    }
}

/// Derive the sprite from the actor. First match wins:
/// thrusting, then parachuting while moving, then normal.
pub fn derive_visual(actor: &ActorState) -> VisualState {
    let thrusters = actor.accelerations().thrusters;
    if !approx_eq(thrusters, 0.0, actor.params.thrust_increment / 10.0) {
        return if thrusters < 0.0 {
            VisualState::ThrusterDown
        } else {
            VisualState::ThrusterUp
        };
    }

    if actor.parachute_open() && actor.velocity != 0.0 {
        return if actor.velocity < 0.0 {
            VisualState::ParachuteDown
        } else {
            VisualState::ParachuteUp
        };
    }

    VisualState::Normal
}

/// Top-left corner at which to blit `sprite_size` so it lines up with the
/// actor's hitbox (`hitbox_size` is the normal sprite's size).
pub fn draw_position(actor: &ActorState, visual: VisualState, sprite_size: Vec2, hitbox_size: Vec2) -> Vec2 {
    let hitbox_top_left = Vec2::new(
        actor.pos.x - hitbox_size.x / 2.0,
        actor.pos.y.round() - hitbox_size.y / 2.0,
    );
    let dx = (sprite_size.x - hitbox_size.x) / 2.0;
    let dy = if visual.is_down() {
        sprite_size.y - hitbox_size.y
    } else {
        0.0
    };
    hitbox_top_left - Vec2::new(dx, dy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SimSettings;

    fn actor() -> ActorState {
        ActorState::new(&SimSettings::default())
    }

    #[test]
    fn test_normal_at_rest() {
        assert_eq!(derive_visual(&actor()), VisualState::Normal);
    }

    #[test]
    fn test_thruster_states() {
        let mut a = actor();
        a.thrust(1.0);
        assert_eq!(derive_visual(&a), VisualState::ThrusterUp);
        a.thrust(-2.0);
        assert_eq!(derive_visual(&a), VisualState::ThrusterDown);
    }

    #[test]
    fn test_accumulated_float_noise_reads_as_zero_thrust() {
        let mut a = actor();
        for _ in 0..7 {
            a.thrust(1.0);
        }
        for _ in 0..7 {
            a.thrust(-1.0);
        }
        assert_eq!(derive_visual(&a), VisualState::Normal);
    }

    #[test]
    fn test_parachute_states_follow_velocity() {
        let mut a = actor();
        a.set_parachute(true);
        assert_eq!(derive_visual(&a), VisualState::Normal, "open but at rest");
        a.velocity = -20.0;
        assert_eq!(derive_visual(&a), VisualState::ParachuteDown);
        a.velocity = 3.0;
        assert_eq!(derive_visual(&a), VisualState::ParachuteUp);
    }

    #[test]
    fn test_draw_position_raises_down_sprites() {
        let a = actor();
        let hitbox = Vec2::new(40.0, 64.0);
        let normal = draw_position(&a, VisualState::Normal, hitbox, hitbox);
        assert_eq!(normal, Vec2::new(180.0, 268.0));

        let chute = Vec2::new(60.0, 100.0);
        let down = draw_position(&a, VisualState::ParachuteDown, chute, hitbox);
        assert_eq!(down, Vec2::new(170.0, 232.0));
        let up = draw_position(&a, VisualState::ParachuteUp, chute, hitbox);
        assert_eq!(up, Vec2::new(170.0, 268.0));
    }
}
