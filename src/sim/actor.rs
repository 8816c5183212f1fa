//! The parachuter: vertical kinematics and control inputs
//!
//! Coordinates follow the display: `y` grows downward, while velocity and
//! accelerations are positive upward. Integration therefore subtracts.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::SimSettings;

/// Named acceleration contributors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Accelerations {
    pub weight: f32,
    pub thrusters: f32,
    pub drag: f32,
}

impl Accelerations {
    /// Sum of all contributors
    #[inline]
    pub fn net(&self) -> f32 {
        self.weight + self.thrusters + self.drag
    }
}

/// Physical constants the actor integrates with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActorParams {
    pub damping: f32,
    pub thrust_increment: f32,
    pub half_height: f32,
}

impl ActorParams {
    pub fn from_settings(settings: &SimSettings) -> Self {
        Self {
            damping: settings.damping,
            thrust_increment: settings.thrust_increment,
            half_height: settings.actor_half_height,
        }
    }
}

/// Kinematic state of the parachuter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorState {
    /// Hitbox center, display coordinates
    pub pos: Vec2,
    /// Vertical velocity (positive = up)
    pub velocity: f32,
    accelerations: Accelerations,
    parachute_open: bool,
    /// Parachute control was held last tick (toggle fires on the rising edge)
    parachute_latch: bool,
    pub params: ActorParams,
}

impl ActorState {
    /// Fresh actor at rest at the configured start position
    pub fn new(settings: &SimSettings) -> Self {
        Self {
            pos: settings.actor_start,
            velocity: 0.0,
            accelerations: Accelerations {
                weight: settings.gravity,
                thrusters: 0.0,
                drag: 0.0,
            },
            parachute_open: false,
            parachute_latch: false,
            params: ActorParams::from_settings(settings),
        }
    }

    #[inline]
    pub fn accelerations(&self) -> Accelerations {
        self.accelerations
    }

    #[inline]
    pub fn parachute_open(&self) -> bool {
        self.parachute_open
    }

    /// Vertical hitbox center (display y)
    #[inline]
    pub fn y(&self) -> f32 {
        self.pos.y
    }

    /// Open or close the parachute.
    ///
    /// Opening zeroes thrust; closing zeroes drag. This is the only way the
    /// flag changes, so at most one of thrusters/drag is ever non-zero.
    pub fn set_parachute(&mut self, open: bool) {
        if open {
            self.accelerations.thrusters = 0.0;
        } else {
            self.accelerations.drag = 0.0;
        }
        if open != self.parachute_open {
            log::debug!("Parachute {}", if open { "opened" } else { "closed" });
        }
        self.parachute_open = open;
    }

    /// Adjust the thrust accumulator by `steps` increments.
    /// Any thrust closes the parachute first.
    pub fn thrust(&mut self, steps: f32) {
        self.set_parachute(false);
        self.accelerations.thrusters += steps * self.params.thrust_increment;
    }

    /// Feed one tick of held controls.
    ///
    /// A held parachute control masks the thrust controls for that tick and
    /// only toggles on the tick it was first pressed. Up wins over down.
    pub fn apply_controls(&mut self, thrust_up: bool, thrust_down: bool, parachute: bool) {
        if parachute {
            if !self.parachute_latch {
                self.set_parachute(!self.parachute_open);
            }
            self.parachute_latch = true;
            return;
        }

        self.parachute_latch = false;
        if thrust_up {
            self.thrust(1.0);
        } else if thrust_down {
            self.thrust(-1.0);
        }
    }

    /// Advance velocity and position by one fixed step.
    ///
    /// Drag is recomputed from the pre-step velocity while the parachute is
    /// open.
    pub fn integrate(&mut self, dt: f32) {
        if self.parachute_open {
            self.accelerations.drag = -self.params.damping * self.velocity;
        }
        self.velocity += self.accelerations.net() * dt;
        self.pos.y -= self.velocity * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn actor_at(y: f32, velocity: f32) -> ActorState {
        let mut actor = ActorState::new(&SimSettings::default());
        actor.pos.y = y;
        actor.velocity = velocity;
        actor
    }

    #[test]
    fn test_free_fall_accelerates_downward() {
        let mut actor = actor_at(300.0, 0.0);
        let mut last_v = actor.velocity;
        let mut last_y = actor.y();
        for _ in 0..5 {
            actor.integrate(0.2);
            assert!(actor.velocity < last_v);
            assert!(actor.y() > last_y, "falling means display y grows");
            last_v = actor.velocity;
            last_y = actor.y();
        }
        assert!((actor.velocity - -1.0).abs() < 1e-5);
    }

    #[test]
    fn test_parachute_drag_opposes_fall() {
        let mut actor = actor_at(300.0, -20.0);
        actor.set_parachute(true);
        actor.integrate(0.2);
        let drag = actor.accelerations().drag;
        assert!((drag - 2.0).abs() < 1e-6, "drag = -B * v = {drag}");
        // -20 + (-1 + 2) * 0.2
        assert!((actor.velocity - -19.8).abs() < 1e-5);
    }

    #[test]
    fn test_opening_parachute_zeroes_thrust() {
        let mut actor = actor_at(300.0, 0.0);
        actor.thrust(3.0);
        assert!(actor.accelerations().thrusters > 0.0);
        actor.set_parachute(true);
        assert_eq!(actor.accelerations().thrusters, 0.0);
    }

    #[test]
    fn test_thrust_closes_parachute_and_zeroes_drag() {
        let mut actor = actor_at(300.0, -10.0);
        actor.set_parachute(true);
        actor.integrate(0.2);
        assert!(actor.accelerations().drag != 0.0);
        actor.thrust(1.0);
        assert!(!actor.parachute_open());
        assert_eq!(actor.accelerations().drag, 0.0);
        assert!((actor.accelerations().thrusters - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_parachute_toggles_on_rising_edge_only() {
        let mut actor = actor_at(300.0, 0.0);
        actor.apply_controls(false, false, true);
        assert!(actor.parachute_open());
        // Held: no repeat toggle
        for _ in 0..10 {
            actor.apply_controls(false, false, true);
        }
        assert!(actor.parachute_open());
        // Release then press again
        actor.apply_controls(false, false, false);
        actor.apply_controls(false, false, true);
        assert!(!actor.parachute_open());
    }

    #[test]
    fn test_parachute_control_masks_thrust() {
        let mut actor = actor_at(300.0, 0.0);
        actor.apply_controls(true, false, true);
        assert_eq!(actor.accelerations().thrusters, 0.0);
        assert!(actor.parachute_open());
    }

    #[test]
    fn test_up_wins_when_both_thrusts_held() {
        let mut actor = actor_at(300.0, 0.0);
        actor.apply_controls(true, true, false);
        assert!((actor.accelerations().thrusters - 0.1).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_thrust_and_drag_exclusive(
            controls in proptest::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 1..200),
            v0 in -40.0f32..40.0,
        ) {
            let mut actor = actor_at(300.0, v0);
            for (up, down, chute) in controls {
                actor.apply_controls(up, down, chute);
                actor.integrate(0.2);
                let acc = actor.accelerations();
                prop_assert!(acc.thrusters == 0.0 || acc.drag == 0.0,
                    "thrusters={} drag={}", acc.thrusters, acc.drag);
                if actor.parachute_open() {
                    prop_assert_eq!(acc.thrusters, 0.0);
                } else {
                    prop_assert_eq!(acc.drag, 0.0);
                }
            }
        }
    }
}
