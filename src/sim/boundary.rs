//! Floor clamp and ceiling bounce

use serde::{Deserialize, Serialize};

use super::actor::ActorState;

/// What the boundary pass did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundaryEvent {
    #[default]
    None,
    /// Resting on (or clamped to) the floor
    Landed,
    /// Reflected off the ceiling
    Bounced,
}

/// Enforce the floor and ceiling on a freshly integrated actor.
///
/// The floor is checked first and the two rules never both fire.
pub fn resolve_boundaries(actor: &mut ActorState, floor_y: f32) -> BoundaryEvent {
    let half = actor.params.half_height;

    if actor.pos.y + half >= floor_y {
        if actor.velocity != 0.0 {
            log::debug!("Landed at v={:.2}", actor.velocity);
        }
        actor.pos.y = floor_y - half;
        actor.velocity = 0.0;
        actor.set_parachute(false);
        return BoundaryEvent::Landed;
    }

    let top = actor.pos.y - half;
    if top <= 0.0 && actor.velocity > 0.0 {
        // Mirror the top edge about y = 0
        actor.pos.y = -top + half;
        actor.velocity = -actor.velocity;
        log::debug!("Ceiling bounce at v={:.2}", actor.velocity);
        return BoundaryEvent::Bounced;
    }

    BoundaryEvent::None
}
