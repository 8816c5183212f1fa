//! Fixed timestep simulation tick
//!
//! One tick: controls, integrate, boundaries, sprite, telemetry.

use super::boundary::resolve_boundaries;
use super::session::Session;
use super::visual::derive_visual;

/// Held controls for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Thruster up (up arrow)
    pub thrust_up: bool,
    /// Thruster down (down arrow)
    pub thrust_down: bool,
    /// Parachute toggle (space bar)
    pub parachute: bool,
}

/// Advance the session by one fixed timestep.
///
/// Returns false without touching any state while the session is paused.
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) -> bool {
    if session.is_paused() {
        return false;
    }

    session.time_ticks += 1;

    let actor = &mut session.actor;
    actor.apply_controls(input.thrust_up, input.thrust_down, input.parachute);
    actor.integrate(dt);
    session.last_boundary = resolve_boundaries(actor, session.settings.screen_height);
    session.visual = derive_visual(&session.actor);

    session.record_telemetry();
    true
}
