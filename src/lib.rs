//! Parachuter - a falling-body kinematics toy
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, boundaries, telemetry, quiz)
//! - `settings`: Tunable constants, loadable from JSON
//!
//! Rendering, input polling and window management belong to the
//! presentation layer that drives [`sim::tick`].

pub mod settings;
pub mod sim;

pub use settings::SimSettings;
pub use sim::{Session, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Window size in pixels
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Presentation frame rate (one tick per frame)
    pub const FRAME_RATE: u32 = 60;
    /// Fixed simulation timestep (simulation units, not seconds)
    pub const SIM_DT: f32 = 0.2;

    /// Weight acceleration (negative = down)
    pub const GRAVITY: f32 = -1.0;
    /// Parachute damping constant: drag = -DAMPING * velocity
    pub const DAMPING: f32 = 0.1;
    /// Thrust change per tick while a thrust control is held
    pub const THRUST_INCREMENT: f32 = 0.1;
    /// Half the parachuter hitbox height
    pub const ACTOR_HALF_HEIGHT: f32 = 32.0;

    /// Natural velocity range mapped onto the plot
    pub const VELOCITY_RANGE: (f32, f32) = (-50.0, 50.0);
    /// Natural acceleration range mapped onto the plot
    pub const ACCELERATION_RANGE: (f32, f32) = (-5.0, 5.0);
}

/// Relative float comparison with an absolute floor, used by tests and the
/// visual state thresholds.
#[inline]
pub fn approx_eq(a: f32, b: f32, abs_tol: f32) -> bool {
    (a - b).abs() <= abs_tol.max(f32::EPSILON * a.abs().max(b.abs()))
}
