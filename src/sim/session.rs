//! Session state and menu flow
//!
//! A `Session` owns everything that used to be global: the actor, the plot,
//! the quiz and the help/quiz flags. The presentation layer holds one and
//! calls [`super::tick`] on it once per frame.

use anyhow::Result;
use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::ActorState;
use super::boundary::BoundaryEvent;
use super::quiz::{PlotColor, QuizMapping, QuizSelections, Verdict, grade, score};
use super::telemetry::{Quantity, TelemetryBuffer, TelemetryRecorder};
use super::visual::{VisualState, draw_position};
use crate::settings::SimSettings;

/// RNG state wrapper for serialization.
///
/// Each restart draws its quiz mapping from the next PCG stream, so a seed
/// reproduces a whole sequence of sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }
}

/// Where the quiz is in its flow
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuizPhase {
    /// Quiz closed, simulation may run
    #[default]
    Idle,
    /// Player is picking colors
    Guessing,
    /// Picks graded; waiting for "Again"
    Graded([Verdict; 3]),
}

/// Complete simulation session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub settings: SimSettings,
    pub rng_state: RngState,
    pub actor: ActorState,
    /// Sprite for the current frame
    pub visual: VisualState,
    /// Boundary rule that fired on the last tick
    pub last_boundary: BoundaryEvent,
    recorder: TelemetryRecorder,
    mapping: QuizMapping,
    selections: QuizSelections,
    quiz: QuizPhase,
    help_open: bool,
    /// Ticks since the last restart
    pub time_ticks: u64,
}

impl Session {
    /// Validate settings and start a fresh session
    pub fn new(settings: SimSettings, seed: u64) -> Result<Self> {
        settings.validate()?;
        let rng_state = RngState::new(seed);
        let mapping = QuizMapping::shuffled(&mut rng_state.to_rng());
        let session = Self {
            actor: ActorState::new(&settings),
            recorder: TelemetryRecorder::new(&settings)?,
            settings,
            rng_state,
            visual: VisualState::Normal,
            last_boundary: BoundaryEvent::None,
            mapping,
            selections: QuizSelections::default(),
            quiz: QuizPhase::Idle,
            help_open: false,
            time_ticks: 0,
        };
        log::info!("Session started with seed: {}", seed);
        Ok(session)
    }

    /// Reinitialize actor, plot and quiz. The quiz colors are reshuffled.
    pub fn restart(&mut self) {
        self.rng_state.stream += 1;
        self.mapping = QuizMapping::shuffled(&mut self.rng_state.to_rng());
        self.actor = ActorState::new(&self.settings);
        self.recorder.reset();
        self.visual = VisualState::Normal;
        self.last_boundary = BoundaryEvent::None;
        self.selections.clear();
        self.quiz = QuizPhase::Idle;
        self.help_open = false;
        self.time_ticks = 0;
        log::info!("Session restarted (stream {})", self.rng_state.stream);
    }

    /// Ticking is suspended while help or the quiz is up
    pub fn is_paused(&self) -> bool {
        self.help_open || self.quiz != QuizPhase::Idle
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn toggle_help(&mut self) {
        self.help_open = !self.help_open;
    }

    pub fn quiz_phase(&self) -> &QuizPhase {
        &self.quiz
    }

    /// Label for the quiz button in the current phase
    pub fn quiz_button_label(&self) -> &'static str {
        match self.quiz {
            QuizPhase::Idle => "Guess",
            QuizPhase::Guessing => "Check",
            QuizPhase::Graded(_) => "Again",
        }
    }

    /// "Guess": open the quiz. Returns false if it is already open or graded.
    pub fn open_quiz(&mut self) -> bool {
        if self.quiz != QuizPhase::Idle {
            return false;
        }
        self.help_open = false;
        self.quiz = QuizPhase::Guessing;
        true
    }

    /// Click a color choice. Ignored unless the player is guessing.
    pub fn select(&mut self, quantity: Quantity, color: PlotColor) {
        if self.quiz == QuizPhase::Guessing {
            self.selections.toggle(quantity, color);
        }
    }

    pub fn selections(&self) -> &QuizSelections {
        &self.selections
    }

    /// "Check": grade once every quantity has a pick
    pub fn submit_quiz(&mut self) -> Option<[Verdict; 3]> {
        if self.quiz != QuizPhase::Guessing {
            return None;
        }
        let verdicts = grade(&self.selections, &self.mapping)?;
        self.help_open = false;
        self.quiz = QuizPhase::Graded(verdicts);
        log::info!("Quiz graded: {}/3 correct", score(&verdicts));
        Some(verdicts)
    }

    /// "Again": start over after grading. Returns false in any other phase.
    pub fn play_again(&mut self) -> bool {
        if !matches!(self.quiz, QuizPhase::Graded(_)) {
            return false;
        }
        self.restart();
        true
    }

    /// Trace color per quantity, for drawing the plot
    pub fn quiz_colors(&self) -> &QuizMapping {
        &self.mapping
    }

    pub fn telemetry(&self) -> &TelemetryBuffer {
        self.recorder.buffer()
    }

    /// Append the current actor state to the plot
    pub(super) fn record_telemetry(&mut self) {
        self.recorder.record(&self.actor);
    }

    /// Where to draw the current sprite, given its size and the normal
    /// sprite's (hitbox) size
    pub fn draw_position(&self, sprite_size: Vec2, hitbox_size: Vec2) -> Vec2 {
        draw_position(&self.actor, self.visual, sprite_size, hitbox_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(SimSettings::default(), 12345).unwrap()
    }

    fn pick_all(session: &mut Session, color: PlotColor) {
        for q in Quantity::ALL {
            session.select(q, color);
        }
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = SimSettings {
            plot_height: 0.0,
            ..Default::default()
        };
        assert!(Session::new(settings, 1).is_err());
    }

    #[test]
    fn test_overflowing_plot_width_is_an_error_not_a_panic() {
        let settings: SimSettings = serde_json::from_str(r#"{ "plot_width": 1e300 }"#).unwrap();
        assert!(Session::new(settings, 1).is_err());
    }

    #[test]
    fn test_record_telemetry_samples_current_actor() {
        let mut s = session();
        s.actor.velocity = 50.0;
        s.record_telemetry();
        s.record_telemetry();
        assert_eq!(s.telemetry().len(), 2);
        assert_eq!(s.telemetry().latest().map(|t| t.velocity), Some(0.0));
    }

    #[test]
    fn test_quiz_flow() {
        let mut s = session();
        assert_eq!(s.quiz_button_label(), "Guess");
        assert!(!s.is_paused());

        s.toggle_help();
        assert!(s.open_quiz());
        assert!(!s.help_open(), "opening the quiz closes help");
        assert!(s.is_paused());
        assert_eq!(s.quiz_button_label(), "Check");
        assert!(!s.open_quiz());

        // Incomplete picks can't be checked
        s.select(Quantity::Displacement, PlotColor::Red);
        assert!(s.submit_quiz().is_none());
        assert_eq!(*s.quiz_phase(), QuizPhase::Guessing);

        s.select(Quantity::Velocity, PlotColor::Green);
        s.select(Quantity::Acceleration, PlotColor::Blue);
        let verdicts = s.submit_quiz().unwrap();
        assert_eq!(s.quiz_button_label(), "Again");
        assert!(s.is_paused());
        for v in verdicts {
            assert_eq!(v.correct, s.quiz_colors().color_of(v.quantity));
        }

        assert!(s.play_again());
        assert_eq!(*s.quiz_phase(), QuizPhase::Idle);
        assert_eq!(s.selections().get(Quantity::Displacement), None);
        assert!(!s.is_paused());
    }

    #[test]
    fn test_selection_ignored_outside_quiz() {
        let mut s = session();
        pick_all(&mut s, PlotColor::Red);
        assert!(!s.selections().is_complete());
        assert!(s.submit_quiz().is_none());
        assert!(!s.play_again());
    }

    #[test]
    fn test_restart_resets_actor_and_plot() {
        let mut s = session();
        s.actor.pos.y = 100.0;
        s.actor.velocity = 9.0;
        s.actor.set_parachute(true);
        s.record_telemetry();
        s.time_ticks = 40;
        s.toggle_help();

        s.restart();
        assert_eq!(s.actor.pos, s.settings.actor_start);
        assert_eq!(s.actor.velocity, 0.0);
        assert!(!s.actor.parachute_open());
        assert!(s.telemetry().is_empty());
        assert_eq!(s.time_ticks, 0);
        assert!(!s.help_open());
        assert_eq!(s.rng_state.stream, 1);
    }

    #[test]
    fn test_same_seed_same_mappings() {
        let mut a = session();
        let mut b = session();
        for _ in 0..5 {
            assert_eq!(a.quiz_colors(), b.quiz_colors());
            a.restart();
            b.restart();
        }
    }
}
