//! "Which curve is which?" quiz
//!
//! Each session assigns the three plot colors to the three quantities at
//! random. The player picks a color per quantity and the picks are graded
//! against that assignment.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::telemetry::Quantity;

/// Plot trace colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlotColor {
    Red,
    Green,
    Blue,
}

impl PlotColor {
    /// Order of the choice buttons
    pub const ALL: [PlotColor; 3] = [PlotColor::Red, PlotColor::Green, PlotColor::Blue];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlotColor::Red => "Red",
            PlotColor::Green => "Green",
            PlotColor::Blue => "Blue",
        }
    }

    pub fn rgb(&self) -> [u8; 3] {
        match self {
            PlotColor::Red => [255, 0, 0],
            PlotColor::Green => [0, 255, 0],
            PlotColor::Blue => [0, 0, 255],
        }
    }
}

/// Bijection from quantity to plot color, fixed for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizMapping {
    /// Indexed by `Quantity::index`
    colors: [PlotColor; 3],
}

impl QuizMapping {
    /// Explicit mapping. Returns `None` unless every color is used once.
    pub fn new(displacement: PlotColor, velocity: PlotColor, acceleration: PlotColor) -> Option<Self> {
        let colors = [displacement, velocity, acceleration];
        let distinct = PlotColor::ALL.iter().all(|c| colors.contains(c));
        distinct.then_some(Self { colors })
    }

    /// Random assignment
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut colors = PlotColor::ALL;
        colors.shuffle(rng);
        Self { colors }
    }

    #[inline]
    pub fn color_of(&self, quantity: Quantity) -> PlotColor {
        self.colors[quantity.index()]
    }
}

/// The player's current picks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSelections {
    picks: [Option<PlotColor>; 3],
}

impl QuizSelections {
    /// Click a color button: selects it, or deselects it if already selected
    pub fn toggle(&mut self, quantity: Quantity, color: PlotColor) {
        let slot = &mut self.picks[quantity.index()];
        *slot = if *slot == Some(color) { None } else { Some(color) };
    }

    pub fn get(&self, quantity: Quantity) -> Option<PlotColor> {
        self.picks[quantity.index()]
    }

    pub fn is_complete(&self) -> bool {
        self.picks.iter().all(Option::is_some)
    }

    pub fn clear(&mut self) {
        self.picks = [None; 3];
    }
}

/// How a choice button should be shown after grading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChoiceMark {
    Correct,
    Wrong,
    Unmarked,
}

/// Grading result for one quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub quantity: Quantity,
    pub correct: PlotColor,
    pub chosen: PlotColor,
}

impl Verdict {
    pub fn is_correct(&self) -> bool {
        self.chosen == self.correct
    }

    /// The true color is always marked correct; a differing pick is wrong
    pub fn mark(&self, color: PlotColor) -> ChoiceMark {
        if color == self.correct {
            ChoiceMark::Correct
        } else if color == self.chosen {
            ChoiceMark::Wrong
        } else {
            ChoiceMark::Unmarked
        }
    }
}

/// Grade every quantity. `None` while any quantity is still unpicked.
pub fn grade(selections: &QuizSelections, mapping: &QuizMapping) -> Option<[Verdict; 3]> {
    if !selections.is_complete() {
        return None;
    }
    let verdict = |quantity: Quantity| -> Option<Verdict> {
        Some(Verdict {
            quantity,
            correct: mapping.color_of(quantity),
            chosen: selections.get(quantity)?,
        })
    };
    Some([
        verdict(Quantity::Displacement)?,
        verdict(Quantity::Velocity)?,
        verdict(Quantity::Acceleration)?,
    ])
}

/// Number of correct picks
pub fn score(verdicts: &[Verdict]) -> usize {
    verdicts.iter().filter(|v| v.is_correct()).count()
}
