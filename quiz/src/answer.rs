//! Checking a learner's picks against a quiz item.

use serde::{Deserialize, Serialize};

use pinyinlab_core::{Final, Initial, Medial};

use crate::converter::PinyinConverter;
use crate::generator::{QuizGenerator, QuizItem};

/// What the learner selected on the three picker panels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Picks {
    pub initial: Option<Initial>,
    pub medial: Option<Medial>,
    #[serde(rename = "final")]
    pub final_: Option<Final>,
}

impl Picks {
    pub fn new(initial: Option<Initial>, medial: Option<Medial>, final_: Final) -> Self {
        Self {
            initial,
            medial,
            final_: Some(final_),
        }
    }
}

/// Per-slot outcome, so the UI can highlight the wrong panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerCheck {
    pub initial: bool,
    pub medial: bool,
    #[serde(rename = "final")]
    pub final_: bool,
}

impl AnswerCheck {
    pub fn is_correct(&self) -> bool {
        self.initial && self.medial && self.final_
    }
}

/// Compare picks with the item's answer, accepting u for ü after j, q, x, y.
pub fn check_answer(item: &QuizItem, picks: &Picks) -> AnswerCheck {
    check_answer_with(item, picks, true)
}

pub fn check_answer_with(item: &QuizItem, picks: &Picks, accept_u_for_umlaut: bool) -> AnswerCheck {
    let initial = picks.initial == item.initial;
    // Only meaningful when the learner also got the initial.
    let dotless = accept_u_for_umlaut && initial && item.initial.is_some_and(Initial::simplifies_umlaut);

    let medial = picks.medial == item.medial
        || (dotless && picks.medial == Some(Medial::U) && item.medial == Some(Medial::Yu));

    let final_ = picks.final_ == Some(item.final_)
        || (dotless && picks.final_.is_some_and(|f| dotted(f) == Some(item.final_)));

    AnswerCheck {
        initial,
        medial,
        final_,
    }
}

impl<C: PinyinConverter> QuizGenerator<C> {
    /// `check_answer_with` under this generator's configuration.
    pub fn check(&self, item: &QuizItem, picks: &Picks) -> AnswerCheck {
        check_answer_with(item, picks, self.config().accept_u_for_umlaut)
    }
}

/// The ü final a dotless pick stands for.
fn dotted(picked: Final) -> Option<Final> {
    match picked {
        Final::U => Some(Final::V),
        Final::Un => Some(Final::Vn),
        _ => None,
    }
}
