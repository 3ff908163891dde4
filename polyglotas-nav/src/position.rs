//! Learner position and resolver targets
//!
//! A [`Position`] is always fully resolved and safe to route to. What the
//! resolver hands back is a [`NavigationTarget`], which may still need a
//! lesson list or phrase count from the backend before it becomes one.

use polyglotas_common::curriculum::{LessonId, UnitId};
use polyglotas_common::Activity;
use serde::{Deserialize, Serialize};

/// Coordinate of the learner in the curriculum
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub unit_id: UnitId,
    pub lesson_id: LessonId,
    pub activity: Activity,
    /// Zero-based index into the lesson's phrase list
    pub phrase_index: usize,
}

impl Position {
    pub fn new(unit_id: UnitId, lesson_id: LessonId, activity: Activity, phrase_index: usize) -> Self {
        Self {
            unit_id,
            lesson_id,
            activity,
            phrase_index,
        }
    }

    /// Same lesson and activity at another phrase
    pub fn at_phrase(&self, phrase_index: usize) -> Self {
        Self {
            phrase_index,
            ..self.clone()
        }
    }

    pub fn same_lesson(&self, other: &Position) -> bool {
        self.unit_id == other.unit_id && self.lesson_id == other.lesson_id
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unit {} / lesson {} / {} #{}",
            self.unit_id, self.lesson_id, self.activity, self.phrase_index
        )
    }
}

/// Resolver output
///
/// Placeholder variants exist only between resolution and the controller's
/// follow-up fetch. They are never rendered or pushed to history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    /// Routable as-is
    Resolved(Position),

    /// Last phrase of a known lesson whose phrase list is not loaded
    LastPhraseOf {
        unit_id: UnitId,
        lesson_id: LessonId,
        activity: Activity,
    },

    /// Phrase 0 of the first lesson (by `lesson_order`) of a unit
    FirstLessonOf { unit_id: UnitId, activity: Activity },

    /// Last phrase of the last lesson (by `lesson_order`) of a unit
    LastLessonOf { unit_id: UnitId, activity: Activity },
}

impl NavigationTarget {
    pub fn unit_id(&self) -> UnitId {
        match self {
            NavigationTarget::Resolved(position) => position.unit_id,
            NavigationTarget::LastPhraseOf { unit_id, .. }
            | NavigationTarget::FirstLessonOf { unit_id, .. }
            | NavigationTarget::LastLessonOf { unit_id, .. } => *unit_id,
        }
    }

    pub fn activity(&self) -> Activity {
        match self {
            NavigationTarget::Resolved(position) => position.activity,
            NavigationTarget::LastPhraseOf { activity, .. }
            | NavigationTarget::FirstLessonOf { activity, .. }
            | NavigationTarget::LastLessonOf { activity, .. } => *activity,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, NavigationTarget::Resolved(_))
    }

    pub fn as_resolved(&self) -> Option<&Position> {
        match self {
            NavigationTarget::Resolved(position) => Some(position),
            _ => None,
        }
    }
}
