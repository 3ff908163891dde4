//! Read-only snapshot the resolver reasons over
//!
//! Holds the ordered unit list, the lessons of the current unit, the
//! phrases of the current lesson and the learner's permissions. The data
//! layer owns these; the engine only reads copies.

use polyglotas_common::curriculum::{sort_lessons, sort_units, Lesson, LessonId, Phrase, Unit, UnitId};
use polyglotas_common::TierPermissions;

use crate::position::Position;

#[derive(Debug, Clone)]
pub struct NavigationContext {
    unit_id: UnitId,
    lesson_id: LessonId,
    units: Vec<Unit>,
    lessons: Vec<Lesson>,
    phrases: Vec<Phrase>,
    permissions: TierPermissions,
}

impl NavigationContext {
    /// Build a context for the given lesson
    ///
    /// Units and lessons are sorted by their order fields here so lookups can
    /// walk them positionally. Phrases keep their display order.
    pub fn new(
        unit_id: UnitId,
        lesson_id: LessonId,
        mut units: Vec<Unit>,
        mut lessons: Vec<Lesson>,
        phrases: Vec<Phrase>,
        permissions: TierPermissions,
    ) -> Self {
        sort_units(&mut units);
        sort_lessons(&mut lessons);
        Self {
            unit_id,
            lesson_id,
            units,
            lessons,
            phrases,
            permissions,
        }
    }

    /// True if this snapshot was taken for the position's lesson
    pub fn describes(&self, position: &Position) -> bool {
        self.unit_id == position.unit_id && self.lesson_id == position.lesson_id
    }

    pub fn unit_id(&self) -> UnitId {
        self.unit_id
    }

    pub fn lesson_id(&self) -> LessonId {
        self.lesson_id
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }

    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }

    /// Index of the last phrase, 0 for an empty lesson
    pub fn last_phrase_index(&self) -> usize {
        self.phrases.len().saturating_sub(1)
    }

    pub fn permissions(&self) -> &TierPermissions {
        &self.permissions
    }

    /// Same snapshot after a tier change
    pub fn with_permissions(&self, permissions: TierPermissions) -> Self {
        Self {
            permissions,
            ..self.clone()
        }
    }

    /// Lesson after the current one within the current unit
    pub fn next_lesson(&self) -> Option<&Lesson> {
        let idx = self.lessons.iter().position(|l| l.lesson_id == self.lesson_id)?;
        self.lessons.get(idx + 1)
    }

    /// Lesson before the current one within the current unit
    pub fn previous_lesson(&self) -> Option<&Lesson> {
        let idx = self.lessons.iter().position(|l| l.lesson_id == self.lesson_id)?;
        idx.checked_sub(1).and_then(|i| self.lessons.get(i))
    }

    pub fn next_unit(&self) -> Option<&Unit> {
        let idx = self.units.iter().position(|u| u.unit_id == self.unit_id)?;
        self.units.get(idx + 1)
    }

    pub fn previous_unit(&self) -> Option<&Unit> {
        let idx = self.units.iter().position(|u| u.unit_id == self.unit_id)?;
        idx.checked_sub(1).and_then(|i| self.units.get(i))
    }
}
