//! Curriculum records
//!
//! Units contain lessons, lessons contain phrases. Each level carries an
//! explicit order (`unit_order`, `lesson_order`, array position for phrases);
//! ids say nothing about order.

use serde::{Deserialize, Serialize};

pub type UnitId = i64;
pub type LessonId = i64;
pub type PhraseId = i64;

/// Learner progress nested in each unit row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitProgress {
    #[serde(default)]
    pub completed_lessons: u32,
    #[serde(default)]
    pub total_lessons: u32,
}

/// Top-level curriculum grouping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub unit_id: UnitId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// CEFR-style level tag (A1, B2, ...)
    #[serde(default)]
    pub level: Option<String>,
    pub unit_order: i32,
    #[serde(default)]
    pub progress: Option<UnitProgress>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub lesson_id: LessonId,
    pub unit_id: UnitId,
    #[serde(default)]
    pub name: String,
    pub lesson_order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phrase {
    pub phrase_id: PhraseId,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub translation: Option<String>,
}

/// Response envelope for the units accessor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitList {
    #[serde(default)]
    pub units: Vec<Unit>,
}

/// Response envelope for `fetchUnitLessons`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitLessons {
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

/// Response envelope for `fetchLessonPhrases`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LessonPhrases {
    #[serde(default)]
    pub phrases: Vec<Phrase>,
}

/// Sort units by `unit_order` (stable)
pub fn sort_units(units: &mut [Unit]) {
    units.sort_by_key(|u| u.unit_order);
}

/// Sort lessons by `lesson_order` (stable)
pub fn sort_lessons(lessons: &mut [Lesson]) {
    lessons.sort_by_key(|l| l.lesson_order);
}

/// Lesson with the lowest `lesson_order`, regardless of input order
pub fn first_lesson(lessons: &[Lesson]) -> Option<&Lesson> {
    lessons.iter().min_by_key(|l| l.lesson_order)
}

/// Lesson with the highest `lesson_order`, regardless of input order
///
/// Ties resolve to the later entry, matching a stable sort followed by `last()`.
pub fn last_lesson(lessons: &[Lesson]) -> Option<&Lesson> {
    lessons.iter().max_by_key(|l| l.lesson_order)
}
