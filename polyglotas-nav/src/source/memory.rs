//! In-memory curriculum source
//!
//! Loads a nested curriculum document:
//!
//! ```json
//! {
//!   "permissions": { "tier": "starter" },
//!   "units": [
//!     { "unit_id": 1, "name": "Greetings", "unit_order": 1,
//!       "lessons": [
//!         { "lesson_id": 11, "name": "Hello", "lesson_order": 1,
//!           "phrases": [ { "phrase_id": 1, "text": "Hola" } ] }
//!       ] }
//!   ]
//! }
//! ```

use async_trait::async_trait;
use polyglotas_common::curriculum::{
    sort_lessons, sort_units, Lesson, LessonId, LessonPhrases, Phrase, Unit, UnitId, UnitLessons,
    UnitList, UnitProgress,
};
use polyglotas_common::{Error, Result, TierPermissions};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use super::CurriculumSource;
use crate::context::NavigationContext;
use crate::position::Position;

#[derive(Debug, Deserialize)]
struct CurriculumDocument {
    #[serde(default)]
    permissions: TierPermissions,
    #[serde(default)]
    units: Vec<DocumentUnit>,
}

#[derive(Debug, Deserialize)]
struct DocumentUnit {
    unit_id: UnitId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    level: Option<String>,
    unit_order: i32,
    #[serde(default)]
    progress: Option<UnitProgress>,
    #[serde(default)]
    lessons: Vec<DocumentLesson>,
}

#[derive(Debug, Deserialize)]
struct DocumentLesson {
    lesson_id: LessonId,
    #[serde(default)]
    name: String,
    lesson_order: i32,
    #[serde(default)]
    phrases: Vec<Phrase>,
}

/// Whole curriculum held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryCurriculum {
    units: Vec<Unit>,
    lessons: HashMap<UnitId, Vec<Lesson>>,
    phrases: HashMap<LessonId, Vec<Phrase>>,
    permissions: TierPermissions,
}

impl InMemoryCurriculum {
    pub fn new(permissions: TierPermissions) -> Self {
        Self {
            permissions,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let document: CurriculumDocument = serde_json::from_str(json)?;
        let mut curriculum = Self::new(document.permissions);

        for doc_unit in document.units {
            let unit_id = doc_unit.unit_id;
            curriculum = curriculum.with_unit(Unit {
                unit_id,
                name: doc_unit.name,
                description: doc_unit.description,
                level: doc_unit.level,
                unit_order: doc_unit.unit_order,
                progress: doc_unit.progress,
            });
            for doc_lesson in doc_unit.lessons {
                curriculum = curriculum.with_lesson(
                    Lesson {
                        lesson_id: doc_lesson.lesson_id,
                        unit_id,
                        name: doc_lesson.name,
                        lesson_order: doc_lesson.lesson_order,
                    },
                    doc_lesson.phrases,
                );
            }
        }

        Ok(curriculum)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.lessons.entry(unit.unit_id).or_default();
        self.units.push(unit);
        sort_units(&mut self.units);
        self
    }

    /// Add a lesson to its unit; the unit must be added separately
    pub fn with_lesson(mut self, lesson: Lesson, phrases: Vec<Phrase>) -> Self {
        self.phrases.insert(lesson.lesson_id, phrases);
        let unit_lessons = self.lessons.entry(lesson.unit_id).or_default();
        unit_lessons.push(lesson);
        sort_lessons(unit_lessons);
        self
    }

    pub fn with_permissions(mut self, permissions: TierPermissions) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn permissions(&self) -> &TierPermissions {
        &self.permissions
    }

    pub fn lessons_of(&self, unit_id: UnitId) -> Option<&[Lesson]> {
        self.lessons.get(&unit_id).map(Vec::as_slice)
    }

    pub fn phrases_of(&self, lesson_id: LessonId) -> Option<&[Phrase]> {
        self.phrases.get(&lesson_id).map(Vec::as_slice)
    }

    /// Context for a position without going through the async accessors
    pub fn context_for(&self, position: &Position) -> Option<NavigationContext> {
        Some(NavigationContext::new(
            position.unit_id,
            position.lesson_id,
            self.units.clone(),
            self.lessons_of(position.unit_id)?.to_vec(),
            self.phrases_of(position.lesson_id)?.to_vec(),
            self.permissions.clone(),
        ))
    }
}

#[async_trait]
impl CurriculumSource for InMemoryCurriculum {
    async fn fetch_units(&self) -> Result<UnitList> {
        Ok(UnitList {
            units: self.units.clone(),
        })
    }

    async fn fetch_unit_lessons(&self, unit_id: UnitId) -> Result<UnitLessons> {
        self.lessons_of(unit_id)
            .map(|lessons| UnitLessons {
                lessons: lessons.to_vec(),
            })
            .ok_or_else(|| Error::NotFound(format!("unit {}", unit_id)))
    }

    async fn fetch_lesson_phrases(&self, lesson_id: LessonId) -> Result<LessonPhrases> {
        self.phrases_of(lesson_id)
            .map(|phrases| LessonPhrases {
                phrases: phrases.to_vec(),
            })
            .ok_or_else(|| Error::NotFound(format!("lesson {}", lesson_id)))
    }

    async fn fetch_permissions(&self) -> Result<TierPermissions> {
        Ok(self.permissions.clone())
    }
}
