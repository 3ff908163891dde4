//! Curriculum data accessors
//!
//! The navigation engine never talks to the backend directly; everything it
//! reads comes through [`CurriculumSource`].
//!
//! - [`http::HttpCurriculumSource`]: REST backend
//! - [`memory::InMemoryCurriculum`]: a whole curriculum held in memory (offline
//!   mode, tests)

use async_trait::async_trait;
use polyglotas_common::curriculum::{LessonId, LessonPhrases, UnitId, UnitLessons, UnitList};
use polyglotas_common::{Result, TierPermissions};

pub mod http;
pub mod memory;

pub use http::HttpCurriculumSource;
pub use memory::InMemoryCurriculum;

/// Read-only access to curriculum and permissions
#[async_trait]
pub trait CurriculumSource: Send + Sync {
    /// All units with nested progress
    async fn fetch_units(&self) -> Result<UnitList>;

    /// Lessons of a unit, ordered by `lesson_order`
    async fn fetch_unit_lessons(&self, unit_id: UnitId) -> Result<UnitLessons>;

    /// Phrases of a lesson in display order
    async fn fetch_lesson_phrases(&self, lesson_id: LessonId) -> Result<LessonPhrases>;

    /// Permissions for the signed-in learner's current tier
    async fn fetch_permissions(&self) -> Result<TierPermissions>;
}
