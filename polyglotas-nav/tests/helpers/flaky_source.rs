//! CurriculumSource wrapper with injected failures and gates

use async_trait::async_trait;
use polyglotas_common::curriculum::{LessonId, LessonPhrases, UnitId, UnitLessons, UnitList};
use polyglotas_common::{Error, Result, TierPermissions};
use polyglotas_nav::source::{CurriculumSource, InMemoryCurriculum};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Pauses a lesson fetch until the test releases it
#[derive(Default)]
pub struct FetchGate {
    pub started: Notify,
    pub release: Notify,
}

pub struct FlakySource {
    inner: InMemoryCurriculum,
    failing_units: HashSet<UnitId>,
    failing_lessons: HashSet<LessonId>,
    gated_unit: Option<(UnitId, Arc<FetchGate>)>,
    lesson_fetches: AtomicUsize,
    phrase_fetches: AtomicUsize,
}

impl FlakySource {
    pub fn new(inner: InMemoryCurriculum) -> Self {
        Self {
            inner,
            failing_units: HashSet::new(),
            failing_lessons: HashSet::new(),
            gated_unit: None,
            lesson_fetches: AtomicUsize::new(0),
            phrase_fetches: AtomicUsize::new(0),
        }
    }

    /// Lesson list fetches for `unit_id` fail
    pub fn fail_unit(mut self, unit_id: UnitId) -> Self {
        self.failing_units.insert(unit_id);
        self
    }

    /// Phrase list fetches for `lesson_id` fail
    pub fn fail_lesson(mut self, lesson_id: LessonId) -> Self {
        self.failing_lessons.insert(lesson_id);
        self
    }

    /// Lesson list fetches for `unit_id` wait on `gate`
    pub fn gate_unit(mut self, unit_id: UnitId, gate: Arc<FetchGate>) -> Self {
        self.gated_unit = Some((unit_id, gate));
        self
    }

    pub fn lesson_fetches(&self) -> usize {
        self.lesson_fetches.load(Ordering::SeqCst)
    }

    pub fn phrase_fetches(&self) -> usize {
        self.phrase_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CurriculumSource for FlakySource {
    async fn fetch_units(&self) -> Result<UnitList> {
        self.inner.fetch_units().await
    }

    async fn fetch_unit_lessons(&self, unit_id: UnitId) -> Result<UnitLessons> {
        self.lesson_fetches.fetch_add(1, Ordering::SeqCst);
        if let Some((gated, gate)) = &self.gated_unit {
            if *gated == unit_id {
                gate.started.notify_one();
                gate.release.notified().await;
            }
        }
        if self.failing_units.contains(&unit_id) {
            return Err(Error::Internal(format!("lesson fetch failed for unit {}", unit_id)));
        }
        self.inner.fetch_unit_lessons(unit_id).await
    }

    async fn fetch_lesson_phrases(&self, lesson_id: LessonId) -> Result<LessonPhrases> {
        self.phrase_fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing_lessons.contains(&lesson_id) {
            return Err(Error::Internal(format!("phrase fetch failed for lesson {}", lesson_id)));
        }
        self.inner.fetch_lesson_phrases(lesson_id).await
    }

    async fn fetch_permissions(&self) -> Result<TierPermissions> {
        self.inner.fetch_permissions().await
    }
}
