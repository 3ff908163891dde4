//! Fixture curricula and synchronous walkers
//!
//! The walkers resolve placeholders straight from the fixture, mirroring what
//! the controller does with fetches, so resolver properties can be checked
//! across lesson and unit boundaries without a runtime.

use polyglotas_common::curriculum::{Lesson, LessonId, Phrase, Unit, UnitId};
use polyglotas_common::{Activity, SubscriptionTier, TierPermissions};
use polyglotas_nav::resolver::{next_position, previous_position};
use polyglotas_nav::source::InMemoryCurriculum;
use polyglotas_nav::{NavigationTarget, Position};

pub fn unit(unit_id: UnitId, unit_order: i32) -> Unit {
    Unit {
        unit_id,
        name: format!("Unit {}", unit_id),
        description: None,
        level: Some("A1".to_string()),
        unit_order,
        progress: None,
    }
}

pub fn lesson(lesson_id: LessonId, unit_id: UnitId, lesson_order: i32) -> Lesson {
    Lesson {
        lesson_id,
        unit_id,
        name: format!("Lesson {}", lesson_id),
        lesson_order,
    }
}

pub fn phrases(count: usize) -> Vec<Phrase> {
    (0..count)
        .map(|i| Phrase {
            phrase_id: i as i64 + 1,
            text: format!("phrase {}", i),
            translation: None,
        })
        .collect()
}

/// Three units whose ids disagree with their order
///
/// - unit 10 (order 1): lesson 101 (2 phrases), lesson 102 (3 phrases)
/// - unit 5 (order 2): lesson 52 (order 1, 1 phrase), lesson 51 (order 2, 2 phrases)
/// - unit 30 (order 3): lesson 301 (2 phrases)
pub fn sample_curriculum(tier: SubscriptionTier) -> InMemoryCurriculum {
    InMemoryCurriculum::new(TierPermissions::for_tier(tier))
        .with_unit(unit(30, 3))
        .with_unit(unit(10, 1))
        .with_unit(unit(5, 2))
        .with_lesson(lesson(102, 10, 2), phrases(3))
        .with_lesson(lesson(101, 10, 1), phrases(2))
        .with_lesson(lesson(51, 5, 2), phrases(2))
        .with_lesson(lesson(52, 5, 1), phrases(1))
        .with_lesson(lesson(301, 30, 1), phrases(2))
}

fn last_index(curriculum: &InMemoryCurriculum, lesson_id: LessonId) -> usize {
    curriculum
        .phrases_of(lesson_id)
        .map(|p| p.len().saturating_sub(1))
        .unwrap_or(0)
}

/// Turn any target into a position using the fixture's data
pub fn resolve_target(curriculum: &InMemoryCurriculum, target: NavigationTarget) -> Position {
    match target {
        NavigationTarget::Resolved(position) => position,
        NavigationTarget::LastPhraseOf {
            unit_id,
            lesson_id,
            activity,
        } => Position::new(unit_id, lesson_id, activity, last_index(curriculum, lesson_id)),
        NavigationTarget::FirstLessonOf { unit_id, activity } => {
            let lesson = curriculum
                .lessons_of(unit_id)
                .and_then(|l| l.first())
                .expect("fixture units have lessons");
            Position::new(unit_id, lesson.lesson_id, activity, 0)
        }
        NavigationTarget::LastLessonOf { unit_id, activity } => {
            let lesson = curriculum
                .lessons_of(unit_id)
                .and_then(|l| l.last())
                .expect("fixture units have lessons");
            Position::new(
                unit_id,
                lesson.lesson_id,
                activity,
                last_index(curriculum, lesson.lesson_id),
            )
        }
    }
}

pub fn step_next(curriculum: &InMemoryCurriculum, position: &Position) -> Option<Position> {
    let ctx = curriculum.context_for(position)?;
    next_position(position, &ctx).map(|target| resolve_target(curriculum, target))
}

pub fn step_previous(curriculum: &InMemoryCurriculum, position: &Position) -> Option<Position> {
    let ctx = curriculum.context_for(position)?;
    previous_position(position, &ctx).map(|target| resolve_target(curriculum, target))
}

/// First phrase of the first accessible activity of the first lesson
pub fn first_position(curriculum: &InMemoryCurriculum) -> Position {
    let unit = curriculum.units().first().expect("fixture has units");
    let lesson = curriculum
        .lessons_of(unit.unit_id)
        .and_then(|l| l.first())
        .expect("fixture units have lessons");
    let activity = curriculum
        .permissions()
        .first_accessible()
        .expect("tier grants an activity");
    Position::new(unit.unit_id, lesson.lesson_id, activity, 0)
}

/// Last phrase of the last accessible activity of the last lesson
pub fn last_position(curriculum: &InMemoryCurriculum) -> Position {
    let unit = curriculum.units().last().expect("fixture has units");
    let lesson = curriculum
        .lessons_of(unit.unit_id)
        .and_then(|l| l.last())
        .expect("fixture units have lessons");
    let activity = curriculum
        .permissions()
        .last_accessible()
        .expect("tier grants an activity");
    Position::new(
        unit.unit_id,
        lesson.lesson_id,
        activity,
        last_index(curriculum, lesson.lesson_id),
    )
}

/// Every (unit, lesson, activity, phrase) for the given activities
///
/// Empty lessons contribute phrase 0 so they are still visited.
pub fn all_positions(curriculum: &InMemoryCurriculum, activities: &[Activity]) -> Vec<Position> {
    let mut positions = Vec::new();
    for unit in curriculum.units() {
        for lesson in curriculum.lessons_of(unit.unit_id).unwrap_or_default() {
            let count = curriculum
                .phrases_of(lesson.lesson_id)
                .map(|p| p.len())
                .unwrap_or(0)
                .max(1);
            for &activity in activities {
                for phrase_index in 0..count {
                    positions.push(Position::new(unit.unit_id, lesson.lesson_id, activity, phrase_index));
                }
            }
        }
    }
    positions
}
