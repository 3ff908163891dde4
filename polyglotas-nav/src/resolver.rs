//! Pure next/previous resolution
//!
//! Given a [`Position`] and the [`NavigationContext`] describing its lesson,
//! compute where Next or Previous leads. No I/O: when the answer depends on
//! data the context does not hold (another unit's lessons, another lesson's
//! phrase count) a placeholder [`NavigationTarget`] is returned for the
//! controller to resolve.
//!
//! Forward order: next phrase, then next accessible activity in the same
//! lesson, then the next lesson of the unit, then the next unit. Backward is
//! the mirror image, landing on the last phrase of whatever it steps into.
//!
//! Permissions are read from the context on every call. If the current
//! activity is no longer unlocked, the phrase step is skipped and resolution
//! moves straight to the nearest unlocked activity, lesson or unit.
//!
//! A context that does not describe the position counts as not ready and
//! yields `None` in both directions.

use tracing::debug;

use crate::context::NavigationContext;
use crate::position::{NavigationTarget, Position};

/// Where Next leads from `position`, or `None` at the end of the curriculum
pub fn next_position(position: &Position, ctx: &NavigationContext) -> Option<NavigationTarget> {
    if !ctx.describes(position) {
        return None;
    }
    let permissions = ctx.permissions();
    // Phrase steps only move within an unlocked activity
    let in_accessible = permissions.allows(position.activity);

    if in_accessible && position.phrase_index + 1 < ctx.phrase_count() {
        return Some(NavigationTarget::Resolved(
            position.at_phrase(position.phrase_index + 1),
        ));
    }

    if let Some(activity) = permissions.next_accessible_after(position.activity) {
        return Some(NavigationTarget::Resolved(Position::new(
            position.unit_id,
            position.lesson_id,
            activity,
            0,
        )));
    }

    // Entering a new lesson starts at the first activity the tier unlocks
    let first = permissions.first_accessible()?;

    if let Some(lesson) = ctx.next_lesson() {
        debug!(
            "Next crosses into lesson {} of unit {}",
            lesson.lesson_id, position.unit_id
        );
        return Some(NavigationTarget::Resolved(Position::new(
            position.unit_id,
            lesson.lesson_id,
            first,
            0,
        )));
    }

    if let Some(unit) = ctx.next_unit() {
        debug!("Next crosses into unit {}", unit.unit_id);
        return Some(NavigationTarget::FirstLessonOf {
            unit_id: unit.unit_id,
            activity: first,
        });
    }

    None
}

/// Where Previous leads from `position`, or `None` at the very start
pub fn previous_position(position: &Position, ctx: &NavigationContext) -> Option<NavigationTarget> {
    if !ctx.describes(position) {
        return None;
    }
    let permissions = ctx.permissions();
    let in_accessible = permissions.allows(position.activity);

    if in_accessible && position.phrase_index > 0 {
        return Some(NavigationTarget::Resolved(
            position.at_phrase(position.phrase_index - 1),
        ));
    }

    // Activities of one lesson share its phrase list, so the count is already known
    if let Some(activity) = permissions.previous_accessible_before(position.activity) {
        return Some(NavigationTarget::Resolved(Position::new(
            position.unit_id,
            position.lesson_id,
            activity,
            ctx.last_phrase_index(),
        )));
    }

    let last = permissions.last_accessible()?;

    if let Some(lesson) = ctx.previous_lesson() {
        debug!(
            "Previous crosses into lesson {} of unit {}",
            lesson.lesson_id, position.unit_id
        );
        return Some(NavigationTarget::LastPhraseOf {
            unit_id: position.unit_id,
            lesson_id: lesson.lesson_id,
            activity: last,
        });
    }

    if let Some(unit) = ctx.previous_unit() {
        debug!("Previous crosses into unit {}", unit.unit_id);
        return Some(NavigationTarget::LastLessonOf {
            unit_id: unit.unit_id,
            activity: last,
        });
    }

    None
}

pub fn can_navigate_next(position: &Position, ctx: &NavigationContext) -> bool {
    next_position(position, ctx).is_some()
}

pub fn can_navigate_previous(position: &Position, ctx: &NavigationContext) -> bool {
    previous_position(position, ctx).is_some()
}
