//! Lesson route construction and parsing
//!
//! Lesson screens live at `/learn/{unit}/lesson/{lesson}/{segment}` where the
//! segment comes from [`Activity::path_segment`]. The phrase index is not part
//! of the path; it travels with the push as history state.

use polyglotas_common::curriculum::{LessonId, UnitId};
use polyglotas_common::Activity;

use crate::error::{Error, Result};
use crate::position::Position;

pub fn lesson_path(unit_id: UnitId, lesson_id: LessonId, activity: Activity) -> String {
    format!(
        "/learn/{}/lesson/{}/{}",
        unit_id,
        lesson_id,
        activity.path_segment()
    )
}

/// Unit overview page, used when a lesson cannot be determined
pub fn unit_overview_path(unit_id: UnitId) -> String {
    format!("/learn/{}", unit_id)
}

/// A single route push
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub path: String,
    /// Phrase to open, carried as history state
    pub phrase_index: Option<usize>,
}

impl RouteRequest {
    pub fn lesson(position: &Position) -> Self {
        Self {
            path: lesson_path(position.unit_id, position.lesson_id, position.activity),
            phrase_index: Some(position.phrase_index),
        }
    }

    pub fn unit_overview(unit_id: UnitId) -> Self {
        Self {
            path: unit_overview_path(unit_id),
            phrase_index: None,
        }
    }
}

/// Split a lesson route back into its coordinates
///
/// Query strings and fragments are ignored; a trailing slash is tolerated.
pub fn parse_lesson_path(path: &str) -> Result<(UnitId, LessonId, Activity)> {
    let bare = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = bare.trim_matches('/').split('/').collect();

    let [learn, unit, lesson_kw, lesson, segment] = segments.as_slice() else {
        return Err(Error::InvalidRoute(path.to_string()));
    };
    if *learn != "learn" || *lesson_kw != "lesson" {
        return Err(Error::InvalidRoute(path.to_string()));
    }

    let unit_id = unit
        .parse::<UnitId>()
        .map_err(|_| Error::InvalidRoute(format!("{}: bad unit id '{}'", path, unit)))?;
    let lesson_id = lesson
        .parse::<LessonId>()
        .map_err(|_| Error::InvalidRoute(format!("{}: bad lesson id '{}'", path, lesson)))?;
    let activity = Activity::from_path_segment(segment)
        .ok_or_else(|| Error::InvalidRoute(format!("{}: unknown activity '{}'", path, segment)))?;

    Ok((unit_id, lesson_id, activity))
}
