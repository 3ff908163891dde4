//! Navigation controller
//!
//! Wraps the pure resolver with the effectful parts: gathering the context
//! from a [`CurriculumSource`], resolving placeholder targets with on-demand
//! fetches, and pushing the final route through a [`RouteNavigator`].
//!
//! # Phases
//!
//! ```text
//! Idle ──try_begin──▶ Resolving ──placeholder?──▶ FetchingPlaceholder ──▶ Committing ──▶ Idle
//!                         │                                                  ▲
//!                         └───────────────── resolved target ────────────────┘
//! ```
//!
//! Only one navigation may be in flight. A call arriving while the phase is
//! not `Idle` is rejected with `None` rather than queued, so two overlapping
//! presses can never push two routes. The phase returns to `Idle` when the
//! guard drops, whichever branch finished the call.
//!
//! Fetch failures never surface to the caller: a missing lesson list falls
//! back to the unit overview page, a missing phrase list to phrase 0.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use polyglotas_common::curriculum::{first_lesson, last_lesson, LessonId, UnitId};
use polyglotas_common::events::{EventBus, NavigationDirection, NavigationEvent, RejectReason};
use polyglotas_common::TierPermissions;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::context::NavigationContext;
use crate::error::{Error, Result};
use crate::navigator::RouteNavigator;
use crate::position::{NavigationTarget, Position};
use crate::resolver;
use crate::route::RouteRequest;
use crate::source::CurriculumSource;

/// Where a navigation call currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NavPhase {
    Idle = 0,
    Resolving = 1,
    FetchingPlaceholder = 2,
    Committing = 3,
}

impl NavPhase {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => NavPhase::Resolving,
            2 => NavPhase::FetchingPlaceholder,
            3 => NavPhase::Committing,
            _ => NavPhase::Idle,
        }
    }
}

/// Result of a completed navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// A lesson route was pushed
    Lesson(Position),
    /// The target lesson could not be determined; the unit overview was pushed
    UnitOverview { unit_id: UnitId },
}

impl NavigationOutcome {
    pub fn position(&self) -> Option<&Position> {
        match self {
            NavigationOutcome::Lesson(position) => Some(position),
            NavigationOutcome::UnitOverview { .. } => None,
        }
    }
}

/// Holds the phase out of `Idle` until dropped
struct PhaseGuard<'a> {
    phase: &'a AtomicU8,
}

impl PhaseGuard<'_> {
    fn enter(&self, next: NavPhase) {
        debug!("Navigation phase -> {:?}", next);
        self.phase.store(next as u8, Ordering::Release);
    }
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        self.phase.store(NavPhase::Idle as u8, Ordering::Release);
    }
}

/// Placeholder lookup that could not produce a lesson
struct Fallback {
    unit_id: UnitId,
    reason: String,
}

#[derive(Debug, Default)]
struct Session {
    position: Option<Position>,
    context: Option<NavigationContext>,
}

impl Session {
    /// Position and context, if the context was taken for that position
    fn ready(&self) -> Option<(&Position, &NavigationContext)> {
        match (&self.position, &self.context) {
            (Some(position), Some(context)) if context.describes(position) => Some((position, context)),
            _ => None,
        }
    }
}

/// Drives Next/Previous for one lesson screen
pub struct NavigationController {
    source: Arc<dyn CurriculumSource>,
    navigator: Arc<dyn RouteNavigator>,
    events: Option<EventBus>,
    phase: AtomicU8,
    session: RwLock<Session>,
}

impl NavigationController {
    pub fn new(source: Arc<dyn CurriculumSource>, navigator: Arc<dyn RouteNavigator>) -> Self {
        Self {
            source,
            navigator,
            events: None,
            phase: AtomicU8::new(NavPhase::Idle as u8),
            session: RwLock::new(Session::default()),
        }
    }

    /// Publish navigation events on `bus`
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn phase(&self) -> NavPhase {
        NavPhase::from_u8(self.phase.load(Ordering::Acquire))
    }

    pub fn is_navigating(&self) -> bool {
        self.phase() != NavPhase::Idle
    }

    pub async fn current_position(&self) -> Option<Position> {
        self.session.read().await.position.clone()
    }

    pub async fn context(&self) -> Option<NavigationContext> {
        self.session.read().await.context.clone()
    }

    /// True once position and matching context are both loaded
    pub async fn is_ready(&self) -> bool {
        self.session.read().await.ready().is_some()
    }

    /// Gather the context for `position` from the source
    ///
    /// Fetches run one after another: units, the unit's lessons, the lesson's
    /// phrases, then permissions. On failure the position is kept but the
    /// controller stays not-ready until a later `load` succeeds.
    ///
    /// Returns [`Error::Busy`] without touching the session if a navigation
    /// is in flight when the fetches finish; its commit decides the position.
    pub async fn load(&self, position: Position) -> Result<()> {
        debug!("Loading navigation context for {}", position);

        let gathered = self.gather_context(&position).await;

        let mut session = self.session.write().await;
        if self.is_navigating() {
            warn!("Discarding context for {}: navigation in progress", position);
            return Err(Error::Busy);
        }

        match gathered {
            Ok(context) => {
                session.position = Some(position);
                session.context = Some(context);
                Ok(())
            }
            Err(e) => {
                error!("Failed to load navigation context for {}: {}", position, e);
                session.position = Some(position);
                session.context = None;
                Err(e.into())
            }
        }
    }

    async fn gather_context(&self, position: &Position) -> polyglotas_common::Result<NavigationContext> {
        let units = self.source.fetch_units().await?.units;
        let lessons = self.source.fetch_unit_lessons(position.unit_id).await?.lessons;
        let phrases = self.source.fetch_lesson_phrases(position.lesson_id).await?.phrases;
        let permissions = self.source.fetch_permissions().await?;

        Ok(NavigationContext::new(
            position.unit_id,
            position.lesson_id,
            units,
            lessons,
            phrases,
            permissions,
        ))
    }

    /// Install an already-cached context instead of fetching one
    ///
    /// Rejected with [`Error::Busy`] while a navigation is in flight.
    pub async fn set_context(&self, position: Position, context: NavigationContext) -> Result<()> {
        let mut session = self.session.write().await;
        if self.is_navigating() {
            warn!("Discarding context for {}: navigation in progress", position);
            return Err(Error::Busy);
        }
        session.position = Some(position);
        session.context = Some(context);
        Ok(())
    }

    /// Apply a subscription change; takes effect on the next resolve
    pub async fn set_permissions(&self, permissions: TierPermissions) {
        let mut session = self.session.write().await;
        if let Some(context) = session.context.take() {
            info!("Subscription tier now {}", permissions.tier);
            session.context = Some(context.with_permissions(permissions));
        }
    }

    pub async fn can_navigate_next(&self) -> bool {
        let session = self.session.read().await;
        session
            .ready()
            .is_some_and(|(position, context)| resolver::can_navigate_next(position, context))
    }

    pub async fn can_navigate_previous(&self) -> bool {
        let session = self.session.read().await;
        session
            .ready()
            .is_some_and(|(position, context)| resolver::can_navigate_previous(position, context))
    }

    pub async fn navigate_next(&self) -> Option<NavigationOutcome> {
        self.navigate(NavigationDirection::Next).await
    }

    pub async fn navigate_previous(&self) -> Option<NavigationOutcome> {
        self.navigate(NavigationDirection::Previous).await
    }

    fn try_begin(&self) -> Option<PhaseGuard<'_>> {
        self.phase
            .compare_exchange(
                NavPhase::Idle as u8,
                NavPhase::Resolving as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .ok()
            .map(|_| PhaseGuard { phase: &self.phase })
    }

    async fn navigate(&self, direction: NavigationDirection) -> Option<NavigationOutcome> {
        let Some(guard) = self.try_begin() else {
            debug!("Ignoring {} request: navigation already in flight", direction);
            self.reject(direction, RejectReason::Busy);
            return None;
        };

        let (from, target) = {
            let session = self.session.read().await;
            let Some((position, context)) = session.ready() else {
                debug!("Ignoring {} request: context not ready", direction);
                self.reject(direction, RejectReason::NotReady);
                return None;
            };
            let target = match direction {
                NavigationDirection::Next => resolver::next_position(position, context),
                NavigationDirection::Previous => resolver::previous_position(position, context),
            };
            (position.clone(), target)
        };

        let Some(target) = target else {
            debug!("No {} position from {}", direction, from);
            return None;
        };

        self.emit(NavigationEvent::NavigationStarted {
            direction,
            timestamp: chrono::Utc::now(),
        });

        let resolved = match target {
            NavigationTarget::Resolved(position) => Ok(position),
            placeholder => {
                guard.enter(NavPhase::FetchingPlaceholder);
                self.resolve_placeholder(placeholder).await
            }
        };

        guard.enter(NavPhase::Committing);
        Some(self.commit(direction, &from, resolved).await)
    }

    async fn resolve_placeholder(&self, target: NavigationTarget) -> std::result::Result<Position, Fallback> {
        match target {
            NavigationTarget::Resolved(position) => Ok(position),

            NavigationTarget::LastPhraseOf {
                unit_id,
                lesson_id,
                activity,
            } => {
                let phrase_index = self.last_phrase_index(lesson_id).await;
                Ok(Position::new(unit_id, lesson_id, activity, phrase_index))
            }

            NavigationTarget::FirstLessonOf { unit_id, activity } => {
                let lessons = match self.source.fetch_unit_lessons(unit_id).await {
                    Ok(response) => response.lessons,
                    Err(e) => {
                        warn!("Could not fetch lessons of unit {}: {}", unit_id, e);
                        return Err(Fallback {
                            unit_id,
                            reason: e.to_string(),
                        });
                    }
                };
                match first_lesson(&lessons) {
                    Some(lesson) => Ok(Position::new(unit_id, lesson.lesson_id, activity, 0)),
                    None => {
                        warn!("Unit {} has no lessons", unit_id);
                        Err(Fallback {
                            unit_id,
                            reason: "unit has no lessons".to_string(),
                        })
                    }
                }
            }

            NavigationTarget::LastLessonOf { unit_id, activity } => {
                let lessons = match self.source.fetch_unit_lessons(unit_id).await {
                    Ok(response) => response.lessons,
                    Err(e) => {
                        warn!("Could not fetch lessons of unit {}: {}", unit_id, e);
                        return Err(Fallback {
                            unit_id,
                            reason: e.to_string(),
                        });
                    }
                };
                let Some(lesson_id) = last_lesson(&lessons).map(|l| l.lesson_id) else {
                    warn!("Unit {} has no lessons", unit_id);
                    return Err(Fallback {
                        unit_id,
                        reason: "unit has no lessons".to_string(),
                    });
                };
                let phrase_index = self.last_phrase_index(lesson_id).await;
                Ok(Position::new(unit_id, lesson_id, activity, phrase_index))
            }
        }
    }

    /// Last phrase of a lesson, or 0 if its phrases cannot be fetched
    async fn last_phrase_index(&self, lesson_id: LessonId) -> usize {
        match self.source.fetch_lesson_phrases(lesson_id).await {
            Ok(response) => response.phrases.len().saturating_sub(1),
            Err(e) => {
                warn!("Could not fetch phrases of lesson {}, using phrase 0: {}", lesson_id, e);
                0
            }
        }
    }

    async fn commit(
        &self,
        direction: NavigationDirection,
        from: &Position,
        resolved: std::result::Result<Position, Fallback>,
    ) -> NavigationOutcome {
        match resolved {
            Ok(position) => {
                let request = RouteRequest::lesson(&position);
                self.navigator.navigate_to(&request);
                info!("Navigated {} to {}", direction, position);

                {
                    let mut session = self.session.write().await;
                    if !position.same_lesson(from) {
                        // Next screen loads its own lesson data
                        session.context = None;
                    }
                    session.position = Some(position.clone());
                }

                self.emit(NavigationEvent::NavigationCommitted {
                    direction,
                    unit_id: position.unit_id,
                    lesson_id: position.lesson_id,
                    activity: position.activity,
                    phrase_index: position.phrase_index,
                    path: request.path,
                    timestamp: chrono::Utc::now(),
                });
                NavigationOutcome::Lesson(position)
            }
            Err(fallback) => {
                let request = RouteRequest::unit_overview(fallback.unit_id);
                self.navigator.navigate_to(&request);
                warn!(
                    "Navigated {} to overview of unit {} ({})",
                    direction, fallback.unit_id, fallback.reason
                );

                {
                    let mut session = self.session.write().await;
                    session.position = None;
                    session.context = None;
                }

                self.emit(NavigationEvent::NavigationFellBack {
                    direction,
                    unit_id: fallback.unit_id,
                    path: request.path,
                    reason: fallback.reason,
                    timestamp: chrono::Utc::now(),
                });
                NavigationOutcome::UnitOverview {
                    unit_id: fallback.unit_id,
                }
            }
        }
    }

    fn reject(&self, direction: NavigationDirection, reason: RejectReason) {
        self.emit(NavigationEvent::NavigationRejected {
            direction,
            reason,
            timestamp: chrono::Utc::now(),
        });
    }

    fn emit(&self, event: NavigationEvent) {
        if let Some(bus) = &self.events {
            bus.emit_lossy(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_round_trips_through_u8() {
        for phase in [
            NavPhase::Idle,
            NavPhase::Resolving,
            NavPhase::FetchingPlaceholder,
            NavPhase::Committing,
        ] {
            assert_eq!(NavPhase::from_u8(phase as u8), phase);
        }
        assert_eq!(NavPhase::from_u8(200), NavPhase::Idle);
    }

    #[test]
    fn test_guard_returns_to_idle_on_drop() {
        let phase = AtomicU8::new(NavPhase::Resolving as u8);
        {
            let guard = PhaseGuard { phase: &phase };
            guard.enter(NavPhase::FetchingPlaceholder);
            assert_eq!(NavPhase::from_u8(phase.load(Ordering::Acquire)), NavPhase::FetchingPlaceholder);
        }
        assert_eq!(NavPhase::from_u8(phase.load(Ordering::Acquire)), NavPhase::Idle);
    }

    #[test]
    fn test_outcome_position() {
        let position = Position::new(1, 2, polyglotas_common::Activity::Chat, 0);
        assert_eq!(NavigationOutcome::Lesson(position.clone()).position(), Some(&position));
        assert_eq!(NavigationOutcome::UnitOverview { unit_id: 1 }.position(), None);
    }
}
