//! Event types for navigation notifications
//!
//! Provides the NavigationEvent enum and an EventBus so that screens other
//! than the one driving navigation (progress widgets, analytics) can follow
//! route changes without polling the controller.

use crate::activity::Activity;
use crate::curriculum::{LessonId, UnitId};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Which way the learner moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationDirection {
    Next,
    Previous,
}

impl std::fmt::Display for NavigationDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NavigationDirection::Next => write!(f, "next"),
            NavigationDirection::Previous => write!(f, "previous"),
        }
    }
}

/// Why a navigation request was refused before doing any work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Another navigation is still in flight
    Busy,
    /// Curriculum or permissions not loaded yet
    NotReady,
}

/// Navigation event types
///
/// Serialized with an internal `type` tag so they can be forwarded to the UI as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NavigationEvent {
    /// A navigation request found a target; Committed or FellBack follows
    NavigationStarted {
        direction: NavigationDirection,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A navigation request was dropped without pushing a route
    NavigationRejected {
        direction: NavigationDirection,
        reason: RejectReason,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A lesson route was pushed
    NavigationCommitted {
        direction: NavigationDirection,
        unit_id: UnitId,
        lesson_id: LessonId,
        activity: Activity,
        phrase_index: usize,
        path: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Placeholder lookup failed; the unit overview was pushed instead
    NavigationFellBack {
        direction: NavigationDirection,
        unit_id: UnitId,
        path: String,
        reason: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

/// Broadcast channel for NavigationEvent
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<NavigationEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    ///
    /// Slow subscribers lose the oldest events once `capacity` is exceeded.
    ///
    /// # Examples
    ///
    /// ```
    /// use polyglotas_common::events::EventBus;
    ///
    /// let event_bus = EventBus::new(100);
    /// assert_eq!(event_bus.capacity(), 100);
    /// ```
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<NavigationEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Err` if no subscribers are listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: NavigationEvent,
    ) -> Result<usize, broadcast::error::SendError<NavigationEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: NavigationEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
