//! Route push seam
//!
//! The controller's only outbound effect. The web shell implements this by
//! pushing browser history; the CLI logs; tests record.

use std::sync::Mutex;
use tracing::info;

use crate::route::RouteRequest;

pub trait RouteNavigator: Send + Sync {
    fn navigate_to(&self, request: &RouteRequest);
}

/// Keeps every pushed route in memory
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pushed: Mutex<Vec<RouteRequest>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pushed(&self) -> Vec<RouteRequest> {
        self.pushed
            .lock()
            .map(|pushed| pushed.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn last(&self) -> Option<RouteRequest> {
        self.pushed().last().cloned()
    }

    pub fn push_count(&self) -> usize {
        self.pushed().len()
    }
}

impl RouteNavigator for RecordingNavigator {
    fn navigate_to(&self, request: &RouteRequest) {
        match self.pushed.lock() {
            Ok(mut pushed) => pushed.push(request.clone()),
            Err(poisoned) => poisoned.into_inner().push(request.clone()),
        }
    }
}

/// Writes each push to the log and stdout
#[derive(Debug, Default)]
pub struct LoggingNavigator;

impl RouteNavigator for LoggingNavigator {
    fn navigate_to(&self, request: &RouteRequest) {
        info!(path = %request.path, phrase = ?request.phrase_index, "Route push");
        match request.phrase_index {
            Some(phrase) => println!("{} (phrase {})", request.path, phrase),
            None => println!("{}", request.path),
        }
    }
}
