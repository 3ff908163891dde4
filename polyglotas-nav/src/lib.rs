//! # Polyglotas Navigation Engine (polyglotas-nav)
//!
//! Decides where Next/Previous takes a learner: across phrases, activities,
//! lessons and units, skipping activities their subscription tier does not
//! unlock.
//!
//! **Layers:**
//! - [`position`] / [`context`]: where the learner is and what is known around it
//! - [`resolver`]: pure next/previous computation, may return placeholders
//! - [`controller`]: resolves placeholders through a [`source::CurriculumSource`]
//!   and pushes the route through a [`navigator::RouteNavigator`]

pub mod context;
pub mod controller;
pub mod error;
pub mod navigator;
pub mod position;
pub mod resolver;
pub mod route;
pub mod source;

pub use context::NavigationContext;
pub use controller::{NavPhase, NavigationController, NavigationOutcome};
pub use error::{Error, Result};
pub use position::{NavigationTarget, Position};
