//! Test helper modules for navigation integration tests
//!
//! Provides reusable test infrastructure components:
//! - curriculum: fixture curricula and synchronous walkers
//! - flaky_source: CurriculumSource wrapper with injected failures and gates

#![allow(dead_code)]

pub mod curriculum;
pub mod flaky_source;

pub use curriculum::{
    all_positions, first_position, last_position, lesson, phrases, resolve_target, sample_curriculum,
    step_next, step_previous, unit,
};
pub use flaky_source::{FetchGate, FlakySource};
