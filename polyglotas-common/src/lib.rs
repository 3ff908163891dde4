//! # Polyglotas Common Library
//!
//! Shared code for the Polyglotas learning services including:
//! - Activity sequence and subscription-tier permissions
//! - Curriculum records (units, lessons, phrases) and their envelopes
//! - Navigation event types (NavigationEvent enum) and EventBus
//! - Configuration loading
//! - Common error type

pub mod activity;
pub mod config;
pub mod curriculum;
pub mod error;
pub mod events;
pub mod permissions;

pub use activity::Activity;
pub use error::{Error, Result};
pub use permissions::{accessible_activities, SubscriptionTier, TierPermissions};
