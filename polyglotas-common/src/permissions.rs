//! Subscription tier permissions
//!
//! Maps a subscription tier onto the set of activities a learner may open.
//! The mapping is monotone: every activity reachable at a lower tier stays
//! reachable at a higher one.
//!
//! | Tier    | Activities                          |
//! |---------|-------------------------------------|
//! | free    | dictation                           |
//! | starter | dictation, pronunciation            |
//! | pro     | dictation, pronunciation, chat      |

use crate::activity::Activity;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// Subscription level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Starter,
    Pro,
}

impl SubscriptionTier {
    /// Parse a tier name, falling back to `Free` for anything unrecognised
    pub fn parse_lossy(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("starter") => SubscriptionTier::Starter,
            Some("pro") => SubscriptionTier::Pro,
            _ => SubscriptionTier::Free,
        }
    }
}

impl<'de> Deserialize<'de> for SubscriptionTier {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(SubscriptionTier::parse_lossy(raw.as_deref()))
    }
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptionTier::Free => write!(f, "free"),
            SubscriptionTier::Starter => write!(f, "starter"),
            SubscriptionTier::Pro => write!(f, "pro"),
        }
    }
}

/// Activities a tier may open
pub fn accessible_activities(tier: SubscriptionTier) -> BTreeSet<Activity> {
    match tier {
        SubscriptionTier::Free => [Activity::Dictation].into_iter().collect(),
        SubscriptionTier::Starter => [Activity::Dictation, Activity::Pronunciation]
            .into_iter()
            .collect(),
        SubscriptionTier::Pro => Activity::SEQUENCE.into_iter().collect(),
    }
}

/// Permissions record as served by the backend
#[derive(Debug, Deserialize)]
pub struct TierPermissionsRecord {
    #[serde(default)]
    pub tier: SubscriptionTier,
}

/// Tier plus the activities it unlocks
///
/// Rebuild with [`TierPermissions::for_tier`] whenever the subscription changes.
/// Deserializing only reads `tier`; the activity set is always derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TierPermissionsRecord")]
pub struct TierPermissions {
    pub tier: SubscriptionTier,
    pub activities: BTreeSet<Activity>,
}

impl From<TierPermissionsRecord> for TierPermissions {
    fn from(record: TierPermissionsRecord) -> Self {
        TierPermissions::for_tier(record.tier)
    }
}

impl Default for TierPermissions {
    fn default() -> Self {
        TierPermissions::for_tier(SubscriptionTier::Free)
    }
}

impl TierPermissions {
    pub fn for_tier(tier: SubscriptionTier) -> Self {
        Self {
            tier,
            activities: accessible_activities(tier),
        }
    }

    /// Explicit activity set, for accounts with custom grants
    pub fn with_activities(tier: SubscriptionTier, activities: impl IntoIterator<Item = Activity>) -> Self {
        Self {
            tier,
            activities: activities.into_iter().collect(),
        }
    }

    pub fn allows(&self, activity: Activity) -> bool {
        self.activities.contains(&activity)
    }

    /// Earliest accessible activity in sequence order
    pub fn first_accessible(&self) -> Option<Activity> {
        Activity::SEQUENCE.into_iter().find(|a| self.allows(*a))
    }

    /// Latest accessible activity in sequence order
    pub fn last_accessible(&self) -> Option<Activity> {
        Activity::SEQUENCE.into_iter().rev().find(|a| self.allows(*a))
    }

    /// Nearest accessible activity after `current`
    pub fn next_accessible_after(&self, current: Activity) -> Option<Activity> {
        current.following().find(|a| self.allows(*a))
    }

    /// Nearest accessible activity before `current`
    pub fn previous_accessible_before(&self, current: Activity) -> Option<Activity> {
        current.preceding().find(|a| self.allows(*a))
    }
}
