//! Practice activities and their fixed ordering within a lesson

use serde::{Deserialize, Serialize};

/// Practice mode inside a lesson
///
/// Variant order is the lesson's activity sequence; `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    /// Listen and type
    Dictation,
    /// Speak and get scored
    Pronunciation,
    /// Conversation with the AI partner
    Chat,
}

impl Activity {
    /// Activity sequence within every lesson, independent of tier
    pub const SEQUENCE: [Activity; 3] = [Activity::Dictation, Activity::Pronunciation, Activity::Chat];

    /// Zero-based slot in [`Activity::SEQUENCE`]
    pub fn sequence_index(self) -> usize {
        match self {
            Activity::Dictation => 0,
            Activity::Pronunciation => 1,
            Activity::Chat => 2,
        }
    }

    /// Activities after this one, nearest first
    pub fn following(self) -> impl Iterator<Item = Activity> {
        Self::SEQUENCE.into_iter().skip(self.sequence_index() + 1)
    }

    /// Activities before this one, nearest first
    pub fn preceding(self) -> impl Iterator<Item = Activity> {
        Self::SEQUENCE
            .into_iter()
            .take(self.sequence_index())
            .rev()
    }

    /// Route segment used by the lesson screens
    ///
    /// Pronunciation is served under `practice`; the rest of the UI links to
    /// that segment, so it must not change.
    pub fn path_segment(self) -> &'static str {
        match self {
            Activity::Dictation => "dictation",
            Activity::Pronunciation => "practice",
            Activity::Chat => "chat",
        }
    }

    /// Inverse of [`Activity::path_segment`]
    ///
    /// `pronunciation` is tolerated as input for links built from the activity name.
    pub fn from_path_segment(segment: &str) -> Option<Activity> {
        match segment {
            "dictation" => Some(Activity::Dictation),
            "practice" | "pronunciation" => Some(Activity::Pronunciation),
            "chat" => Some(Activity::Chat),
            _ => None,
        }
    }
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Activity::Dictation => write!(f, "dictation"),
            Activity::Pronunciation => write!(f, "pronunciation"),
            Activity::Chat => write!(f, "chat"),
        }
    }
}
