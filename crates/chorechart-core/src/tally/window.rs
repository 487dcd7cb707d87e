//! Trailing time window for the tally.

use std::ops::Bound;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Longest window a config may ask for, about a century.
pub const MAX_DAYS: u32 = 36_500;

/// Whether a claim completed exactly at the cutoff counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowBoundary {
    /// `completed_at >= cutoff`
    #[default]
    Inclusive,
    /// `completed_at > cutoff`
    Exclusive,
}

impl WindowBoundary {
    pub fn lower_bound<T>(self, cutoff: T) -> Bound<T> {
        match self {
            Self::Inclusive => Bound::Included(cutoff),
            Self::Exclusive => Bound::Excluded(cutoff),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inclusive => "inclusive",
            Self::Exclusive => "exclusive",
        }
    }
}

/// The last `days` days measured back from the moment of reading.
///
/// Not a calendar week: the window slides with every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TallyWindow {
    pub days: u32,
    pub boundary: WindowBoundary,
}

impl Default for TallyWindow {
    fn default() -> Self {
        Self {
            days: 7,
            boundary: WindowBoundary::Inclusive,
        }
    }
}

impl TallyWindow {
    /// Earliest completion time in the window, at storage precision.
    ///
    /// `days` is clamped to [`MAX_DAYS`].
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let span = Duration::days(i64::from(self.days.min(MAX_DAYS)));
        now.checked_sub_signed(span)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
            .trunc_subsecs(6)
    }

    /// Whether a completion time falls inside the window ending at `now`.
    pub fn contains(&self, completed_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let cutoff = self.cutoff(now);
        match self.boundary {
            WindowBoundary::Inclusive => completed_at >= cutoff,
            WindowBoundary::Exclusive => completed_at > cutoff,
        }
    }
}
