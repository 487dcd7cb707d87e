//! View models for the templates.
//!
//! Templates only see plain strings and numbers; optional fields are
//! flattened to empty strings here.

use chorechart_core::chore::Chore;
use chorechart_core::claim::Claim;
use chorechart_core::tally::{TallyWindow, WeeklyTally};
use chrono::{DateTime, Utc};
use std::str::FromStr;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";
/// `datetime-local` input value, to the second.
const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Flash message selected by the `notice` query parameter after a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    ChoreCreated,
    ChoreSaved,
    ChoreDeleted,
    ClaimCreated,
    ClaimSaved,
    ClaimDeleted,
}

impl Notice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChoreCreated => "chore-created",
            Self::ChoreSaved => "chore-saved",
            Self::ChoreDeleted => "chore-deleted",
            Self::ClaimCreated => "claim-created",
            Self::ClaimSaved => "claim-saved",
            Self::ClaimDeleted => "claim-deleted",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::ChoreCreated => "Chore created.",
            Self::ChoreSaved => "Chore saved.",
            Self::ChoreDeleted => "Chore deleted.",
            Self::ClaimCreated => "Claim created, edit it below if you like.",
            Self::ClaimSaved => "Claim saved.",
            Self::ClaimDeleted => "Claim deleted.",
        }
    }
}

impl FromStr for Notice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chore-created" => Ok(Self::ChoreCreated),
            "chore-saved" => Ok(Self::ChoreSaved),
            "chore-deleted" => Ok(Self::ChoreDeleted),
            "claim-created" => Ok(Self::ClaimCreated),
            "claim-saved" => Ok(Self::ClaimSaved),
            "claim-deleted" => Ok(Self::ClaimDeleted),
            _ => Err(()),
        }
    }
}

/// Text for the flash banner; empty when there is nothing to show.
pub fn notice_text(raw: Option<&str>) -> String {
    raw.and_then(|s| s.parse::<Notice>().ok())
        .map(|n| n.message().to_string())
        .unwrap_or_default()
}

pub struct ChoreView {
    pub id: i64,
    pub name: String,
    pub value: i64,
    pub description: String,
    pub category: String,
}

impl ChoreView {
    pub fn from_chore(chore: &Chore) -> Self {
        Self {
            id: chore.id,
            name: chore.name.clone(),
            value: chore.value,
            description: chore.description.clone().unwrap_or_default(),
            category: chore.category.clone().unwrap_or_default(),
        }
    }

    /// Blank values for the creation form.
    pub fn blank() -> Self {
        Self {
            id: 0,
            name: String::new(),
            value: 1,
            description: String::new(),
            category: String::new(),
        }
    }
}

pub struct ClaimView {
    pub id: i64,
    pub chore_id: i64,
    pub chore_name: String,
    pub value: i64,
    pub created_by: String,
    pub completed_by: String,
    pub completed_at: String,
    pub completed_input: String,
    pub note: String,
}

impl ClaimView {
    pub fn from_claim(claim: &Claim) -> Self {
        Self {
            id: claim.id,
            chore_id: claim.chore_id,
            chore_name: claim.chore_name.clone(),
            value: claim.value,
            created_by: claim.created_by.clone(),
            completed_by: claim.completed_by.clone(),
            completed_at: claim.completed_at.format(DATETIME_FORMAT).to_string(),
            completed_input: claim.completed_at.format(INPUT_FORMAT).to_string(),
            note: claim.note.clone().unwrap_or_default(),
        }
    }
}

pub struct StandingView {
    pub person: String,
    pub points: i64,
    pub leader: bool,
}

pub struct TallyView {
    pub standings: Vec<StandingView>,
    pub winner: String,
    pub days: u32,
    pub since: String,
}

impl TallyView {
    pub fn from_weekly(weekly: &WeeklyTally) -> Self {
        let max = weekly.tally.max_value();
        Self {
            standings: weekly
                .tally
                .standings()
                .into_iter()
                .map(|s| StandingView {
                    leader: Some(s.points) == max,
                    person: s.person,
                    points: s.points,
                })
                .collect(),
            winner: weekly.winner().to_string(),
            days: weekly.window.days,
            since: weekly.cutoff.format(DATETIME_FORMAT).to_string(),
        }
    }
}

/// Range hints for the claim edit form: the current window, not enforced.
pub fn window_dates(window: &TallyWindow, now: DateTime<Utc>) -> (String, String) {
    (
        window.cutoff(now).format(INPUT_FORMAT).to_string(),
        now.format(INPUT_FORMAT).to_string(),
    )
}
