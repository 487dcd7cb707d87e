//! Claim domain models.

use chorechart_db::queries::claims::ClaimRow;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::input;

/// A record that someone completed a chore, with the points it earned.
///
/// `value` is frozen when the claim is recorded and only changes through an
/// explicit claim edit, never through edits to the chore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub id: i64,
    pub chore_id: i64,
    /// Current name of the referenced chore, for display.
    pub chore_name: String,
    pub value: i64,
    pub created_by: String,
    pub completed_by: String,
    pub completed_at: DateTime<Utc>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Claim {
    /// Create a Claim from a database row.
    pub fn from_row(row: ClaimRow) -> Self {
        Self {
            id: row.id,
            chore_id: row.chore_id,
            chore_name: row.chore_name,
            value: row.value,
            created_by: row.created_by,
            completed_by: row.completed_by,
            completed_at: row.completed_at,
            note: row.note,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A claim about to be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClaim {
    pub chore_id: i64,
    pub completed_by: String,
    /// Defaults to the moment the claim is recorded.
    pub completed_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub created_by: String,
}

impl NewClaim {
    pub fn new(chore_id: i64, completed_by: impl Into<String>) -> Self {
        Self {
            chore_id,
            completed_by: completed_by.into(),
            completed_at: None,
            note: None,
            created_by: String::new(),
        }
    }

    pub fn completed_at(mut self, at: DateTime<Utc>) -> Self {
        self.completed_at = Some(at);
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn created_by(mut self, who: impl Into<String>) -> Self {
        self.created_by = who.into();
        self
    }

    /// Build from the claim form on the landing page.
    pub fn parse(chore_id: &str, completed_by: &str) -> CoreResult<Self> {
        Ok(Self::new(
            input::integer("chore", chore_id)?,
            input::required("completed by", completed_by)?,
        ))
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.completed_by.trim().is_empty() {
            return Err(CoreError::validation("completed by is required"));
        }
        Ok(())
    }
}

/// Replacement values for every editable field of a claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimUpdate {
    pub chore_id: i64,
    pub value: i64,
    pub completed_by: String,
    pub completed_at: DateTime<Utc>,
    pub note: Option<String>,
}

impl ClaimUpdate {
    /// Start from a claim's current values.
    pub fn from_claim(claim: &Claim) -> Self {
        Self {
            chore_id: claim.chore_id,
            value: claim.value,
            completed_by: claim.completed_by.clone(),
            completed_at: claim.completed_at,
            note: claim.note.clone(),
        }
    }

    /// Build from raw edit-form fields.
    pub fn parse(
        chore_id: &str,
        value: &str,
        completed_by: &str,
        completed_at: &str,
        note: &str,
    ) -> CoreResult<Self> {
        Ok(Self {
            chore_id: input::integer("chore", chore_id)?,
            value: input::integer("value", value)?,
            completed_by: input::required("completed by", completed_by)?,
            completed_at: input::completed_at(completed_at)?,
            note: input::non_blank(note),
        })
    }

    /// Keep `current`'s completion time when the submitted one is that time
    /// shown to the second, as the edit form does.
    pub fn keep_completed_at(mut self, current: &Claim) -> Self {
        if self.completed_at == current.completed_at.trunc_subsecs(0) {
            self.completed_at = current.completed_at;
        }
        self
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.completed_by.trim().is_empty() {
            return Err(CoreError::validation("completed by is required"));
        }
        Ok(())
    }
}
