//! Chore domain models.

use chorechart_db::queries::chores::ChoreRow;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::input;

/// A repeatable task worth a fixed number of points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chore {
    pub id: i64,
    pub name: String,
    pub value: i64,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl Chore {
    /// Create a Chore from a database row.
    pub fn from_row(row: ChoreRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            value: row.value,
            description: row.description,
            category: row.category,
        }
    }
}

/// The mutable fields of a chore, as submitted on create or edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoreInput {
    pub name: String,
    pub value: i64,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl ChoreInput {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
            description: None,
            category: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Build from raw form fields. Blank optional fields become `None`.
    pub fn parse(name: &str, value: &str, description: &str, category: &str) -> CoreResult<Self> {
        let input = Self {
            name: input::required("name", name)?,
            value: input::integer("value", value)?,
            description: input::non_blank(description),
            category: input::non_blank(category),
        };
        input.validate()?;
        Ok(input)
    }

    /// Check the catalog invariants: a name and a positive point value.
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::validation("name is required"));
        }
        if self.value <= 0 {
            return Err(CoreError::validation(format!(
                "value must be a positive number of points, got {}",
                self.value
            )));
        }
        Ok(())
    }
}
