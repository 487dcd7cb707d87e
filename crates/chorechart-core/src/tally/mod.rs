//! Weekly tally: points per person over the trailing window.
//!
//! Nothing here is cached. Every read sums whatever claims are in the window
//! at that moment, so edits to a claim's value or completion time show up on
//! the next read.

pub mod window;

pub use window::{TallyWindow, WindowBoundary, MAX_DAYS};

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt;

use chorechart_db::DbPool;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::claim::{self, Claim};
use crate::error::CoreResult;

/// Shown when nobody has a unique lead.
pub const NO_ONE: &str = "no one";

/// The uniquely highest scorer, or nobody on a tie or an empty window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Winner {
    Person(String),
    NoOne,
}

impl Winner {
    pub fn person(&self) -> Option<&str> {
        match self {
            Self::Person(name) => Some(name),
            Self::NoOne => None,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Person(name) => f.write_str(name),
            Self::NoOne => f.write_str(NO_ONE),
        }
    }
}

impl Serialize for Winner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub person: String,
    pub points: i64,
}

/// Points per person. People without claims are absent, not zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    totals: BTreeMap<String, i64>,
}

impl Tally {
    pub fn from_claims<'a>(claims: impl IntoIterator<Item = &'a Claim>) -> Self {
        Self::from_points(claims.into_iter().map(|c| (c.completed_by.as_str(), c.value)))
    }

    /// Totals saturate at the `i64` limits.
    pub fn from_points<'a>(points: impl IntoIterator<Item = (&'a str, i64)>) -> Self {
        let mut totals: BTreeMap<String, i64> = BTreeMap::new();
        for (person, value) in points {
            let total = totals.entry(person.to_string()).or_insert(0);
            *total = total.saturating_add(value);
        }
        Self { totals }
    }

    pub fn totals(&self) -> &BTreeMap<String, i64> {
        &self.totals
    }

    pub fn total_for(&self, person: &str) -> Option<i64> {
        self.totals.get(person).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Highest total, `None` for an empty window.
    pub fn max_value(&self) -> Option<i64> {
        self.totals.values().copied().max()
    }

    /// Everyone sharing the highest total, by name.
    pub fn leaders(&self) -> Vec<&str> {
        match self.max_value() {
            Some(max) => self
                .totals
                .iter()
                .filter(|(_, total)| **total == max)
                .map(|(person, _)| person.as_str())
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn winner(&self) -> Winner {
        match self.leaders().as_slice() {
            [only] => Winner::Person(only.to_string()),
            _ => Winner::NoOne,
        }
    }

    /// Leaderboard rows, most points first, ties by name.
    pub fn standings(&self) -> Vec<Standing> {
        let mut rows: Vec<Standing> = self
            .totals
            .iter()
            .map(|(person, points)| Standing {
                person: person.clone(),
                points: *points,
            })
            .collect();
        rows.sort_by_key(|s| Reverse(s.points));
        rows
    }
}

/// The tally for one read of the window, with the claims it was summed from.
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyTally {
    pub window: TallyWindow,
    pub as_of: DateTime<Utc>,
    pub cutoff: DateTime<Utc>,
    pub claims: Vec<Claim>,
    pub tally: Tally,
}

impl WeeklyTally {
    pub fn winner(&self) -> Winner {
        self.tally.winner()
    }
}

/// Tally the window ending now.
pub fn weekly_tally(pool: &DbPool, window: &TallyWindow) -> CoreResult<WeeklyTally> {
    weekly_tally_at(pool, window, Utc::now())
}

/// Tally the window ending at `now`.
pub fn weekly_tally_at(
    pool: &DbPool,
    window: &TallyWindow,
    now: DateTime<Utc>,
) -> CoreResult<WeeklyTally> {
    let cutoff = window.cutoff(now);
    let claims = claim::list_claims_since(pool, &cutoff, window.boundary)?;
    let tally = Tally::from_claims(&claims);
    tracing::debug!(claims = claims.len(), people = tally.totals().len(), %cutoff, "Tally computed");

    Ok(WeeklyTally {
        window: *window,
        as_of: now,
        cutoff,
        claims,
        tally,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chore::{self, ChoreInput};
    use crate::claim::{ClaimUpdate, NewClaim};
    use chorechart_db::init_memory_pool;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 15, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_tally() {
        let tally = Tally::default();
        assert!(tally.is_empty());
        assert_eq!(tally.max_value(), None);
        assert!(tally.leaders().is_empty());
        assert_eq!(tally.winner(), Winner::NoOne);
        assert_eq!(tally.winner().to_string(), "no one");
    }

    #[test]
    fn test_tie_has_no_winner() {
        let tally = Tally::from_points([("A", 10), ("B", 10)]);
        assert_eq!(tally.leaders(), vec!["A", "B"]);
        assert_eq!(tally.winner(), Winner::NoOne);
    }

    #[test]
    fn test_sums_per_person() {
        let tally = Tally::from_points([("A", 10), ("A", 5), ("B", 12)]);
        assert_eq!(tally.total_for("A"), Some(15));
        assert_eq!(tally.total_for("B"), Some(12));
        assert_eq!(tally.total_for("C"), None);
        assert_eq!(tally.max_value(), Some(15));
        assert_eq!(tally.winner(), Winner::Person("A".to_string()));
    }

    #[test]
    fn test_single_claim_wins() {
        let tally = Tally::from_points([("A", 1)]);
        assert_eq!(tally.winner().person(), Some("A"));
    }

    #[test]
    fn test_standings_order() {
        let tally = Tally::from_points([("cy", 4), ("ana", 9), ("ben", 4)]);
        let standings = tally.standings();
        let order: Vec<&str> = standings.iter().map(|s| s.person.as_str()).collect();
        assert_eq!(order, vec!["ana", "ben", "cy"]);
    }

    #[test]
    fn test_huge_totals_saturate() {
        let tally = Tally::from_points([("ana", i64::MAX), ("ana", i64::MAX), ("ben", i64::MIN), ("ben", -1)]);
        assert_eq!(tally.total_for("ana"), Some(i64::MAX));
        assert_eq!(tally.total_for("ben"), Some(i64::MIN));
        assert_eq!(tally.winner().person(), Some("ana"));
    }

    #[test]
    fn test_winner_serializes_as_name() {
        assert_eq!(serde_json::to_string(&Winner::NoOne).unwrap(), "\"no one\"");
        assert_eq!(serde_json::to_string(&Winner::Person("ana".into())).unwrap(), "\"ana\"");
    }

    fn seed(pool: &DbPool) -> i64 {
        chore::create_chore(pool, &ChoreInput::new("Dishes", 10)).unwrap().id
    }

    fn claim_at(pool: &DbPool, chore_id: i64, who: &str, at: DateTime<Utc>) -> Claim {
        claim::create_claim(pool, &NewClaim::new(chore_id, who).completed_at(at)).unwrap()
    }

    #[test]
    fn test_weekly_tally_only_counts_window() {
        let pool = init_memory_pool().unwrap();
        let chore_id = seed(&pool);
        claim_at(&pool, chore_id, "A", now() - Duration::days(1));
        claim_at(&pool, chore_id, "A", now() - Duration::days(2));
        claim_at(&pool, chore_id, "B", now() - Duration::days(8));

        let weekly = weekly_tally_at(&pool, &TallyWindow::default(), now()).unwrap();
        assert_eq!(weekly.claims.len(), 2);
        assert_eq!(weekly.tally.total_for("A"), Some(20));
        assert_eq!(weekly.tally.total_for("B"), None);
        assert_eq!(weekly.winner(), Winner::Person("A".to_string()));
    }

    #[test]
    fn test_weekly_tally_boundary_semantics() {
        let pool = init_memory_pool().unwrap();
        let chore_id = seed(&pool);
        let inclusive = TallyWindow::default();
        let exclusive = TallyWindow {
            boundary: WindowBoundary::Exclusive,
            ..inclusive
        };
        let edge = inclusive.cutoff(now());
        claim_at(&pool, chore_id, "edge", edge);
        claim_at(&pool, chore_id, "outside", edge - Duration::seconds(1));

        let incl = weekly_tally_at(&pool, &inclusive, now()).unwrap();
        assert_eq!(incl.tally.total_for("edge"), Some(10));
        assert_eq!(incl.tally.total_for("outside"), None);

        let excl = weekly_tally_at(&pool, &exclusive, now()).unwrap();
        assert!(excl.tally.is_empty());
        assert_eq!(excl.winner(), Winner::NoOne);
    }

    #[test]
    fn test_moving_claim_out_of_window_drops_it() {
        let pool = init_memory_pool().unwrap();
        let chore_id = seed(&pool);
        let window = TallyWindow::default();
        let a = claim_at(&pool, chore_id, "A", now() - Duration::days(1));
        claim_at(&pool, chore_id, "B", now() - Duration::days(1));
        assert_eq!(weekly_tally_at(&pool, &window, now()).unwrap().winner(), Winner::NoOne);

        let mut update = ClaimUpdate::from_claim(&a);
        update.completed_at = now() - Duration::days(30);
        claim::update_claim(&pool, a.id, &update).unwrap();

        let weekly = weekly_tally_at(&pool, &window, now()).unwrap();
        assert_eq!(weekly.tally.total_for("A"), None);
        assert_eq!(weekly.winner(), Winner::Person("B".to_string()));
    }

    #[test]
    fn test_value_override_changes_weight() {
        let pool = init_memory_pool().unwrap();
        let chore_id = seed(&pool);
        let window = TallyWindow::default();
        let a = claim_at(&pool, chore_id, "A", now() - Duration::hours(3));
        claim_at(&pool, chore_id, "B", now() - Duration::hours(2));

        let mut update = ClaimUpdate::from_claim(&a);
        update.value = 11;
        claim::update_claim(&pool, a.id, &update).unwrap();

        let weekly = weekly_tally_at(&pool, &window, now()).unwrap();
        assert_eq!(weekly.tally.total_for("A"), Some(11));
        assert_eq!(weekly.winner().person(), Some("A"));
    }

    #[test]
    fn test_overridden_huge_values_still_tally() {
        let pool = init_memory_pool().unwrap();
        let chore_id = seed(&pool);
        for _ in 0..2 {
            let recorded = claim_at(&pool, chore_id, "ana", now() - Duration::hours(1));
            let mut update = ClaimUpdate::from_claim(&recorded);
            update.value = i64::MAX;
            claim::update_claim(&pool, recorded.id, &update).unwrap();
        }

        let weekly = weekly_tally_at(&pool, &TallyWindow::default(), now()).unwrap();
        assert_eq!(weekly.tally.total_for("ana"), Some(i64::MAX));
        assert_eq!(weekly.winner().person(), Some("ana"));
    }

    #[test]
    fn test_deleted_claim_leaves_tally() {
        let pool = init_memory_pool().unwrap();
        let chore_id = seed(&pool);
        let window = TallyWindow::default();
        let a = claim_at(&pool, chore_id, "A", now() - Duration::days(1));

        claim::delete_claim(&pool, a.id).unwrap();

        let weekly = weekly_tally_at(&pool, &window, now()).unwrap();
        assert!(weekly.claims.is_empty());
        assert!(weekly.tally.is_empty());
    }
}
