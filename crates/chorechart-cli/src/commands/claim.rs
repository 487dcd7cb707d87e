//! Claim commands.

use anyhow::Result;
use chorechart_core::claim::{self, NewClaim};
use chorechart_core::{input, tally, Config};
use clap::{Args, Subcommand};
use colored::Colorize;

use crate::output;

#[derive(Subcommand)]
pub enum ClaimCommands {
    /// Record that someone completed a chore
    Add(AddClaimArgs),

    /// List claims in the current window
    List {
        /// Include claims outside the window
        #[arg(long)]
        all: bool,
    },

    /// Permanently delete a claim
    Remove {
        /// Claim ID
        id: i64,
    },
}

#[derive(Args)]
pub struct AddClaimArgs {
    /// Chore ID
    pub chore_id: i64,

    /// Person credited with the chore
    pub completed_by: String,

    /// Completion time (2024-03-05, 2024-03-05T18:30 or RFC 3339); defaults to now
    #[arg(long)]
    pub at: Option<String>,

    /// Free-form note
    #[arg(short, long)]
    pub note: Option<String>,

    /// Who is recording the claim, if not the person credited
    #[arg(long, env = "CHORECHART_RECORDED_BY")]
    pub recorded_by: Option<String>,
}

pub fn execute(cmd: ClaimCommands, config: &Config) -> Result<()> {
    let pool = super::open_pool(config)?;

    match cmd {
        ClaimCommands::Add(args) => {
            let mut new_claim = NewClaim::new(args.chore_id, args.completed_by);
            if let Some(at) = args.at.as_deref() {
                new_claim = new_claim.completed_at(input::completed_at(at)?);
            }
            if let Some(note) = args.note {
                new_claim = new_claim.note(note);
            }
            if let Some(who) = args.recorded_by {
                new_claim = new_claim.created_by(who);
            }

            let created = claim::create_claim(&pool, &new_claim)?;
            println!(
                "{} {} claimed {} for {} points ({})",
                "✓".green().bold(),
                created.completed_by.cyan(),
                created.chore_name,
                created.value,
                format!("#{}", created.id).dimmed()
            );
        }

        ClaimCommands::List { all } => {
            let claims = if all {
                claim::list_claims(&pool)?
            } else {
                tally::weekly_tally(&pool, &config.tally)?.claims
            };
            output::print_claims_table(&claims);
        }

        ClaimCommands::Remove { id } => {
            claim::delete_claim(&pool, id)?;
            println!("{} Deleted claim {}", "✓".green().bold(), format!("#{}", id).dimmed());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::open_pool;
    use chorechart_core::chore::{self, ChoreInput};

    #[test]
    fn test_add_records_who_logged_it() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.database.path = dir.path().join("house.db");
        let dishes = chore::create_chore(&open_pool(&config).unwrap(), &ChoreInput::new("Dishes", 3)).unwrap();

        let add = ClaimCommands::Add(AddClaimArgs {
            chore_id: dishes.id,
            completed_by: "ana".to_string(),
            at: Some("2024-03-05T18:30".to_string()),
            note: None,
            recorded_by: Some("ben".to_string()),
        });
        execute(add, &config).unwrap();

        let pool = open_pool(&config).unwrap();
        let claims = claim::list_claims(&pool).unwrap();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].completed_by, "ana");
        assert_eq!(claims[0].created_by, "ben");
    }
}
