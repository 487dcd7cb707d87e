//! Chore catalog commands.

use anyhow::Result;
use chorechart_core::chore::{self, ChoreInput};
use chorechart_core::Config;
use clap::{Args, Subcommand};
use colored::Colorize;

use crate::output;

#[derive(Subcommand)]
pub enum ChoreCommands {
    /// List chores
    List,

    /// Add a chore
    Add(AddChoreArgs),

    /// Delete a chore that has no claims
    Remove {
        /// Chore ID
        id: i64,
    },
}

#[derive(Args)]
pub struct AddChoreArgs {
    /// Chore name
    pub name: String,

    /// Points earned per claim
    pub value: i64,

    /// Description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Category
    #[arg(short, long)]
    pub category: Option<String>,
}

pub fn execute(cmd: ChoreCommands, config: &Config) -> Result<()> {
    let pool = super::open_pool(config)?;

    match cmd {
        ChoreCommands::List => {
            let chores = chore::list_chores(&pool)?;
            output::print_chores_table(&chores);
        }

        ChoreCommands::Add(args) => {
            let mut input = ChoreInput::new(args.name, args.value);
            input.description = args.description;
            input.category = args.category;

            let created = chore::create_chore(&pool, &input)?;
            println!(
                "{} Created chore: {} worth {} ({})",
                "✓".green().bold(),
                created.name.cyan(),
                created.value,
                format!("#{}", created.id).dimmed()
            );
        }

        ChoreCommands::Remove { id } => {
            chore::delete_chore(&pool, id)?;
            println!("{} Deleted chore {}", "✓".green().bold(), format!("#{}", id).dimmed());
        }
    }

    Ok(())
}
