//! Leaderboard command.

use anyhow::Result;
use chorechart_core::{tally, Config};
use clap::Args;

use crate::output;

#[derive(Args)]
pub struct TallyArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: TallyArgs, config: &Config) -> Result<()> {
    let pool = super::open_pool(config)?;
    let weekly = tally::weekly_tally(&pool, &config.tally)?;

    if args.json {
        let summary = serde_json::json!({
            "as_of": weekly.as_of,
            "cutoff": weekly.cutoff,
            "days": weekly.window.days,
            "boundary": weekly.window.boundary,
            "totals": weekly.tally.totals(),
            "max_value": weekly.tally.max_value(),
            "leaders": weekly.tally.leaders(),
            "winner": weekly.winner(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        output::print_tally(&weekly);
    }

    Ok(())
}
