//! Terminal output formatting.

use chorechart_core::chore::Chore;
use chorechart_core::claim::Claim;
use chorechart_core::tally::{WeeklyTally, Winner};
use colored::Colorize;

/// Print chores as a table.
pub fn print_chores_table(chores: &[Chore]) {
    if chores.is_empty() {
        println!("{}", "No chores found.".dimmed());
        return;
    }

    println!("{:<6} {:<28} {:>6}  {:<16}", "ID", "Name", "Points", "Category");
    println!("{}", "─".repeat(60));

    for chore in chores {
        println!(
            "{:<6} {:<28} {:>6}  {:<16}",
            chore.id,
            truncate(&chore.name, 26),
            chore.value,
            chore.category.as_deref().unwrap_or("-")
        );
    }
}

/// Print claims as a table.
pub fn print_claims_table(claims: &[Claim]) {
    if claims.is_empty() {
        println!("{}", "No claims found.".dimmed());
        return;
    }

    println!(
        "{:<6} {:<17} {:<16} {:<24} {:>6}",
        "ID", "Completed (UTC)", "By", "Chore", "Points"
    );
    println!("{}", "─".repeat(73));

    for claim in claims {
        println!(
            "{:<6} {:<17} {:<16} {:<24} {:>6}",
            claim.id,
            claim.completed_at.format("%Y-%m-%d %H:%M").to_string(),
            truncate(&claim.completed_by, 14),
            truncate(&claim.chore_name, 22),
            claim.value
        );
    }
}

/// Print the leaderboard and the winner.
pub fn print_tally(weekly: &WeeklyTally) {
    println!(
        "{} {}",
        "Leaderboard".cyan().bold(),
        format!(
            "(last {} days, since {} UTC)",
            weekly.window.days,
            weekly.cutoff.format("%Y-%m-%d %H:%M")
        )
        .dimmed()
    );
    println!();

    let standings = weekly.tally.standings();
    if standings.is_empty() {
        println!("{}", "No claims in this window.".dimmed());
    }
    let max = weekly.tally.max_value();
    for standing in &standings {
        let line = format!("  {:<20} {:>6}", standing.person, standing.points);
        if Some(standing.points) == max {
            println!("{}", line.bold());
        } else {
            println!("{}", line);
        }
    }

    println!();
    match weekly.winner() {
        Winner::Person(name) => println!("Winner: {}", name.green().bold()),
        Winner::NoOne => println!("Winner: {}", Winner::NoOne.to_string().dimmed()),
    }
}

/// Truncate a string to max length.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
