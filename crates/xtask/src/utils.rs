//! Utility functions for xtask commands

use anyhow::{Result, bail};
use console::style;
use std::path::PathBuf;

use tactics_content::{ContentFactory, bundled_data_dir};
use tactics_core::{BattleOutcome, Position};
use tactics_runtime::{SessionReport, TalentKind};

/// Content factory over `data_dir`, or the bundled data when none is given.
pub fn content_factory(data_dir: Option<PathBuf>) -> Result<ContentFactory> {
    let dir = data_dir.unwrap_or_else(bundled_data_dir);
    if !dir.is_dir() {
        bail!("Content directory not found: {}", dir.display());
    }
    Ok(ContentFactory::new(dir))
}

/// Parses `x,y` into a position.
pub fn parse_position(raw: &str) -> Result<Position, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{raw}'"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y: {e}"))?;
    Ok(Position::new(x, y))
}

/// Parses a talent name such as `blade_mastery`.
pub fn parse_talent(raw: &str) -> Result<TalentKind, String> {
    raw.parse().map_err(|_| {
        let known: Vec<&str> = TalentKind::ALL.iter().map(|kind| kind.as_ref()).collect();
        format!("unknown talent '{raw}', expected one of: {}", known.join(", "))
    })
}

/// Prints the narration followed by a one-line summary.
pub fn print_report(report: &SessionReport) {
    for line in &report.narration {
        println!("  {line}");
    }
    println!();

    let outcome = match report.result.outcome {
        BattleOutcome::Victory => style("VICTORY").bold().green(),
        BattleOutcome::Defeat => style("DEFEAT").bold().red(),
    };
    println!(
        "{} after {} rounds, {} steps",
        outcome,
        report.rounds,
        report.log.len()
    );
    if let Some(rewards) = &report.result.rewards {
        println!(
            "{} {} XP, {} enemies defeated, {} items",
            style("Rewards:").bold().cyan(),
            rewards.experience,
            rewards.enemies_defeated,
            rewards.loot.len()
        );
    }
    for id in &report.progress.equipped {
        println!("{} {id}", style("Equipped:").bold().cyan());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_parse_with_spaces() {
        assert_eq!(parse_position("3, 4"), Ok(Position::new(3, 4)));
        assert!(parse_position("3").is_err());
        assert!(parse_position("a,1").is_err());
    }

    #[test]
    fn talents_parse_by_snake_case_name() {
        assert_eq!(parse_talent("Shield_Wall"), Ok(TalentKind::ShieldWall));
        assert!(parse_talent("fireball").unwrap_err().contains("swift_foot"));
    }
}
