//! List world-map locations

use anyhow::Result;
use clap::Parser;
use console::style;

use tactics_runtime::{EncounterGenerator, Location};

/// List world-map locations
#[derive(Parser, Debug)]
pub struct Locations {
    /// Also show the enemy count each location fields for this seed
    #[arg(short, long)]
    seed: Option<u64>,
}

impl Locations {
    pub fn execute(self) -> Result<()> {
        let generator = EncounterGenerator::default();
        println!("{}", style("=== World Map ===").bold().green());
        for location in Location::catalog() {
            let danger = "*".repeat(location.difficulty as usize);
            print!(
                "  {:<14} {:<6} {}",
                style(&location.name).bold(),
                style(danger).yellow(),
                location.description
            );
            if let Some(seed) = self.seed {
                print!(
                    " {}",
                    style(format!("({} enemies)", generator.enemy_count(&location, seed))).dim()
                );
            }
            println!();
        }
        Ok(())
    }
}
