//! Validate content files
//!
//! Loads the rules, the archetype catalog, every map and every scenario, then
//! starts each scenario's battle to catch spawn errors the loaders can't see.

use anyhow::{Context, Result, bail};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use tactics_core::Battle;

use crate::utils;

/// Load every content file and start each scenario
#[derive(Parser, Debug)]
pub struct CheckContent {
    /// Custom content directory (defaults to the bundled data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

impl CheckContent {
    pub fn execute(self) -> Result<()> {
        let factory = utils::content_factory(self.data_dir)?;
        println!(
            "{} {}",
            style("Content:").bold().cyan(),
            factory.data_dir().display()
        );

        let config = factory.load_config()?;
        ok(&format!(
            "rules (tie break {}, max {} enemies)",
            config.tie_break, config.max_enemies
        ));
        let catalog = factory.load_archetypes()?;
        ok(&format!("archetypes ({} templates)", catalog.iter().count()));

        let mut failures = 0;
        for name in factory.map_names()? {
            tracing::debug!(map = %name, "loading map");
            match factory.load_map(&name) {
                Ok(layout) => {
                    let dims = layout.dimensions();
                    ok(&format!("map {name} ({}x{})", dims.width, dims.height));
                }
                Err(err) => {
                    failures += 1;
                    fail(&format!("map {name}: {err:#}"));
                }
            }
        }

        for name in factory.scenario_names()? {
            tracing::debug!(scenario = %name, "starting scenario");
            let started = factory
                .build_setup(&name)
                .and_then(|setup| Battle::start(setup).context("battle refused to start"));
            match started {
                Ok(battle) => ok(&format!(
                    "scenario {name} ({} enemies, seed {})",
                    battle.field().enemy_count(),
                    battle.seed()
                )),
                Err(err) => {
                    failures += 1;
                    fail(&format!("scenario {name}: {err:#}"));
                }
            }
        }

        if failures > 0 {
            bail!("{failures} content file(s) failed validation");
        }
        println!("{}", style("All content valid").bold().green());
        Ok(())
    }
}

fn ok(message: &str) {
    println!("  {} {}", style("✓").green().bold(), message);
}

fn fail(message: &str) {
    eprintln!("  {} {}", style("✗").red().bold(), message);
}
