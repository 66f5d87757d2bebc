//! Headless battle simulation
//!
//! Plays either a bundled scenario or a generated location encounter with a
//! built-in hero provider and prints the resulting combat log.

use anyhow::{Context, Result, bail};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use tactics_core::Position;
use tactics_runtime::{
    AutoHero, BattleSession, EncounterGenerator, EndTurnProvider, HeroRecord, Location,
    SessionReport, TalentKind,
};

use crate::utils;

/// Play a scenario or location headlessly
#[derive(Parser, Debug)]
pub struct Simulate {
    /// Scenario name under the content directory (e.g. ambush)
    #[arg(value_name = "SCENARIO", required_unless_present = "location")]
    scenario: Option<String>,

    /// Generate an encounter for a world-map location instead (e.g. "Weathertop")
    #[arg(short, long, value_name = "NAME", conflicts_with = "scenario")]
    location: Option<String>,

    /// Battle seed; defaults to the scenario's own seed, or 0 for locations
    #[arg(short, long)]
    seed: Option<u64>,

    /// Override the hero's starting tile for scenarios, as x,y
    #[arg(long, value_name = "X,Y", value_parser = utils::parse_position)]
    hero_start: Option<Position>,

    /// Talent the hero spends its starting point on (location runs only)
    #[arg(short, long, value_name = "TALENT", value_parser = utils::parse_talent)]
    talent: Option<TalentKind>,

    /// How the hero picks intents
    #[arg(long, value_enum, default_value = "auto")]
    hero: HeroMode,

    /// Custom content directory (defaults to the bundled data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum HeroMode {
    /// Attack adjacent enemies, otherwise close in
    Auto,
    /// End every turn without acting
    Wait,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum OutputFormat {
    /// Narrated combat log with a summary line
    Text,
    /// Battle result and step log as JSON
    Json,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let report = match (&self.location, &self.scenario) {
            (Some(name), _) => self.run_location(name)?,
            (None, Some(name)) => self.run_scenario(name)?,
            (None, None) => bail!("Either a scenario or --location is required"),
        };

        match self.format {
            OutputFormat::Text => utils::print_report(&report),
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "result": report.result,
                    "rounds": report.rounds,
                    "log": report.log,
                });
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
        }
        Ok(())
    }

    fn run_scenario(&self, name: &str) -> Result<SessionReport> {
        let factory = utils::content_factory(self.data_dir.clone())?;
        let mut setup = factory
            .build_setup(name)
            .with_context(|| format!("Failed to build scenario '{name}'"))?;
        if let Some(seed) = self.seed {
            setup.seed = seed;
        }
        if let Some(start) = self.hero_start {
            setup.hero.position = start;
        }
        if self.talent.is_some() {
            bail!("--talent only applies to --location runs");
        }

        println!(
            "{} {} (seed {})",
            style("Scenario:").bold().cyan(),
            name,
            setup.seed
        );
        let mut hero = HeroRecord::with_stats(setup.hero.name.clone(), setup.hero.stats);
        self.play(&mut hero, |session, provider| session.run(setup, provider))
    }

    fn run_location(&self, name: &str) -> Result<SessionReport> {
        let location = Location::find(name).with_context(|| {
            format!("Unknown location '{name}'. Run `cargo xtask locations` for the list")
        })?;
        let factory = utils::content_factory(self.data_dir.clone())?;
        let generator = EncounterGenerator::default()
            .with_catalog(factory.load_archetypes()?)
            .with_config(factory.load_config()?);
        let seed = self.seed.unwrap_or(0);

        let mut hero = HeroRecord::new("Aldric");
        if let Some(talent) = self.talent {
            hero.acquire_talent(talent)?;
        }

        println!(
            "{} {} (danger {}, seed {})",
            style("Location:").bold().cyan(),
            location.name,
            location.difficulty,
            seed
        );
        self.play(&mut hero, |session, provider| {
            session.run_encounter(&generator, &location, seed, provider)
        })
    }

    fn play<F>(&self, hero: &mut HeroRecord, run: F) -> Result<SessionReport>
    where
        F: FnOnce(
            &mut BattleSession<'_>,
            &mut dyn tactics_runtime::IntentProvider,
        ) -> tactics_runtime::Result<SessionReport>,
    {
        let mut session = BattleSession::new(hero);
        let report = match self.hero {
            HeroMode::Auto => run(&mut session, &mut AutoHero),
            HeroMode::Wait => run(&mut session, &mut EndTurnProvider),
        }?;
        Ok(report)
    }
}
