#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates, plays and prints portal maze levels.

mod render;

use std::{fs, path::PathBuf, time::Duration};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use portal_maze_core::{Command, Direction, Event, LevelNumber, ObstaclePolicy};
use portal_maze_system_generation::{GenerationEvent, GeneratorConfig, LevelGenerator};
use portal_maze_world::{self as world, query, Level};

/// Generates a solvable portal maze level and optionally plays a move script.
#[derive(Debug, Parser)]
#[command(name = "portal-maze", version)]
struct Args {
    /// Level to generate.
    #[arg(long, default_value_t = LevelNumber::FIRST.get())]
    level: u32,
    /// TOML file holding generator settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for the carving random source.
    #[arg(long)]
    seed: Option<u64>,
    /// Grid column count.
    #[arg(long)]
    columns: Option<u32>,
    /// Grid row count.
    #[arg(long)]
    rows: Option<u32>,
    /// Attempts made before giving up.
    #[arg(long)]
    attempts: Option<u32>,
    /// How reachability checks treat patrolling obstacles.
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,
    /// Moves to play, one `U`, `D`, `L` or `R` per step.
    #[arg(long, default_value = "")]
    moves: String,
    /// Simulation ticks of 1/60 s applied after the moves.
    #[arg(long, default_value_t = 0)]
    ticks: u32,
    /// Generates the following level once the exit is reached.
    #[arg(long)]
    advance: bool,
    /// Prints generation and play events to stderr.
    #[arg(long)]
    verbose: bool,
    /// Prints a JSON snapshot instead of the text map.
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    Patrol,
    Current,
}

impl From<PolicyArg> for ObstaclePolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::Patrol => ObstaclePolicy::AvoidPatrolPath,
            PolicyArg::Current => ObstaclePolicy::AvoidCurrentPosition,
        }
    }
}

const TICK: Duration = Duration::from_nanos(16_666_667);

/// Entry point for the portal maze command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let config = resolve_config(args)?;
    let script = parse_moves(&args.moves)?;
    let mut generator = LevelGenerator::new(config).context("invalid generator settings")?;
    if args.verbose {
        let config = generator.config();
        eprintln!(
            "generator: {}x{} grid, seed {}, {} attempt(s), {:?}",
            config.columns,
            config.rows,
            config.seed,
            config.max_attempts,
            config.obstacle_policy
        );
    }

    let mut level = generate(&mut generator, LevelNumber::new(args.level), args.verbose)?;

    let mut events = Vec::new();
    for direction in script {
        world::apply(&mut level, Command::Move { direction }, &mut events);
    }
    for _ in 0..args.ticks {
        world::apply(&mut level, Command::Tick { dt: TICK }, &mut events);
    }
    if args.verbose {
        report_play(&events);
    }

    if args.advance && query::is_complete(&level) {
        let next = query::level_number(&level).advance();
        level = generate(&mut generator, next, args.verbose)?;
    }

    let snapshot = query::snapshot(&level);
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&snapshot).context("failed to encode snapshot")?
        );
    } else {
        println!("level {}", snapshot.level.get());
        print!("{}", render::ascii(&snapshot));
        if snapshot.completed {
            println!("exit reached");
        }
    }

    Ok(())
}

fn resolve_config(args: &Args) -> Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            GeneratorConfig::from_toml_str(&contents)
                .with_context(|| format!("failed to load {}", path.display()))?
        }
        None => GeneratorConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(columns) = args.columns {
        config.columns = columns;
    }
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(attempts) = args.attempts {
        config.max_attempts = attempts;
    }
    if let Some(policy) = args.policy {
        config.obstacle_policy = policy.into();
    }

    Ok(config)
}

fn parse_moves(script: &str) -> Result<Vec<Direction>> {
    script
        .chars()
        .filter(|letter| !letter.is_whitespace())
        .map(|letter| match Direction::from_letter(letter) {
            Some(direction) => Ok(direction),
            None => bail!("unknown move `{letter}`; expected U, D, L or R"),
        })
        .collect()
}

fn generate(
    generator: &mut LevelGenerator,
    level: LevelNumber,
    verbose: bool,
) -> Result<Level> {
    let mut events = Vec::new();
    let result = generator.generate(level, &mut events);
    if verbose {
        report_generation(&events);
    }
    Ok(result?)
}

fn report_generation(events: &[GenerationEvent]) {
    for event in events {
        match event {
            GenerationEvent::AttemptRejected {
                level,
                attempt,
                reason,
            } => eprintln!(
                "level {}: attempt {attempt} rejected ({reason:?})",
                level.get()
            ),
            GenerationEvent::LevelAccepted {
                level,
                attempts,
                path_length,
            } => eprintln!(
                "level {}: accepted after {attempts} attempt(s), path length {path_length}",
                level.get()
            ),
        }
    }
}

fn report_play(events: &[Event]) {
    for event in events {
        match event {
            Event::TimeAdvanced { .. } => {}
            other => eprintln!("{other:?}"),
        }
    }
}
