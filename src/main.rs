//! Monopoly engine - command-line driver
//!
//! Runs seeded self-play games between random controllers, for watching
//! the rules in action and for profiling the engine.

use anyhow::Context;
use clap::{Parser, Subcommand};
use monopoly_engine::{
    core::PlayerId,
    events::EventLog,
    game::{
        compute_state_hash, format_hash, GameConfig, GameEndReason, GameLoop, GameResult, GameState,
        OutputFormat, PlayerController, RandomController, VerbosityLevel,
    },
};
use std::path::PathBuf;
use std::time::Instant;

/// Verbosity level for game output (accepts names or numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

#[derive(Parser)]
#[command(name = "monopoly")]
#[command(about = "Monopoly rules engine - seeded self-play and profiling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game between random controllers
    Simulate {
        /// Number of seats (2-8)
        #[arg(long, default_value_t = 4)]
        players: usize,

        /// Seed for dice, decks and controllers
        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(long, default_value_t = 1500)]
        starting_money: i32,

        /// Disable the Free Parking pot house rule
        #[arg(long)]
        no_pot: bool,

        /// Load table rules from a JSON config (overrides the flags above)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Stop after this many turns without a winner
        #[arg(long, default_value_t = 1000)]
        max_turns: u32,

        /// Output verbosity: silent/0, minimal/1, normal/2, verbose/3
        #[arg(long, default_value = "normal")]
        verbosity: VerbosityArg,

        /// Narrate as JSON lines instead of text
        #[arg(long)]
        json: bool,

        /// Write the final snapshot to this file
        #[arg(long, value_name = "FILE")]
        snapshot_output: Option<PathBuf>,
    },

    /// Run many silent games in parallel and report throughput
    Profile {
        #[arg(long, default_value_t = 200)]
        games: u32,

        #[arg(long, default_value_t = 4)]
        players: usize,

        /// Seed of the first game; game i uses seed + i
        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(long, default_value_t = 1000)]
        max_turns: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            players,
            seed,
            starting_money,
            no_pot,
            config,
            max_turns,
            verbosity,
            json,
            snapshot_output,
        } => {
            let config = match config {
                Some(path) => {
                    let text = std::fs::read_to_string(&path)
                        .with_context(|| format!("reading config {}", path.display()))?;
                    GameConfig::from_json(&text)?
                }
                None => GameConfig::with_player_count(players)
                    .with_seed(seed)
                    .with_starting_money(starting_money)
                    .with_free_parking_pot(!no_pot),
            };
            let format = if json { OutputFormat::Json } else { OutputFormat::Text };
            simulate(config, max_turns, verbosity.0, format, snapshot_output)
        }
        Commands::Profile {
            games,
            players,
            seed,
            max_turns,
        } => profile(games, players, seed, max_turns).await,
    }
}

fn random_seats(count: usize, seed: u64) -> Vec<Box<dyn PlayerController>> {
    (0..count)
        .map(|seat| {
            Box::new(RandomController::with_seed(
                PlayerId::new(seat as u32),
                seed.wrapping_add(1000 + seat as u64),
            )) as Box<dyn PlayerController>
        })
        .collect()
}

fn simulate(
    config: GameConfig,
    max_turns: u32,
    verbosity: VerbosityLevel,
    format: OutputFormat,
    snapshot_output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let seed = config.seed;
    let mut game = GameState::new(config)?;
    game.logger.set_output_format(format);
    let mut controllers = random_seats(game.players.len(), seed);

    let result = GameLoop::new(&mut game)
        .with_max_turns(max_turns)
        .with_verbosity(verbosity)
        .run_game(&mut controllers)?;

    if verbosity >= VerbosityLevel::Minimal {
        print_result(&game, &result);
    }

    if let Some(path) = snapshot_output {
        game.snapshot()
            .save_to_file(&path)
            .with_context(|| format!("writing snapshot to {}", path.display()))?;
        println!("Snapshot saved to {}", path.display());
    }
    Ok(())
}

fn print_result(game: &GameState, result: &GameResult) {
    println!("=== Game Over ===");
    match &result.end_reason {
        GameEndReason::LastPlayerStanding(winner) => match game.player(*winner) {
            Ok(player) => println!("Winner: {}", player.name),
            Err(_) => println!("Winner: {winner}"),
        },
        GameEndReason::TurnLimit => println!("No winner: turn limit reached"),
    }
    println!("Turns: {}", result.turns_played);
    println!("Commands: {}", result.actions_taken);
    println!("Events: {}", game.events.recorded());
    for player in &game.players {
        let status = if player.bankrupt { " (bankrupt)" } else { "" };
        println!(
            "  {:<12} ${:>5}  {} properties{}",
            player.name,
            player.money,
            player.owned.len(),
            status
        );
    }
    println!("State hash: {}", format_hash(compute_state_hash(game)));
}

/// One silent game with the event log switched off
fn run_quiet_game(players: usize, seed: u64, max_turns: u32) -> monopoly_engine::Result<(GameResult, usize)> {
    let mut game = GameState::new(GameConfig::with_player_count(players).with_seed(seed))?;
    game.events = EventLog::disabled();
    let mut controllers = random_seats(players, seed);
    let result = GameLoop::new(&mut game)
        .with_max_turns(max_turns)
        .with_verbosity(VerbosityLevel::Silent)
        .run_game(&mut controllers)?;
    Ok((result, game.events.recorded()))
}

async fn profile(games: u32, players: usize, seed: u64, max_turns: u32) -> anyhow::Result<()> {
    println!("Profiling {games} games of {players} players (seeds {seed}..)");
    let start = Instant::now();

    let handles: Vec<_> = (0..games)
        .map(|i| {
            let game_seed = seed + i as u64;
            tokio::task::spawn_blocking(move || run_quiet_game(players, game_seed, max_turns))
        })
        .collect();

    let mut turns = 0u64;
    let mut events = 0u64;
    let mut finished = 0u32;
    for handle in handles {
        let (result, recorded) = handle.await.context("game task panicked")??;
        turns += result.turns_played as u64;
        events += recorded as u64;
        if result.winner.is_some() {
            finished += 1;
        }
    }

    let elapsed = start.elapsed().as_secs_f64();
    println!("Completed in {elapsed:.2}s");
    println!("  {finished}/{games} games reached a winner");
    println!("  {:.1} games/sec", games as f64 / elapsed);
    println!("  {:.0} turns/sec", turns as f64 / elapsed);
    println!("  {:.0} events/sec", events as f64 / elapsed);
    Ok(())
}
