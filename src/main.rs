//! Terminal host for the battle arena.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use battle_arena::mcp_interface::*;
use battle_arena::{
    ArenaConfig, BattleEngine, BattleEngineError, Difficulty, GamePhase, JsonFileStatsStore,
    PlayerAction, StatsStore,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "battle-arena")]
#[command(about = "One-on-one creature battles in the terminal")]
struct Args {
    /// RON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible battle
    #[arg(long)]
    seed: Option<u64>,

    /// Opponent difficulty: easy, normal or hard
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Where the win/loss record is kept
    #[arg(long)]
    stats: Option<PathBuf>,
}

const HELP: &str = "Commands:
  move <name>     attack with one of your moves
  item potion     restore up to 50 HP
  item full       restore all HP
  status          show both combatants and your items
  log             show the battle log so far
  help            show this list
  quit            leave the arena";

/// Prints `message` and reads one trimmed line. `None` on end of input.
fn prompt(input: &mut impl BufRead, message: &str) -> io::Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn ask_difficulty(input: &mut impl BufRead) -> io::Result<Option<Difficulty>> {
    loop {
        let Some(answer) = prompt(input, "Choose a difficulty (easy/normal/hard): ")? else {
            return Ok(None);
        };
        match parse_difficulty(&answer) {
            Ok(difficulty) => return Ok(Some(difficulty)),
            Err(e) => println!("{}", e),
        }
    }
}

/// Starter selection. Returns false if the player left.
fn choose_starter(engine: &mut BattleEngine, input: &mut impl BufRead) -> io::Result<bool> {
    println!("\n{}", get_available_starters_display(engine));
    loop {
        let Some(answer) = prompt(input, "Choose your starter (id or name): ")? else {
            return Ok(false);
        };
        let chosen = resolve_starter(engine, &answer)
            .map_err(BattleEngineError::from)
            .and_then(|id| engine.choose_starter(id));
        match chosen {
            Ok(snapshot) => {
                println!();
                for line in &snapshot.log {
                    println!("{}", line);
                }
                return Ok(true);
            }
            Err(e) => println!("{}", e),
        }
    }
}

enum Flow {
    Continue,
    BattleOver,
    Quit,
}

fn handle_command(engine: &mut BattleEngine, stats: &JsonFileStatsStore, line: &str) -> Flow {
    let (command, args) = line.split_once(' ').unwrap_or((line, ""));
    let action = match command.to_lowercase().as_str() {
        "" => return Flow::Continue,
        "move" | "m" => PlayerAction::UseMove {
            move_name: args.trim().to_string(),
        },
        "item" | "i" => match parse_item(args) {
            Ok(item) => PlayerAction::UseItem { item },
            Err(e) => {
                println!("{}", e);
                return Flow::Continue;
            }
        },
        "status" | "s" => {
            println!("{}", get_battle_status_summary(engine));
            return Flow::Continue;
        }
        "log" => {
            if let Some(snapshot) = engine.snapshot() {
                print!("{}", display_log(&snapshot));
            }
            return Flow::Continue;
        }
        "help" | "h" | "?" => {
            println!("{}", HELP);
            return Flow::Continue;
        }
        "quit" | "q" | "exit" => return Flow::Quit,
        other => {
            println!("Unknown command '{}'. Type 'help' for a list.", other);
            return Flow::Continue;
        }
    };

    let report = match execute_player_action(engine, action) {
        Ok(report) => report,
        Err(e) => {
            println!("{}", e);
            return Flow::Continue;
        }
    };
    println!("{}", report.text());

    match report.final_tally() {
        Some(tally) => {
            match stats.save(&tally) {
                Ok(()) => tracing::info!(path = %stats.path().display(), "battle record saved"),
                Err(e) => tracing::warn!(error = %e, "could not save the battle record"),
            }
            print!("\n{}", display_tally(&tally));
            Flow::BattleOver
        }
        None => Flow::Continue,
    }
}

fn run(
    mut engine: BattleEngine,
    stats: JsonFileStatsStore,
    difficulty: Option<Difficulty>,
) -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("Welcome to the Battle Arena!");
    print!("{}", display_tally(engine.tally()));

    let difficulty = match difficulty {
        Some(d) => d,
        None => match ask_difficulty(&mut input)? {
            Some(d) => d,
            None => return Ok(()),
        },
    };
    if let Err(e) = engine.start_selection(difficulty) {
        println!("{}", e);
        return Ok(());
    }

    'session: loop {
        if !choose_starter(&mut engine, &mut input)? {
            break;
        }
        println!("Type 'help' for commands.");

        while matches!(engine.phase(), GamePhase::PlayerTurn | GamePhase::OpponentTurn) {
            let Some(line) = prompt(&mut input, "\n> ")? else {
                break 'session;
            };
            match handle_command(&mut engine, &stats, &line) {
                Flow::Continue => {}
                Flow::BattleOver => break,
                Flow::Quit => break 'session,
            }
        }

        let again = prompt(&mut input, "\nPlay again? (y/n): ")?;
        if !matches!(again.as_deref(), Some("y") | Some("Y") | Some("yes")) {
            break;
        }
        if let Err(e) = engine.reset() {
            println!("{}", e);
            break;
        }
    }

    println!("Thanks for playing!");
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ArenaConfig::load(path)?,
        None => ArenaConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(path) = args.stats {
        config.stats_path = path;
    }

    let stats = JsonFileStatsStore::new(config.stats_path.clone());
    let tally = match stats.load() {
        Ok(tally) => tally,
        Err(e) => {
            tracing::warn!(error = %e, "starting from an empty battle record");
            Default::default()
        }
    };

    let engine = BattleEngine::from_config(&config, tally)?;
    run(engine, stats, args.difficulty)?;
    Ok(())
}
