use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};

use castle_fic::config::EngineConfig;
use castle_fic::engine::{Output, OutputBlock};
use castle_fic::world::validate_world;
use castle_fic::{GameState, Turn, load_world_from_file};

#[derive(Parser)]
#[command(name = "castle_fic")]
#[command(about = "Explore, fight and survive a text adventure world")]
#[command(version)]
struct Cli {
    /// World file (TOML, or JSON with a .json extension)
    #[arg(default_value = "worlds/castle.toml")]
    world: PathBuf,

    /// Where `save` and `load` keep the game
    #[arg(short, long, default_value = "savegame.json")]
    save: PathBuf,

    /// Fixed seed for combat rolls
    #[arg(long)]
    seed: Option<u64>,

    /// Verbose logging (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    let base_level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    builder.filter_level(base_level);
    // RUST_LOG wins over -v
    builder.parse_env("RUST_LOG");
    builder.init();
}

fn flush_output(out: Output) {
    let mut printed_anything = false;
    let mut started_events = false;

    for block in out.blocks {
        match block {
            OutputBlock::Title(t) => {
                println!("\n{}", t);
                printed_anything = true;
            }
            OutputBlock::Text(line) | OutputBlock::Status(line) => {
                println!("{}", line);
                printed_anything = true;
            }
            OutputBlock::Event(ev) => {
                if !started_events {
                    if printed_anything {
                        println!();
                    }
                    started_events = true;
                }
                println!("{}", ev);
                printed_anything = true;
            }
            OutputBlock::Exits(exits) => {
                println!("{}", exits);
                printed_anything = true;
            }
        }
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let world = match load_world_from_file(&cli.world) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Failed to load world file '{}': {e}", cli.world.display());
            std::process::exit(1);
        }
    };

    for problem in validate_world(&world) {
        warn!("world check: {}", problem.message);
    }

    let mut config = EngineConfig::default().with_save_path(cli.save);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    info!("save file: {}", config.save_path.display());

    let mut game = GameState::new(world, config);
    flush_output(game.initialize());
    if game.outcome().is_some() {
        return Ok(());
    }

    let stdin = io::stdin();

    loop {
        print!("\n> ");
        io::stdout().flush()?;

        let mut input = String::new();
        let bytes_read = stdin.read_line(&mut input)?;
        if bytes_read == 0 {
            println!("\nFarewell, adventurer.");
            break;
        }

        let (out, turn) = game.step(&input);
        flush_output(out);

        match turn {
            Turn::Continue => {}
            Turn::Quit | Turn::Over(_) => break,
        }
    }

    Ok(())
}
