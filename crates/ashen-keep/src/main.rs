//! Ashen Keep
//!
//! Main entry point for the game.

mod console;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use ak_core::monster::EnemyType;
use ak_core::player::{Player, PlayerClass, initialize_player};
use ak_core::{Difficulty, Game, GameConfig, GameRng, SaveRequest};
use ak_save::{DEFAULT_SAVE_DIR, SaveStore};

use console::Console;

/// A turn-based combat RPG
#[derive(Parser, Debug)]
#[command(name = "ashen-keep")]
#[command(about = "Fight your way through five areas of the Ashen Keep", long_about = None)]
struct Args {
    /// Character name
    #[arg(short, long)]
    name: Option<String>,

    /// Character class (paladin, rogue, mage)
    #[arg(short, long)]
    class: Option<PlayerClass>,

    /// Difficulty (easy, normal, hard)
    #[arg(short, long, env = "GAME_DIFFICULTY", default_value = "normal")]
    difficulty: Difficulty,

    /// Enable silly random spell effects
    #[arg(
        long,
        env = "GAME_EASTER_EGGS",
        default_value = "true",
        action = ArgAction::Set,
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    easter_eggs: bool,

    /// Save file name inside the save directory
    #[arg(long)]
    save_file: Option<String>,

    /// Directory holding save files
    #[arg(long, default_value = DEFAULT_SAVE_DIR)]
    save_dir: PathBuf,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the load prompt and start a fresh character
    #[arg(long)]
    new_game: bool,

    /// Log filter, e.g. "debug" or "ak_core=trace". A number is read as a
    /// category mask: 1 errors, 2 combat, 4 debug, 8 jokes.
    #[arg(long, env = "GAME_LOG_LEVEL")]
    log_level: Option<String>,

    /// Debug: force every regular enemy to this type
    #[arg(long, env = "CMMO_ENEMY_TYPE", hide = true)]
    enemy_type: Option<EnemyType>,

    /// Debug: force enemy hit points
    #[arg(long, env = "CMMO_ENEMY_HP", hide = true)]
    enemy_hp: Option<i32>,
}

impl Args {
    fn config(&self) -> GameConfig {
        let mut config = GameConfig::default()
            .with_difficulty(self.difficulty)
            .with_easter_eggs(self.easter_eggs);
        config.enemy_type_override = self.enemy_type;
        config.enemy_hp_override = self.enemy_hp.filter(|hp| *hp > 0);
        config
    }

    fn store(&self) -> SaveStore {
        let store = SaveStore::new(&self.save_dir);
        match &self.save_file {
            Some(file) => store.with_file_name(file.clone()),
            None => store,
        }
    }
}

/// Turn a `--log-level` value into a filter directive
fn log_directive(level: &str) -> String {
    let Ok(mask) = level.trim().parse::<u32>() else {
        return level.to_string();
    };
    let directive = match mask {
        0 => "off",
        m if m & 0x0c != 0 => "debug",
        m if m & 0x02 != 0 => "info",
        _ => "error",
    };
    directive.to_string()
}

fn init_logging(level: Option<&str>) {
    let requested = level.map(|l| (l, EnvFilter::try_new(log_directive(l))));
    let rejected = match &requested {
        Some((l, Err(_))) => Some(l.to_string()),
        _ => None,
    };

    let filter = requested
        .and_then(|(_, filter)| filter.ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Some(level) = rejected {
        tracing::warn!(level = %level, "ignoring unparseable log level");
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logging(args.log_level.as_deref());

    let config = args.config();
    let store = args.store();
    tracing::debug!(?config, dir = %store.dir().display(), "starting");

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout().lock());

    console.say("====================================")?;
    console.say("        Welcome to Ashen Keep")?;
    console.say("====================================")?;

    let Some(player) = choose_player(&args, &store, &mut console)? else {
        return Ok(());
    };

    let rng = match args.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };

    tracing::info!(seed = rng.seed(), "rng seeded");

    let mut game = Game::new(player, config, rng);
    run(&mut game, &store, &mut console)
}

/// Load a saved character or create a new one. `None` if input ran out.
fn choose_player<R: BufRead, W: Write>(
    args: &Args,
    store: &SaveStore,
    console: &mut Console<R, W>,
) -> io::Result<Option<Player>> {
    let name = match &args.name {
        Some(name) => name.clone(),
        None => match console.ask("Enter your name, adventurer: ")? {
            Some(name) => name,
            None => return Ok(None),
        },
    };

    if !args.new_game && store.exists(&name) {
        match console.confirm("A saved game exists. Load it?")? {
            None => return Ok(None),
            Some(true) => match store.load(&name) {
                Ok(player) => {
                    console.say(format!(
                        "Game loaded successfully for {} (Level {})!",
                        player.name, player.level
                    ))?;
                    return Ok(Some(player));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "load failed");
                    console.say(format!("Could not load save: {e}"))?;
                    console.say("Starting a new game instead.")?;
                }
            },
            Some(false) => {}
        }
    }

    let class = match args.class {
        Some(class) => class,
        None => match choose_class(console)? {
            Some(class) => class,
            None => return Ok(None),
        },
    };

    console.say(format!("\nGreetings, {}! {}", name, class.blurb()))?;
    Ok(Some(initialize_player(name, class)))
}

fn choose_class<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> io::Result<Option<PlayerClass>> {
    console.say("Choose your class:")?;
    console.say("1. Paladin")?;
    console.say("2. Rogue")?;
    console.say("3. Mage")?;
    loop {
        let Some(answer) = console.ask("Enter choice (1-3): ")? else {
            return Ok(None);
        };
        match answer.parse::<i32>().ok().and_then(PlayerClass::from_choice) {
            Some(class) => return Ok(Some(class)),
            None => console.say("Invalid choice. Please enter 1, 2 or 3.")?,
        }
    }
}

fn run<R: BufRead, W: Write>(
    game: &mut Game,
    store: &SaveStore,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    loop {
        console.say_all(game.take_messages())?;
        if game.is_over() {
            return Ok(());
        }

        let prompt = game.prompt();
        let Some(choice) = console.choose(game.phase(), &prompt)? else {
            console.say("")?;
            console.say("Input closed. Goodbye!")?;
            return Ok(());
        };

        game.step(choice);

        if let Some(request) = game.take_save_request() {
            console.say_all(game.take_messages())?;
            persist(&game.player, store, request, console)?;
        }
    }
}

fn persist<R: BufRead, W: Write>(
    player: &Player,
    store: &SaveStore,
    request: SaveRequest,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    match (request, store.save(player)) {
        (SaveRequest::Manual, Ok(path)) => console.say(format!(
            "Game saved successfully for {} (Level {}) to {}",
            player.name,
            player.level,
            path.display()
        )),
        (SaveRequest::Manual, Err(e)) => console.say(format!("Failed to save game: {e}")),
        (SaveRequest::Auto, Ok(_)) => Ok(()),
        (SaveRequest::Auto, Err(e)) => {
            tracing::warn!(error = %e, "autosave failed");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easter_eggs_can_be_turned_off() {
        let args = Args::try_parse_from(["ashen-keep", "--easter-eggs", "false"]).unwrap();
        assert!(!args.easter_eggs);
        assert!(!args.config().easter_eggs);

        let args = Args::try_parse_from(["ashen-keep", "--easter-eggs", "1"]).unwrap();
        assert!(args.easter_eggs);
    }

    #[test]
    fn test_numeric_log_levels() {
        assert_eq!(log_directive("0"), "off");
        assert_eq!(log_directive("1"), "error");
        assert_eq!(log_directive("3"), "info");
        assert_eq!(log_directive("15"), "debug");
        assert_eq!(log_directive("ak_core=trace"), "ak_core=trace");
        assert!(EnvFilter::try_new(log_directive("15")).is_ok());
    }

    #[test]
    fn test_debug_overrides() {
        let args = Args::try_parse_from([
            "ashen-keep",
            "--enemy-type",
            "troll",
            "--enemy-hp",
            "0",
            "--difficulty",
            "hard",
        ])
        .unwrap();
        let config = args.config();
        assert_eq!(config.enemy_type_override, Some(EnemyType::Troll));
        assert_eq!(config.enemy_hp_override, None);
        assert_eq!(config.difficulty, Difficulty::Hard);
    }
}
