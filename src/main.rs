use fourten::bridge::CommandBridge;
use fourten::config::{ColorMode, Config};
use fourten::corpus::{Corpus, PuzzlePicker};
use fourten::session::Session;
use log::{debug, info};
use std::env;
use std::io;
use std::path::{Path, PathBuf};

/// Looked up in the working directory when `--config` is not given
const DEFAULT_CONFIG_FILE: &str = "fourten.toml";

fn usage(program: &str) {
    eprintln!("fourten - the 4=10 EVM bytecode puzzle");
    eprintln!();
    eprintln!("Usage: {} [options]", program);
    eprintln!("\nOptions:");
    eprintln!("  --config <file>   Read settings from a TOML file (default: ./{})", DEFAULT_CONFIG_FILE);
    eprintln!("  --corpus <file>   Puzzle corpus JSON file");
    eprintln!("  --seed <n>        Fixed seed for a repeatable puzzle order");
    eprintln!("  --no-color        Plain output");
    eprintln!("  -h, --help        Show this help message");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();

    let mut config_path = None;
    let mut corpus_path = None;
    let mut seed = None;
    let mut no_color = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "--corpus" | "--seed" if i + 1 >= args.len() => {
                eprintln!("Missing value for {}", args[i]);
                std::process::exit(1);
            }
            "--config" => {
                config_path = Some(PathBuf::from(&args[i + 1]));
                i += 1;
            }
            "--corpus" => {
                corpus_path = Some(PathBuf::from(&args[i + 1]));
                i += 1;
            }
            "--seed" => {
                match args[i + 1].parse::<u64>() {
                    Ok(value) => seed = Some(value),
                    Err(_) => {
                        eprintln!("Error: Invalid seed: {}", args[i + 1]);
                        std::process::exit(1);
                    }
                }
                i += 1;
            }
            "--no-color" => no_color = true,
            "-h" | "--help" => {
                usage(&args[0]);
                std::process::exit(0);
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                eprintln!("Try '{} -h' for help", args[0]);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let loaded = match config_path {
        Some(path) => Config::load(&path),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            Config::load(Path::new(DEFAULT_CONFIG_FILE))
        }
        None => Ok(Config::default()),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(path) = corpus_path {
        config.corpus = path;
    }
    if seed.is_some() {
        config.seed = seed;
    }
    if no_color {
        config.color = ColorMode::Never;
    }
    debug!("Effective config: {:?}", config);

    let corpus = match Corpus::load(&config.corpus) {
        Ok(corpus) => corpus,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("Point --corpus (or `corpus` in {}) at a puzzle file.", DEFAULT_CONFIG_FILE);
            std::process::exit(1);
        }
    };

    let picker = PuzzlePicker::from_seed(config.seed);
    if picker.is_predictable() {
        info!("Using fixed puzzle seed {:?}", config.seed);
    }
    let colored = config.color.enabled(atty::is(atty::Stream::Stdout));
    let bridge = CommandBridge::new(config.bridge.clone());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session =
        Session::new(&corpus, picker, stdin.lock(), stdout.lock(), bridge).with_color(colored);

    match session.run() {
        Ok(state) => {
            info!(
                "Session over: {} solved in {} attempts",
                state.solved, state.total_attempts
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
