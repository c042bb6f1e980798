// Standalone replay tool for analyzing light cycles decision logs
//
// Usage:
//   cargo run --bin replay -- <log_file> [options]
//
// Options:
//   --all                    Replay all frames
//   --frames <f1,f2>         Replay specific frames (comma-separated)
//   --validate <f:m,...>     Check the logged moves against expectations
//   --verbose                Show detailed output for each frame
//   --config <path>          Path to Cycles.toml (default: Cycles.toml)

use std::env;
use std::process;

use cycles_bot::config::Config;
use cycles_bot::replay::ReplayEngine;
use cycles_bot::types::Direction;

fn print_usage() {
    eprintln!("Light Cycles Replay Tool");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  replay <log_file> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --all                   Replay all frames in the log");
    eprintln!("  --frames <F1,F2,...>    Replay specific frames (comma-separated)");
    eprintln!("  --validate <F:M,...>    Validate expected moves (format: frame:move|move,...)");
    eprintln!("  --verbose               Show detailed output for each frame");
    eprintln!("  --config <path>         Path to Cycles.toml (default: Cycles.toml)");
    eprintln!("  --help                  Show this help message");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("  replay cycles_debug.jsonl --all");
    eprintln!("  replay cycles_debug.jsonl --frames 5,10,15");
    eprintln!("  replay cycles_debug.jsonl --validate 5:up,10:left|right");
}

fn parse_frames(s: &str) -> Result<Vec<u32>, String> {
    s.split(',')
        .map(|f| {
            f.trim()
                .parse::<u32>()
                .map_err(|e| format!("Invalid frame number '{}': {}", f, e))
        })
        .collect()
}

fn parse_expected_moves(s: &str) -> Result<Vec<(u32, Vec<Direction>)>, String> {
    s.split(',')
        .map(|pair| {
            let parts: Vec<&str> = pair.trim().split(':').collect();
            if parts.len() != 2 {
                return Err(format!("Invalid format '{}'. Expected 'frame:move'", pair));
            }

            let frame = parts[0]
                .parse::<u32>()
                .map_err(|e| format!("Invalid frame number '{}': {}", parts[0], e))?;

            // Several acceptable moves may be separated by '|'
            let moves = parts[1]
                .split('|')
                .map(Direction::parse)
                .collect::<Result<Vec<_>, _>>()?;

            Ok((frame, moves))
        })
        .collect()
}

enum Mode {
    All,
    Frames(String),
    Validate(String),
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help") {
        print_usage();
        process::exit(0);
    }
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let log_file = &args[1];
    let mut config_path = "Cycles.toml".to_string();
    let mut verbose = false;
    let mut mode = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--all" => mode = Some(Mode::All),
            "--frames" | "--validate" | "--config" => {
                let Some(value) = args.get(i + 1) else {
                    fail(&format!("{} requires an argument", args[i]));
                };
                match args[i].as_str() {
                    "--frames" => mode = Some(Mode::Frames(value.clone())),
                    "--validate" => mode = Some(Mode::Validate(value.clone())),
                    _ => config_path = value.clone(),
                }
                i += 1;
            }
            "--verbose" => verbose = true,
            other => {
                eprintln!("Error: Unknown option '{}'", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let Some(mode) = mode else {
        eprintln!("Error: Must specify --all, --frames, or --validate");
        print_usage();
        process::exit(1);
    };

    let config = Config::from_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from '{}': {}", config_path, e);
        eprintln!("Using default configuration");
        Config::default_hardcoded()
    });

    println!("Loaded configuration from: {}", config_path);
    println!("Replay log file: {}", log_file);
    println!();

    let engine = ReplayEngine::new(config, verbose);

    let entries = engine
        .load_log_file(log_file)
        .unwrap_or_else(|e| fail(&format!("Failed loading log file: {}", e)));

    if entries.is_empty() {
        fail("Log file is empty");
    }

    println!("Loaded {} log entries\n", entries.len());

    match mode {
        Mode::All => {
            println!("Replaying all {} frames...\n", entries.len());
            let results = engine.replay_all(&entries);
            engine.print_report(&results);
        }
        Mode::Frames(arg) => {
            let frames = parse_frames(&arg).unwrap_or_else(|e| fail(&e));
            println!("Replaying {} specific frame(s)...\n", frames.len());
            match engine.replay_frames(&entries, &frames) {
                Ok(results) => engine.print_report(&results),
                Err(e) => fail(&format!("Replay failed: {}", e)),
            }
        }
        Mode::Validate(arg) => {
            let expected_moves = parse_expected_moves(&arg).unwrap_or_else(|e| fail(&e));
            println!("Validating {} expected move(s)...\n", expected_moves.len());
            match engine.validate_expected_moves(&entries, &expected_moves) {
                Ok(()) => println!("✓ All expected moves validated successfully!"),
                Err(e) => {
                    eprintln!("✗ Validation failed: {}", e);
                    process::exit(1);
                }
            }
        }
    }
}
