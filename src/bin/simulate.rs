//! Lootbox odds simulator CLI.
//!
//! Draws one lootbox many times with the real prize selector and compares the
//! observed rates to the declared chances.
//!
//! Usage:
//!   cargo run --bin simulate -- <LOOTBOX> [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate -- "Gold Box"              # 100,000 draws
//!   cargo run --bin simulate -- "Gold Box" -n 5000      # 5,000 draws
//!   cargo run --bin simulate -- "Gold Box" --seed 42    # Reproducible run

use std::env;
use std::path::PathBuf;
use std::process;

use cardsharp::catalog::load_catalog;
use cardsharp::core::logging::{init_stderr_logging, parse_level};
use cardsharp::core::EconomyConfig;
use cardsharp::simulator::{run_simulation, SimConfig};

struct Args {
    sim: SimConfig,
    config_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    json: bool,
}

fn main() {
    let raw: Vec<String> = env::args().collect();
    let args = parse_args(&raw);

    let mut app_config = match EconomyConfig::load(args.config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    if let Some(dir) = args.data_dir {
        app_config.data_dir = dir;
    }
    init_stderr_logging(parse_level(&app_config.log_level));

    let catalog = load_catalog(&app_config.data_dir);
    let Some(lootbox) = catalog.get(&args.sim.lootbox) else {
        eprintln!(
            "Unknown lootbox '{}'. Available: {}",
            args.sim.lootbox,
            catalog.keys().cloned().collect::<Vec<_>>().join(", ")
        );
        process::exit(1);
    };

    if args.sim.verbosity >= 1 {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║              CARDSHARP LOOTBOX SIMULATOR                      ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  Lootbox:        {}", lootbox.name);
        println!("  Draws:          {}", args.sim.draws);
        println!("  Catalog:        {}", app_config.data_dir.display());
        if let Some(seed) = args.sim.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
        println!("Running simulation...");
        println!();
    }

    let report = run_simulation(&args.sim, lootbox);

    println!("{}", report.to_text());

    if args.json {
        let filename = format!(
            "odds_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        if let Err(e) = std::fs::write(&filename, report.to_json()) {
            eprintln!("Failed to write JSON report: {}", e);
            process::exit(1);
        }
        println!("JSON report saved to: {}", filename);
    }
}

fn parse_args(args: &[String]) -> Args {
    let mut parsed = Args {
        sim: SimConfig::default(),
        config_path: None,
        data_dir: None,
        json: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--draws" => {
                if i + 1 < args.len() {
                    parsed.sim.draws = args[i + 1].parse().unwrap_or(parsed.sim.draws);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    parsed.sim.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-d" | "--data-dir" => {
                if i + 1 < args.len() {
                    parsed.data_dir = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    parsed.config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--json" => {
                parsed.json = true;
            }
            "-v" | "--verbose" => {
                parsed.sim.verbosity = 2;
            }
            "-q" | "--quiet" => {
                parsed.sim.verbosity = 0;
            }
            "--quick" => {
                let lootbox = std::mem::take(&mut parsed.sim.lootbox);
                parsed.sim = SimConfig::quick(lootbox);
            }
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            other => {
                if parsed.sim.lootbox.is_empty() && !other.starts_with('-') {
                    parsed.sim.lootbox = other.to_string();
                }
            }
        }
        i += 1;
    }

    if parsed.sim.lootbox.is_empty() {
        print_help();
        process::exit(1);
    }

    parsed
}

fn print_help() {
    println!("CardSharp Lootbox Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- <LOOTBOX> [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --draws <N>       Number of draws (default: 100,000)");
    println!("    -s, --seed <S>        Random seed for reproducibility");
    println!("    -d, --data-dir <DIR>  Catalog directory (overrides config)");
    println!("    -c, --config <FILE>   Config file");
    println!("    --json                Save JSON report");
    println!("    --quick               Quick seeded check (10,000 draws)");
    println!("    -v, --verbose         Print every draw");
    println!("    -q, --quiet           Only print the report");
    println!("    -h, --help            Show this help");
}
