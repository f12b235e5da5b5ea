use clap::Parser;
use match3_solver::config::{EngineConfig, PolicyKind};
use match3_solver::engine::{Color, Grid};
use match3_solver::heuristics::rank_moves;
use match3_solver::solver::evaluate_report;
use match3_solver::utils::grid_from_text;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Find the best swap on a match-3 board", long_about = None)]
struct Args {
    /// Selection policy (overrides the config file)
    #[clap(short, long, value_enum)]
    policy: Option<PolicyKind>,

    /// Comma-separated color order for the color-priority policy, e.g. "blue,red"
    #[clap(long, value_delimiter = ',')]
    priority: Vec<Color>,

    /// JSON engine configuration
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Number of ranked moves to list
    #[clap(short, long, default_value_t = 5)]
    top: usize,

    /// Path to the board file, one row per line ('.' for an empty cell)
    board_file: PathBuf,
}

fn read_board_file(path: &PathBuf) -> Result<Grid, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;
    grid_from_text(&content).map_err(|e| format!("Invalid board format: {}", e))
}

fn build_config(args: &Args) -> Result<EngineConfig, String> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path).map_err(|e| e.to_string())?,
        None => EngineConfig::default(),
    };
    if let Some(policy) = args.policy {
        config.policy = policy;
    }
    if !args.priority.is_empty() {
        config.color_priority = args.priority.clone();
    }
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn run(args: &Args) -> Result<(), String> {
    let mut config = build_config(args)?;
    let grid = read_board_file(&args.board_file)?;
    if args.config.is_none() {
        config.rows = grid.rows();
        config.cols = grid.cols();
    } else if !config.fits(&grid) {
        return Err(format!(
            "Board is {}x{} but the config expects {}x{}",
            grid.rows(),
            grid.cols(),
            config.rows,
            config.cols
        ));
    }

    println!("Loaded board from {}\n", args.board_file.display());
    println!("{}\n", grid);

    let policy = config.selection_policy();
    let report = evaluate_report(&config.simulator(), &grid);
    for (swap, err) in &report.failures {
        eprintln!("Warning: candidate {} failed: {}", swap, err);
    }
    println!(
        "Evaluated {} candidate moves with policy {}\n",
        report.moves.len(),
        policy
    );

    let ranked = rank_moves(&report.moves, &policy);
    for (i, mv) in ranked.iter().take(args.top).enumerate() {
        println!(
            "  {:>2}. {}  total={} longest={}",
            i + 1,
            mv,
            mv.total_cleared(),
            mv.longest_run()
        );
    }

    match policy.select(&report.moves) {
        Some(mv) if mv.total_cleared() > 0 => {
            println!("\nBest move: {}", mv);
            println!("{}", grid.to_string_with_highlight(&mv.swap().positions()));
        }
        _ => println!("\nNo clearing move found."),
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
