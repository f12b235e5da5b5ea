use clap::Parser;
use match3_solver::config::DEFAULT_BOARD_SIZE;
use match3_solver::engine::{Color, Grid};
use match3_solver::game::Game;
use match3_solver::heuristics::SelectionPolicy;
use match3_solver::solver::evaluate_all;
use std::collections::HashMap;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compare selection policies on random boards", long_about = None)]
struct Args {
    /// Number of random boards to play
    #[clap(long, default_value_t = 20)]
    boards: usize,

    /// Maximum number of swaps per board
    #[clap(long, default_value_t = 30)]
    turns: u32,

    /// Seed of the first board; board i uses start_seed + i
    #[clap(long, default_value_t = 0)]
    start_seed: u64,

    #[clap(long, default_value_t = DEFAULT_BOARD_SIZE)]
    rows: usize,

    #[clap(long, default_value_t = DEFAULT_BOARD_SIZE)]
    cols: usize,

    /// Color order for the color-priority policy
    #[clap(long, value_delimiter = ',', default_value = "red,blue,yellow,turquoise,pink,dark_red")]
    priority: Vec<Color>,
}

/// Seed of board `board_idx`, wrapping past `u64::MAX`.
fn board_seed(start_seed: u64, board_idx: usize) -> u64 {
    start_seed.wrapping_add(board_idx as u64)
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let strategies: Vec<SelectionPolicy> = vec![
        SelectionPolicy::MaxTotal,
        SelectionPolicy::MaxLongestRun,
        SelectionPolicy::ColorPriority(args.priority.clone()),
    ];

    let mut all_scores: HashMap<String, Vec<usize>> = HashMap::new();

    println!("Starting policy evaluation for {} boards...", args.boards);

    for board_idx in 0..args.boards {
        let current_seed = board_seed(args.start_seed, board_idx);
        let initial_grid = Grid::new_random_with_seed(args.rows, args.cols, current_seed);

        println!("\nEvaluating Board {} (Seed: {})", board_idx, current_seed);

        for policy in &strategies {
            let mut game = Game::new_with_grid(initial_grid.clone(), current_seed);

            while game.steps() < args.turns {
                let moves = evaluate_all(game.grid());
                let Some(chosen) = policy.select(&moves).filter(|mv| mv.total_cleared() > 0) else {
                    break;
                };
                let (a, b) = (chosen.swap().first(), chosen.swap().second());
                if let Err(e) = game.process_swap(a, b) {
                    eprintln!(
                        "Error: policy {} on board {} (Seed: {}) failed on {}: {}",
                        policy, board_idx, current_seed, chosen, e
                    );
                    break;
                }
            }
            println!(
                "  Policy: {:<40}, Cleared: {:<6}, Steps: {}",
                policy.to_string(),
                game.total_cleared(),
                game.steps()
            );
            all_scores
                .entry(policy.to_string())
                .or_default()
                .push(game.total_cleared());
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", args.boards);
    println!("\n--- Average Tiles Cleared ---");

    let mut sorted_avg_scores: Vec<(&str, f64)> = all_scores
        .iter()
        .filter(|(_, scores)| !scores.is_empty())
        .map(|(name, scores)| {
            let total: usize = scores.iter().sum();
            (name.as_str(), total as f64 / scores.len() as f64)
        })
        .collect();

    // Sort by average descending
    sorted_avg_scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    for (name, avg) in sorted_avg_scores {
        println!("Policy {:<40}: Average Cleared = {:.2}", name, avg);
    }
}
