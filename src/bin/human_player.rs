use clap::Parser;
use match3_solver::config::DEFAULT_BOARD_SIZE;
use match3_solver::engine::Grid;
use match3_solver::game::Game;
use match3_solver::heuristics::choose_move_max_total;
use match3_solver::solver::evaluate_all;
use std::io::{self, Write};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play match-3 in the terminal", long_about = None)]
struct Args {
    /// Number of rows
    #[clap(long, default_value_t = DEFAULT_BOARD_SIZE)]
    rows: usize,

    /// Number of columns
    #[clap(long, default_value_t = DEFAULT_BOARD_SIZE)]
    cols: usize,

    /// Seed for the starting board and the refill
    #[clap(long)]
    seed: Option<u64>,
}

fn parse_coords(parts: &[&str]) -> Option<[(usize, usize); 2]> {
    let nums: Vec<usize> = parts.iter().map(|p| p.parse().ok()).collect::<Option<_>>()?;
    match nums.as_slice() {
        &[r1, c1, r2, c2] => Some([(r1, c1), (r2, c2)]),
        _ => None,
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if args.rows == 0 || args.cols == 0 {
        eprintln!("Rows and columns must be at least 1.");
        std::process::exit(2);
    }

    let mut game = match args.seed {
        Some(seed) => Game::new_with_grid(Grid::new_random_with_seed(args.rows, args.cols, seed), seed),
        None => Game::new(args.rows, args.cols),
    };
    println!("Welcome to Match-3!");

    loop {
        println!("---------------------");
        println!("Steps: {}, Cleared: {}", game.steps(), game.total_cleared());
        println!("{}", game.grid());

        if game.is_game_over() {
            println!();
            println!("---------------------");
            println!("GAME OVER! No swap clears anything.");
            println!("Tiles cleared: {}", game.total_cleared());
            for (color, count) in game.score_by_color() {
                println!("  {:<18} {}", color, count);
            }
            println!("Total Steps: {}", game.steps());
            println!("---------------------");
            break;
        }

        print!("Enter a swap (row col row col), 'h' for a hint, 'u' to undo, 'q' to quit: ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => {
                println!("Error reading input. Please try again.");
                continue;
            }
        }

        match input.trim() {
            "q" => {
                println!("Thanks for playing!");
                break;
            }
            "u" => {
                if game.undo_last_move() {
                    println!("Move undone.");
                } else {
                    println!("Cannot undo further (no moves made).");
                }
            }
            "h" => {
                let moves = evaluate_all(game.grid());
                match choose_move_max_total(&moves) {
                    Some(mv) if mv.total_cleared() > 0 => {
                        println!("Hint: {}", mv);
                        println!("{}", game.grid().to_string_with_highlight(&mv.swap().positions()));
                    }
                    _ => println!("No hint available."),
                }
            }
            other => {
                let parts: Vec<&str> = other.split_whitespace().collect();
                let Some([a, b]) = parse_coords(&parts) else {
                    println!("Invalid input format. Use 'row col row col', 'h', 'u', or 'q'.");
                    continue;
                };
                match game.process_swap(a, b) {
                    Ok(outcome) if outcome.total_cleared() == 0 => {
                        println!("That swap makes no match; the tiles stay where they are.");
                    }
                    Ok(outcome) => println!(
                        "Cleared {} tiles in {} passes.",
                        outcome.total_cleared(),
                        outcome.passes
                    ),
                    Err(e) => println!("Invalid move: {}", e),
                }
            }
        }
    }
}
