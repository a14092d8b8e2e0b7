//! Sliding Block Puzzle Solver
//!
//! Solves Klotski-style sliding block puzzles: slide the pieces one cell at
//! a time until the king piece can leave the board through the door. The
//! binary solves the built-in layouts and prints the shortest move list.

use clap::{Parser, Subcommand};

use klotski::{board, layouts, solve, Outcome, Puzzle};

/// Solves Klotski-style sliding block puzzles.
#[derive(Parser)]
#[command(name = "klotski")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a built-in layout and print the move list.
    Solve {
        /// Layout name, see `list`.
        #[arg(default_value = "classic")]
        layout: String,
    },
    /// Print a built-in layout's starting board.
    Show {
        /// Layout name, see `list`.
        #[arg(default_value = "classic")]
        layout: String,
    },
    /// List the built-in layouts.
    List,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Solve { layout }) => run_solve(&layout),
        Some(Command::Show { layout }) => run_show(&layout),
        Some(Command::List) => run_list(),
        None => run_solve("classic"),
    }
}

/// Looks up a layout, printing a hint when the name is unknown.
fn lookup(layout: &str) -> Option<Puzzle> {
    let puzzle = layouts::by_name(layout);
    if puzzle.is_none() {
        eprintln!("Unknown layout '{layout}'. Run 'klotski list'.");
    }
    puzzle
}

/// Solves a layout and prints the board followed by the move list.
fn run_solve(layout: &str) {
    let Some(puzzle) = lookup(layout) else {
        return;
    };
    print!("{}", board::format_board(&puzzle, puzzle.start_cells()));
    match solve(&puzzle, None) {
        Outcome::Solved(steps) => {
            println!("Solved '{layout}' in {} moves", steps.len());
            for (number, step) in steps.iter().enumerate() {
                println!("{:3}. {step}", number + 1);
            }
        }
        Outcome::NoSolution => println!("'{layout}' has no solution"),
        Outcome::Cancelled => println!("stopped before exhausting '{layout}'"),
    }
}

fn run_show(layout: &str) {
    if let Some(puzzle) = lookup(layout) {
        print!("{}", board::format_board(&puzzle, puzzle.start_cells()));
    }
}

fn run_list() {
    for name in layouts::NAMES {
        println!("{name}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_board() {
        let puzzle = layouts::classic();
        let rendered = board::format_board(&puzzle, puzzle.start_cells());
        insta::assert_snapshot!(rendered.trim_end());
    }

    #[test]
    fn test_corridor_solution() {
        let puzzle = layouts::corridor();
        let Outcome::Solved(steps) = solve(&puzzle, None) else {
            panic!("corridor must be solvable");
        };
        let rendered = steps
            .iter()
            .map(|step| step.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        insta::assert_snapshot!(rendered);
    }
}
