//! Print every position of a saved game record.
//!
//! Usage: replay <record.json>

use checkers_ai::game::GameRecord;
use std::env;

fn main() -> anyhow::Result<()> {
    checkers_ai::logging::init_stderr();

    let args: Vec<String> = env::args().collect();
    let Some(path) = args.get(1) else {
        eprintln!("Usage: replay <record.json>");
        std::process::exit(1);
    };

    let record = GameRecord::load(path)?;
    let boards = record.replay()?;

    println!("Finished: {}", record.finished_at);
    println!("Forced capture: {}", record.rules.forced_capture);
    for (ply, board) in boards.iter().enumerate() {
        match ply.checked_sub(1).and_then(|i| record.moves.get(i)) {
            Some(mv) => println!("\n#{} {}", ply, mv),
            None => println!("\nStart"),
        }
        print!("{}", board);
    }
    match record.winner {
        Some(w) => println!("\nWinner: {}", w),
        None => println!("\nDraw"),
    }
    Ok(())
}
