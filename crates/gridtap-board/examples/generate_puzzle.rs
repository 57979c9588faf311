//! Prints a generated puzzle and its solution.
//!
//! Usage: `cargo run --example generate_puzzle [difficulty] [seed]`

use gridtap_board::{Difficulty, generator};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

fn main() {
    let mut args = std::env::args().skip(1);
    let difficulty = args
        .next()
        .and_then(|label| Difficulty::from_label(&label))
        .unwrap_or(Difficulty::Easy);
    let seed = args.next().and_then(|s| s.parse().ok());

    let mut rng = match seed {
        Some(seed) => Pcg64Mcg::seed_from_u64(seed),
        None => Pcg64Mcg::seed_from_u64(rand::random()),
    };

    let puzzle = generator::generate(&mut rng, difficulty);
    println!("id:       {}", puzzle.id);
    println!("problem:  {}", puzzle.problem);
    println!("solution: {}", puzzle.solution);
}
