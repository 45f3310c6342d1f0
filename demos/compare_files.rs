//! Parallel pairwise comparison example.
//!
//! Digests every file given on the command line with a bounded worker pool
//! and prints the score of each pair.
//!
//! Run with:
//!     cargo run --example compare_files -- a.bin b.bin c.bin

use std::env;
use std::path::PathBuf;

use chunksim::{DigestConfig, Strategy, digest_all, pairwise};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let paths: Vec<PathBuf> = env::args().skip(1).map(PathBuf::from).collect();
    if paths.len() < 2 {
        eprintln!("need at least two files");
        return Ok(());
    }

    let config = DigestConfig::new(4096)?.with_strategy(Strategy::pool());
    let table = digest_all(&paths, &config);

    for failure in table.failures() {
        eprintln!("skipped: {}", failure.error);
    }

    for score in pairwise(&paths, &table) {
        println!("{}", score);
    }

    Ok(())
}
