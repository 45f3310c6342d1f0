//! File digest example.
//!
//! Run with:
//!     cargo run --example digest_file -- /path/to/file

use std::env;

use chunksim::{DEFAULT_CHUNK_SIZE, open};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "Cargo.toml".to_string());

    println!("Digesting file: {}\n", path);

    let mut total_blocks = 0;
    let mut total_bytes = 0;

    for block in open(&path, DEFAULT_CHUNK_SIZE)? {
        let block = block?;
        total_blocks += 1;
        total_bytes += block.len();

        println!(
            "Block {:>6}: offset={:>10}, len={:>5}, checksum={:>7}",
            block.index,
            block.offset,
            block.len(),
            block.checksum()
        );
    }

    println!("\nTotal: {} blocks, {} bytes", total_blocks, total_bytes);

    Ok(())
}
