//! Async digest example.
//!
//! Digests several files concurrently on tokio tasks through the
//! runtime-agnostic `futures-io` reader.
//!
//! Run with:
//!     cargo run --example async_digest --features async-io -- a.bin b.bin

use chunksim::{DEFAULT_CHUNK_SIZE, digest_async};
use tokio_util::compat::TokioAsyncReadCompatExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let paths: Vec<String> = std::env::args().skip(1).collect();

    let handles: Vec<_> = paths
        .into_iter()
        .map(|path| {
            tokio::spawn(async move {
                let file = tokio::fs::File::open(&path).await?;
                let digest = digest_async(file.compat(), DEFAULT_CHUNK_SIZE).await?;
                Ok::<_, chunksim::DigestError>((path, digest.len()))
            })
        })
        .collect();

    for handle in handles {
        match handle.await? {
            Ok((path, blocks)) => println!("{}: {} blocks", path, blocks),
            Err(e) => eprintln!("{}", e),
        }
    }

    Ok(())
}
