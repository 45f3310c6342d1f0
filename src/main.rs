use std::path::PathBuf;

use chunksim::{
    DEFAULT_CHUNK_SIZE, DigestConfig, DigestError, DigestTable, Strategy, SumReport, digest_all,
    pairwise, sum_all,
};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "chunksim CLI", long_about = None)]
struct Cli {
    /// Log more to stderr (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DispatchArgs {
    /// Block size in bytes
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Worker pool size (defaults to available CPUs)
    #[arg(long, conflicts_with = "per_file")]
    workers: Option<usize>,

    /// Spawn one thread per file instead of a worker pool
    #[arg(long)]
    per_file: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the block-by-block similarity of every pair of files
    Similarity {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        dispatch: DispatchArgs,
    },

    /// Print the byte sum over all files and the files sharing a sum
    Sums {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        dispatch: DispatchArgs,
    },
}

impl DispatchArgs {
    fn config(&self) -> Result<DigestConfig, DigestError> {
        let strategy = match (self.per_file, self.workers) {
            (true, _) => Strategy::PerFile,
            (false, Some(workers)) => Strategy::with_workers(workers),
            (false, None) => Strategy::pool(),
        };
        let config = DigestConfig::default()
            .with_chunk_size(self.chunk_size)
            .with_strategy(strategy);
        config.validate()?;
        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "error",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_failures<T>(table: &DigestTable<T>) {
    for failure in table.failures() {
        eprintln!("{}", failure);
    }
}

fn main() -> Result<(), DigestError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Similarity { paths, dispatch } => {
            let config = dispatch.config()?;
            let table = digest_all(&paths, &config);
            print_failures(&table);

            for score in pairwise(&paths, &table) {
                println!("{}", score);
            }
        }

        Commands::Sums { paths, dispatch } => {
            let config = dispatch.config()?;
            let table = sum_all(&paths, &config);
            print_failures(&table);

            print!("{}", SumReport::from_table(&paths, &table));
        }
    }

    Ok(())
}
