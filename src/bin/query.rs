//! Searches a minidex store and prints ranked results. Thin CLI
//! wrapper around [`minidex::QueryEngine`].

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;

use minidex::{Config, QueryEngine, SetOperation, Store};

#[derive(Parser, Debug)]
#[command(about = "Search a minidex index")]
struct Args {
    /// Path to the index file to search.
    #[arg(long)]
    filename: PathBuf,

    /// The text to search for.
    #[arg(long)]
    query: String,

    /// Limit the number of printed results. 0 = unlimited.
    #[arg(long, default_value_t = 0)]
    limit: usize,

    /// Use intersection instead of the default union.
    #[arg(long)]
    intersection: bool,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> minidex::Result<()> {
    let config = Config {
        storage_path: args.filename,
        no_sync: true,
        max_ids: 0,
        open_timeout: Duration::from_secs(1),
    };
    let store = Store::open(&config)?;

    let set_op = if args.intersection { SetOperation::Intersection } else { SetOperation::Union };

    let start = Instant::now();
    let results = QueryEngine::search(&store, &args.query, set_op, 0)?;
    println!("Took: {:?}", start.elapsed());

    for (idx, result) in results.iter().enumerate() {
        if args.limit > 0 && idx == args.limit {
            break;
        }
        println!("Idx: {idx}; ID: {}; Score: {:.15}", result.id, result.score);
    }

    Ok(())
}
