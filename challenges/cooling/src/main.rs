use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::{Parser, Subcommand};
use log::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use cooling::{Error, Pruning, Scanner, SearchStats, Writer};

#[derive(Parser)]
#[command(name = "cooling")]
#[command(about = "Counts cooling duct layouts through a datacenter floor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count the layouts for one floor plan
    Count {
        /// Floor plan to read; stdin if omitted
        file: Option<PathBuf>,
        /// Skip the minimum-degree check
        #[arg(long)]
        no_degree_prune: bool,
        /// Skip the vertex-cut check
        #[arg(long)]
        no_cut_prune: bool,
        /// Print search counters after the count
        #[arg(long)]
        stats: bool,
    },
    /// Run the cases under data/<CATEGORY>
    Verify {
        #[arg(default_value = "cooling")]
        category: String,
    },
}

fn count(file: Option<PathBuf>, pruning: Pruning) -> Result<(String, SearchStats), Error> {
    let mut scan = match file {
        Some(path) => Scanner::new(BufReader::new(File::open(&path)?)),
        None => Scanner::new(io::stdin().lock()),
    };
    let mut out = Writer::new();

    let started = Instant::now();
    let stats = cooling::solve_with(&mut scan, &mut out, pruning)?;
    info!(
        "found {} layouts in {:.2}s",
        stats.paths,
        started.elapsed().as_secs_f64()
    );
    debug!("{}", stats);

    let out = out
        .into_string()
        .map_err(|e| Error::Io(format!("output is not valid UTF-8: {}", e)))?;
    Ok((out, stats))
}

fn main() {
    // install global collector configured based on RUST_LOG env var.
    // stdout carries only the count, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Count {
            file,
            no_degree_prune,
            no_cut_prune,
            stats,
        } => {
            let pruning = Pruning {
                min_degree: !no_degree_prune,
                vertex_cut: !no_cut_prune,
            };
            match count(file, pruning) {
                Ok((out, counters)) => {
                    print!("{}", out);
                    if stats {
                        println!("{}", counters);
                    }
                }
                Err(err) => {
                    eprintln!("cooling: {}", err);
                    process::exit(1);
                }
            }
        }
        Commands::Verify { category } => {
            if cooling::testing::run_all_tests(&category, cooling::solve) > 0 {
                process::exit(1);
            }
        }
    }
}
