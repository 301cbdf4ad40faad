//! Absolute indifferences (and optionally variety) of hypergraphs.
//!
//! # Usage
//!
//! ```bash
//! wmvar '{{1,2},{2,3}}'
//! wmvar -f graphs.txt        # writes graphs.txt_hg_and_ais.txt
//! ```
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use hypergraph_variety::batch::{self, Indifferences};
use hypergraph_variety::variety::variety_from_diagnostics;
use hypergraph_variety::{Hypergraph, Indifference, SearchConfig};

#[derive(Parser, Debug)]
#[command(name = "wmvar")]
#[command(about = "Absolute indifference and variety of hypergraphs")]
struct Args {
    /// Hypergraph in brace notation, e.g. '{{1,2},{2,3}}'
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    hypergraph: Option<String>,

    /// File with one hypergraph per line
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Worker threads
    #[arg(short, long, default_value_t = 8)]
    threads: usize,

    /// Give up on an isomorphism test with more candidate rules than this
    #[arg(long)]
    max_candidates: Option<u128>,

    /// Also print the variety (single hypergraph only)
    #[arg(long, default_value_t = false)]
    variety: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if let Err(err) = rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build_global()
    {
        error!("could not configure worker pool: {err}");
        return ExitCode::FAILURE;
    }

    let config = SearchConfig {
        max_candidates: args.max_candidates,
    };

    let result = match &args.file {
        Some(path) => batch::run_file(path, &config).map(|report| {
            println!(
                "{}: {} written, {} skipped",
                report.output.display(),
                report.written,
                report.skipped
            );
        }),
        None => single(
            args.hypergraph.as_deref().unwrap_or_default(),
            &config,
            args.variety,
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn single(
    text: &str,
    config: &SearchConfig,
    print_variety: bool,
) -> hypergraph_variety::Result<()> {
    let hg: Hypergraph = text.parse()?;
    let diagnostics = Indifference::with_config(&hg, *config).diagnostics()?;
    println!("{text};{}", Indifferences(&diagnostics));
    if print_variety {
        println!("variety: {}", variety_from_diagnostics(&diagnostics));
    }
    Ok(())
}
