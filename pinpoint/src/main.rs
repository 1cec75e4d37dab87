//! # pinpoint - Filter Configuration Checker
//!
//! Builds the same filter the attribution engine would install and prints
//! a per-file verdict, so users can debug why a path is or is not being
//! profiled without attaching a profiler.

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use pinpoint::cli::Args;
use pinpoint::filter::TraceFilter;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            EXIT_ERROR
        }
    });
}

#[derive(Serialize)]
struct Verdict<'a> {
    file: &'a str,
    traced: bool,
}

fn run() -> Result<()> {
    let args = Args::parse();

    let filter = TraceFilter::new(args.include, args.base_path, args.profile_all)?;

    if args.describe {
        println!("{}", filter.describe());
    }

    let verdicts: Vec<Verdict> = args
        .files
        .iter()
        .map(|file| Verdict { file, traced: filter.should_trace(file) })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&verdicts)?);
    } else {
        for verdict in &verdicts {
            let mark = if verdict.traced { "trace" } else { "skip " };
            println!("{mark}  {}", verdict.file);
        }
    }

    Ok(())
}
