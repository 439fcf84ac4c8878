use std::{
    fs::OpenOptions,
    path::{Path, PathBuf},
};

use anyhow::{ensure, Context};
use clap::Parser;

use wrenches::{
    import::{import_adjacency_matrix_file, import_candidate_pool_file},
    puzzle::{
        machinarium_pool, PipePuzzle, MACHINARIUM_ROOT, MACHINARIUM_TARGET, MACHINARIUM_WRENCHES,
    },
    CandidatePool, Edge,
};

/// Finds the pipe segments to close with wrenches so that water from the root
/// never reaches the target.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Adjacency matrix of the pipe network (CSV)
    matrix: PathBuf,

    #[clap(short, long, default_value = MACHINARIUM_ROOT)]
    root: String,

    #[clap(short, long, default_value = MACHINARIUM_TARGET)]
    target: String,

    /// Number of edges to remove at once
    #[clap(short = 'k', long = "wrenches", default_value_t = MACHINARIUM_WRENCHES)]
    wrenches: usize,

    /// Wrenchable edge as `node:node=label`, may be repeated
    #[clap(short, long = "edge", value_parser = parse_wrench)]
    edges: Vec<(Edge, String)>,

    /// CSV of `node,node,label` rows with wrenchable edges
    #[clap(short, long)]
    pool: Option<PathBuf>,

    /// Print every disconnecting combination instead of the first
    #[clap(short, long)]
    all: bool,

    /// Do not print the neighbor list of every node
    #[clap(short, long)]
    quiet: bool,

    #[clap(long)]
    log_file: Option<PathBuf>,

    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_wrench(s: &str) -> Result<(Edge, String), String> {
    let (edge, label) = s
        .split_once('=')
        .ok_or_else(|| format!("expected `node:node=label`, got `{}`", s))?;
    let (a, b) = edge
        .split_once(':')
        .ok_or_else(|| format!("expected `node:node` before `=`, got `{}`", edge))?;
    if a.is_empty() || b.is_empty() {
        return Err(format!("empty node name in `{}`", s));
    }
    Ok((Edge::new(a, b), label.to_string()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.log_file.as_deref())?;

    ensure!(cli.wrenches > 0, "at least one wrench is needed");

    let graph = import_adjacency_matrix_file(&cli.matrix)
        .with_context(|| format!("Unable to import {}", cli.matrix.display()))?;
    if !cli.quiet {
        print!("{}", graph);
    }

    let wrenches = wrench_pool(cli.pool.as_deref(), cli.edges)?;
    log::info!("Wrenchable edges: {}", wrenches);

    let puzzle = PipePuzzle::new(graph, wrenches, cli.root, cli.target);
    if cli.all {
        let solutions = puzzle.all_wrench_edges(cli.wrenches)?;
        if solutions.is_empty() {
            println!("no solution");
        }
        for labels in solutions {
            println!("[{}]", labels.join(", "));
        }
    } else {
        println!("{}", puzzle.find_wrench_edges(cli.wrenches)?);
    }

    Ok(())
}

/// Edges from `--pool` come first, then `--edge` arguments. Without either the
/// Machinarium wrenches are used.
fn wrench_pool(pool: Option<&Path>, edges: Vec<(Edge, String)>) -> anyhow::Result<CandidatePool> {
    let mut wrenches = match pool {
        Some(path) => import_candidate_pool_file(path)
            .with_context(|| format!("Unable to import {}", path.display()))?,
        None if edges.is_empty() => return Ok(machinarium_pool()),
        None => CandidatePool::new(),
    };
    for (edge, label) in edges {
        wrenches.insert(edge, label);
    }
    Ok(wrenches)
}

fn setup_logging(verbosity: u8, log_file: Option<&Path>) -> Result<(), fern::InitError> {
    let mut base_config = fern::Dispatch::new();

    let stderr_level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    let stderr_config = fern::Dispatch::new()
        .format(|out, message, record| {
            // special format for debug messages coming from our own crate.
            if record.level() > log::LevelFilter::Info && record.target().starts_with("wrenches") {
                out.finish(format_args!(
                    "---\nDEBUG: {}: {}\n---",
                    chrono::Local::now().format("%H:%M:%S"),
                    message
                ))
            } else {
                out.finish(format_args!(
                    "[{}][{}] {}",
                    chrono::Local::now().format("%H:%M:%S"),
                    record.level(),
                    message
                ))
            }
        })
        .level(stderr_level)
        .chain(std::io::stderr());
    base_config = base_config.chain(stderr_config);

    if let Some(path) = log_file {
        // Separate file config so we can include year, month and day in file logs
        let file_config = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "{}[{}] {}",
                    chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                    record.level(),
                    message
                ))
            })
            .level(log::LevelFilter::Trace)
            .chain(
                OpenOptions::new()
                    .truncate(true)
                    .write(true)
                    .create(true)
                    .open(path)?,
            );
        base_config = base_config.chain(file_config);
    }

    base_config.apply()?;

    Ok(())
}
