use anyhow::{Context, Result};
use clap::Parser;
use graph::{DagBuilder, GitSource};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "branchmap")]
#[command(about = "Derive a branch ancestry graph from a git repository", long_about = None)]
struct Cli {
    /// Path to the repository
    repo: PathBuf,

    /// File with one branch name per line (blank lines ignored)
    branch_file: Option<PathBuf>,

    /// Map every local branch instead of reading a branch file
    #[arg(long, conflicts_with = "branch_file")]
    all: bool,

    /// Write the JSON document to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit single-line JSON
    #[arg(long)]
    compact: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 if cli.quiet => tracing::Level::ERROR,
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    // Diagnostics go to stderr; stdout carries only the JSON document.
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let source = GitSource::open(&cli.repo)?;

    let branches = if cli.all {
        source.list_branches()?
    } else {
        let path = cli
            .branch_file
            .as_deref()
            .context("a branch file is required unless --all is given")?;
        read_branch_file(path)?
    };

    if branches.is_empty() {
        anyhow::bail!("no branch names to map");
    }

    let dag = DagBuilder::new(&source).build(&branches)?;

    let json = if cli.compact {
        dag.to_json_compact()?
    } else {
        dag.to_json()?
    };

    match cli.output {
        Some(path) => {
            fs::write(&path, &json)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => println!("{json}"),
    }

    Ok(())
}

fn read_branch_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read branch file {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}
