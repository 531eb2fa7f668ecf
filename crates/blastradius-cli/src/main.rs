use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use blastradius_catalog::{resolve_seeds, ApiClient, CatalogSource};
use blastradius_core::{AssetIdentity, Config};
use blastradius_engine::{assemble, DiffAggregator, ImpactWalker};

mod changes;
mod content;
mod github;
mod markdown;

use content::GitContentSource;
use github::GithubReporter;

/// BlastRadius - downstream impact analysis for dbt model changes
#[derive(Parser)]
#[command(name = "blastradius")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: blastradius.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a change set and publish the impact report
    Analyze(AnalyzeArgs),

    /// Show downstream impact for a single model
    Impact {
        /// Model name to analyze
        model: String,
    },
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Changed files as a comma/whitespace separated list
    /// (default: the CI event payload)
    #[arg(long)]
    changed_files: Option<String>,

    /// Base revision for before-content (default: GITHUB_BASE_REF)
    #[arg(long)]
    base: Option<String>,

    /// Head revision for after-content (default: GITHUB_SHA)
    #[arg(long)]
    head: Option<String>,

    /// Repository checkout used for content retrieval
    #[arg(long, default_value = ".")]
    repo_dir: PathBuf,

    /// Output file for the JSON report
    #[arg(short, long, default_value = "impact-report.json")]
    output: PathBuf,

    /// Also write the rendered markdown
    #[arg(short, long)]
    markdown: Option<PathBuf>,

    /// Skip posting the PR comment even when a PR context exists
    #[arg(long)]
    no_comment: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else if Path::new("blastradius.toml").exists() {
        Config::from_file(Path::new("blastradius.toml"))?
    } else {
        if cli.verbose {
            eprintln!("{}", "No config file found, using defaults".yellow());
        }
        Config::default()
    };
    config.api.apply_env();

    match cli.command {
        Commands::Analyze(args) => analyze_command(&config, &args, cli.verbose).await,
        Commands::Impact { model } => impact_command(&config, &model, cli.verbose).await,
    }
}

/// Analyze command - full run from changed files to published report
async fn analyze_command(config: &Config, args: &AnalyzeArgs, verbose: bool) -> Result<()> {
    config.api.validate()?;

    let changed = collect_changed_files(args.changed_files.as_deref())?;
    if verbose {
        eprintln!("{} {} changed files", "Collected".cyan(), changed.len());
    }

    let client = ApiClient::new(config.api.clone());
    let tasks = client.list_tasks().await;
    let seeds = resolve_seeds(&tasks, &changed, config.matching);
    if verbose {
        eprintln!(
            "{} {} of {} catalog tasks",
            "Matched".cyan(),
            seeds.len(),
            tasks.len()
        );
    }

    let changed_models: Vec<String> = seeds.iter().map(|s| s.model.clone()).collect();
    let identities: Vec<AssetIdentity> = seeds.iter().map(|s| s.task.identity()).collect();

    let walker = ImpactWalker::new(&client, config.identity_key, config.limits);
    let outcome = walker.walk(&identities).await;

    let base = args
        .base
        .clone()
        .or_else(|| std::env::var("GITHUB_BASE_REF").ok());
    let head = args
        .head
        .clone()
        .or_else(|| std::env::var("GITHUB_SHA").ok());
    let column_diffs = match (base, head) {
        (Some(base), Some(head)) => {
            let source = GitContentSource::new(&args.repo_dir);
            DiffAggregator::new(&source, base, head)
                .diff_files(&changed)
                .await
        }
        _ => {
            warn!("base/head revisions unavailable; skipping column diffs");
            Vec::new()
        }
    };

    let report = assemble(changed_models, outcome, column_diffs);

    std::fs::write(&args.output, report.to_json()?)?;
    if verbose {
        eprintln!("{} {}", "Report written to".cyan(), args.output.display());
    }

    let rendered = markdown::render(&report);
    if let Some(path) = &args.markdown {
        std::fs::write(path, &rendered)?;
    }

    if let Err(e) = github::write_job_summary(&rendered) {
        warn!(error = %e, "failed to write job summary");
    }

    if args.no_comment {
        info!("comment posting disabled");
    } else {
        match GithubReporter::from_env() {
            Some(reporter) => match reporter.post_comment(&rendered).await {
                Ok(()) => {
                    if verbose {
                        eprintln!("{}", "Posted PR comment".green());
                    }
                }
                Err(e) => warn!(error = %e, "failed to post PR comment"),
            },
            None => info!("no pull request context; skipping comment"),
        }
    }

    println!(
        "{} {} direct, {} indirect, {} files with column changes",
        "Impact:".bold(),
        report.summary.direct,
        report.summary.indirect,
        report.summary.files_with_column_changes
    );

    Ok(())
}

/// Impact command - downstream listing for one model
async fn impact_command(config: &Config, model: &str, verbose: bool) -> Result<()> {
    config.api.validate()?;

    let client = ApiClient::new(config.api.clone());
    let tasks = client.list_tasks().await;

    let task = tasks
        .iter()
        .find(|t| t.is_dbt() && t.name == model)
        .ok_or_else(|| anyhow::anyhow!("model '{model}' not found in catalog"))?;

    if verbose {
        eprintln!("{} {}", "Resolved".cyan(), task.identity());
    }

    let walker = ImpactWalker::new(&client, config.identity_key, config.limits);
    let outcome = walker.walk(&[task.identity()]).await;

    if outcome.direct.is_empty() && outcome.indirect.is_empty() {
        println!("No downstream assets depend on {}", model.bold());
        return Ok(());
    }

    for record in outcome.direct.iter().chain(outcome.indirect.iter()) {
        println!(
            "{:>8}  {} ({}, depth {})",
            record.classification.to_string().green(),
            record.name.bold(),
            record.connection_name,
            record.depth
        );
    }
    for note in &outcome.notes {
        eprintln!("{} {}", "warning:".yellow(), note);
    }

    Ok(())
}

/// Collect changed files from the explicit flag or the CI event payload
fn collect_changed_files(explicit: Option<&str>) -> Result<Vec<String>> {
    if let Some(list) = explicit {
        return Ok(changes::from_list(list));
    }

    if let Ok(path) = std::env::var("GITHUB_EVENT_PATH") {
        let json = std::fs::read_to_string(&path)?;
        return Ok(changes::from_event_payload(&json)?);
    }

    anyhow::bail!("no changed files: pass --changed-files or run inside CI with an event payload")
}
