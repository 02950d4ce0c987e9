use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{self, CommandReport};
use crate::tweets::paths::PathOverrides;

#[derive(Debug, Parser)]
#[command(
    name = "tweet-harvest",
    version,
    about = "Harvest captured tweet snapshots into one index and render them for display"
)]
struct Cli {
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Directory holding <id>.<YYYYMMDD>.json snapshots"
    )]
    data_dir: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Index file to write or read"
    )]
    index_file: Option<PathBuf>,
    #[arg(long, global = true, help = "Print the command report as JSON")]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Rebuild the index from the newest snapshot of every post")]
    Harvest,
    #[command(about = "Download one post from the syndication endpoint into the snapshot dir")]
    Fetch(FetchArgs),
    #[command(about = "Render one indexed post as display text")]
    Render(RenderArgs),
    #[command(about = "Show resolved paths and configuration")]
    Status,
}

#[derive(Debug, Args)]
struct FetchArgs {
    /// Numeric post id; validated by the command so the usage hint is printed.
    post_id: Option<String>,
}

#[derive(Debug, Args)]
struct RenderArgs {
    post_id: String,
}

fn print_report(report: &CommandReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let state = if report.ok { "ok" } else { "failed" };
    println!("{}: {state}", report.command);
    for detail in &report.details {
        println!("  {detail}");
    }
    for issue in &report.issues {
        println!("  issue: {issue}");
    }
    Ok(())
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let overrides = PathOverrides {
        data_dir: cli.data_dir.clone(),
        index_file: cli.index_file.clone(),
    };
    let (cfg, paths) = commands::resolve_runtime(&overrides)?;

    let report = match cli.command {
        Commands::Harvest => commands::harvest::run(&paths)?,
        Commands::Fetch(args) => commands::fetch::run(
            &cfg,
            &paths,
            &commands::fetch::FetchOptions {
                post_id: args.post_id,
            },
        )?,
        Commands::Render(args) => commands::render::run(
            &paths,
            &commands::render::RenderOptions {
                post_id: args.post_id,
            },
        )?,
        Commands::Status => commands::status::run(&paths)?,
    };

    print_report(&report, cli.json)?;
    if !report.ok {
        bail!("{} reported {} issue(s)", report.command, report.issues.len());
    }
    Ok(())
}
