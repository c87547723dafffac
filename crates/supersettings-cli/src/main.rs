mod host;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use supersettings_core::config::Config;
use supersettings_core::logging::init_logging;
use supersettings_core::{syntax_name, SuperSettings};

#[derive(Parser)]
#[command(
    name = "supersettings",
    about = "Resolve per-directory editor settings for a file"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the effective settings for a file as JSON
    Resolve {
        file: PathBuf,
        /// Syntax definition path or bare syntax name (e.g. Python)
        #[arg(long)]
        syntax: Option<String>,
    },
    /// Show every effective setting with the file it came from
    Explain {
        file: PathBuf,
        #[arg(long)]
        syntax: Option<String>,
    },
    /// List the settings files considered for a file, highest priority first
    Candidates {
        file: PathBuf,
        #[arg(long)]
        syntax: Option<String>,
    },
    /// Read view events as JSON lines on stdin and apply settings to them
    Serve,
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(Config::default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let _guard = init_logging(&config.logging.filter, config.logging.dir.as_deref())?;
    let service = SuperSettings::from_config(&config);

    match &cli.command {
        Commands::Resolve { file, syntax } => cmd_resolve(&service, file, syntax.as_deref()),
        Commands::Explain { file, syntax } => cmd_explain(&service, file, syntax.as_deref()),
        Commands::Candidates { file, syntax } => {
            cmd_candidates(&service, file, syntax.as_deref())
        }
        Commands::Serve => cmd_serve(&service).await,
    }
}

fn target_dir(file: &Path) -> Option<&Path> {
    file.parent()
}

fn cmd_resolve(service: &SuperSettings, file: &Path, syntax: Option<&str>) -> anyhow::Result<()> {
    let syntax = syntax.and_then(syntax_name);
    let settings = service
        .resolver()
        .resolve(target_dir(file), syntax.as_deref());
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}

fn cmd_explain(service: &SuperSettings, file: &Path, syntax: Option<&str>) -> anyhow::Result<()> {
    let syntax = syntax.and_then(syntax_name);
    let resolution = service
        .resolver()
        .resolve_traced(target_dir(file), syntax.as_deref());

    if resolution.settings.is_empty() {
        println!("No settings apply to {}", file.display());
        return Ok(());
    }

    for (key, value) in &resolution.settings {
        let origin = resolution
            .origin(key)
            .map(|c| c.path.display().to_string())
            .unwrap_or_default();
        println!("{} = {}  ({})", key, value, origin);
    }
    Ok(())
}

fn cmd_candidates(
    service: &SuperSettings,
    file: &Path,
    syntax: Option<&str>,
) -> anyhow::Result<()> {
    let syntax = syntax.and_then(syntax_name);
    for candidate in service
        .resolver()
        .candidates(target_dir(file), syntax.as_deref())
    {
        let marker = if candidate.path.is_file() { "*" } else { " " };
        println!("{} {:>3}  {}", marker, candidate.rank, candidate.path.display());
    }
    Ok(())
}

async fn cmd_serve(service: &SuperSettings) -> anyhow::Result<()> {
    tracing::info!("Waiting for view events on stdin");

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    tokio::select! {
        result = host::serve(service, stdin, stdout) => result?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down...");
        }
    }

    tracing::info!("{} views configured at exit", service.applied().len());
    Ok(())
}
