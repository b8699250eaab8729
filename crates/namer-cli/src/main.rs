//! # namer
//!
//! Command-line front end: discovers JS/TS sources, extracts identifiers and
//! prints or interactively reviews naming suggestions.

#![deny(unsafe_code)]

mod commands;
mod decision_log;
mod logging;
mod review;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use namer_analyzer::DEFAULT_MAX_DEPTH;
use namer_settings::{ConfigLocation, ProviderPolicy, load_settings};
use namer_suggest::SuggestionOrchestrator;
use tokio::io::BufReader;
use tracing::info;

use crate::commands::InitOptions;
use crate::decision_log::DecisionLog;
use crate::review::Reviewer;

/// Identifier naming assistant for JavaScript and TypeScript.
#[derive(Parser, Debug)]
#[command(name = "namer", version, about = "Suggest better identifier names for JS/TS code")]
struct Cli {
    /// Debug-level logging (overridden by `RUST_LOG`).
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print suggestions for every identifier under PATH.
    Scan {
        /// File or directory.
        path: PathBuf,
        #[command(flatten)]
        source: SourceArgs,
        /// One JSON object per identifier.
        #[arg(long)]
        json: bool,
    },
    /// Walk identifiers interactively and log each decision.
    Review {
        /// File or directory.
        path: PathBuf,
        #[command(flatten)]
        source: SourceArgs,
        /// Skip the confirmation for large runs.
        #[arg(long, short)]
        yes: bool,
    },
    /// Inspect or write AI provider configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Detect language and framework of a project.
    Project {
        /// Project root.
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Print JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Provider policy for this run: rules, auto, or a backend name.
    #[arg(long)]
    provider: Option<ProviderPolicy>,
    /// Maximum directory depth.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print effective settings with API keys masked.
    Show {
        /// Also probe every backend.
        #[arg(long)]
        check: bool,
    },
    /// Create or update a config file.
    Init {
        /// Write `~/.namer-suggester-ai-config.json` instead of `./.ai-config.json`.
        #[arg(long)]
        global: bool,
        /// Provider policy: rules, auto, copilot, openai, anthropic, gemini or ollama.
        #[arg(long)]
        provider: ProviderPolicy,
        /// OpenAI API key.
        #[arg(long)]
        openai_key: Option<String>,
        /// Anthropic API key.
        #[arg(long)]
        anthropic_key: Option<String>,
        /// Gemini API key.
        #[arg(long)]
        gemini_key: Option<String>,
        /// Ollama model name.
        #[arg(long)]
        ollama_model: Option<String>,
        /// Ollama generate endpoint.
        #[arg(long)]
        ollama_endpoint: Option<String>,
    },
}

fn orchestrator(policy: Option<ProviderPolicy>) -> SuggestionOrchestrator {
    let loaded = load_settings();
    let mut settings = loaded.settings;
    if let Some(policy) = policy {
        settings.provider = policy;
    }
    info!(policy = %settings.provider, source = ?loaded.source, "settings loaded");
    SuggestionOrchestrator::new(&settings)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_subscriber(logging::level_for(cli.verbose), cli.log_json);

    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Scan { path, source, json } => {
            let files = commands::collect_files(&path, source.max_depth)?;
            let orchestrator = orchestrator(source.provider);
            let _ = commands::scan(&orchestrator, &files, json, &mut stdout).await?;
        }
        Command::Review { path, source, yes } => {
            let files = commands::collect_files(&path, source.max_depth)?;
            if files.is_empty() {
                println!("No JavaScript or TypeScript files found in {}", path.display());
                return Ok(());
            }
            let orchestrator = orchestrator(source.provider);
            let log = DecisionLog::default();
            let input = BufReader::new(tokio::io::stdin());
            let mut reviewer = Reviewer::new(&orchestrator, &log, input, &mut stdout);
            if !yes && !reviewer.confirm_large_run(files.len()).await? {
                return Ok(());
            }
            let _ = reviewer.run(&files).await?;
        }
        Command::Config { action } => match action {
            ConfigAction::Show { check } => {
                let loaded = load_settings();
                commands::show_config(&loaded, &mut stdout)?;
                if check {
                    commands::check_providers(&loaded.settings, &mut stdout).await?;
                }
            }
            ConfigAction::Init {
                global,
                provider,
                openai_key,
                anthropic_key,
                gemini_key,
                ollama_model,
                ollama_endpoint,
            } => {
                let location = if global {
                    ConfigLocation::Global
                } else {
                    ConfigLocation::Project
                };
                let options = InitOptions {
                    provider: Some(provider),
                    openai_key,
                    anthropic_key,
                    gemini_key,
                    ollama_model,
                    ollama_endpoint,
                };
                let path = commands::init_config(location, options)?;
                println!("Configuration written to {}", path.display());
            }
        },
        Command::Project { path, json } => {
            let _ = commands::show_project(&path, json, &mut stdout)?;
        }
    }
    Ok(())
}
