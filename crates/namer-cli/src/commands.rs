//! Non-interactive subcommands: `scan`, `config` and `project`.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use namer_analyzer::{ProjectInfo, analyze_file, detect_project, discover_sources};
use namer_core::{IdentifierKind, ProviderKind};
use namer_settings::{
    AiSettings, ConfigLocation, LoadedSettings, ProviderPolicy, read_settings_file,
    save_settings_to_path,
};
use namer_suggest::{SuggestionOrchestrator, SuggestionReport};
use serde::Serialize;
use tracing::{info, warn};

/// A single file, or every source file below a directory.
pub fn collect_files(path: &Path, max_depth: usize) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        anyhow::bail!("path does not exist: {}", path.display());
    }
    Ok(discover_sources(path, max_depth))
}

/// One line of `scan --json` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScanRecord<'a> {
    file: &'a Path,
    name: &'a str,
    kind: IdentifierKind,
    line: Option<u32>,
    #[serde(flatten)]
    report: &'a SuggestionReport,
}

/// Counters for a scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanTotals {
    /// Files analyzed successfully.
    pub files: usize,
    /// Identifiers that received suggestions.
    pub identifiers: usize,
}

/// Print suggestions for every identifier of every file.
pub async fn scan<W: Write>(
    orchestrator: &SuggestionOrchestrator,
    files: &[PathBuf],
    json: bool,
    out: &mut W,
) -> Result<ScanTotals> {
    let mut totals = ScanTotals::default();
    for path in files {
        let analysis = match analyze_file(path) {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!(?path, error = %e, "skipping file");
                continue;
            }
        };
        totals.files += 1;
        if !json && !analysis.identifiers.is_empty() {
            writeln!(out, "{} [{}]", path.display(), analysis.file_context.domain)?;
        }

        for identifier in &analysis.identifiers {
            let report = orchestrator
                .resolve(
                    &identifier.name,
                    identifier.kind,
                    &identifier.source_context,
                    &analysis.file_context,
                )
                .await;
            totals.identifiers += 1;

            if json {
                let record = ScanRecord {
                    file: path,
                    name: &identifier.name,
                    kind: identifier.kind,
                    line: identifier.line,
                    report: &report,
                };
                writeln!(out, "{}", serde_json::to_string(&record)?)?;
            } else {
                let line = identifier.line.map_or_else(|| "?".to_string(), |l| l.to_string());
                let source = report.provider.as_deref().unwrap_or("rules");
                writeln!(
                    out,
                    "  {line:>4}  {} {}: {}  ({source})",
                    identifier.kind,
                    identifier.name,
                    report.suggestions.join(", ")
                )?;
            }
        }
    }
    info!(files = totals.files, identifiers = totals.identifiers, "scan finished");
    Ok(totals)
}

/// Print the effective settings with keys masked.
pub fn show_config<W: Write>(loaded: &LoadedSettings, out: &mut W) -> Result<()> {
    match &loaded.source {
        Some(path) => writeln!(out, "source: {}", path.display())?,
        None => writeln!(out, "source: built-in defaults")?,
    }
    writeln!(
        out,
        "{}",
        serde_json::to_string_pretty(&loaded.settings.redacted())?
    )?;
    Ok(())
}

/// Probe every backend once and print whether it answers.
pub async fn check_providers<W: Write>(settings: &AiSettings, out: &mut W) -> Result<()> {
    for provider in namer_llm::build_providers(settings) {
        let status = if provider.is_available().await {
            "available"
        } else {
            "unavailable"
        };
        writeln!(out, "  {:<10} {:<20} {status}", provider.kind().as_str(), provider.label())?;
    }
    Ok(())
}

/// Values collected by `config init`.
#[derive(Clone, Debug, Default)]
pub struct InitOptions {
    /// Policy to store.
    pub provider: Option<ProviderPolicy>,
    /// OpenAI key.
    pub openai_key: Option<String>,
    /// Anthropic key.
    pub anthropic_key: Option<String>,
    /// Gemini key.
    pub gemini_key: Option<String>,
    /// Ollama model.
    pub ollama_model: Option<String>,
    /// Ollama generate endpoint.
    pub ollama_endpoint: Option<String>,
}

/// Apply `options` on top of `settings`. Unset options leave values alone.
pub fn apply_init_options(settings: &mut AiSettings, options: InitOptions) {
    if let Some(policy) = options.provider {
        settings.provider = policy;
    }
    let keys = [
        (ProviderKind::OpenAi, options.openai_key),
        (ProviderKind::Anthropic, options.anthropic_key),
        (ProviderKind::Gemini, options.gemini_key),
    ];
    for (kind, key) in keys {
        if let (Some(key), Some(hosted)) = (key, settings.hosted_mut(kind)) {
            hosted.api_key = key;
        }
    }
    if let Some(model) = options.ollama_model {
        settings.ollama.model = model;
    }
    if let Some(endpoint) = options.ollama_endpoint {
        settings.ollama.endpoint = endpoint;
    }
}

/// Write a config file at `location`, updating an existing one in place.
pub fn init_config(location: ConfigLocation, options: InitOptions) -> Result<PathBuf> {
    let path = location.path();
    init_config_at(&path, options)?;
    Ok(path)
}

/// [`init_config`] against an explicit path.
pub fn init_config_at(path: &Path, options: InitOptions) -> Result<AiSettings> {
    let mut settings = if path.exists() {
        read_settings_file(path)
            .with_context(|| format!("Failed to read existing config: {}", path.display()))?
    } else {
        AiSettings::default()
    };
    apply_init_options(&mut settings, options);

    if let ProviderPolicy::Single(kind) = settings.provider {
        let missing_key = settings.hosted(kind).is_some_and(|h| !h.has_api_key());
        if missing_key {
            warn!(provider = %kind, "provider selected without an API key");
        }
    }

    save_settings_to_path(&settings, path)
        .with_context(|| format!("Failed to write config: {}", path.display()))?;
    Ok(settings)
}

/// Print detected project info, as text or JSON.
pub fn show_project<W: Write>(root: &Path, json: bool, out: &mut W) -> Result<ProjectInfo> {
    let info = detect_project(root);
    if json {
        writeln!(out, "{}", serde_json::to_string(&info)?)?;
    } else {
        writeln!(out, "language:  {}", info.language)?;
        writeln!(out, "framework: {}", info.framework)?;
    }
    Ok(info)
}
