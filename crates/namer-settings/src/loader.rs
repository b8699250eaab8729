//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`AiSettings::default()`]
//! 2. Deep-merge the first readable file of `./.ai-config.json` and
//!    `~/.namer-suggester-ai-config.json` over the defaults
//! 3. Apply environment variables (highest priority)
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)
//!
//! Timeouts outside `1000..=120000` ms are logged and reset to their defaults.

use std::path::{Path, PathBuf};

use namer_core::ProviderKind;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::types::{AiSettings, ProviderPolicy};

/// Project-level config file name.
pub const PROJECT_CONFIG_FILE: &str = ".ai-config.json";
/// Global config file name, under `$HOME`.
pub const GLOBAL_CONFIG_FILE: &str = ".namer-suggester-ai-config.json";
/// Smallest accepted timeout, from file or env.
pub const MIN_TIMEOUT_MS: u64 = 1_000;
/// Largest accepted timeout, from file or env.
pub const MAX_TIMEOUT_MS: u64 = 120_000;

/// Where [`save_settings`] writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigLocation {
    /// `./.ai-config.json`
    Project,
    /// `~/.namer-suggester-ai-config.json`
    Global,
}

impl ConfigLocation {
    /// Resolve to a file path.
    pub fn path(self) -> PathBuf {
        match self {
            Self::Project => project_config_path(),
            Self::Global => global_config_path(),
        }
    }
}

/// Settings plus the file they were read from, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedSettings {
    /// Effective settings.
    pub settings: AiSettings,
    /// Config file that contributed, `None` when running on defaults.
    pub source: Option<PathBuf>,
}

/// `./.ai-config.json`, relative to the working directory.
pub fn project_config_path() -> PathBuf {
    PathBuf::from(PROJECT_CONFIG_FILE)
}

/// `~/.namer-suggester-ai-config.json`.
pub fn global_config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(GLOBAL_CONFIG_FILE)
}

/// Config files in lookup order.
pub fn config_candidates() -> Vec<PathBuf> {
    vec![project_config_path(), global_config_path()]
}

/// Load settings from the standard locations with env var overrides.
///
/// Never fails: unreadable or invalid files are logged and skipped.
pub fn load_settings() -> LoadedSettings {
    load_settings_from_candidates(&config_candidates(), |key| std::env::var(key).ok())
}

/// Load from an explicit candidate list with an injected env lookup.
///
/// The first candidate that exists and parses wins; later ones are not read.
pub fn load_settings_from_candidates<F>(candidates: &[PathBuf], lookup: F) -> LoadedSettings
where
    F: Fn(&str) -> Option<String>,
{
    let mut loaded = LoadedSettings {
        settings: AiSettings::default(),
        source: None,
    };

    for path in candidates.iter().filter(|p| p.exists()) {
        match read_settings_file(path) {
            Ok(settings) => {
                debug!(?path, "loaded config file");
                loaded = LoadedSettings {
                    settings,
                    source: Some(path.clone()),
                };
                break;
            }
            Err(error) => warn!(?path, %error, "ignoring unreadable config file"),
        }
    }

    apply_env_overrides_with(&mut loaded.settings, lookup);
    loaded
}

/// Deep-merge one file over the defaults, without touching the environment.
pub fn read_settings_file(path: &Path) -> Result<AiSettings> {
    let defaults = serde_json::to_value(AiSettings::default())?;

    let merged = if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "config file not found, using defaults");
        defaults
    };

    let mut settings: AiSettings = serde_json::from_value(merged)?;
    reset_out_of_range_timeouts(&mut settings);
    Ok(settings)
}

/// Put any timeout outside `MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS` back to its default.
fn reset_out_of_range_timeouts(settings: &mut AiSettings) {
    let defaults = AiSettings::default();
    for (key, value, default) in [
        ("copilot.timeoutMs", &mut settings.copilot.timeout_ms, defaults.copilot.timeout_ms),
        (
            "copilot.probeTimeoutMs",
            &mut settings.copilot.probe_timeout_ms,
            defaults.copilot.probe_timeout_ms,
        ),
        ("openai.timeoutMs", &mut settings.openai.timeout_ms, defaults.openai.timeout_ms),
        ("anthropic.timeoutMs", &mut settings.anthropic.timeout_ms, defaults.anthropic.timeout_ms),
        ("gemini.timeoutMs", &mut settings.gemini.timeout_ms, defaults.gemini.timeout_ms),
        ("ollama.timeoutMs", &mut settings.ollama.timeout_ms, defaults.ollama.timeout_ms),
        (
            "ollama.probeTimeoutMs",
            &mut settings.ollama.probe_timeout_ms,
            defaults.ollama.probe_timeout_ms,
        ),
    ] {
        if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&*value) {
            warn!(key, value = *value, default, "timeout out of range, using default");
            *value = default;
        }
    }
}

/// Write `settings` as pretty JSON to `location`, returning the path.
pub fn save_settings(settings: &AiSettings, location: ConfigLocation) -> Result<PathBuf> {
    let path = location.path();
    save_settings_to_path(settings, &path)?;
    Ok(path)
}

/// Write `settings` as pretty JSON to `path`, creating parent directories.
pub fn save_settings_to_path(settings: &AiSettings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut json = serde_json::to_string_pretty(settings)?;
    json.push('\n');
    std::fs::write(path, json)?;
    debug!(?path, "saved config file");
    Ok(())
}

/// Recursive deep merge of two JSON values.
///
/// - Objects are merged recursively (source overrides target per-key)
/// - Arrays and primitives are replaced entirely by source
/// - Null values in source are skipped (preserving target)
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply environment overrides using `lookup` to read variables.
///
/// - `OPENAI_API_KEY`, `ANTHROPIC_API_KEY`, `GEMINI_API_KEY` only fill empty keys
/// - `NAMER_PROVIDER`, `NAMER_OLLAMA_ENDPOINT`, `NAMER_OLLAMA_MODEL` override
/// - `NAMER_HTTP_TIMEOUT_MS` (1000..=120000) overrides every HTTP timeout
/// - Invalid values are logged and ignored
pub fn apply_env_overrides_with<F>(settings: &mut AiSettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    for (kind, var) in [
        (ProviderKind::OpenAi, "OPENAI_API_KEY"),
        (ProviderKind::Anthropic, "ANTHROPIC_API_KEY"),
        (ProviderKind::Gemini, "GEMINI_API_KEY"),
    ] {
        if let (Some(hosted), Some(key)) = (settings.hosted_mut(kind), read(var)) {
            if !hosted.has_api_key() {
                hosted.api_key = key;
            }
        }
    }

    if let Some(v) = read("NAMER_PROVIDER") {
        match v.parse::<ProviderPolicy>() {
            Ok(policy) => settings.provider = policy,
            Err(error) => {
                warn!(key = "NAMER_PROVIDER", value = %v, %error, "invalid env var, ignoring");
            }
        }
    }
    if let Some(v) = read("NAMER_OLLAMA_ENDPOINT") {
        settings.ollama.endpoint = v;
    }
    if let Some(v) = read("NAMER_OLLAMA_MODEL") {
        settings.ollama.model = v;
    }
    if let Some(v) = read("NAMER_HTTP_TIMEOUT_MS") {
        match parse_u64_range(&v, MIN_TIMEOUT_MS, MAX_TIMEOUT_MS) {
            Some(ms) => {
                settings.openai.timeout_ms = ms;
                settings.anthropic.timeout_ms = ms;
                settings.gemini.timeout_ms = ms;
                settings.ollama.timeout_ms = ms;
            }
            None => {
                warn!(key = "NAMER_HTTP_TIMEOUT_MS", value = %v, "invalid u64 env var, ignoring");
            }
        }
    }
}

/// Parse a string as a `u64` within a range.
pub fn parse_u64_range(val: &str, min: u64, max: u64) -> Option<u64> {
    let n: u64 = val.trim().parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;
    use crate::errors::SettingsError;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn deep_merge_nested_objects() {
        let target = json!({"openai": {"model": "a", "apiKey": ""}, "provider": "rules"});
        let source = json!({"openai": {"apiKey": "k"}});
        let merged = deep_merge(target, source);
        assert_eq!(merged["openai"]["model"], "a");
        assert_eq!(merged["openai"]["apiKey"], "k");
        assert_eq!(merged["provider"], "rules");
    }

    #[test]
    fn deep_merge_skips_null_and_replaces_arrays() {
        let merged = deep_merge(json!({"a": 1, "b": [1, 2]}), json!({"a": null, "b": [3]}));
        assert_eq!(merged["a"], 1);
        assert_eq!(merged["b"], json!([3]));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = read_settings_file(&dir.path().join("nope.json")).unwrap();
        assert_eq!(settings, AiSettings::default());
    }

    #[test]
    fn partial_file_keeps_default_models() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "c.json", r#"{"provider":"auto","openai":{"apiKey":"sk"}}"#);
        let settings = read_settings_file(&path).unwrap();
        assert_eq!(settings.provider, ProviderPolicy::Auto);
        assert_eq!(settings.openai.api_key, "sk");
        assert_eq!(settings.openai.model, "gpt-4o-mini");
    }

    #[test]
    fn invalid_json_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "c.json", "{not json");
        assert_matches!(read_settings_file(&path), Err(SettingsError::Json(_)));
    }

    #[test]
    fn unknown_provider_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "c.json", r#"{"provider":"bard"}"#);
        assert!(read_settings_file(&path).is_err());
    }

    #[test]
    fn first_existing_candidate_wins() {
        let dir = tempfile::tempdir().unwrap();
        let project = write(dir.path(), "project.json", r#"{"provider":"ollama"}"#);
        let global = write(dir.path(), "global.json", r#"{"provider":"openai"}"#);
        let loaded = load_settings_from_candidates(&[project.clone(), global], env(&[]));
        assert_eq!(loaded.settings.provider, ProviderPolicy::Single(ProviderKind::Ollama));
        assert_eq!(loaded.source, Some(project));
    }

    #[test]
    fn broken_candidate_falls_through() {
        let dir = tempfile::tempdir().unwrap();
        let project = write(dir.path(), "project.json", "{oops");
        let global = write(dir.path(), "global.json", r#"{"provider":"gemini"}"#);
        let loaded = load_settings_from_candidates(&[project, global.clone()], env(&[]));
        assert_eq!(loaded.settings.provider, ProviderPolicy::Single(ProviderKind::Gemini));
        assert_eq!(loaded.source, Some(global));
    }

    #[test]
    fn no_candidates_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_settings_from_candidates(&[dir.path().join("missing.json")], env(&[]));
        assert_eq!(loaded.settings, AiSettings::default());
        assert!(loaded.source.is_none());
    }

    #[test]
    fn env_keys_fill_only_empty_slots() {
        let mut settings = AiSettings::default();
        settings.anthropic.api_key = "from-file".to_string();
        apply_env_overrides_with(
            &mut settings,
            env(&[("OPENAI_API_KEY", "from-env"), ("ANTHROPIC_API_KEY", "other")]),
        );
        assert_eq!(settings.openai.api_key, "from-env");
        assert_eq!(settings.anthropic.api_key, "from-file");
        assert_eq!(settings.gemini.api_key, "");
    }

    #[test]
    fn env_overrides_policy_and_ollama() {
        let mut settings = AiSettings::default();
        apply_env_overrides_with(
            &mut settings,
            env(&[
                ("NAMER_PROVIDER", "auto"),
                ("NAMER_OLLAMA_ENDPOINT", "http://box:11434/api/generate"),
                ("NAMER_OLLAMA_MODEL", "codellama"),
            ]),
        );
        assert_eq!(settings.provider, ProviderPolicy::Auto);
        assert_eq!(settings.ollama.endpoint, "http://box:11434/api/generate");
        assert_eq!(settings.ollama.model, "codellama");
    }

    #[test]
    fn invalid_env_values_ignored() {
        let mut settings = AiSettings::default();
        apply_env_overrides_with(
            &mut settings,
            env(&[("NAMER_PROVIDER", "bard"), ("NAMER_HTTP_TIMEOUT_MS", "5")]),
        );
        assert_eq!(settings.provider, ProviderPolicy::Rules);
        assert_eq!(settings.openai.timeout_ms, 10_000);
    }

    #[test]
    fn env_timeout_applies_to_http_backends() {
        let mut settings = AiSettings::default();
        apply_env_overrides_with(&mut settings, env(&[("NAMER_HTTP_TIMEOUT_MS", "2500")]));
        assert_eq!(settings.gemini.timeout_ms, 2_500);
        assert_eq!(settings.ollama.timeout_ms, 2_500);
        assert_eq!(settings.copilot.timeout_ms, 8_000);
    }

    #[test]
    fn zero_timeout_in_file_resets_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            ".ai-config.json",
            r#"{"copilot": {"timeoutMs": 0}, "openai": {"timeoutMs": 0}, "ollama": {"probeTimeoutMs": 0}}"#,
        );
        let settings = read_settings_file(&path).unwrap();
        let defaults = AiSettings::default();
        assert_eq!(settings.copilot.timeout_ms, defaults.copilot.timeout_ms);
        assert_eq!(settings.openai.timeout_ms, defaults.openai.timeout_ms);
        assert_eq!(settings.ollama.probe_timeout_ms, defaults.ollama.probe_timeout_ms);
    }

    #[test]
    fn huge_timeout_in_file_resets_but_valid_one_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            ".ai-config.json",
            r#"{"gemini": {"timeoutMs": 86400000}, "anthropic": {"timeoutMs": 2500}}"#,
        );
        let loaded = load_settings_from_candidates(&[path], env(&[]));
        assert_eq!(loaded.settings.gemini.timeout_ms, 10_000);
        assert_eq!(loaded.settings.anthropic.timeout_ms, 2_500);
    }

    #[test]
    fn parse_range() {
        assert_eq!(parse_u64_range("1500", 1000, 2000), Some(1500));
        assert_eq!(parse_u64_range("999", 1000, 2000), None);
        assert_eq!(parse_u64_range("abc", 1000, 2000), None);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cfg.json");
        let mut settings = AiSettings::default();
        settings.provider = ProviderPolicy::Single(ProviderKind::Anthropic);
        settings.anthropic.api_key = "k".to_string();
        save_settings_to_path(&settings, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"provider\": \"anthropic\""));
        assert!(content.ends_with('\n'));
        assert_eq!(read_settings_file(&path).unwrap(), settings);
    }

    #[test]
    fn location_paths() {
        assert_eq!(ConfigLocation::Project.path(), PathBuf::from(".ai-config.json"));
        assert!(
            ConfigLocation::Global
                .path()
                .ends_with(".namer-suggester-ai-config.json")
        );
    }
}
