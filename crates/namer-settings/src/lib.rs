//! # namer-settings
//!
//! AI provider configuration with layered sources.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`AiSettings::default()`], rules-only
//! 2. **Config file**: `./.ai-config.json`, else `~/.namer-suggester-ai-config.json`
//!    (deep-merged over defaults)
//! 3. **Environment variables**: API keys and `NAMER_*` overrides
//!
//! ```no_run
//! use namer_settings::load_settings;
//!
//! let loaded = load_settings();
//! println!("policy: {}", loaded.settings.provider);
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{
    ConfigLocation, LoadedSettings, MAX_TIMEOUT_MS, MIN_TIMEOUT_MS, apply_env_overrides_with,
    config_candidates, deep_merge, global_config_path, load_settings,
    load_settings_from_candidates, project_config_path, read_settings_file, save_settings,
    save_settings_to_path,
};
pub use types::{
    AiSettings, CliAssistantSettings, HostedProviderSettings, LocalServerSettings, ProviderPolicy,
};
