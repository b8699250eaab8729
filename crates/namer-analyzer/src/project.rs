//! Project language and framework detection from marker files.

use std::fmt;
use std::path::Path;

use serde::Serialize;

/// Primary language of a project.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectLanguage {
    /// No `tsconfig.json`.
    JavaScript,
    /// `tsconfig.json` present.
    TypeScript,
}

/// Framework inferred from config files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Framework {
    /// `next.config.js` / `next.config.mjs`.
    Nextjs,
    /// `vite.config.js` / `vite.config.ts`.
    Vite,
    /// `angular.json`.
    Angular,
    /// `app.json` together with `metro.config.js`.
    ReactNative,
    /// None of the above.
    Unknown,
}

impl fmt::Display for ProjectLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
        })
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Nextjs => "nextjs",
            Self::Vite => "vite",
            Self::Angular => "angular",
            Self::ReactNative => "react-native",
            Self::Unknown => "unknown",
        })
    }
}

/// What [`detect_project`] found.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ProjectInfo {
    /// Language.
    pub language: ProjectLanguage,
    /// Framework.
    pub framework: Framework,
}

/// Inspect marker files directly inside `root`.
pub fn detect_project(root: &Path) -> ProjectInfo {
    let has = |name: &str| root.join(name).is_file();

    let language = if has("tsconfig.json") {
        ProjectLanguage::TypeScript
    } else {
        ProjectLanguage::JavaScript
    };

    let framework = if has("next.config.js") || has("next.config.mjs") {
        Framework::Nextjs
    } else if has("vite.config.js") || has("vite.config.ts") {
        Framework::Vite
    } else if has("angular.json") {
        Framework::Angular
    } else if has("app.json") && has("metro.config.js") {
        Framework::ReactNative
    } else {
        Framework::Unknown
    };

    ProjectInfo {
        language,
        framework,
    }
}
