//! Run configuration shared by every pipeline stage.
//!
//! A `RunContext` is built once at the start of a run, either from CLI
//! arguments or restored from a checkpoint, and is never mutated afterwards.
//! The matched file set is deliberately *not* part of it: files on disk may
//! change between runs, so the pipeline re-resolves the glob every time.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A locale the user asked for, with a display name for prompt documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    pub name: String,
    pub code: String,
}

/// Supported frontend frameworks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Vue,
    React,
    Svelte,
}

impl Framework {
    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::Vue => "vue",
            Framework::React => "react",
            Framework::Svelte => "svelte",
        }
    }
}

/// Supported build tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Builder {
    Vite,
    Webpack,
    Nuxt,
}

impl Builder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Builder::Vite => "vite",
            Builder::Webpack => "webpack",
            Builder::Nuxt => "nuxt",
        }
    }
}

/// Immutable per-run configuration.
///
/// Serialized into the checkpoint file alongside the completion record so a
/// resumed run can show what it was configured with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunContext {
    pub framework: Framework,
    pub builder: Builder,
    /// Builder config file, e.g. `vite.config.ts`.
    pub builder_config_file: String,
    /// Application entry file, e.g. `src/main.ts`.
    pub main_file: String,
    /// Glob selecting the files to translate, e.g. `src/**/*.vue`.
    pub glob: String,
    /// Checkpoint file path, relative to the project root.
    pub checkpoint_file: String,
    pub default_locale: Locale,
    pub locales: Vec<Locale>,
    /// Whether the dependency-install stage is requested.
    pub need_install: bool,
    /// Whether the builder-config stage is requested.
    pub need_builder_config: bool,
    /// Whether the entry-file stage is requested.
    pub need_main_config: bool,
}
