//! Task units: one strategy per supported (framework, builder) pair.
//!
//! A worker owns the three mutation hooks the pipeline drives (builder
//! config, entry file, per-file translation) plus the package list its
//! stack needs. Selection is a straight match over the two tags; an
//! unsupported pair fails before any file is touched.

mod vite_vue;

use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use crate::ai::{ChatMessage, TextGenerator};
use crate::context::{Builder, Framework, RunContext};
use crate::error::PipelineError;
use crate::patch;
use crate::prompt;

pub use vite_vue::ViteVueWorker;

#[async_trait]
pub trait Worker: Send + Sync {
    /// Packages the locale feature needs. Pure, no I/O.
    fn dependencies(&self) -> &'static [&'static str];

    /// Patch the build-config file.
    async fn handle_builder_config(&self, generator: &dyn TextGenerator) -> Result<()>;

    /// Patch the application entry file.
    async fn handle_main_config(&self, generator: &dyn TextGenerator) -> Result<()>;

    /// Translate one matched project file, given root-relative `path`.
    async fn handle_primary_file(&self, generator: &dyn TextGenerator, path: &Path) -> Result<()>;
}

/// Select the worker for the run's (framework, builder) pair.
pub fn worker_for(ctx: &RunContext, root: PathBuf) -> Result<Box<dyn Worker>, PipelineError> {
    match (ctx.framework, ctx.builder) {
        (Framework::Vue, Builder::Vite) => Ok(Box::new(ViteVueWorker::new(ctx.clone(), root))),
        (framework, builder) => Err(PipelineError::NoWorker {
            framework: framework.as_str().to_string(),
            builder: builder.as_str().to_string(),
        }),
    }
}

/// Ask the generation service for SEARCH/REPLACE edits against `content`
/// and apply whatever comes back.
///
/// `Ok(None)` propagates the service's "no content" answer; a response with
/// no parseable blocks comes back as the unchanged content, which callers
/// treat as "already satisfied".
pub(crate) async fn request_patched(
    generator: &dyn TextGenerator,
    content: &str,
    instructions: &str,
) -> Result<Option<String>> {
    let messages = [
        ChatMessage::system(prompt::REPLACER_SYSTEM),
        ChatMessage::user(format!(
            "## Requirements\n{instructions}\n\n## Code\n{content}"
        )),
    ];

    let Some(response) = generator.ask(&messages).await? else {
        return Ok(None);
    };

    let blocks = patch::parse_blocks(&response);
    if blocks.is_empty() {
        debug!("response contained no patch blocks");
        return Ok(Some(content.to_string()));
    }

    let outcome = patch::apply_blocks(content, &blocks);
    debug!(
        "applied {} of {} patch blocks",
        outcome.applied,
        blocks.len()
    );
    Ok(Some(outcome.text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Locale;

    fn context(framework: Framework, builder: Builder) -> RunContext {
        RunContext {
            framework,
            builder,
            builder_config_file: "vite.config.ts".to_string(),
            main_file: "src/main.ts".to_string(),
            glob: "src/**/*.vue".to_string(),
            checkpoint_file: ".autoglot-cache.json".to_string(),
            default_locale: Locale {
                name: "English".to_string(),
                code: "en-US".to_string(),
            },
            locales: vec![],
            need_install: true,
            need_builder_config: true,
            need_main_config: true,
        }
    }

    #[test]
    fn test_vite_vue_pair_is_supported() {
        let ctx = context(Framework::Vue, Builder::Vite);
        assert!(worker_for(&ctx, PathBuf::from(".")).is_ok());
    }

    #[test]
    fn test_unsupported_pair_fails_fast() {
        let ctx = context(Framework::React, Builder::Webpack);
        let err = worker_for(&ctx, PathBuf::from(".")).map(|_| ()).unwrap_err();
        assert!(matches!(err, PipelineError::NoWorker { .. }));
        assert!(err.to_string().contains("react"));
        assert!(err.to_string().contains("webpack"));
    }
}
