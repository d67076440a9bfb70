//! Worker for Vue projects built with Vite.

use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

use crate::ai::TextGenerator;
use crate::context::RunContext;
use crate::error::PipelineError;
use crate::fileio::{self, FileText};
use crate::prompt;

use super::{request_patched, Worker};

pub struct ViteVueWorker {
    ctx: RunContext,
    root: PathBuf,
}

impl ViteVueWorker {
    pub fn new(ctx: RunContext, root: PathBuf) -> Self {
        Self { ctx, root }
    }
}

/// Append the sentinel tag on its own line at the end of the file.
fn append_sentinel(content: &str) -> String {
    let mut augmented = content.to_string();
    if !augmented.is_empty() && !augmented.ends_with('\n') {
        augmented.push('\n');
    }
    augmented.push_str(prompt::SENTINEL);
    augmented.push('\n');
    augmented
}

/// Drop lines that are exactly the empty sentinel a lazy response left in
/// place instead of filling.
fn strip_empty_sentinel(text: &str) -> String {
    let mut stripped = text
        .lines()
        .filter(|line| line.trim() != prompt::SENTINEL)
        .collect::<Vec<_>>()
        .join("\n");
    if text.ends_with('\n') && !stripped.is_empty() {
        stripped.push('\n');
    }
    stripped
}

#[async_trait]
impl Worker for ViteVueWorker {
    fn dependencies(&self) -> &'static [&'static str] {
        &["@intlify/unplugin-vue-i18n", "vue-i18n"]
    }

    async fn handle_builder_config(&self, generator: &dyn TextGenerator) -> Result<()> {
        let file = FileText::read(self.root.join(&self.ctx.builder_config_file))?;

        let patched = request_patched(generator, file.content(), prompt::builder_config_document())
            .await?
            .ok_or(PipelineError::EmptyGeneration {
                stage: "builder config",
            })?;

        if patched == file.content() {
            info!("builder config already satisfied, nothing to write");
            return Ok(());
        }

        file.write(&patched)
    }

    async fn handle_main_config(&self, generator: &dyn TextGenerator) -> Result<()> {
        let file = FileText::read(self.root.join(&self.ctx.main_file))?;
        let document = prompt::main_config_document(&self.ctx.default_locale.code);

        let patched = request_patched(generator, file.content(), &document)
            .await?
            .ok_or(PipelineError::EmptyGeneration { stage: "entry file" })?;

        if patched == file.content() {
            info!("entry file already satisfied, nothing to write");
            return Ok(());
        }

        file.write(&patched)
    }

    async fn handle_primary_file(&self, generator: &dyn TextGenerator, path: &Path) -> Result<()> {
        let file = match FileText::read(self.root.join(path)) {
            Ok(file) => file,
            Err(err) if fileio::is_not_found(&err) => {
                warn!("{} vanished before processing, skipping", path.display());
                return Ok(());
            }
            Err(err) => return Err(err),
        };
        let augmented = append_sentinel(file.content());
        let document = prompt::primary_file_document(&self.ctx.locales);

        let Some(patched) = request_patched(generator, &augmented, &document).await? else {
            info!("no content for {}, treating as nothing to translate", path.display());
            return Ok(());
        };

        if patched == augmented {
            info!("nothing to translate in {}", path.display());
            return Ok(());
        }

        let cleaned = strip_empty_sentinel(&patched);
        if cleaned == file.content() {
            return Ok(());
        }

        file.write(&cleaned)
    }
}
