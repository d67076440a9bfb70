//! Pipeline orchestrator.
//!
//! Drives the ordered stages (install dependencies, patch the builder
//! config, patch the entry file, translate each matched file) with the
//! checkpoint consulted before and persisted after every unit of work. An
//! interrupted run therefore loses at most the unit that was in flight; a
//! re-run skips everything the checkpoint records as done. The checkpoint
//! file is removed only once every stage has completed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::ai::TextGenerator;
use crate::checkpoint::{CheckpointState, CheckpointStore};
use crate::context::RunContext;
use crate::discovery;
use crate::error::PipelineError;
use crate::install;
use crate::worker::{worker_for, Worker};

pub struct Pipeline<'a> {
    ctx: RunContext,
    root: PathBuf,
    store: CheckpointStore,
    state: CheckpointState,
    worker: Box<dyn Worker>,
    generator: &'a dyn TextGenerator,
}

impl<'a> Pipeline<'a> {
    /// Validate configuration, select the worker, and load or synthesize the
    /// checkpoint. Fails before any mutation if the (framework, builder)
    /// pair is unsupported or no target locale was requested.
    pub fn new(ctx: RunContext, root: PathBuf, generator: &'a dyn TextGenerator) -> Result<Self> {
        if ctx.locales.is_empty() {
            return Err(PipelineError::NoLocales.into());
        }

        let worker = worker_for(&ctx, root.clone())?;
        let store = CheckpointStore::new(root.join(&ctx.checkpoint_file));

        let state = match store.load() {
            Some(mut state) => {
                info!(
                    "resuming from checkpoint {} ({} file(s) already processed)",
                    store.path().display(),
                    state.finished.files.len()
                );
                // The live flags win over the stored copy; the stored context
                // only survives for inspection via `status`.
                state.context = ctx.clone();
                state
            }
            None => {
                let state = CheckpointState::fresh(ctx.clone());
                store
                    .persist(&state)
                    .context("failed to create checkpoint")?;
                info!("created checkpoint {}", store.path().display());
                state
            }
        };

        Ok(Self {
            ctx,
            root,
            store,
            state,
            worker,
            generator,
        })
    }

    /// Execute every requested stage in order, then delete the checkpoint.
    pub async fn run(&mut self) -> Result<()> {
        self.install_stage().await?;
        self.builder_stage().await?;
        self.main_stage().await?;
        self.files_stage().await?;

        self.store.clear().context("failed to remove checkpoint")?;
        info!("all stages complete");
        Ok(())
    }

    async fn install_stage(&mut self) -> Result<()> {
        if !self.ctx.need_install {
            debug!("install stage not requested");
            return Ok(());
        }
        if self.state.finished.install {
            info!("dependencies already installed, skipping");
            return Ok(());
        }

        install::install_dependencies(&self.root, self.worker.dependencies()).await?;

        self.state.finished.install = true;
        self.store.persist(&self.state)
    }

    async fn builder_stage(&mut self) -> Result<()> {
        if !self.ctx.need_builder_config {
            debug!("builder-config stage not requested");
            return Ok(());
        }
        if self.state.finished.builder {
            info!("builder config already patched, skipping");
            return Ok(());
        }

        info!("patching {}", self.ctx.builder_config_file);
        self.worker.handle_builder_config(self.generator).await?;

        self.state.finished.builder = true;
        self.store.persist(&self.state)
    }

    async fn main_stage(&mut self) -> Result<()> {
        if !self.ctx.need_main_config {
            debug!("entry-file stage not requested");
            return Ok(());
        }
        if self.state.finished.main {
            info!("entry file already patched, skipping");
            return Ok(());
        }

        info!("patching {}", self.ctx.main_file);
        self.worker.handle_main_config(self.generator).await?;

        self.state.finished.main = true;
        self.store.persist(&self.state)
    }

    async fn files_stage(&mut self) -> Result<()> {
        // Re-resolved every run; files may have appeared or vanished since
        // the checkpoint was written.
        let files = discovery::match_project_files(&self.root, &self.ctx.glob)?;
        info!("{} file(s) match {}", files.len(), self.ctx.glob);

        for file in files {
            if self.state.finished.files.iter().any(|done| done == &file) {
                debug!("{} already processed, skipping", file);
                continue;
            }

            info!("translating {}", file);
            self.worker
                .handle_primary_file(self.generator, Path::new(&file))
                .await?;

            self.state.finished.files.push(file);
            self.store.persist(&self.state)?;
        }

        Ok(())
    }
}
