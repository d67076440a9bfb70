use anyhow::{Context, Result};

use crate::checkpoint::CheckpointStore;

pub fn run_status(checkpoint_file: String) -> Result<()> {
    let root = std::env::current_dir().context("failed to resolve working directory")?;
    let store = CheckpointStore::new(root.join(&checkpoint_file));

    let Some(state) = store.load() else {
        println!("No checkpoint at {} - nothing in progress.", checkpoint_file);
        return Ok(());
    };

    let mark = |done: bool| if done { "done" } else { "pending" };

    println!("Checkpoint: {}", store.path().display());
    println!(
        "  Project: {} + {}",
        state.context.framework.as_str(),
        state.context.builder.as_str()
    );
    println!(
        "  Locales: {} (default {})",
        state
            .context
            .locales
            .iter()
            .map(|l| l.code.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        state.context.default_locale.code
    );
    println!("  Install dependencies: {}", mark(state.finished.install));
    println!("  Patch builder config: {}", mark(state.finished.builder));
    println!("  Patch entry file:     {}", mark(state.finished.main));
    println!("  Files processed:      {}", state.finished.files.len());
    for file in &state.finished.files {
        println!("    - {}", file);
    }

    Ok(())
}
