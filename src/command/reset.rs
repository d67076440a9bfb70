use anyhow::{Context, Result};

use crate::checkpoint::CheckpointStore;

pub fn run_reset(checkpoint_file: String) -> Result<()> {
    let root = std::env::current_dir().context("failed to resolve working directory")?;
    let store = CheckpointStore::new(root.join(&checkpoint_file));

    if !store.path().exists() {
        println!("No checkpoint at {} - nothing to reset.", checkpoint_file);
        return Ok(());
    }

    store.clear()?;
    println!("Removed {}. The next run starts fresh.", checkpoint_file);
    Ok(())
}
