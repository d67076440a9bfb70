//! Dependency installation via the project's own package manager.
//!
//! The manager is detected from the lockfile present at the project root;
//! npm is the fallback when none is found. Install failure is fatal to the
//! run; nothing downstream works without the i18n packages.

use std::path::Path;

use anyhow::{bail, Context, Result};
use tokio::process::Command;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl PackageManager {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun",
        }
    }

    /// The add-packages verb differs between managers.
    fn install_verb(&self) -> &'static str {
        match self {
            PackageManager::Npm => "install",
            PackageManager::Yarn | PackageManager::Pnpm | PackageManager::Bun => "add",
        }
    }
}

/// Probe the project root for a lockfile.
pub fn detect_package_manager(root: &Path) -> PackageManager {
    let candidates = [
        ("package-lock.json", PackageManager::Npm),
        ("yarn.lock", PackageManager::Yarn),
        ("pnpm-lock.yaml", PackageManager::Pnpm),
        ("bun.lockb", PackageManager::Bun),
    ];

    for (lockfile, manager) in candidates {
        if root.join(lockfile).exists() {
            debug!("detected {} via {}", manager.as_str(), lockfile);
            return manager;
        }
    }

    PackageManager::Npm
}

/// Run `<manager> add/install <packages…>` in the project root.
pub async fn install_dependencies(root: &Path, packages: &[&str]) -> Result<()> {
    if packages.is_empty() {
        return Ok(());
    }

    let manager = detect_package_manager(root);
    info!(
        "installing {} with {}",
        packages.join(" "),
        manager.as_str()
    );

    let status = Command::new(manager.as_str())
        .arg(manager.install_verb())
        .args(packages)
        .current_dir(root)
        .status()
        .await
        .with_context(|| format!("failed to invoke {}", manager.as_str()))?;

    if !status.success() {
        bail!(
            "{} {} exited with {}",
            manager.as_str(),
            manager.install_verb(),
            status
        );
    }

    info!("dependencies installed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_detect_defaults_to_npm() {
        let tmp = tempdir().unwrap();
        assert_eq!(detect_package_manager(tmp.path()), PackageManager::Npm);
    }

    #[test]
    fn test_detect_from_lockfile() {
        let tmp = tempdir().unwrap();
        std::fs::write(tmp.path().join("pnpm-lock.yaml"), "").unwrap();
        assert_eq!(detect_package_manager(tmp.path()), PackageManager::Pnpm);
    }

    #[test]
    fn test_install_verbs() {
        assert_eq!(PackageManager::Npm.install_verb(), "install");
        assert_eq!(PackageManager::Yarn.install_verb(), "add");
        assert_eq!(PackageManager::Bun.install_verb(), "add");
    }

    #[tokio::test]
    async fn test_empty_package_list_is_noop() {
        let tmp = tempdir().unwrap();
        install_dependencies(tmp.path(), &[]).await.unwrap();
    }
}
