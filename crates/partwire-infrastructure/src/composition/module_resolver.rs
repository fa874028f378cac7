use std::env;
use std::path::{Component, Path, PathBuf};

use partwire_domain::error::Result;

use crate::error_ext::ErrorContext;

/// Resolves configured module locations to absolute paths
///
/// Relative locations resolve against the application root when one is
/// configured (hosted mode), otherwise against the working directory. The
/// result is normalised lexically; symlinks are left alone.
#[derive(Debug, Clone, Default)]
pub struct ModuleResolver {
    app_root: Option<PathBuf>,
}

impl ModuleResolver {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_app_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.app_root = Some(root.into());
        self
    }

    pub fn app_root(&self) -> Option<&Path> {
        self.app_root.as_deref()
    }

    pub fn resolve(&self, location: &str) -> Result<PathBuf> {
        let base = match &self.app_root {
            Some(root) if root.is_absolute() => root.clone(),
            Some(root) => current_dir()?.join(root),
            None => current_dir()?,
        };
        Ok(normalize(&base.join(location)))
    }

    /// Module name of a resolved location: its file stem
    pub fn module_name(path: &Path) -> Option<&str> {
        path.file_stem().and_then(|stem| stem.to_str())
    }
}

fn current_dir() -> Result<PathBuf> {
    env::current_dir().config_context("Cannot determine the working directory")
}

fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
