use once_cell::sync::OnceCell;
use partwire_application::CompositionContainer;
use partwire_domain::error::Result;
use tracing::error;

use super::factory::build_container;
use crate::config::{AppConfig, ConfigLoader};
use crate::logging::log_error_chain;

/// One-time initialisation cell for a composition container
///
/// Concurrent first callers block on a single initialisation; later callers
/// read the cached container without locking. A failed initialisation is
/// not cached, so the next caller retries.
#[derive(Debug, Default)]
pub struct ContainerCell {
    cell: OnceCell<CompositionContainer>,
}

impl ContainerCell {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    pub fn get_or_try_init<F>(&self, init: F) -> Result<CompositionContainer>
    where
        F: FnOnce() -> Result<CompositionContainer>,
    {
        self.cell.get_or_try_init(init).cloned()
    }

    pub fn get(&self) -> Option<CompositionContainer> {
        self.cell.get().cloned()
    }
}

static CONFIGURED: ContainerCell = ContainerCell::new();

/// The process-wide container built from the default configuration
///
/// Loads `partwire.toml` (see [`ConfigLoader`]) on first use.
pub fn configured_container() -> Result<CompositionContainer> {
    CONFIGURED
        .get_or_try_init(|| build_container(&ConfigLoader::new().load()?))
        .inspect_err(|err| {
            error!("Failed to build the configured composition container");
            log_error_chain("configured container", err);
        })
}

/// Initialise the process-wide container from an explicit configuration
///
/// Has no effect if the container already exists; the existing one is
/// returned.
pub fn init_configured_container(config: &AppConfig) -> Result<CompositionContainer> {
    CONFIGURED.get_or_try_init(|| build_container(config))
}
