use partwire_application::CompositionContainer;
use partwire_application::registry::RegisteredTypeSet;
use partwire_domain::error::Result;
use tracing::info;

use super::provider_loader::ProviderRegistryLoader;
use crate::config::AppConfig;

/// Container over `types` plus the container's own entry
pub fn create_container(types: &RegisteredTypeSet) -> CompositionContainer {
    let container = CompositionContainer::new(types);
    info!(
        parts = types.len(),
        types = ?types.type_names(),
        "composition container built"
    );
    container
}

/// Load the composition section of `config` and build a container from it
///
/// Environment selections (`PARTWIRE_SELECT_<ROLE>`) are applied and
/// relative module locations resolve against `server.app_root` when set.
pub fn build_container(config: &AppConfig) -> Result<CompositionContainer> {
    let mut loader = ProviderRegistryLoader::new().with_env_selections()?;
    if let Some(root) = &config.server.app_root {
        loader = loader.with_app_root(root);
    }
    let types = loader.load_config(config)?;
    Ok(create_container(&types))
}
