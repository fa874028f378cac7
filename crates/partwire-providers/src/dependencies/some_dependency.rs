use dill::{CatalogBuilder, component, interface};
use partwire_application::CreationPolicy;
use partwire_application::registry::{PARTS, PartEntry};
use partwire_domain::TypeInfo;
use uuid::Uuid;

use crate::constants::MODULE_NAME;
use crate::contracts::SomeType;

/// Dependency with a random identity, fixed at construction
#[derive(Debug)]
pub struct SomeDependency {
    id: Uuid,
}

#[component(pub)]
#[interface(dyn SomeType)]
impl SomeDependency {
    pub fn new() -> Self {
        Self { id: Uuid::new_v4() }
    }
}

impl Default for SomeDependency {
    fn default() -> Self {
        Self::new()
    }
}

impl SomeType for SomeDependency {
    fn id(&self) -> Uuid {
        self.id
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

fn register(catalog: &mut CatalogBuilder) {
    catalog.add::<SomeDependency>();
}

#[linkme::distributed_slice(PARTS)]
pub(crate) static SOME_DEPENDENCY_PART: PartEntry = PartEntry {
    type_name: "partwire_providers::dependencies::SomeDependency",
    module: MODULE_NAME,
    description: "Dependency exporting SomeType with a random id",
    creation_policy: CreationPolicy::Any,
    exports: &[TypeInfo::of::<dyn SomeType>],
    imports: &[],
    register,
};
