use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use dill::{CatalogBuilder, component, interface};
use partwire_application::registry::{PARTS, PartEntry};
use partwire_application::{ContainerRef, CreationPolicy, ImportDefinition};
use partwire_domain::{Disposable, TypeInfo};
use tracing::debug;

use super::PRODUCTION_VARIANT;
use crate::constants::MODULE_NAME;
use crate::contracts::{Greeter, SomeType};

/// Greeter that looks up a session dependency through its container
///
/// Imports the container it was composed by and resolves `SomeType` on each
/// greeting, if one is registered.
pub struct ProductionGreeter {
    container: Arc<ContainerRef>,
    disposed: AtomicBool,
}

#[component(pub)]
#[interface(dyn Greeter)]
impl ProductionGreeter {
    pub fn new(container: Arc<ContainerRef>) -> Self {
        Self {
            container,
            disposed: AtomicBool::new(false),
        }
    }
}

impl ProductionGreeter {
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}

impl Greeter for ProductionGreeter {
    fn greet(&self, name: &str) -> String {
        let session = self
            .container
            .container()
            .and_then(|container| container.try_get_exported_value::<dyn SomeType>().ok())
            .flatten();
        match session {
            Some(session) => format!("Good day, {name}. (session {})", session.id()),
            None => format!("Good day, {name}."),
        }
    }

    fn variant(&self) -> &'static str {
        PRODUCTION_VARIANT
    }

    fn as_disposable(&self) -> Option<&dyn Disposable> {
        Some(self)
    }
}

impl Disposable for ProductionGreeter {
    fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::AcqRel) {
            debug!("production greeter disposed");
        }
    }
}

fn register(catalog: &mut CatalogBuilder) {
    catalog.add::<ProductionGreeter>();
}

#[linkme::distributed_slice(PARTS)]
pub(crate) static PRODUCTION_GREETER_PART: PartEntry = PartEntry {
    type_name: "partwire_providers::greeter::ProductionGreeter",
    module: MODULE_NAME,
    description: "Greeter backed by the composition container",
    creation_policy: CreationPolicy::NonShared,
    exports: &[TypeInfo::of::<dyn Greeter>],
    imports: &[ImportDefinition {
        contract: TypeInfo::of::<ContainerRef>,
        required_creation_policy: CreationPolicy::Any,
    }],
    register,
};
