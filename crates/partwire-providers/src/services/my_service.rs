use std::sync::Arc;

use dill::{CatalogBuilder, component, interface};
use partwire_application::registry::{PARTS, PartEntry};
use partwire_application::{CreationPolicy, ImportDefinition};
use partwire_domain::{ServiceObject, TypeInfo};
use serde_json::Value;
use tracing::debug;

use crate::constants::MODULE_NAME;
use crate::contracts::{Service, SomeType, dispatch_service};

/// Per-call service answering `GetData` with its dependency's id
pub struct MyService {
    dependency: Arc<dyn SomeType>,
}

#[component(pub)]
#[interface(dyn Service)]
impl MyService {
    pub fn new(dependency: Arc<dyn SomeType>) -> Self {
        debug!(dependency = %dependency.id(), "MyService imports satisfied");
        Self { dependency }
    }
}

impl Service for MyService {
    fn get_data(&self, value: i32) -> String {
        format!("Hallo {value} {}", self.dependency.id())
    }
}

impl ServiceObject for MyService {
    fn invoke(&self, operation: &str, args: Value) -> partwire_domain::error::Result<Value> {
        dispatch_service(self, operation, args)
    }
}

fn register(catalog: &mut CatalogBuilder) {
    catalog.add::<MyService>();
}

#[linkme::distributed_slice(PARTS)]
static MY_SERVICE_PART: PartEntry = PartEntry {
    type_name: "partwire_providers::services::MyService",
    module: MODULE_NAME,
    description: "Per-call data service importing SomeType",
    creation_policy: CreationPolicy::NonShared,
    exports: &[TypeInfo::of::<MyService>, TypeInfo::of::<dyn Service>],
    imports: &[ImportDefinition {
        contract: TypeInfo::of::<dyn SomeType>,
        required_creation_policy: CreationPolicy::NonShared,
    }],
    register,
};
