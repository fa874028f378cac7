use std::sync::Arc;

use dill::{CatalogBuilder, component, interface};
use partwire_application::registry::{PARTS, PartEntry};
use partwire_application::{CreationPolicy, ImportDefinition};
use partwire_domain::{Disposable, ServiceObject, TypeInfo};
use serde_json::Value;

use crate::constants::MODULE_NAME;
use crate::contracts::{Greeter, Greeting, dispatch_greeting};

/// Per-call service greeting through whichever `Greeter` is configured
pub struct GreetingService {
    greeter: Arc<dyn Greeter>,
}

#[component(pub)]
#[interface(dyn Greeting)]
impl GreetingService {
    pub fn new(greeter: Arc<dyn Greeter>) -> Self {
        Self { greeter }
    }
}

impl Greeting for GreetingService {
    fn greet(&self, name: &str) -> String {
        self.greeter.greet(name)
    }

    fn variant(&self) -> &'static str {
        self.greeter.variant()
    }
}

impl ServiceObject for GreetingService {
    fn invoke(&self, operation: &str, args: Value) -> partwire_domain::error::Result<Value> {
        dispatch_greeting(self, operation, args)
    }

    fn as_disposable(&self) -> Option<&dyn Disposable> {
        Some(self)
    }
}

impl Disposable for GreetingService {
    // Releases the greeter if the configured variant holds resources.
    fn dispose(&self) {
        if let Some(greeter) = self.greeter.as_disposable() {
            greeter.dispose();
        }
    }
}

fn register(catalog: &mut CatalogBuilder) {
    catalog.add::<GreetingService>();
}

#[linkme::distributed_slice(PARTS)]
pub(crate) static GREETING_SERVICE_PART: PartEntry = PartEntry {
    type_name: "partwire_providers::services::GreetingService",
    module: MODULE_NAME,
    description: "Per-call greeting service importing the configured Greeter",
    creation_policy: CreationPolicy::NonShared,
    exports: &[TypeInfo::of::<GreetingService>, TypeInfo::of::<dyn Greeting>],
    imports: &[ImportDefinition {
        contract: TypeInfo::of::<dyn Greeter>,
        required_creation_policy: CreationPolicy::Any,
    }],
    register,
};
