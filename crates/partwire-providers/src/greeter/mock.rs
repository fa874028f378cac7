use dill::{CatalogBuilder, component, interface};
use partwire_application::CreationPolicy;
use partwire_application::registry::{PARTS, PartEntry};
use partwire_domain::TypeInfo;

use super::MOCK_VARIANT;
use crate::constants::MODULE_NAME;
use crate::contracts::Greeter;

/// Canned greeter for tests and local runs
#[component]
#[interface(dyn Greeter)]
#[derive(Debug, Default)]
pub struct MockGreeter;

impl Greeter for MockGreeter {
    fn greet(&self, name: &str) -> String {
        format!("Hello, {name}! (mock)")
    }

    fn variant(&self) -> &'static str {
        MOCK_VARIANT
    }
}

fn register(catalog: &mut CatalogBuilder) {
    catalog.add::<MockGreeter>();
}

#[linkme::distributed_slice(PARTS)]
pub(crate) static MOCK_GREETER_PART: PartEntry = PartEntry {
    type_name: "partwire_providers::greeter::MockGreeter",
    module: MODULE_NAME,
    description: "Greeter returning canned greetings",
    creation_policy: CreationPolicy::Any,
    exports: &[TypeInfo::of::<dyn Greeter>],
    imports: &[],
    register,
};
