//! Shared fixtures: containers over the demo parts and a disposal-tracking service

use std::sync::atomic::{AtomicUsize, Ordering};

use dill::{CatalogBuilder, component};
use partwire_application::registry::{PartEntry, find_part};
use partwire_application::{CompositionContainer, CreationPolicy};
use partwire_domain::error::Error;
use partwire_domain::{ContractDescription, Disposable, ServiceObject, TypeInfo};
use serde_json::{Value, json};

pub const BASE: &str = "http://localhost:8080/";
pub const MY_SERVICE: &str = "partwire_providers::services::MyService";
pub const SOME_DEPENDENCY: &str = "partwire_providers::dependencies::SomeDependency";
pub const GREETING_SERVICE: &str = "partwire_providers::services::GreetingService";
pub const MOCK_GREETER: &str = "partwire_providers::greeter::MockGreeter";
pub const PRODUCTION_GREETER: &str = "partwire_providers::greeter::ProductionGreeter";

/// Container over registered parts picked by type name
pub fn container_of(type_names: &[&str]) -> CompositionContainer {
    let parts = type_names
        .iter()
        .map(|name| find_part(name, None).expect("part is registered"))
        .chain([&TRACKED_PART]);
    CompositionContainer::from_parts(parts)
}

pub static TRACKED_DISPOSALS: AtomicUsize = AtomicUsize::new(0);

pub fn tracked_disposals() -> usize {
    TRACKED_DISPOSALS.load(Ordering::SeqCst)
}

/// Service counting its disposals; `Fail` always errors
#[component]
pub struct Tracked;

impl ServiceObject for Tracked {
    fn invoke(&self, operation: &str, _args: Value) -> partwire_domain::error::Result<Value> {
        match operation {
            "Ping" => Ok(json!("pong")),
            _ => Err(Error::internal("tracked failure")),
        }
    }

    fn as_disposable(&self) -> Option<&dyn Disposable> {
        Some(self)
    }
}

impl Disposable for Tracked {
    fn dispose(&self) {
        TRACKED_DISPOSALS.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn tracked_contract() -> ContractDescription {
    ContractDescription::new("Tracked")
        .with_operation("Ping")
        .with_operation("Fail")
}

fn add_tracked(catalog: &mut CatalogBuilder) {
    catalog.add::<Tracked>();
}

static TRACKED_PART: PartEntry = PartEntry {
    type_name: "support::Tracked",
    module: "support",
    description: "Disposal-tracking test service",
    creation_policy: CreationPolicy::NonShared,
    exports: &[TypeInfo::of::<Tracked>],
    imports: &[],
    register: add_tracked,
};
