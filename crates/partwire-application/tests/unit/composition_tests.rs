//! Tests for the composition container

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use dill::{CatalogBuilder, Singleton, component, interface, scope};
use partwire_application::registry::PartEntry;
use partwire_application::{CompositionContainer, ContainerRef, CreationPolicy, ImportDefinition};
use partwire_domain::{CompositionError, TypeInfo};

trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

trait Reporter: Send + Sync {
    fn report(&self) -> String;
}

const fn part(
    type_name: &'static str,
    creation_policy: CreationPolicy,
    exports: &'static [fn() -> TypeInfo],
    imports: &'static [ImportDefinition],
    register: fn(&mut CatalogBuilder),
) -> PartEntry {
    PartEntry {
        type_name,
        module: "composition_tests",
        description: "",
        creation_policy,
        exports,
        imports,
        register,
    }
}

const fn clock_import(required: CreationPolicy) -> ImportDefinition {
    ImportDefinition {
        contract: TypeInfo::of::<dyn Clock>,
        required_creation_policy: required,
    }
}

#[component]
#[interface(dyn Clock)]
struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        42
    }
}

#[component]
#[interface(dyn Clock)]
#[scope(Singleton)]
struct SharedClock;

impl Clock for SharedClock {
    fn now(&self) -> u64 {
        42
    }
}

#[component]
#[interface(dyn Clock)]
struct OtherClock;

impl Clock for OtherClock {
    fn now(&self) -> u64 {
        7
    }
}

#[component]
#[interface(dyn Reporter)]
struct ClockReporter {
    clock: Arc<dyn Clock>,
}

impl Reporter for ClockReporter {
    fn report(&self) -> String {
        format!("time is {}", self.clock.now())
    }
}

fn add_fixed_clock(catalog: &mut CatalogBuilder) {
    catalog.add::<FixedClock>();
}

fn add_shared_clock(catalog: &mut CatalogBuilder) {
    catalog.add::<SharedClock>();
}

fn add_other_clock(catalog: &mut CatalogBuilder) {
    catalog.add::<OtherClock>();
}

fn add_reporter(catalog: &mut CatalogBuilder) {
    catalog.add::<ClockReporter>();
}

static FIXED_CLOCK: PartEntry = part(
    "composition_tests::FixedClock",
    CreationPolicy::Any,
    &[TypeInfo::of::<dyn Clock>],
    &[],
    add_fixed_clock,
);

static SHARED_CLOCK: PartEntry = part(
    "composition_tests::SharedClock",
    CreationPolicy::Shared,
    &[TypeInfo::of::<dyn Clock>],
    &[],
    add_shared_clock,
);

static OTHER_CLOCK: PartEntry = part(
    "composition_tests::OtherClock",
    CreationPolicy::Any,
    &[TypeInfo::of::<dyn Clock>],
    &[],
    add_other_clock,
);

static REPORTER: PartEntry = part(
    "composition_tests::ClockReporter",
    CreationPolicy::NonShared,
    &[TypeInfo::of::<dyn Reporter>],
    &[clock_import(CreationPolicy::Any)],
    add_reporter,
);

// Same component, but insisting on a clock of its own.
static STRICT_REPORTER: PartEntry = part(
    "composition_tests::StrictClockReporter",
    CreationPolicy::NonShared,
    &[TypeInfo::of::<dyn Reporter>],
    &[clock_import(CreationPolicy::NonShared)],
    add_reporter,
);

fn container(parts: &[&'static PartEntry]) -> CompositionContainer {
    CompositionContainer::from_parts(parts.iter().copied())
}

#[test]
fn test_single_candidate_is_resolved_with_imports() {
    let container = container(&[&FIXED_CLOCK, &REPORTER]);

    let reporter = container.get_exported_value::<dyn Reporter>().unwrap();
    assert_eq!(reporter.report(), "time is 42");
}

#[test]
fn test_no_candidate_fails() {
    let container = container(&[&FIXED_CLOCK]);

    let err = container.get_exported_value::<dyn Reporter>().err().unwrap();
    assert!(matches!(err, CompositionError::NoExports { .. }));
}

#[test]
fn test_several_candidates_are_ambiguous() {
    let container = container(&[&FIXED_CLOCK, &OTHER_CLOCK]);

    match container.get_exported_value::<dyn Clock>() {
        Err(CompositionError::Ambiguous { candidates, .. }) => {
            assert_eq!(candidates.len(), 2);
            assert!(candidates.iter().any(|c| c.ends_with("FixedClock")));
            assert!(candidates.iter().any(|c| c.ends_with("OtherClock")));
        }
        other => panic!("expected ambiguity, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_missing_nested_import_names_importer() {
    let container = container(&[&REPORTER]);

    match container.get_exported_value::<dyn Reporter>() {
        Err(CompositionError::ImportFailed {
            part,
            contract,
            cause,
        }) => {
            assert!(part.ends_with("ClockReporter"));
            assert_eq!(contract, TypeInfo::of::<dyn Clock>().name());
            assert!(matches!(*cause, CompositionError::NoExports { .. }));
        }
        other => panic!("expected import failure, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_ambiguous_nested_import_names_importer() {
    let container = container(&[&FIXED_CLOCK, &OTHER_CLOCK, &REPORTER]);

    match container.get_exported_value::<dyn Reporter>() {
        Err(CompositionError::ImportFailed { part, cause, .. }) => {
            assert!(part.ends_with("ClockReporter"));
            assert!(matches!(*cause, CompositionError::Ambiguous { .. }));
        }
        other => panic!("expected import failure, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_shared_parts_are_cached() {
    let container = container(&[&SHARED_CLOCK]);

    let first = container.get_exported_value::<dyn Clock>().unwrap();
    let second = container.get_exported_value::<dyn Clock>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let clone = container.clone();
    let third = clone.get_exported_value::<dyn Clock>().unwrap();
    assert!(Arc::ptr_eq(&first, &third));
}

#[test]
fn test_transient_parts_are_fresh() {
    let container = container(&[&FIXED_CLOCK, &REPORTER]);

    let first = container.get_exported_value::<dyn Reporter>().unwrap();
    let second = container.get_exported_value::<dyn Reporter>().unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
}

#[test]
fn test_non_shared_requirement_rejects_shared_part() {
    let container = container(&[&SHARED_CLOCK, &STRICT_REPORTER]);

    match container.get_exported_value::<dyn Reporter>() {
        Err(CompositionError::ImportFailed { part, cause, .. }) => {
            assert!(part.ends_with("StrictClockReporter"));
            assert!(matches!(*cause, CompositionError::NoExports { .. }));
        }
        other => panic!("expected import failure, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_non_shared_requirement_accepts_any_part() {
    let container = container(&[&FIXED_CLOCK, &STRICT_REPORTER]);

    let reporter = container.get_exported_value::<dyn Reporter>().unwrap();
    assert_eq!(reporter.report(), "time is 42");
}

#[allow(dead_code)]
#[component]
#[scope(Singleton)]
struct Chicken {
    egg: Arc<Egg>,
}

#[allow(dead_code)]
#[component]
#[scope(Singleton)]
struct Egg {
    chicken: Arc<Chicken>,
}

fn add_chicken(catalog: &mut CatalogBuilder) {
    catalog.add::<Chicken>();
}

fn add_egg(catalog: &mut CatalogBuilder) {
    catalog.add::<Egg>();
}

static CHICKEN: PartEntry = part(
    "composition_tests::Chicken",
    CreationPolicy::Shared,
    &[TypeInfo::of::<Chicken>],
    &[ImportDefinition {
        contract: TypeInfo::of::<Egg>,
        required_creation_policy: CreationPolicy::Any,
    }],
    add_chicken,
);

static EGG: PartEntry = part(
    "composition_tests::Egg",
    CreationPolicy::Shared,
    &[TypeInfo::of::<Egg>],
    &[ImportDefinition {
        contract: TypeInfo::of::<Chicken>,
        required_creation_policy: CreationPolicy::Any,
    }],
    add_egg,
);

#[test]
fn test_cycles_are_reported_before_construction() {
    let container = container(&[&CHICKEN, &EGG]);

    let mut err = container.get_exported_value::<Chicken>().err().unwrap();
    while let CompositionError::ImportFailed { cause, .. } = err {
        err = *cause;
    }
    match err {
        CompositionError::Cycle { chain } => {
            assert_eq!(chain, vec![CHICKEN.type_name, EGG.type_name, CHICKEN.type_name]);
        }
        other => panic!("expected cycle, got {other}"),
    }
}

// Two threads entering a cycle of shared parts from opposite ends.
#[test]
fn test_cycles_fail_on_every_thread() {
    let container = container(&[&CHICKEN, &EGG]);
    let barrier = Arc::new(Barrier::new(2));

    let handles: Vec<_> = [true, false]
        .into_iter()
        .map(|from_chicken| {
            let container = container.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                if from_chicken {
                    container.get_exported_value::<Chicken>().map(|_| ()).is_err()
                } else {
                    container.get_exported_value::<Egg>().map(|_| ()).is_err()
                }
            })
        })
        .collect();

    assert!(handles.into_iter().all(|h| h.join().unwrap()));
}

#[test]
fn test_try_get_without_exporter_is_none() {
    let container = container(&[&REPORTER]);

    assert!(container.try_get_exported_value::<dyn Clock>().unwrap().is_none());
    // a nested failure is still an error
    assert!(container.try_get_exported_value::<dyn Reporter>().is_err());
}

#[test]
fn test_container_exports_itself() {
    let container = container(&[]);

    let resolved = container.get_exported_value::<CompositionContainer>().unwrap();
    assert!(CompositionContainer::ptr_eq(&container, &resolved));

    let handle = container.get_exported_value::<ContainerRef>().unwrap();
    let upgraded = handle.container().unwrap();
    assert!(CompositionContainer::ptr_eq(&container, &upgraded));
}

#[component]
#[interface(dyn Reporter)]
struct PartCounter {
    container: Arc<ContainerRef>,
}

impl Reporter for PartCounter {
    fn report(&self) -> String {
        let parts = self.container.container().map_or(0, |c| c.parts().len());
        format!("{parts} parts")
    }
}

fn add_part_counter(catalog: &mut CatalogBuilder) {
    catalog.add::<PartCounter>();
}

static PART_COUNTER: PartEntry = part(
    "composition_tests::PartCounter",
    CreationPolicy::NonShared,
    &[TypeInfo::of::<dyn Reporter>],
    &[ImportDefinition {
        contract: TypeInfo::of::<ContainerRef>,
        required_creation_policy: CreationPolicy::Any,
    }],
    add_part_counter,
);

#[test]
fn test_parts_can_import_their_container() {
    let container = container(&[&PART_COUNTER]);

    let reporter = container.get_exported_value::<dyn Reporter>().unwrap();
    // the counter and the container's own entry
    assert_eq!(reporter.report(), "2 parts");

    drop(container);
    assert_eq!(reporter.report(), "0 parts");
}

static ACTIVATIONS: AtomicUsize = AtomicUsize::new(0);

struct Expensive;

#[component(pub)]
#[scope(Singleton)]
impl Expensive {
    pub fn new() -> Self {
        ACTIVATIONS.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(10));
        Self
    }
}

fn add_expensive(catalog: &mut CatalogBuilder) {
    catalog.add::<Expensive>();
}

static EXPENSIVE: PartEntry = part(
    "composition_tests::Expensive",
    CreationPolicy::Shared,
    &[TypeInfo::of::<Expensive>],
    &[],
    add_expensive,
);

#[test]
fn test_concurrent_shared_resolution_activates_once() {
    let container = container(&[&EXPENSIVE]);
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let container = container.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                container.get_exported_value::<Expensive>().unwrap()
            })
        })
        .collect();

    let instances: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(ACTIVATIONS.load(Ordering::SeqCst), 1);
    assert!(instances.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
}
