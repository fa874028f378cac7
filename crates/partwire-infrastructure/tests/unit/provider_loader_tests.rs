//! Tests for loading registered type sets from composition configuration

use std::error::Error as _;
use std::fs;

use partwire_application::CompositionContainer;
use partwire_domain::CompositionError;
use partwire_domain::error::Error;
use partwire_infrastructure::{ConfigLoader, ProviderRegistryLoader, create_container};
use partwire_providers::Greeter;

const MOCK_GREETER: &str = "partwire_providers::greeter::MockGreeter";
const PRODUCTION_GREETER: &str = "partwire_providers::greeter::ProductionGreeter";

const GREETER_CONFIG: &str = r#"
[composition]
[[composition.provider]]
name = "GreeterProvider"
value = "mock"

[[composition.provider.mock]]
type = "partwire_providers::greeter::MockGreeter"

[[composition.provider.production]]
type = "partwire_providers::greeter::ProductionGreeter, partwire_providers"

[[composition.provider]]
name = "ServiceProvider"
value = "default"

[[composition.provider.default]]
type = "partwire_providers::services::MyService"

[[composition.provider.default]]
type = "partwire_providers::dependencies::SomeDependency"
"#;

/// The inner error wrapped by an aggregated configuration error
fn cause(err: &Error) -> &Error {
    err.source()
        .and_then(|source| source.downcast_ref::<Error>())
        .expect("aggregated error carries its cause")
}

fn greeter(container: &CompositionContainer) -> std::sync::Arc<dyn Greeter> {
    container.get_exported_value::<dyn Greeter>().unwrap()
}

#[test]
fn test_loading_twice_yields_equal_sets() {
    let loader = ProviderRegistryLoader::new();
    let first = loader.load_str(GREETER_CONFIG).unwrap();
    let second = loader.load_str(GREETER_CONFIG).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
    assert!(first.contains_type(MOCK_GREETER));
    assert!(!first.contains_type(PRODUCTION_GREETER));
}

#[test]
fn test_only_selected_variant_is_registered() {
    let types = ProviderRegistryLoader::new().load_str(GREETER_CONFIG).unwrap();
    let container = create_container(&types);

    assert_eq!(greeter(&container).variant(), "mock");
    assert_eq!(greeter(&container).greet("Ada"), "Hello, Ada! (mock)");
}

#[test]
fn test_both_variants_under_one_tag_are_ambiguous() {
    let document = r#"
[composition]
[[composition.provider]]
name = "GreeterProvider"
value = "all"

[[composition.provider.all]]
type = "partwire_providers::greeter::MockGreeter"

[[composition.provider.all]]
type = "partwire_providers::greeter::ProductionGreeter"
"#;
    let types = ProviderRegistryLoader::new().load_str(document).unwrap();
    let container = create_container(&types);

    match container.get_exported_value::<dyn Greeter>() {
        Err(CompositionError::Ambiguous { candidates, .. }) => assert_eq!(candidates.len(), 2),
        other => panic!("expected ambiguity, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_selection_override_replaces_value() {
    let types = ProviderRegistryLoader::new()
        .with_selection("GreeterProvider", "production")
        .load_str(GREETER_CONFIG)
        .unwrap();

    assert!(types.contains_type(PRODUCTION_GREETER));
    assert!(!types.contains_type(MOCK_GREETER));
    let container = create_container(&types);
    let greeting = greeter(&container).greet("Ada");
    assert!(greeting.starts_with("Good day, Ada. (session "));
}

#[test]
fn test_environment_selection_is_applied() {
    figment::Jail::expect_with(|jail| {
        jail.set_env("PARTWIRE_SELECT_GREETERPROVIDER", "production");

        let types = ProviderRegistryLoader::new()
            .with_env_selections()
            .unwrap()
            .load_str(GREETER_CONFIG)
            .unwrap();
        assert!(types.contains_type(PRODUCTION_GREETER));
        Ok(())
    });
}

#[test]
fn test_numeric_environment_selection_is_a_tag() {
    let document = r#"
[composition]
[[composition.provider]]
name = "GreeterProvider"
value = "1"

[[composition.provider.1]]
type = "partwire_providers::greeter::MockGreeter"

[[composition.provider.2]]
type = "partwire_providers::greeter::ProductionGreeter"
"#;
    figment::Jail::expect_with(|jail| {
        jail.set_env("PARTWIRE_SELECT_GREETERPROVIDER", 2);

        let types = ProviderRegistryLoader::new()
            .with_env_selections()
            .unwrap()
            .load_str(document)
            .unwrap();
        assert!(types.contains_type(PRODUCTION_GREETER));
        assert!(!types.contains_type(MOCK_GREETER));
        Ok(())
    });
}

#[test]
fn test_role_attributes_beside_variants_are_ignored() {
    let document = r#"
[composition]
[[composition.provider]]
name = "GreeterProvider"
value = "mock"
description = "greeters"
priority = 2

[[composition.provider.mock]]
type = "partwire_providers::greeter::MockGreeter"
"#;
    let types = ProviderRegistryLoader::new().load_str(document).unwrap();
    assert_eq!(types.len(), 1);
    assert!(types.contains_type(MOCK_GREETER));

    let config = ConfigLoader::new().load_str(document).unwrap();
    assert_eq!(ProviderRegistryLoader::new().load_config(&config).unwrap(), types);
}

#[test]
fn test_selected_scalar_attribute_is_malformed() {
    let document = r#"
[composition]
[[composition.provider]]
name = "GreeterProvider"
value = "description"
description = "greeters"
"#;
    let err = ProviderRegistryLoader::new().load_str(document).unwrap_err();
    assert_eq!(err.kind_name(), "ConfigurationError");
    assert!(err
        .to_string()
        .contains("Provider elements named \"description\" are malformed"));
}

#[test]
fn test_missing_name_references_composition_element() {
    let document = r#"
[composition]
[[composition.provider]]
value = "mock"

[[composition.provider.mock]]
type = "partwire_providers::greeter::MockGreeter"
"#;
    let err = ProviderRegistryLoader::new().load_str(document).unwrap_err();
    let text = err.to_string();

    assert_eq!(err.kind_name(), "ConfigurationError");
    assert!(text.contains("mandatory \"name\" attribute"));
    assert!(text.contains("(in the <composition> provider config)"));
    assert!(text.contains("---------------------------"));
    assert!(text.ends_with(document), "raw document is appended");
}

#[test]
fn test_missing_value_references_role() {
    let document = r#"
[composition]
[[composition.provider]]
name = "GreeterProvider"
"#;
    let err = ProviderRegistryLoader::new().load_str(document).unwrap_err();
    assert!(err.to_string().contains(
        "does not contain mandatory \"value\" attribute (in the GreeterProvider provider config)"
    ));
}

#[test]
fn test_role_without_selected_variants_fails() {
    let document = r#"
[composition]
[[composition.provider]]
name = "GreeterProvider"
value = "production"

[[composition.provider.mock]]
type = "partwire_providers::greeter::MockGreeter"
"#;
    let err = ProviderRegistryLoader::new().load_str(document).unwrap_err();
    assert!(err.to_string().contains(
        "The configuration for provider \"GreeterProvider\" does not have any provider elements named \"production\""
    ));
}

#[test]
fn test_variant_without_type_fails() {
    let document = r#"
[composition]
[[composition.provider]]
name = "GreeterProvider"
value = "mock"

[composition.provider.mock]
assembly = "partwire_providers.module"
"#;
    let err = ProviderRegistryLoader::new().load_str(document).unwrap_err();
    assert!(err.to_string().contains("mandatory \"type\" attribute"));
}

#[test]
fn test_single_variant_table_is_accepted() {
    let document = r#"
[composition]
[[composition.provider]]
name = "GreeterProvider"
value = "mock"

[composition.provider.mock]
type = "partwire_providers::greeter::MockGreeter"
"#;
    let types = ProviderRegistryLoader::new().load_str(document).unwrap();
    assert!(types.contains_type(MOCK_GREETER));
}

#[test]
fn test_unknown_type_is_a_type_load_error() {
    let document = r#"
[composition]
[[composition.provider]]
name = "GreeterProvider"
value = "mock"

[[composition.provider.mock]]
type = "partwire_providers::greeter::LoudGreeter"
"#;
    let err = ProviderRegistryLoader::new().load_str(document).unwrap_err();
    assert!(matches!(cause(&err), Error::TypeLoad { .. }));
    assert!(err.to_string().contains(
        "Could not load type partwire_providers::greeter::LoudGreeter from existing module"
    ));
}

#[test]
fn test_module_qualified_type_must_match_module() {
    let document = r#"
[composition]
[[composition.provider]]
name = "GreeterProvider"
value = "mock"

[[composition.provider.mock]]
type = "partwire_providers::greeter::MockGreeter, elsewhere"
"#;
    let err = ProviderRegistryLoader::new().load_str(document).unwrap_err();
    assert!(matches!(cause(&err), Error::TypeLoad { .. }));
}

#[test]
fn test_missing_module_names_absolute_path() {
    let dir = tempfile::tempdir().unwrap();
    let document = r#"
[composition]
[[composition.provider]]
name = "GreeterProvider"
value = "mock"

[[composition.provider.mock]]
type = "partwire_providers::greeter::MockGreeter"
assembly = "./missing.module"
"#;
    let err = ProviderRegistryLoader::new()
        .with_app_root(dir.path())
        .load_str(document)
        .unwrap_err();

    let expected = dir.path().join("missing.module");
    match cause(&err) {
        Error::ModuleNotFound { path } => assert_eq!(path, &expected),
        other => panic!("expected module not found, got {other}"),
    }
    assert!(err.to_string().contains(&format!(
        "ModuleNotFoundError: Could not load physical module file {}",
        expected.display()
    )));
}

#[test]
fn test_existing_module_file_provides_its_parts() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("modules")).unwrap();
    fs::write(dir.path().join("modules/partwire_providers.module"), "").unwrap();
    fs::write(dir.path().join("modules/other.module"), "").unwrap();

    let document = |location: &str| {
        format!(
            r#"
[composition]
[[composition.provider]]
name = "GreeterProvider"
value = "mock"

[[composition.provider.mock]]
type = "partwire_providers::greeter::MockGreeter"
assembly = "{location}"
"#
        )
    };
    let loader = ProviderRegistryLoader::new().with_app_root(dir.path());

    let types = loader.load_str(&document("modules/partwire_providers.module")).unwrap();
    assert!(types.contains_type(MOCK_GREETER));

    let err = loader.load_str(&document("modules/other.module")).unwrap_err();
    assert!(matches!(cause(&err), Error::TypeLoad { .. }));
    assert!(err.to_string().contains("from physical module file"));
}

#[test]
fn test_missing_section_is_reported() {
    let err = ProviderRegistryLoader::new()
        .load_str("[server]\nport = 8080\n")
        .unwrap_err();
    assert!(err
        .to_string()
        .contains("Cannot load composition configuration section [composition]"));

    let config = ConfigLoader::new().load_str("[server]\nport = 8080\n").unwrap();
    assert!(ProviderRegistryLoader::new().load_config(&config).is_err());
}

#[test]
fn test_malformed_document_is_a_configuration_error() {
    let err = ProviderRegistryLoader::new()
        .load_str("[composition\nprovider = ")
        .unwrap_err();
    assert_eq!(err.kind_name(), "ConfigurationError");
    assert!(err.to_string().contains("Malformed configuration document"));
}

#[test]
fn test_application_config_section_is_loaded() {
    let config = ConfigLoader::new().load_str(GREETER_CONFIG).unwrap();
    let types = ProviderRegistryLoader::new().load_config(&config).unwrap();
    assert_eq!(types, ProviderRegistryLoader::new().load_str(GREETER_CONFIG).unwrap());
}
