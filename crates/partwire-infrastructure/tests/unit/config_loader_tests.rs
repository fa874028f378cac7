//! Tests for application configuration loading

use partwire_infrastructure::{AppConfig, ConfigLoader};

#[test]
fn test_defaults_without_file() {
    figment::Jail::expect_with(|_jail| {
        let config = ConfigLoader::new().with_config_path("absent.toml").load().unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert!(config.composition.is_none());
        assert!(config.source_text.is_none());
        Ok(())
    });
}

#[test]
fn test_file_in_working_directory_is_found() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("partwire.toml", "[server]\nport = 9000\n")?;

        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.source_text.as_deref(), Some("[server]\nport = 9000\n"));
        Ok(())
    });
}

#[test]
fn test_file_in_config_directory_is_found() {
    figment::Jail::expect_with(|jail| {
        jail.create_dir("config")?;
        jail.create_file("config/partwire.toml", "[logging]\nlevel = \"debug\"\n")?;

        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config.logging.level, "debug");
        Ok(())
    });
}

#[test]
fn test_environment_overrides_file() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("custom.toml", "[server]\nport = 9000\n")?;
        jail.set_env("PARTWIRE_SERVER__PORT", "9100");
        jail.set_env("PARTWIRE_LOGGING__JSON_FORMAT", "true");
        jail.set_env("PARTWIRE_SERVER__APP_ROOT", "/srv/partwire");

        let config = ConfigLoader::new().with_config_path("custom.toml").load().unwrap();
        assert_eq!(config.server.port, 9100);
        assert!(config.logging.json_format);
        assert_eq!(
            config.server.app_root.as_deref(),
            Some(std::path::Path::new("/srv/partwire"))
        );
        Ok(())
    });
}

#[test]
fn test_custom_prefix() {
    figment::Jail::expect_with(|jail| {
        jail.set_env("ACME_SERVER__PORT", "7000");

        let config = ConfigLoader::new()
            .with_env_prefix("ACME")
            .with_config_path("absent.toml")
            .load()
            .unwrap();
        assert_eq!(config.server.port, 7000);
        Ok(())
    });
}

#[test]
fn test_invalid_values_are_rejected() {
    let loader = ConfigLoader::new();
    assert!(loader.load_str("[server]\nport = 0\n").is_err());
    assert!(loader.load_str("[logging]\nlevel = \"loud\"\n").is_err());
    assert!(loader.load_str("[server]\nport = \"many\"\n").is_err());
}

#[test]
fn test_composition_section_is_parsed() {
    let config = ConfigLoader::new()
        .load_str(
            r#"
[[composition.provider]]
name = "GreeterProvider"
value = "mock"

[[composition.provider.mock]]
type = "partwire_providers::greeter::MockGreeter"
"#,
        )
        .unwrap();

    let section = config.composition.unwrap();
    assert_eq!(section.providers.len(), 1);
    let provider = &section.providers[0];
    assert_eq!(provider.name.as_deref(), Some("GreeterProvider"));
    assert_eq!(provider.variants_tagged("mock").unwrap().len(), 1);
}

#[test]
fn test_render_produces_loadable_toml() {
    let rendered = ConfigLoader::render(&AppConfig::default()).unwrap();
    assert!(rendered.contains("[server]"));

    let reloaded = ConfigLoader::new().load_str(&rendered).unwrap();
    assert_eq!(reloaded.server, AppConfig::default().server);
}
