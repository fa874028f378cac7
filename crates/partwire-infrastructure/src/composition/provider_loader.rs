//! Provider Registry Loader
//!
//! Turns the `[composition]` section of a configuration document into the
//! set of parts the container will be built from:
//!
//! ```toml
//! [[composition.provider]]
//! name = "LogOnProvider"
//! value = "mock"
//!
//! [[composition.provider.mock]]
//! type = "partwire_providers::greeter::MockGreeter"
//!
//! [[composition.provider.production]]
//! type = "partwire_providers::greeter::ProductionGreeter"
//! assembly = "modules/partwire_providers.module"
//! ```
//!
//! Only the variants listed under a role's selected tag are registered.
//! Every failure is reported as one configuration error carrying the whole
//! cause chain followed by the document text.

use std::collections::BTreeMap;
use std::path::PathBuf;

use figment::Figment;
use figment::providers::{Env, Format, Toml};
use partwire_application::registry::{PartEntry, RegisteredTypeSet, find_part_in, registered_parts};
use partwire_domain::constants::{COMPOSITION_ELEMENT, ERROR_CHAIN_SEPARATOR};
use partwire_domain::error::{Error, Result};
use partwire_domain::{CompositionSection, ProviderElement, VariantElement};
use tracing::{debug, info, warn};

use super::module_resolver::ModuleResolver;
use crate::config::AppConfig;
use crate::constants::{COMPOSITION_ERROR_HEADER, COMPOSITION_SECTION, SELECT_ENV_PREFIX};
use crate::error_ext::{ErrorContext, describe_chain};

/// Loads registered type sets from composition configuration
#[derive(Debug, Clone)]
pub struct ProviderRegistryLoader {
    parts: &'static [PartEntry],
    modules: ModuleResolver,
    /// Lowercased role name to selected tag
    selections: BTreeMap<String, String>,
}

impl ProviderRegistryLoader {
    /// Loader over every part linked into the process
    pub fn new() -> Self {
        Self {
            parts: registered_parts(),
            modules: ModuleResolver::new(),
            selections: BTreeMap::new(),
        }
    }

    /// Resolve type identifiers against an explicit part table
    #[must_use]
    pub fn with_parts(mut self, parts: &'static [PartEntry]) -> Self {
        self.parts = parts;
        self
    }

    /// Resolve relative module locations against `root`
    #[must_use]
    pub fn with_app_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.modules = self.modules.with_app_root(root);
        self
    }

    /// Select `tag` for `role`, overriding the document's `value`
    #[must_use]
    pub fn with_selection(mut self, role: &str, tag: impl Into<String>) -> Self {
        self.selections.insert(role.to_lowercase(), tag.into());
        self
    }

    /// Read `PARTWIRE_SELECT_<ROLE>=<tag>` overrides from the environment
    ///
    /// figment parses environment values, so a numeric or boolean tag
    /// arrives typed and is turned back into its text.
    pub fn with_env_selections(mut self) -> Result<Self> {
        let selections: BTreeMap<String, toml::Value> =
            Figment::from(Env::prefixed(SELECT_ENV_PREFIX))
                .extract()
                .config_context("Invalid provider selection in environment")?;
        for (role, tag) in selections {
            let tag = match tag {
                toml::Value::String(tag) => tag,
                other => other.to_string(),
            };
            debug!(role = %role, tag = %tag, "provider selection from environment");
            self.selections.insert(role.to_lowercase(), tag);
        }
        Ok(self)
    }

    /// Load from a TOML document containing a `[composition]` section
    pub fn load_str(&self, document: &str) -> Result<RegisteredTypeSet> {
        parse_section(document)
            .and_then(|section| self.collect(&section))
            .map_err(|err| aggregate(err, document))
    }

    /// Load from the composition section of an application configuration
    pub fn load_config(&self, config: &AppConfig) -> Result<RegisteredTypeSet> {
        let document = config.source_text.as_deref().unwrap_or_default();
        config
            .composition
            .as_ref()
            .ok_or_else(missing_section)
            .and_then(|section| self.collect(section))
            .map_err(|err| aggregate(err, document))
    }

    /// Load from an already parsed section; `document` is quoted in errors
    pub fn load_section(
        &self,
        section: &CompositionSection,
        document: &str,
    ) -> Result<RegisteredTypeSet> {
        self.collect(section).map_err(|err| aggregate(err, document))
    }

    fn collect(&self, section: &CompositionSection) -> Result<RegisteredTypeSet> {
        let mut types = RegisteredTypeSet::new();
        for provider in &section.providers {
            let (name, tag) = self.selected_tag(provider)?;
            let variants = provider.variants_tagged(tag)?;
            if variants.is_empty() {
                return Err(Error::configuration(format!(
                    "The configuration for provider \"{name}\" does not have any provider elements named \"{tag}\""
                )));
            }

            for variant in &variants {
                let entry = self.resolve_variant(name, variant)?;
                if types.insert(entry) {
                    debug!(role = name, part = entry.type_name, "part registered");
                }
            }
            info!(role = name, variant = tag, "provider role configured");
        }
        Ok(types)
    }

    fn selected_tag<'a>(&'a self, provider: &'a ProviderElement) -> Result<(&'a str, &'a str)> {
        let name = provider.name.as_deref().ok_or_else(|| {
            Error::missing_attribute(&provider.render(), "name", COMPOSITION_ELEMENT)
        })?;
        let value = provider
            .value
            .as_deref()
            .ok_or_else(|| Error::missing_attribute(&provider.render(), "value", name))?;
        let tag = self
            .selections
            .get(&name.to_lowercase())
            .map_or(value, String::as_str);
        Ok((name, tag))
    }

    fn resolve_variant(&self, role: &str, variant: &VariantElement) -> Result<&'static PartEntry> {
        let (type_name, module) = variant
            .type_identifier()
            .ok_or_else(|| Error::missing_attribute(&variant.render(), "type", role))?;

        let Some(location) = variant.assembly.as_deref() else {
            return find_part_in(self.parts, type_name, module).ok_or_else(|| {
                Error::type_load(format!("Could not load type {type_name} from existing module"))
            });
        };

        let path = self.modules.resolve(location)?;
        if !path.exists() {
            warn!(path = %path.display(), "Cannot locate type {type_name}");
            return Err(Error::module_not_found(path));
        }

        ModuleResolver::module_name(&path)
            .and_then(|module_name| find_part_in(self.parts, type_name, Some(module_name)))
            .ok_or_else(|| {
                Error::type_load(format!(
                    "Could not load type {type_name} from physical module file {}",
                    path.display()
                ))
            })
    }
}

impl Default for ProviderRegistryLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_section(document: &str) -> Result<CompositionSection> {
    let table: toml::Table =
        toml::from_str(document).config_context("Malformed configuration document")?;
    if !table.contains_key(COMPOSITION_SECTION) {
        return Err(missing_section());
    }
    Figment::from(Toml::string(document))
        .extract_inner(COMPOSITION_SECTION)
        .config_context("Malformed composition section")
}

fn missing_section() -> Error {
    Error::configuration(format!(
        "Cannot load composition configuration section [{COMPOSITION_SECTION}]"
    ))
}

fn aggregate(err: Error, document: &str) -> Error {
    let mut message = format!("{COMPOSITION_ERROR_HEADER}\n");
    for line in describe_chain(&err) {
        message.push_str(&line);
        message.push('\n');
        message.push_str(ERROR_CHAIN_SEPARATOR);
        message.push('\n');
    }
    message.push_str(document);
    Error::configuration_with_source(message, err)
}
