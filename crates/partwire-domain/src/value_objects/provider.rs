//! Provider configuration elements
//!
//! These mirror the `[composition]` section of the configuration file:
//!
//! ```toml
//! [[composition.provider]]
//! name = "LogOnProvider"
//! value = "mock"
//!
//! [[composition.provider.mock]]
//! type = "partwire_providers::greeter::MockGreeter"
//! ```
//!
//! Mandatory attributes are optional here so that a missing attribute is
//! reported by the loader with the offending element, rather than as a
//! generic deserialization failure. Keys other than `name` and `value` are
//! kept undecoded: only the selected tag has to be a variant list, so a role
//! may carry unrelated attributes such as a `description`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// The `[composition]` section: every configured role
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionSection {
    /// Role elements in document order
    #[serde(default, rename = "provider")]
    pub providers: Vec<ProviderElement>,
}

/// One role: its name, selected variant tag and its remaining keys
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderElement {
    /// Role name, unique per configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Selected variant tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Every other key, variant lists among them
    #[serde(flatten)]
    pub variants: BTreeMap<String, Value>,
}

impl ProviderElement {
    /// Variants listed under `tag`, empty when the tag is absent
    ///
    /// Fails when the key exists but is neither a table nor an array of
    /// tables.
    pub fn variants_tagged(&self, tag: &str) -> Result<Vec<VariantElement>> {
        let Some(raw) = self.variants.get(tag) else {
            return Ok(Vec::new());
        };
        let elements = VariantElements::deserialize(raw).map_err(|e| {
            Error::configuration_with_source(
                format!("Provider elements named \"{tag}\" are malformed: {raw}"),
                e,
            )
        })?;
        Ok(elements.into_vec())
    }

    /// Compact rendering used in error messages
    pub fn render(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}"))
    }
}

/// Variants under one tag: an array of tables or a single table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariantElements {
    /// `[[composition.provider.<tag>]]`
    Many(Vec<VariantElement>),
    /// `[composition.provider.<tag>]`
    One(VariantElement),
}

impl VariantElements {
    pub fn into_vec(self) -> Vec<VariantElement> {
        match self {
            Self::Many(elements) => elements,
            Self::One(element) => vec![element],
        }
    }
}

/// One candidate implementation of a role
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantElement {
    /// Type identifier, `path::Type` or `path::Type, module`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// External module location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assembly: Option<String>,
}

impl VariantElement {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            assembly: None,
        }
    }

    #[must_use]
    pub fn with_assembly(mut self, assembly: impl Into<String>) -> Self {
        self.assembly = Some(assembly.into());
        self
    }

    /// Splits the type identifier into type path and optional module name
    pub fn type_identifier(&self) -> Option<(&str, Option<&str>)> {
        let raw = self.type_name.as_deref()?.trim();
        match raw.split_once(',') {
            Some((type_path, module)) => {
                let module = module.trim();
                Some((type_path.trim(), (!module.is_empty()).then_some(module)))
            }
            None => Some((raw, None)),
        }
    }

    pub fn render(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}"))
    }
}
