//! Creation policies and import requirements
//!
//! dill decides sharing through component scopes (`#[scope(Singleton)]` or
//! the default transient scope). What dill has no notion of is an importer
//! *requiring* a particular policy from the part it imports, so parts
//! declare their policy and their imports here and the container checks
//! them before asking the catalog for an instance.

use std::fmt;

use partwire_domain::TypeInfo;

/// How instances of a part are shared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreationPolicy {
    /// No preference; the part uses dill's transient scope
    #[default]
    Any,
    /// One instance per container (`#[scope(Singleton)]`)
    Shared,
    /// A fresh instance per request
    NonShared,
}

impl CreationPolicy {
    /// Whether a part with this policy can satisfy an import requiring `required`
    pub fn is_compatible_with(self, required: CreationPolicy) -> bool {
        match (self, required) {
            (_, Self::Any) | (Self::Any, _) => true,
            (offered, required) => offered == required,
        }
    }
}

impl fmt::Display for CreationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Any => "any",
            Self::Shared => "shared",
            Self::NonShared => "non-shared",
        };
        f.write_str(name)
    }
}

/// One import a part declares, with the policy it requires of the exporter
#[derive(Debug, Clone, Copy)]
pub struct ImportDefinition {
    /// Imported contract
    pub contract: fn() -> TypeInfo,
    pub required_creation_policy: CreationPolicy,
}

impl ImportDefinition {
    pub fn contract(&self) -> TypeInfo {
        (self.contract)()
    }
}
