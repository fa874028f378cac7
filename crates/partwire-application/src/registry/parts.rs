use std::fmt;

use dill::CatalogBuilder;
use partwire_domain::TypeInfo;

use crate::composition::{CreationPolicy, ImportDefinition};

/// Registry entry for one concrete part type
///
/// Each part registers itself with this entry using
/// `#[linkme::distributed_slice(PARTS)]`. The entry carries the identifier
/// configuration files use to select the part, the module it was compiled
/// into, the contracts it exports and imports, and the function adding the
/// part's dill component to a catalog.
pub struct PartEntry {
    /// Type identifier (e.g. `partwire_providers::greeter::MockGreeter`)
    pub type_name: &'static str,
    /// Name of the module (crate) that provides the part
    pub module: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Must agree with the component's dill scope
    pub creation_policy: CreationPolicy,
    /// Contracts the component is bound to, its own type included
    pub exports: &'static [fn() -> TypeInfo],
    /// Constructor arguments the catalog injects
    pub imports: &'static [ImportDefinition],
    /// Adds the component and its interface bindings to a catalog
    pub register: fn(&mut CatalogBuilder),
}

impl PartEntry {
    /// Whether this entry answers to `type_name`, optionally within `module`
    pub fn matches(&self, type_name: &str, module: Option<&str>) -> bool {
        self.type_name == type_name && module.is_none_or(|module| self.module == module)
    }

    pub fn exports_contract(&self, contract: &TypeInfo) -> bool {
        self.exports.iter().any(|export| export() == *contract)
    }

    pub(crate) fn exports_named(&self, contract: &str) -> bool {
        self.exports.iter().any(|export| export().name() == contract)
    }

    pub(crate) fn imports_named(&self, contract: &str) -> bool {
        self.imports.iter().any(|import| import.contract().name() == contract)
    }
}

impl fmt::Debug for PartEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartEntry")
            .field("type_name", &self.type_name)
            .field("module", &self.module)
            .field("creation_policy", &self.creation_policy)
            .field(
                "exports",
                &self.exports.iter().map(|export| export().name()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl fmt::Display for PartEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) exports [", self.type_name, self.creation_policy)?;
        for (index, export) in self.exports.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(export().name())?;
        }
        f.write_str("]")
    }
}

// Auto-collection via linkme distributed slices - parts submit entries at compile time
#[linkme::distributed_slice]
pub static PARTS: [PartEntry] = [..];

/// Every part linked into the process
pub fn registered_parts() -> &'static [PartEntry] {
    &PARTS
}

/// Find a linked part by type identifier, optionally restricted to a module
pub fn find_part(type_name: &str, module: Option<&str>) -> Option<&'static PartEntry> {
    find_part_in(registered_parts(), type_name, module)
}

/// Find a part in an explicit table
pub fn find_part_in(
    parts: &'static [PartEntry],
    type_name: &str,
    module: Option<&str>,
) -> Option<&'static PartEntry> {
    parts.iter().find(|entry| entry.matches(type_name, module))
}

/// List all registered parts
///
/// Returns a list of (type name, module, description) tuples.
pub fn list_parts() -> Vec<(&'static str, &'static str, &'static str)> {
    PARTS
        .iter()
        .map(|entry| (entry.type_name, entry.module, entry.description))
        .collect()
}
