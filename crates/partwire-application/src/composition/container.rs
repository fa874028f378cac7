use std::any::{Any, TypeId};
use std::fmt;
use std::sync::{Arc, Weak};

use dill::{Catalog, CatalogBuilder, InjectionError};
use partwire_domain::{CompositionError, TypeInfo};

use super::policy::CreationPolicy;
use crate::registry::{PartEntry, RegisteredTypeSet};

/// Resolves exported values from a dill catalog of parts.
///
/// The catalog is fixed at construction. Besides the caller's parts it always
/// contains one entry exporting the container itself (through
/// [`ContainerRef`]), so parts can import the container they were composed
/// by. Cloning is cheap and clones share the same catalog, so singleton
/// parts are shared between them.
#[derive(Clone)]
pub struct CompositionContainer {
    inner: Arc<ContainerInner>,
}

struct ContainerInner {
    catalog: Catalog,
    parts: Vec<&'static PartEntry>,
}

/// Handle to the container a part was composed by
///
/// Injected into parts that take an `Arc<ContainerRef>` argument. It holds
/// the container weakly, since the catalog that owns it lives inside the
/// container.
#[derive(Clone)]
pub struct ContainerRef {
    inner: Weak<ContainerInner>,
}

impl ContainerRef {
    /// The container, unless it has been dropped
    pub fn container(&self) -> Option<CompositionContainer> {
        self.inner
            .upgrade()
            .map(|inner| CompositionContainer { inner })
    }
}

impl fmt::Debug for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerRef")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

static CONTAINER_PART: PartEntry = PartEntry {
    type_name: "partwire_application::CompositionContainer",
    module: "partwire_application",
    description: "The composition container itself",
    creation_policy: CreationPolicy::NonShared,
    exports: &[TypeInfo::of::<CompositionContainer>, TypeInfo::of::<ContainerRef>],
    imports: &[],
    register: register_container,
};

// Added by the container itself, the only one holding the handle.
fn register_container(_: &mut CatalogBuilder) {}

impl CompositionContainer {
    /// Container over the parts of a registered type set
    pub fn new(types: &RegisteredTypeSet) -> Self {
        Self::from_parts(types.iter())
    }

    /// Container over an explicit list of entries
    pub fn from_parts(parts: impl IntoIterator<Item = &'static PartEntry>) -> Self {
        let mut parts: Vec<&'static PartEntry> = parts.into_iter().collect();
        parts.push(&CONTAINER_PART);

        let inner = Arc::new_cyclic(|weak: &Weak<ContainerInner>| {
            let mut builder = CatalogBuilder::new();
            builder.add_value(ContainerRef {
                inner: weak.clone(),
            });
            for part in &parts {
                (part.register)(&mut builder);
            }
            ContainerInner {
                catalog: builder.build(),
                parts,
            }
        });
        tracing::debug!(parts = inner.parts.len(), "composition container created");
        Self { inner }
    }

    /// Resolve the single export of contract `C`
    ///
    /// Fails with [`CompositionError::NoExports`] when no part exports `C`
    /// and [`CompositionError::Ambiguous`] when more than one does. Nested
    /// import failures are reported as [`CompositionError::ImportFailed`]
    /// naming the importing part.
    pub fn get_exported_value<C: ?Sized + Send + Sync + 'static>(
        &self,
    ) -> Result<Arc<C>, CompositionError> {
        if let Some(this) = self.as_export::<C>() {
            return Ok(this);
        }
        let contract = TypeInfo::of::<C>();
        self.check_requirements(contract, CreationPolicy::Any, &mut Vec::new())?;
        self.inner
            .catalog
            .get_one::<C>()
            .map_err(|err| self.injection_failure(contract, err))
    }

    /// Resolve the export of `C` if some part provides it
    pub fn try_get_exported_value<C: ?Sized + Send + Sync + 'static>(
        &self,
    ) -> Result<Option<Arc<C>>, CompositionError> {
        match self.get_exported_value::<C>() {
            Ok(value) => Ok(Some(value)),
            Err(CompositionError::NoExports { contract })
                if contract == TypeInfo::of::<C>().name() =>
            {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Every part in the catalog, including the container's own entry
    pub fn parts(&self) -> &[&'static PartEntry] {
        &self.inner.parts
    }

    /// The underlying dill catalog
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Whether both handles refer to the same container
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    fn as_export<C: ?Sized + 'static>(&self) -> Option<Arc<C>> {
        if TypeId::of::<C>() != TypeId::of::<CompositionContainer>() {
            return None;
        }
        let handle: Box<dyn Any> = Box::new(Arc::new(self.clone()));
        handle.downcast::<Arc<C>>().ok().map(|handle| *handle)
    }

    // Walks the declared imports below `contract` before dill builds anything:
    // reports cycles, and exporters whose policy the importer does not accept.
    // Missing and ambiguous contracts are left for the catalog to report.
    fn check_requirements(
        &self,
        contract: TypeInfo,
        required: CreationPolicy,
        chain: &mut Vec<&'static PartEntry>,
    ) -> Result<(), CompositionError> {
        let exporters: Vec<&'static PartEntry> = self
            .parts()
            .iter()
            .copied()
            .filter(|part| part.exports_contract(&contract))
            .collect();
        let [part] = exporters.as_slice() else {
            return Ok(());
        };
        let part = *part;

        if !part.creation_policy.is_compatible_with(required) {
            tracing::debug!(
                part = part.type_name,
                offered = %part.creation_policy,
                required = %required,
                "creation policy rejected"
            );
            return Err(CompositionError::NoExports {
                contract: contract.name(),
            });
        }

        if chain.iter().any(|known| std::ptr::eq(*known, part)) {
            let mut names: Vec<&'static str> = chain.iter().map(|known| known.type_name).collect();
            names.push(part.type_name);
            return Err(CompositionError::Cycle { chain: names });
        }

        chain.push(part);
        for import in part.imports {
            let imported = import.contract();
            self.check_requirements(imported, import.required_creation_policy, chain)
                .map_err(|cause| CompositionError::ImportFailed {
                    part: part.type_name,
                    contract: imported.name(),
                    cause: Box::new(cause),
                })?;
        }
        chain.pop();
        Ok(())
    }

    fn injection_failure(&self, requested: TypeInfo, err: InjectionError) -> CompositionError {
        let cause = match &err {
            InjectionError::Unregistered(err) => CompositionError::NoExports {
                contract: self.contract_named(err.dep_type.name, requested),
            },
            InjectionError::Ambiguous(err) => {
                let contract = self.contract_named(err.dep_type.name, requested);
                CompositionError::Ambiguous {
                    contract,
                    candidates: self.exporters_of(contract),
                }
            }
            #[allow(unreachable_patterns)]
            _ => {
                return CompositionError::Injection {
                    contract: requested.name(),
                    message: err.to_string(),
                };
            }
        };

        let contract = match &cause {
            CompositionError::NoExports { contract } | CompositionError::Ambiguous { contract, .. } => {
                *contract
            }
            _ => requested.name(),
        };
        if contract == requested.name() {
            return cause;
        }
        match self.parts().iter().find(|part| part.imports_named(contract)) {
            Some(importer) => CompositionError::ImportFailed {
                part: importer.type_name,
                contract,
                cause: Box::new(cause),
            },
            None => cause,
        }
    }

    // dill reports contracts by name; map the name back onto the declared one.
    fn contract_named(&self, name: &str, requested: TypeInfo) -> &'static str {
        self.parts()
            .iter()
            .flat_map(|part| {
                let exports = part.exports.iter().map(|export| export().name());
                let imports = part.imports.iter().map(|import| import.contract().name());
                exports.chain(imports)
            })
            .find(|known| *known == name)
            .unwrap_or_else(|| requested.name())
    }

    fn exporters_of(&self, contract: &str) -> Vec<&'static str> {
        self.parts()
            .iter()
            .filter(|part| part.exports_named(contract))
            .map(|part| part.type_name)
            .collect()
    }
}

impl fmt::Debug for CompositionContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositionContainer")
            .field("parts", &self.inner.parts.len())
            .finish_non_exhaustive()
    }
}
