//! Composition engine
//!
//! Parts are dill components. The container builds a dill catalog from the
//! selected registry entries and resolves exports through it, checking the
//! creation policies importers require before the catalog instantiates
//! anything.
//!
//! | Item | Description |
//! |------|-------------|
//! | [`CompositionContainer`] | Resolves exports, wiring imports transitively |
//! | [`ContainerRef`] | Handle parts import to reach their container |
//! | [`CreationPolicy`] | Sharing policy a part offers or an import requires |
//! | [`ImportDefinition`] | One declared import of a part |

mod container;
mod policy;

pub use container::{CompositionContainer, ContainerRef};
pub use policy::{CreationPolicy, ImportDefinition};
