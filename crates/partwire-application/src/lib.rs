//! Application Layer - partwire
//!
//! Holds the two pieces every other crate builds on:
//!
//! - `registry`: the compile-time table of parts (`PARTS`) that providers
//!   submit entries to, and the deduplicated `RegisteredTypeSet` selected
//!   from it by configuration.
//! - `composition`: the `CompositionContainer` that builds a dill catalog
//!   from the selected entries and resolves exports through it.
//!
//! ## Dependencies
//!
//! This crate depends only on `partwire-domain`, `dill` and a few pure
//! libraries.

pub mod composition;
pub mod registry;

pub use composition::{CompositionContainer, ContainerRef, CreationPolicy, ImportDefinition};
pub use registry::{PARTS, PartEntry, RegisteredTypeSet, find_part, list_parts};
