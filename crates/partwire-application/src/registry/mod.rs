//! Part Registry
//!
//! Parts register themselves with `#[linkme::distributed_slice(PARTS)]`.
//! Configuration selects entries from that table by type identifier; the
//! selection is collected into a [`RegisteredTypeSet`].

mod parts;
mod type_set;

pub use parts::{PARTS, PartEntry, find_part, find_part_in, list_parts, registered_parts};
pub use type_set::RegisteredTypeSet;
