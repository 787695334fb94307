//! Domain layer: taxonomy model and the radial layout
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod label;
pub mod layout;
pub mod partition;
pub mod rings;
pub mod sector;
pub mod slug;
pub mod taxonomy;

pub use entities::*;
pub use error::DomainError;
pub use label::format_label;
pub use layout::{LayoutBuffer, RadialLayout};
pub use partition::{partition, BranchSweep, PartitionOptions};
pub use rings::{link_distance, ring_multiplier, RingAllocator, RingPlan, DEFAULT_RING_CAPACITY};
pub use sector::Sector;
pub use slug::{derive_id, slugify};
pub use taxonomy::TaxonomyNode;
