//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on the `FileSystem` boundary trait but are themselves
//! concrete structs, not traits.

mod atlas;
mod publish;

pub use atlas::{AtlasService, BuildReport};
pub use publish::{PublishReport, PublishService};
