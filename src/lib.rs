//! Precomputed radial layouts for taxonomy atlases.
//!
//! A taxonomy (`{name, children[]}` tree) is laid out once into fixed
//! coordinates: a root payload with the top-level branches and one payload
//! per branch for lazy loading.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
