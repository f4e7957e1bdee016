//! API Data Transfer Objects.
//!
//! Wire format for the REST API, kept separate from the domain models in
//! `src/models/`.

pub mod community;
pub mod entries;
pub mod insights;

pub use community::*;
pub use entries::*;
pub use insights::*;
