mod analysis;
mod common;
mod community;
mod entry;

pub use analysis::*;
pub use common::*;
pub use community::*;
pub use entry::*;
