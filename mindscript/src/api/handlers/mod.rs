pub mod analysis;
pub mod community;
pub mod entries;
pub(crate) mod health;
pub mod insights;

pub use health::health_check;
