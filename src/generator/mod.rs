#[cfg(feature = "desktop")]
pub(crate) mod commands;
pub mod controller;
pub mod state;

pub use controller::GenerationController;
pub use state::{DelayStrategy, GenerationError, GenerationSnapshot, Overview, QUICK_SELECT_LIMIT};
