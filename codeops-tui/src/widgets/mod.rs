//! Reusable widget components.

pub mod status;

pub use status::StatusIndicator;
