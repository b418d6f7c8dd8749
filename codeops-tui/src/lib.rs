//! CodeOps terminal console library exports.

pub mod api_client;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod events;
pub mod headless;
pub mod keys;
pub mod logging;
pub mod notifications;
pub mod state;
pub mod theme;
pub mod views;
pub mod widgets;
