//! Core module - configuration, state and the HTTPS server
//!
//! - [`Config`] - environment-driven configuration
//! - [`ServerState`] - shared handles for request handlers
//! - [`Server`] - HTTPS server lifecycle

pub mod config;
pub mod server;
pub mod state;

pub use config::{Config, PrintMode};
pub use server::Server;
pub use state::{DeviceChannel, ServerState};
