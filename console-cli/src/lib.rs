//! AI Chat Console Library
//!
//! Native side of the admin console: the UI web server, the backend
//! transport and the command line tooling.

pub mod cli;
pub mod http;
pub mod server;
pub mod settings;

pub use server::AssetSource;
