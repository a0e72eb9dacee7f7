//! # proxyctl
//!
//! Administrative console for a reverse-proxy management backend. The
//! backend REST service owns all business logic and persistence; this
//! crate is a CRUD front end for it: listing proxies with pagination,
//! creating/updating/deleting them, navigating into a proxy's routes, and
//! toggling or editing route attributes (path, method, header-injection
//! rules, activation windows, cookie-match rules).
//!
//! ## Architecture
//!
//! ```text
//! CLI / interactive shell → console views → API client → backend REST API
//!            ↓                    ↓
//!     form validation       query cache (invalidate, never merge)
//! ```
//!
//! ## Core components
//!
//! - **API client**: typed reqwest accessor for the proxy and route
//!   endpoints; one attempt per user action, no retry.
//! - **Console views**: session state for the proxy list and a proxy's
//!   route list, including the delete confirmation gate and the query
//!   cache that is invalidated after every mutation.
//! - **CLI**: clap-based one-shot commands plus an interactive console
//!   mode that mirrors the list/detail navigation.

pub mod cli;
pub mod client;
pub mod config;
pub mod console;
pub mod domain;
pub mod errors;

// Re-export commonly used types
pub use client::{ApiClient, ClientConfig};
pub use errors::{Error, Result};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
