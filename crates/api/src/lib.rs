//! Lectern API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes, the
//! audio delivery service) so integration tests and the binaries can share
//! them.

pub mod config;
pub mod delivery;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
