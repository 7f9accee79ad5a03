//! Client-side navigation and backend gateway for the market dashboard.
//!
//! - [`routes`] maps paths to lazily-loaded view modules, following redirects
//!   and dropping results of superseded navigations.
//! - [`gateway`] issues the backend operations through one typed client and
//!   reports failures as [`gateway::GatewayError`].
//! - [`config`] resolves the base address and limits once at startup.

pub mod config;
pub mod gateway;
pub mod logging;
pub mod routes;
