//! Course-marketplace API: public course browsing, an authenticated
//! user-metadata relay to the Clerk identity service, transactions, and
//! per-user course progress, backed by SQLite.
//!
//! The same router serves two run modes: a long-lived TCP listener and an
//! on-demand invocation adapter (see [`invoke`]) that also carries the
//! administrative `seed` action. The [`client`] module is the headless
//! view-model for the public landing page.

pub mod client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod invoke;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod seed;
pub mod services;
