//! Data-access and relationship-aggregation layer for Taskhub, a
//! project/task/team manager.
//!
//! The layers, bottom up:
//!
//! - [`store`] — the abstract query protocol a backing store offers, with a
//!   MongoDB implementation for production and an in-process one for tests.
//! - [`client::ResourceClient`] — generic CRUD over one collection.
//! - [`services`] — one typed service per entity (users, projects, tasks,
//!   teams, comments) adding domain-filtered queries.
//! - [`fetch::FetchState`] — per-call-site loading/error/result wrapper.
//! - [`aggregate::Aggregator`] — cross-entity joins ("all projects a user
//!   can see"), deduplicated client-side.
//!
//! Every read is a fresh round trip; the layer holds no cache and performs
//! no retries.

pub mod aggregate;
pub mod client;
pub mod config;
pub mod dates;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod models;
pub mod services;
pub mod session;
pub mod store;

pub use aggregate::{Aggregator, TaskScope, TeamScope};
pub use client::ResourceClient;
pub use config::Config;
pub use error::{AggregateError, BackendError, DataError};
pub use fetch::FetchState;
pub use services::Services;
