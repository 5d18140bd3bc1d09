//! linkctl-server: links, tags and tag-filtered link queries over HTTP
//!
//! Layers, bottom-up:
//! - [`db`]: SQLite store, schema and repositories
//! - [`query`]: tag-set matching and link hydration
//! - [`service`]: input validation in front of the repositories
//! - [`http`]: axum routes, JSON errors, CORS
//!
//! # Example
//!
//! ```ignore
//! use linkctl_server::{run_server, ServerConfig, Store, DEFAULT_MAX_CONNECTIONS};
//!
//! let store = Store::open("botdata.db", DEFAULT_MAX_CONNECTIONS).await?;
//! run_server(store, ServerConfig::default()).await?;
//! ```

pub mod db;
pub mod http;
pub mod models;
pub mod query;
pub mod service;

pub use db::{DbError, LinkRepo, Store, TagRepo, DEFAULT_MAX_CONNECTIONS};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
pub use models::{EntityId, Link, LinkUrl, Tag, TagName, ValidationError};
pub use query::TagQuery;
pub use service::{LinkService, ServiceError, ServiceResult, TagService};
