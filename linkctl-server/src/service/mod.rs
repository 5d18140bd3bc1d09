//! Service layer - validation and orchestration over repositories
//!
//! Services are constructed around repositories and shared with handlers
//! through `AppState`; they hold no mutable state of their own.

pub mod error;
pub mod links;
pub mod tags;

pub use error::{ServiceError, ServiceResult};
pub use links::LinkService;
pub use tags::TagService;
