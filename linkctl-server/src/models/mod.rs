//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod id;
pub mod tag;
pub mod link;

pub use validation::ValidationError;
pub use id::EntityId;
pub use tag::{Tag, TagName};
pub use link::{Link, LinkUrl};
