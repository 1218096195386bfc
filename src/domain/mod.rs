//! Domain logic - pure versioning rules independent of files and git

pub mod action;
pub mod tag;
pub mod version;

pub use action::BumpAction;
pub use tag::TagPattern;
pub use version::{next_version, Version};
