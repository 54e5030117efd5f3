//! Shared building blocks for the Nightline stores.
//!
//! Holds the result value every validated store operation returns and a
//! couple of text helpers used when narrative phrases become identifiers.

/// Outcome of a validated store operation.
pub mod action;
/// Identifier and display-name helpers.
pub mod text;

pub use action::ActionResult;
pub use text::{slugify, title_case};
