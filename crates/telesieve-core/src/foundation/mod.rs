//! Foundation layer - evaluation context and comparison primitives.
//!
//! This module contains the building blocks every filter is written against:
//! - [`FilterContext`] for immutable, derivable evaluation scopes
//! - [`StringComparison`] for configurable text matching

pub mod comparison;
pub mod context;

pub use comparison::StringComparison;
pub use context::FilterContext;
