//! Structured representation of a parsed plan.
//!
//! A [`Plan`] is built once by [`crate::parsers::parse_plan`] and never
//! mutated afterwards. Everything the viewer shows is derived from it.

mod action;
mod plan;

pub use action::*;
pub use plan::*;
