//! Domain types and rules shared across Filmorate crates.
//!
//! This crate contains only pure types and rules with no framework or storage
//! dependencies, so every store implementation runs the same logic.

pub mod film;
pub mod friendship;
pub mod id;
pub mod popularity;
pub mod user;
pub mod validation;
