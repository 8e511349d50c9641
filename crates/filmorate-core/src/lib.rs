//! Service plumbing shared by Filmorate binaries: configuration loading,
//! HTTP middleware and tracing setup.

pub mod config;
pub mod middleware;
pub mod tracing;
