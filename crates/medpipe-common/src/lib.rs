//! medpipe common library
//!
//! Pieces shared by every medpipe binary:
//!
//! - **Logging**: tracing subscriber setup driven by [`logging::LogConfig`]
//! - **Environment**: small helpers the config loaders build on
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod env;
pub mod logging;

pub use env::EnvError;
