//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`cache`] - Cache management (path, stats, clear)
//! - [`fetch`] - Single tile fetch
//! - [`init`] - Configuration initialization
//! - [`prefetch`] - Bulk cache warming with progress
//! - [`providers`] - Provider catalog listing

pub mod cache;
pub mod common;
pub mod fetch;
pub mod init;
pub mod prefetch;
pub mod providers;
