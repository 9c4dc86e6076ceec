//! Core traits for zonesync
//!
//! This module defines the abstract interfaces that all providers must follow.
//!
//! - [`ZoneProvider`]: Read and reconcile the records of a zone
//! - [`ZoneProviderFactory`]: Build a provider from configuration

pub mod zone_provider;

pub use zone_provider::{ZoneProvider, ZoneProviderFactory};
