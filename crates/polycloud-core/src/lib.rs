//! Polycloud Core Library
//!
//! This crate provides the shared types used by every polycloud capability:
//! provider identifiers, normalized response models, and environment-driven
//! configuration.

pub mod config;
pub mod models;
pub mod providers;

// Re-export commonly used types
pub use config::Config;
pub use models::{LogoEntity, ObjectDescriptor, WebEntity};
pub use providers::{StorageProviderId, UnknownProvider, VisionProviderId};
