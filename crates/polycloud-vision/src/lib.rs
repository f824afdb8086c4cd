//! Polycloud Vision Library
//!
//! This crate provides the vision capability: a vendor-neutral
//! `VisionProvider` trait, a Google Cloud Vision REST backend, and the
//! `VisionService` facade. Detection results are normalized to flat
//! label/score entries in the backend's reported order.

pub mod gcp;
pub mod service;
pub mod traits;

// Re-export commonly used types
pub use gcp::GcpVision;
pub use polycloud_core::{LogoEntity, VisionProviderId, WebEntity};
pub use service::VisionService;
pub use traits::{VisionError, VisionProvider, VisionResult};
