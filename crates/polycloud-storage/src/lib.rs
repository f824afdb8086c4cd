//! Polycloud Storage Library
//!
//! This crate provides the object-storage capability: a vendor-neutral
//! `ObjectStorage` trait, backends for Google Cloud Storage and Huawei OBS,
//! and the `StorageService` facade that application code talks to.
//!
//! # Error translation
//!
//! Vendor errors are translated exactly once, at the backend boundary.
//! Every backend "not found" condition becomes either `BucketNotFound`
//! (the bucket itself cannot be resolved) or `FileNotFound` (a missing
//! object, or a missing local upload source). Nothing above the backend
//! re-wraps or suppresses these kinds.

pub(crate) mod bucket;
pub mod gcs;
pub mod obs;
pub mod service;
pub mod traits;

// Re-export commonly used types
pub use gcs::GcsStorage;
pub use obs::ObsStorage;
pub use polycloud_core::{ObjectDescriptor, StorageProviderId};
pub use service::StorageService;
pub use traits::{ObjectStorage, StorageError, StorageResult};
