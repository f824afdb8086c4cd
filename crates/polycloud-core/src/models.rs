//! Normalized response models
//!
//! These are the vendor-neutral shapes returned to callers. They are built
//! fresh for every request and never cached or persisted.

use serde::{Deserialize, Serialize};

/// Normalized metadata for a storage object.
///
/// `exists` reflects a live existence check against the backend at the time
/// the descriptor was built. `id` is the backend-assigned numeric generation
/// when the backend reports one; it is always `None` after a delete, since
/// deletion invalidates the identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDescriptor {
    pub id: Option<i64>,
    pub bucket: String,
    pub name: String,
    pub uri: String,
    pub public_url: String,
    pub exists: bool,
}

/// One web-entity detection reported by a vision backend.
///
/// Entries keep the backend's ordering; descending score is the vendor's
/// implicit contract and is not re-enforced locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebEntity {
    pub label: String,
    pub score: f64,
}

/// One logo detection reported by a vision backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoEntity {
    pub logo: String,
    pub score: f64,
}
