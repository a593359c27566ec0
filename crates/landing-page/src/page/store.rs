use crate::tenant::TenantKey;
use serde_json::Value;

/// Persistence collaborator. Documents are opaque JSON; the store enforces
/// no schema and may hand back anything, including non-objects.
pub trait PageStore: Send + Sync {
    fn get(&self, tenant: &TenantKey) -> Result<Option<Value>, StoreError>;
    fn put(&self, tenant: &TenantKey, document: Value) -> Result<(), StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("page store unavailable: {0}")]
    Unavailable(String),
    #[error("page document could not be serialized: {0}")]
    Serialization(#[from] serde_json::Error),
}
