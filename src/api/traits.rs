use crate::api::types::ListQuery;
use crate::error::Result;
use crate::models::{Property, PropertyId, PropertyInput};
use async_trait::async_trait;
use serde_json::Value;

/// Operations the page controller needs from the properties backend.
/// `ApiClient` talks HTTP; tests plug in an in-memory store.
#[async_trait]
pub trait PropertyApi: Send + Sync {
    /// Fetch one page. The raw response is returned so the caller can
    /// accept any of the supported list shapes.
    async fn list(&self, query: &ListQuery) -> Result<Value>;

    async fn get(&self, id: &PropertyId) -> Result<Property>;

    async fn create(&self, input: &PropertyInput) -> Result<Value>;

    async fn update(&self, id: &PropertyId, input: &PropertyInput) -> Result<Value>;

    async fn delete(&self, id: &PropertyId) -> Result<()>;
}
