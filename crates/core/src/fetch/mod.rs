pub mod client;
pub mod error;
pub mod providers;

use crate::domain::Domain;
use crate::fetch::error::FetchError;
use serde::Serialize;

/// One dashboard domain's data source: a live fetch plus a synthesized
/// substitute with the exact same shape. The fallback decision is made by the
/// store, not here, so the branch stays visible at the call site.
#[async_trait::async_trait]
pub trait DomainProvider: Send + Sync {
    type Payload: Clone + Serialize + Send + Sync + 'static;

    fn domain(&self) -> Domain;

    async fn fetch_live(&self) -> Result<Self::Payload, FetchError>;

    /// Synthesized payload; must be total.
    fn fallback(&self) -> Self::Payload;

    /// Numeric/string context forwarded with an analysis request.
    fn analysis_context(&self, payload: Option<&Self::Payload>) -> serde_json::Value;

    /// Extra discriminators for the server-side analysis cache key.
    fn cache_extras(&self, _payload: Option<&Self::Payload>) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}
