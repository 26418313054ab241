use crate::analysis::error::AnalysisError;
use crate::analysis::wire::{CacheCheckResponse, WireAnalysisResult};
use crate::analysis::{AnalysisBackend, AnalysisRequest};
use crate::fetch::client::BackendClient;

#[derive(Debug, Clone)]
pub struct HttpAnalysisBackend {
    client: BackendClient,
}

impl HttpAnalysisBackend {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl AnalysisBackend for HttpAnalysisBackend {
    async fn check_cached(
        &self,
        request: &AnalysisRequest,
    ) -> Result<CacheCheckResponse, AnalysisError> {
        let path = format!("/api/analyze/{}/cached", request.topic);

        let mut query: Vec<(&str, String)> = vec![("language", request.language.clone())];
        query.extend(request.cache_extras.iter().map(|(k, v)| (*k, v.clone())));

        self.client
            .get_json::<CacheCheckResponse>(&path, &query)
            .await
            .map_err(|err| AnalysisError::from_fetch(request.topic, "cache_check", err))
    }

    async fn generate(
        &self,
        request: &AnalysisRequest,
    ) -> Result<WireAnalysisResult, AnalysisError> {
        let path = format!("/api/analyze/{}", request.topic);

        self.client
            .post_json::<WireAnalysisResult>(&path, request)
            .await
            .map_err(|err| AnalysisError::from_fetch(request.topic, "generate", err))
    }
}
