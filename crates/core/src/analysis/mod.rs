pub mod error;
pub mod http;
pub mod wire;

use crate::analysis::error::AnalysisError;
use crate::analysis::wire::{CacheCheckResponse, WireAnalysisResult};
use crate::domain::Domain;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The fixed simulated-investor voices of the AI board. The backend returns
/// all of them in one response; the cycle order only drives the staged
/// "currently thinking" indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    Kostolany,
    Buffett,
    Munger,
    Dalio,
}

impl Persona {
    pub const CYCLE: [Persona; 4] = [
        Persona::Kostolany,
        Persona::Buffett,
        Persona::Munger,
        Persona::Dalio,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Persona::Kostolany => "kostolany",
            Persona::Buffett => "buffett",
            Persona::Munger => "munger",
            Persona::Dalio => "dalio",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Persona::Kostolany => "André Kostolany",
            Persona::Buffett => "Warren Buffett",
            Persona::Munger => "Charlie Munger",
            Persona::Dalio => "Ray Dalio",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of one commentary request. Immutable once constructed; the
/// backend caches results by (topic, language, calendar day) plus any
/// `cache_extras` discriminators.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRequest {
    pub request_id: Uuid,
    pub topic: Domain,
    pub language: String,
    pub context: serde_json::Value,
    #[serde(skip)]
    pub cache_extras: Vec<(&'static str, String)>,
}

impl AnalysisRequest {
    pub fn new(
        topic: Domain,
        language: &str,
        context: serde_json::Value,
        cache_extras: Vec<(&'static str, String)>,
    ) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            topic,
            language: language.to_string(),
            context,
            cache_extras,
        }
    }
}

/// Canonical in-memory commentary. Both historic wire shapes normalize into
/// this before anything downstream sees them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub perspectives: Vec<Perspective>,
    pub synthesis: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Perspective {
    pub persona: String,
    pub analysis: String,
}

#[async_trait::async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn check_cached(
        &self,
        request: &AnalysisRequest,
    ) -> Result<CacheCheckResponse, AnalysisError>;

    async fn generate(
        &self,
        request: &AnalysisRequest,
    ) -> Result<WireAnalysisResult, AnalysisError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persona_cycle_order_is_fixed() {
        let ids: Vec<&str> = Persona::CYCLE.iter().map(|p| p.as_str()).collect();
        assert_eq!(ids, ["kostolany", "buffett", "munger", "dalio"]);
    }

    #[test]
    fn request_body_carries_topic_language_and_context() {
        let req = AnalysisRequest::new(
            Domain::Bond,
            "ko",
            serde_json::json!({"spread_10y_2y_bps": -20}),
            vec![],
        );
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["topic"], serde_json::json!("bond"));
        assert_eq!(body["language"], serde_json::json!("ko"));
        assert_eq!(body["context"]["spread_10y_2y_bps"], serde_json::json!(-20));
        assert!(body.get("cache_extras").is_none());
    }
}
