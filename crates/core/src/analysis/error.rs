use crate::domain::Domain;
use crate::fetch::error::FetchError;
use std::fmt;

#[derive(Debug, Clone)]
pub struct AnalysisError {
    pub topic: Domain,
    pub stage: &'static str,
    pub detail: String,
    pub raw_body: Option<String>,
}

impl AnalysisError {
    pub fn from_fetch(topic: Domain, stage: &'static str, err: FetchError) -> Self {
        let raw_body = match &err {
            FetchError::Http { body, .. } => Some(body.clone()),
            _ => None,
        };
        Self {
            topic,
            stage,
            detail: err.to_string(),
            raw_body,
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "analysis error (topic={}, stage={}): {}",
            self.topic, self.stage, self.detail
        )
    }
}

impl std::error::Error for AnalysisError {}
