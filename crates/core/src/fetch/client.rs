use crate::config::Settings;
use crate::fetch::error::FetchError;
use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Thin JSON client for the market backend. One round trip per call; retry is
/// the caller's decision (a timer or an explicit user action), never ours.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl BackendClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let base_url = settings
            .market_api_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = std::env::var("MARKET_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build market backend http client")?;

        Ok(Self {
            http,
            base_url,
            api_key: settings.market_api_key.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn headers(&self) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &self.api_key {
            let value = HeaderValue::from_str(api_key).map_err(|err| FetchError::Transport {
                detail: format!("invalid MARKET_API_KEY header value: {err}"),
            })?;
            headers.insert("x-api-key", value);
        }
        Ok(headers)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let res = self
            .http
            .get(self.url(path))
            .headers(self.headers()?)
            .query(query)
            .send()
            .await
            .map_err(|err| FetchError::Transport {
                detail: err.to_string(),
            })?;

        Self::decode_response(res).await
    }

    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, FetchError> {
        let res = self
            .http
            .post(self.url(path))
            .headers(self.headers()?)
            .json(body)
            .send()
            .await
            .map_err(|err| FetchError::Transport {
                detail: err.to_string(),
            })?;

        Self::decode_response(res).await
    }

    async fn decode_response<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, FetchError> {
        let status = res.status();
        let text = res.text().await.map_err(|err| FetchError::Transport {
            detail: format!("failed to read response body: {err}"),
        })?;

        if !status.is_success() {
            return Err(FetchError::Http { status, body: text });
        }

        serde_json::from_str::<T>(&text).map_err(|err| FetchError::Decode {
            detail: format!("{err}: {text}"),
        })
    }
}
