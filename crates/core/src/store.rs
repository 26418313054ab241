use crate::analysis::error::AnalysisError;
use crate::analysis::wire::WireAnalysisResult;
use crate::analysis::{AnalysisBackend, AnalysisRequest, AnalysisResult, Persona};
use crate::domain::Domain;
use crate::fetch::DomainProvider;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

/// How often the "currently thinking" persona rotates while an analysis POST
/// is in flight. Pure progress theater; the backend returns every persona's
/// text in a single response.
const AGENT_CYCLE_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Idle,
    Loading,
    Analyzing,
    Error,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Live,
    Fallback,
}

/// The displayed payload for one domain. Replaced wholesale on every applied
/// fetch; a snapshot is entirely live or entirely synthesized, never mixed.
#[derive(Debug, Clone, Serialize)]
pub struct DataSnapshot<T> {
    pub payload: T,
    pub fetched_at: DateTime<Utc>,
    pub source: DataSource,
}

/// Read-only projection handed to rendering code.
#[derive(Debug, Clone, Serialize)]
pub struct StoreView<T> {
    pub domain: Domain,
    pub status: RequestStatus,
    pub current_agent: Option<Persona>,
    pub error_message: Option<String>,
    pub snapshot: Option<DataSnapshot<T>>,
    pub analysis: Option<AnalysisResult>,
}

#[derive(Debug)]
struct StoreState<T> {
    status: RequestStatus,
    current_agent: Option<Persona>,
    error_message: Option<String>,
    snapshot: Option<DataSnapshot<T>>,
    analysis: Option<AnalysisResult>,
    applied_fetch_seq: u64,
    applied_analysis_seq: u64,
}

impl<T> Default for StoreState<T> {
    fn default() -> Self {
        Self {
            status: RequestStatus::Idle,
            current_agent: None,
            error_message: None,
            snapshot: None,
            analysis: None,
            applied_fetch_seq: 0,
            applied_analysis_seq: 0,
        }
    }
}

/// One remote data store: fetch-with-fallback plus the cache-gated analysis
/// request, publishing a single projection.
///
/// Overlap policy: concurrent calls are allowed. Every operation takes a
/// monotonic sequence number, and a response is applied only if nothing newer
/// has been applied; late arrivals from superseded requests are discarded.
pub struct DomainStore<P: DomainProvider, A: AnalysisBackend> {
    domain: Domain,
    provider: P,
    analyst: A,
    state: Mutex<StoreState<P::Payload>>,
    fetch_seq: AtomicU64,
    analysis_seq: AtomicU64,
}

impl<P: DomainProvider, A: AnalysisBackend> DomainStore<P, A> {
    pub fn new(provider: P, analyst: A) -> Self {
        Self {
            domain: provider.domain(),
            provider,
            analyst,
            state: Mutex::new(StoreState::default()),
            fetch_seq: AtomicU64::new(0),
            analysis_seq: AtomicU64::new(0),
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// One network round trip; on any failure the synthesized payload is
    /// published instead. This operation cannot leave the store without a
    /// snapshot and never terminates in the error status.
    pub async fn refresh(&self) {
        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut st = self.state.lock().await;
            st.status = RequestStatus::Loading;
        }

        let (payload, source) = match self.provider.fetch_live().await {
            Ok(payload) => (payload, DataSource::Live),
            Err(err) => {
                tracing::warn!(
                    domain = %self.domain,
                    error = %err,
                    "live fetch failed; publishing synthesized snapshot"
                );
                (self.provider.fallback(), DataSource::Fallback)
            }
        };

        let mut st = self.state.lock().await;
        if seq <= st.applied_fetch_seq {
            tracing::debug!(
                domain = %self.domain,
                seq,
                applied = st.applied_fetch_seq,
                "discarding stale fetch response"
            );
            return;
        }
        st.applied_fetch_seq = seq;
        st.snapshot = Some(DataSnapshot {
            payload,
            fetched_at: Utc::now(),
            source,
        });
        st.status = RequestStatus::Done;
    }

    /// Cache-gated commentary request: a cache hit is adopted without the
    /// POST; a miss POSTs while the persona indicator cycles. Failures
    /// surface as the error status but never clear an earlier result.
    pub async fn request_analysis(&self, language: &str) {
        let seq = self.analysis_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let request = {
            let mut st = self.state.lock().await;
            st.status = RequestStatus::Loading;
            st.error_message = None;

            let payload = st.snapshot.as_ref().map(|s| &s.payload);
            AnalysisRequest::new(
                self.domain,
                language,
                self.provider.analysis_context(payload),
                self.provider.cache_extras(payload),
            )
        };

        let cache_hit = match self.analyst.check_cached(&request).await {
            Ok(check) => check.result.filter(|_| check.cached),
            Err(err) => {
                self.apply_analysis(seq, Err(err)).await;
                return;
            }
        };

        if let Some(wire) = cache_hit {
            tracing::debug!(
                domain = %self.domain,
                request_id = %request.request_id,
                "analysis served from daily cache"
            );
            self.apply_analysis(seq, Ok(wire.normalize())).await;
            return;
        }

        {
            let mut st = self.state.lock().await;
            st.status = RequestStatus::Analyzing;
            st.current_agent = Some(Persona::CYCLE[0]);
        }

        let generate = self.analyst.generate(&request);
        tokio::pin!(generate);

        let mut ticker = tokio::time::interval(AGENT_CYCLE_INTERVAL);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The interval's first tick completes immediately; the first persona
        // is already showing.
        ticker.tick().await;

        let mut cycle_idx = 0usize;
        let outcome = loop {
            tokio::select! {
                res = &mut generate => break res,
                _ = ticker.tick() => {
                    cycle_idx = (cycle_idx + 1) % Persona::CYCLE.len();
                    let mut st = self.state.lock().await;
                    // Only the newest request drives the indicator.
                    if self.analysis_seq.load(Ordering::SeqCst) == seq {
                        st.current_agent = Some(Persona::CYCLE[cycle_idx]);
                    }
                }
            }
        };

        self.apply_analysis(seq, outcome.map(WireAnalysisResult::normalize))
            .await;
    }

    async fn apply_analysis(&self, seq: u64, outcome: Result<AnalysisResult, AnalysisError>) {
        let mut st = self.state.lock().await;
        if seq <= st.applied_analysis_seq {
            tracing::debug!(
                domain = %self.domain,
                seq,
                applied = st.applied_analysis_seq,
                "discarding stale analysis response"
            );
            return;
        }
        st.applied_analysis_seq = seq;
        st.current_agent = None;

        match outcome {
            Ok(result) => {
                st.analysis = Some(result);
                st.status = RequestStatus::Done;
                st.error_message = None;
            }
            Err(err) => {
                tracing::warn!(
                    domain = %self.domain,
                    stage = err.stage,
                    error = %err,
                    "analysis request failed"
                );
                // Stale-but-available beats blank: the previous result stays.
                st.status = RequestStatus::Error;
                st.error_message = Some(format!(
                    "The AI board is unavailable for {} right now; try again.",
                    self.domain
                ));
            }
        }
    }

    pub async fn view(&self) -> StoreView<P::Payload> {
        let st = self.state.lock().await;
        StoreView {
            domain: self.domain,
            status: st.status,
            current_agent: st.current_agent,
            error_message: st.error_message.clone(),
            snapshot: st.snapshot.clone(),
            analysis: st.analysis.clone(),
        }
    }

    /// Zero the store and invalidate every in-flight request.
    pub async fn reset(&self) {
        let fetch_floor = self.fetch_seq.load(Ordering::SeqCst);
        let analysis_floor = self.analysis_seq.load(Ordering::SeqCst);

        let mut st = self.state.lock().await;
        *st = StoreState::default();
        st.applied_fetch_seq = fetch_floor;
        st.applied_analysis_seq = analysis_floor;
    }
}
