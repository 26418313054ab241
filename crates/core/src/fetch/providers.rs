use crate::domain::bond::{BondMarket, CurvePoint, GlobalBond};
use crate::domain::country::CountryBoard;
use crate::domain::economy::EconomyBoard;
use crate::domain::equity::EquityBoard;
use crate::domain::fx::FxBoard;
use crate::domain::history::HistoryBoard;
use crate::domain::policy::PolicyBoard;
use crate::domain::whale::WhaleBoard;
use crate::domain::Domain;
use crate::fetch::client::BackendClient;
use crate::fetch::error::FetchError;
use crate::fetch::DomainProvider;
use crate::mock;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

const DEFAULT_FX_FOCUS_PAIR: &str = "EUR/USD";
const DEFAULT_COUNTRY_FOCUS: &str = "US";

#[derive(Debug, Clone)]
pub struct BondProvider {
    client: BackendClient,
}

#[derive(Debug, Deserialize)]
struct YieldsEnvelope {
    current_curve: CurveEnvelope,
}

#[derive(Debug, Deserialize)]
struct CurveEnvelope {
    date: NaiveDate,
    data: Vec<CurvePoint>,
}

#[derive(Debug, Deserialize)]
struct GlobalEnvelope {
    global_bonds: Vec<GlobalBond>,
}

impl BondProvider {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl DomainProvider for BondProvider {
    type Payload = BondMarket;

    fn domain(&self) -> Domain {
        Domain::Bond
    }

    async fn fetch_live(&self) -> Result<BondMarket, FetchError> {
        // Both legs fetched concurrently; if either fails the whole snapshot
        // fails, so live and synthetic data never mix.
        let (yields, global) = tokio::try_join!(
            self.client.get_json::<YieldsEnvelope>("/api/bond/yields", &[]),
            self.client.get_json::<GlobalEnvelope>("/api/bond/global", &[]),
        )?;

        Ok(BondMarket::merge(
            yields.current_curve.date,
            yields.current_curve.data,
            global.global_bonds,
        ))
    }

    fn fallback(&self) -> BondMarket {
        mock::bond_market(&mut mock::jitter_rng())
    }

    fn analysis_context(&self, payload: Option<&BondMarket>) -> serde_json::Value {
        match payload {
            Some(m) => json!({
                "yield_10y": m.yield_at("10Y"),
                "yield_2y": m.yield_at("2Y"),
                "spread_10y_2y_bps": m.term_spread_bps(),
                "curve_shape": m.curve_shape(),
            }),
            None => json!({}),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FxProvider {
    client: BackendClient,
    focus_pair: String,
}

impl FxProvider {
    pub fn new(client: BackendClient) -> Self {
        let focus_pair = std::env::var("FX_FOCUS_PAIR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FX_FOCUS_PAIR.to_string());
        Self { client, focus_pair }
    }
}

#[async_trait::async_trait]
impl DomainProvider for FxProvider {
    type Payload = FxBoard;

    fn domain(&self) -> Domain {
        Domain::Fx
    }

    async fn fetch_live(&self) -> Result<FxBoard, FetchError> {
        self.client.get_json("/api/fx/rates", &[]).await
    }

    fn fallback(&self) -> FxBoard {
        mock::fx_board(&mut mock::jitter_rng())
    }

    fn analysis_context(&self, payload: Option<&FxBoard>) -> serde_json::Value {
        let focus = payload.and_then(|b| b.pair(&self.focus_pair));
        json!({
            "pair": self.focus_pair,
            "rate": focus.map(|p| p.rate),
            "change_pct": focus.and_then(|p| p.change_pct),
        })
    }

    fn cache_extras(&self, _payload: Option<&FxBoard>) -> Vec<(&'static str, String)> {
        vec![("pair", self.focus_pair.clone())]
    }
}

#[derive(Debug, Clone)]
pub struct EquityProvider {
    client: BackendClient,
}

impl EquityProvider {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl DomainProvider for EquityProvider {
    type Payload = EquityBoard;

    fn domain(&self) -> Domain {
        Domain::Equity
    }

    async fn fetch_live(&self) -> Result<EquityBoard, FetchError> {
        self.client.get_json("/api/equity/indices", &[]).await
    }

    fn fallback(&self) -> EquityBoard {
        mock::equity_board(&mut mock::jitter_rng())
    }

    fn analysis_context(&self, payload: Option<&EquityBoard>) -> serde_json::Value {
        match payload {
            Some(b) => json!({
                "spx_change_pct": b.index("SPX").and_then(|i| i.change_pct),
                "indices": b.indices.iter().map(|i| json!({
                    "symbol": i.symbol,
                    "change_pct": i.change_pct,
                })).collect::<Vec<_>>(),
            }),
            None => json!({}),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PolicyProvider {
    client: BackendClient,
}

impl PolicyProvider {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl DomainProvider for PolicyProvider {
    type Payload = PolicyBoard;

    fn domain(&self) -> Domain {
        Domain::Policy
    }

    async fn fetch_live(&self) -> Result<PolicyBoard, FetchError> {
        self.client.get_json("/api/policy/rates", &[]).await
    }

    fn fallback(&self) -> PolicyBoard {
        mock::policy_board(&mut mock::jitter_rng())
    }

    fn analysis_context(&self, payload: Option<&PolicyBoard>) -> serde_json::Value {
        match payload {
            Some(b) => json!({
                "fed_rate": b.bank("Federal Reserve").map(|c| c.policy_rate),
                "next_meeting": b.next_meeting().map(|m| json!({
                    "bank": m.bank,
                    "date": m.date,
                })),
            }),
            None => json!({}),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CountryProvider {
    client: BackendClient,
    focus_country: String,
}

impl CountryProvider {
    pub fn new(client: BackendClient) -> Self {
        let focus_country = std::env::var("COUNTRY_FOCUS")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COUNTRY_FOCUS.to_string());
        Self {
            client,
            focus_country,
        }
    }
}

#[async_trait::async_trait]
impl DomainProvider for CountryProvider {
    type Payload = CountryBoard;

    fn domain(&self) -> Domain {
        Domain::Country
    }

    async fn fetch_live(&self) -> Result<CountryBoard, FetchError> {
        self.client.get_json("/api/country/scores", &[]).await
    }

    fn fallback(&self) -> CountryBoard {
        mock::country_board(&mut mock::jitter_rng())
    }

    fn analysis_context(&self, payload: Option<&CountryBoard>) -> serde_json::Value {
        let focus = payload.and_then(|b| b.country(&self.focus_country));
        json!({
            "country": self.focus_country,
            "overall_score": focus.map(|c| c.overall_score),
            "grade": focus.map(|c| c.grade()),
        })
    }

    fn cache_extras(&self, _payload: Option<&CountryBoard>) -> Vec<(&'static str, String)> {
        vec![("country", self.focus_country.clone())]
    }
}

#[derive(Debug, Clone)]
pub struct EconomyProvider {
    client: BackendClient,
}

impl EconomyProvider {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl DomainProvider for EconomyProvider {
    type Payload = EconomyBoard;

    fn domain(&self) -> Domain {
        Domain::Economy
    }

    async fn fetch_live(&self) -> Result<EconomyBoard, FetchError> {
        self.client.get_json("/api/economy/indicators", &[]).await
    }

    fn fallback(&self) -> EconomyBoard {
        mock::economy_board(&mut mock::jitter_rng())
    }

    fn analysis_context(&self, payload: Option<&EconomyBoard>) -> serde_json::Value {
        match payload {
            Some(b) => json!({
                "cpi": b.indicator("CPI").map(|i| i.value),
                "indicators": b.indicators.iter().map(|i| json!({
                    "name": i.name,
                    "value": i.value,
                    "unit": i.unit,
                })).collect::<Vec<_>>(),
            }),
            None => json!({}),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HistoryProvider {
    client: BackendClient,
}

impl HistoryProvider {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl DomainProvider for HistoryProvider {
    type Payload = HistoryBoard;

    fn domain(&self) -> Domain {
        Domain::History
    }

    async fn fetch_live(&self) -> Result<HistoryBoard, FetchError> {
        self.client.get_json("/api/history/parallels", &[]).await
    }

    fn fallback(&self) -> HistoryBoard {
        mock::history_board(&mut mock::jitter_rng())
    }

    fn analysis_context(&self, payload: Option<&HistoryBoard>) -> serde_json::Value {
        let closest = payload.and_then(|b| b.closest_parallel());
        json!({
            "closest_era": closest.map(|p| p.era.clone()),
            "similarity": closest.map(|p| p.similarity),
        })
    }
}

#[derive(Debug, Clone)]
pub struct WhaleProvider {
    client: BackendClient,
}

impl WhaleProvider {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl DomainProvider for WhaleProvider {
    type Payload = WhaleBoard;

    fn domain(&self) -> Domain {
        Domain::Whale
    }

    async fn fetch_live(&self) -> Result<WhaleBoard, FetchError> {
        self.client.get_json("/api/whale/activity", &[]).await
    }

    fn fallback(&self) -> WhaleBoard {
        mock::whale_board(&mut mock::jitter_rng())
    }

    fn analysis_context(&self, payload: Option<&WhaleBoard>) -> serde_json::Value {
        match payload {
            Some(b) => json!({
                "net_flow_usd": b.net_flow_usd(),
                "transactions": b.transactions.len(),
            }),
            None => json!({}),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_the_bond_yields_envelope() {
        let v = json!({
            "current_curve": {
                "date": "2026-08-07",
                "data": [
                    {"maturity": "2Y", "yield_value": 4.35},
                    {"maturity": "10Y", "yield_value": 4.25}
                ]
            }
        });

        let parsed: YieldsEnvelope = serde_json::from_value(v).unwrap();
        assert_eq!(
            parsed.current_curve.date,
            NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
        );
        assert_eq!(parsed.current_curve.data.len(), 2);
        assert_eq!(parsed.current_curve.data[1].yield_value, 4.25);
    }

    #[test]
    fn parses_the_global_bonds_envelope_with_optional_change() {
        let v = json!({
            "global_bonds": [
                {"country": "DE", "maturity": "10Y", "yield_value": 2.35},
                {"country": "JP", "maturity": "10Y", "yield_value": 0.95, "change_1d": 0.03}
            ]
        });

        let parsed: GlobalEnvelope = serde_json::from_value(v).unwrap();
        assert_eq!(parsed.global_bonds.len(), 2);
        assert_eq!(parsed.global_bonds[0].change_1d, None);
        assert_eq!(parsed.global_bonds[1].change_1d, Some(0.03));
    }

    #[test]
    fn parses_the_policy_board_payload() {
        let v = json!({
            "central_banks": [
                {"bank": "Federal Reserve", "country": "US", "policy_rate": 5.5, "stance": "hawkish"}
            ],
            "upcoming_meetings": [
                {"bank": "Federal Reserve", "date": "2026-09-17"}
            ]
        });

        let parsed: PolicyBoard = serde_json::from_value(v).unwrap();
        assert_eq!(parsed.central_banks.len(), 1);
        assert_eq!(
            parsed.central_banks[0].stance,
            Some(crate::domain::policy::PolicyStance::Hawkish)
        );
        assert_eq!(parsed.upcoming_meetings.len(), 1);
    }

    #[test]
    fn rejects_a_malformed_curve_point() {
        let v = json!({
            "current_curve": {
                "date": "2026-08-07",
                "data": [{"maturity": "10Y", "yield_value": "4.25"}]
            }
        });
        assert!(serde_json::from_value::<YieldsEnvelope>(v).is_err());
    }
}
