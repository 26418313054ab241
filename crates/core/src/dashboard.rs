use crate::analysis::http::HttpAnalysisBackend;
use crate::config::Settings;
use crate::domain::bond::BondMarket;
use crate::domain::country::CountryBoard;
use crate::domain::economy::EconomyBoard;
use crate::domain::equity::EquityBoard;
use crate::domain::fx::FxBoard;
use crate::domain::history::HistoryBoard;
use crate::domain::policy::PolicyBoard;
use crate::domain::whale::WhaleBoard;
use crate::domain::Domain;
use crate::fetch::client::BackendClient;
use crate::fetch::providers::{
    BondProvider, CountryProvider, EconomyProvider, EquityProvider, FxProvider, HistoryProvider,
    PolicyProvider, WhaleProvider,
};
use crate::store::{DomainStore, StoreView};
use anyhow::Context;
use serde::Serialize;

type Store<P> = DomainStore<P, HttpAnalysisBackend>;

/// The explicit application context: every domain store, constructed once at
/// startup and shared behind an `Arc`. Stores never talk to each other.
pub struct Dashboard {
    pub bond: Store<BondProvider>,
    pub fx: Store<FxProvider>,
    pub equity: Store<EquityProvider>,
    pub policy: Store<PolicyProvider>,
    pub country: Store<CountryProvider>,
    pub economy: Store<EconomyProvider>,
    pub history: Store<HistoryProvider>,
    pub whale: Store<WhaleProvider>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub bond: StoreView<BondMarket>,
    pub fx: StoreView<FxBoard>,
    pub equity: StoreView<EquityBoard>,
    pub policy: StoreView<PolicyBoard>,
    pub country: StoreView<CountryBoard>,
    pub economy: StoreView<EconomyBoard>,
    pub history: StoreView<HistoryBoard>,
    pub whale: StoreView<WhaleBoard>,
}

impl Dashboard {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let client = BackendClient::from_settings(settings)?;
        let analyst = HttpAnalysisBackend::new(client.clone());

        Ok(Self {
            bond: DomainStore::new(BondProvider::new(client.clone()), analyst.clone()),
            fx: DomainStore::new(FxProvider::new(client.clone()), analyst.clone()),
            equity: DomainStore::new(EquityProvider::new(client.clone()), analyst.clone()),
            policy: DomainStore::new(PolicyProvider::new(client.clone()), analyst.clone()),
            country: DomainStore::new(CountryProvider::new(client.clone()), analyst.clone()),
            economy: DomainStore::new(EconomyProvider::new(client.clone()), analyst.clone()),
            history: DomainStore::new(HistoryProvider::new(client.clone()), analyst.clone()),
            whale: DomainStore::new(WhaleProvider::new(client), analyst),
        })
    }

    pub async fn refresh_all(&self) {
        tokio::join!(
            self.bond.refresh(),
            self.fx.refresh(),
            self.equity.refresh(),
            self.policy.refresh(),
            self.country.refresh(),
            self.economy.refresh(),
            self.history.refresh(),
            self.whale.refresh(),
        );
    }

    pub async fn refresh_domain(&self, domain: Domain) {
        match domain {
            Domain::Bond => self.bond.refresh().await,
            Domain::Fx => self.fx.refresh().await,
            Domain::Equity => self.equity.refresh().await,
            Domain::Policy => self.policy.refresh().await,
            Domain::Country => self.country.refresh().await,
            Domain::Economy => self.economy.refresh().await,
            Domain::History => self.history.refresh().await,
            Domain::Whale => self.whale.refresh().await,
        }
    }

    pub async fn analyze_domain(&self, domain: Domain, language: &str) {
        match domain {
            Domain::Bond => self.bond.request_analysis(language).await,
            Domain::Fx => self.fx.request_analysis(language).await,
            Domain::Equity => self.equity.request_analysis(language).await,
            Domain::Policy => self.policy.request_analysis(language).await,
            Domain::Country => self.country.request_analysis(language).await,
            Domain::Economy => self.economy.request_analysis(language).await,
            Domain::History => self.history.request_analysis(language).await,
            Domain::Whale => self.whale.request_analysis(language).await,
        }
    }

    pub async fn reset_domain(&self, domain: Domain) {
        match domain {
            Domain::Bond => self.bond.reset().await,
            Domain::Fx => self.fx.reset().await,
            Domain::Equity => self.equity.reset().await,
            Domain::Policy => self.policy.reset().await,
            Domain::Country => self.country.reset().await,
            Domain::Economy => self.economy.reset().await,
            Domain::History => self.history.reset().await,
            Domain::Whale => self.whale.reset().await,
        }
    }

    pub async fn view(&self) -> DashboardView {
        let (bond, fx, equity, policy, country, economy, history, whale) = tokio::join!(
            self.bond.view(),
            self.fx.view(),
            self.equity.view(),
            self.policy.view(),
            self.country.view(),
            self.economy.view(),
            self.history.view(),
            self.whale.view(),
        );

        DashboardView {
            bond,
            fx,
            equity,
            policy,
            country,
            economy,
            history,
            whale,
        }
    }

    pub async fn view_domain(&self, domain: Domain) -> anyhow::Result<serde_json::Value> {
        let value = match domain {
            Domain::Bond => serde_json::to_value(self.bond.view().await),
            Domain::Fx => serde_json::to_value(self.fx.view().await),
            Domain::Equity => serde_json::to_value(self.equity.view().await),
            Domain::Policy => serde_json::to_value(self.policy.view().await),
            Domain::Country => serde_json::to_value(self.country.view().await),
            Domain::Economy => serde_json::to_value(self.economy.view().await),
            Domain::History => serde_json::to_value(self.history.view().await),
            Domain::Whale => serde_json::to_value(self.whale.view().await),
        };
        value.with_context(|| format!("failed to serialize {domain} store view"))
    }
}
