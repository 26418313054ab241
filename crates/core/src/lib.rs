pub mod analysis;
pub mod dashboard;
pub mod domain;
pub mod fetch;
pub mod mock;
pub mod store;

pub mod config {
    #[derive(Debug, Clone)]
    pub struct Settings {
        pub market_api_base_url: Option<String>,
        pub market_api_key: Option<String>,
        pub language: Option<String>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                market_api_base_url: std::env::var("MARKET_API_BASE_URL").ok(),
                market_api_key: std::env::var("MARKET_API_KEY").ok(),
                language: std::env::var("DASHBOARD_LANGUAGE").ok(),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }

        pub fn default_language(&self) -> &str {
            self.language.as_deref().unwrap_or("en")
        }
    }
}
