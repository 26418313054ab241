use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhaleBoard {
    pub transactions: Vec<WhaleTransaction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhaleTransaction {
    pub actor: String,
    pub symbol: String,
    pub side: TradeSide,
    pub value_usd: f64,
    pub disclosed_at: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl WhaleBoard {
    /// Disclosed buys minus sells, in USD.
    pub fn net_flow_usd(&self) -> f64 {
        self.transactions
            .iter()
            .map(|t| match t.side {
                TradeSide::Buy => t.value_usd,
                TradeSide::Sell => -t.value_usd,
            })
            .sum()
    }
}
