use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityBoard {
    pub indices: Vec<EquityIndex>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityIndex {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub change_pct: Option<f64>,
}

impl EquityBoard {
    pub fn index(&self, symbol: &str) -> Option<&EquityIndex> {
        self.indices.iter().find(|i| i.symbol == symbol)
    }
}
