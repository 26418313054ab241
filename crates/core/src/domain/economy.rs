use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomyBoard {
    pub indicators: Vec<EconomicIndicator>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomicIndicator {
    pub name: String,
    pub value: f64,
    pub unit: String,
    pub period: String,
}

impl EconomyBoard {
    pub fn indicator(&self, name: &str) -> Option<&EconomicIndicator> {
        self.indicators.iter().find(|i| i.name == name)
    }
}
