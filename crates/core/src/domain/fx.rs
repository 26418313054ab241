use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FxBoard {
    pub pairs: Vec<FxPair>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FxPair {
    pub pair: String,
    pub rate: f64,
    #[serde(default)]
    pub change_pct: Option<f64>,
}

impl FxBoard {
    pub fn pair(&self, code: &str) -> Option<&FxPair> {
        self.pairs.iter().find(|p| p.pair == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_pair_by_code() {
        let board = FxBoard {
            pairs: vec![FxPair {
                pair: "EUR/USD".to_string(),
                rate: 1.0850,
                change_pct: Some(0.12),
            }],
        };
        assert_eq!(board.pair("EUR/USD").map(|p| p.rate), Some(1.0850));
        assert!(board.pair("USD/JPY").is_none());
    }
}
