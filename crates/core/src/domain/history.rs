use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryBoard {
    pub parallels: Vec<HistoricalParallel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalParallel {
    pub era: String,
    pub title: String,
    /// Similarity to the present regime in [0, 1].
    pub similarity: f64,
    pub summary: String,
}

impl HistoryBoard {
    pub fn closest_parallel(&self) -> Option<&HistoricalParallel> {
        self.parallels
            .iter()
            .max_by(|a, b| a.similarity.total_cmp(&b.similarity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closest_parallel_has_highest_similarity() {
        let board = HistoryBoard {
            parallels: vec![
                HistoricalParallel {
                    era: "1970s".to_string(),
                    title: "Oil shocks".to_string(),
                    similarity: 0.62,
                    summary: String::new(),
                },
                HistoricalParallel {
                    era: "1994".to_string(),
                    title: "Rapid tightening".to_string(),
                    similarity: 0.71,
                    summary: String::new(),
                },
            ],
        };
        assert_eq!(
            board.closest_parallel().map(|p| p.era.as_str()),
            Some("1994")
        );
    }
}
