use crate::analysis::{AnalysisResult, Persona, Perspective};
use serde::{Deserialize, Serialize};

/// Response of the cache-check endpoint. `result` is only meaningful when
/// `cached` is true; a hit without a result is treated as a miss.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheCheckResponse {
    pub cached: bool,
    #[serde(default)]
    pub result: Option<WireAnalysisResult>,
}

/// The two shapes the analysis endpoints have historically returned. The
/// perspectives variant is tried first; it is the only one with a
/// `perspectives` key, so the untagged match is unambiguous.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireAnalysisResult {
    Perspectives {
        perspectives: Vec<Perspective>,
        #[serde(default)]
        synthesis: Option<String>,
    },
    Legacy {
        kostolany_response: String,
        buffett_response: String,
        munger_response: String,
        dalio_response: String,
        #[serde(default)]
        synthesis: Option<String>,
    },
}

impl WireAnalysisResult {
    /// Total: either wire shape converts, so a decoded response always
    /// reaches presentation in canonical form.
    pub fn normalize(self) -> AnalysisResult {
        match self {
            WireAnalysisResult::Perspectives {
                perspectives,
                synthesis,
            } => AnalysisResult {
                perspectives,
                synthesis,
            },
            WireAnalysisResult::Legacy {
                kostolany_response,
                buffett_response,
                munger_response,
                dalio_response,
                synthesis,
            } => {
                let texts = [
                    kostolany_response,
                    buffett_response,
                    munger_response,
                    dalio_response,
                ];
                let perspectives = Persona::CYCLE
                    .into_iter()
                    .zip(texts)
                    .map(|(persona, analysis)| Perspective {
                        persona: persona.as_str().to_string(),
                        analysis,
                    })
                    .collect();
                AnalysisResult {
                    perspectives,
                    synthesis,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_and_normalizes_the_perspectives_shape() {
        let v = json!({
            "perspectives": [
                {"persona": "buffett", "analysis": "Hold quality."},
                {"persona": "dalio", "analysis": "Watch the debt cycle."}
            ],
            "synthesis": "Mixed."
        });

        let wire: WireAnalysisResult = serde_json::from_value(v).unwrap();
        let result = wire.normalize();
        assert_eq!(result.perspectives.len(), 2);
        assert_eq!(result.perspectives[0].persona, "buffett");
        assert_eq!(result.synthesis.as_deref(), Some("Mixed."));
    }

    #[test]
    fn decodes_the_legacy_named_field_shape_in_cycle_order() {
        let v = json!({
            "kostolany_response": "Patience.",
            "buffett_response": "Price is what you pay.",
            "munger_response": "Invert.",
            "dalio_response": "Diversify."
        });

        let wire: WireAnalysisResult = serde_json::from_value(v).unwrap();
        let result = wire.normalize();
        let personas: Vec<&str> = result
            .perspectives
            .iter()
            .map(|p| p.persona.as_str())
            .collect();
        assert_eq!(personas, ["kostolany", "buffett", "munger", "dalio"]);
        assert_eq!(result.perspectives[2].analysis, "Invert.");
        assert_eq!(result.synthesis, None);
    }

    #[test]
    fn rejects_a_response_matching_neither_shape() {
        let v = json!({"commentary": "free-form"});
        assert!(serde_json::from_value::<WireAnalysisResult>(v).is_err());
    }

    #[test]
    fn cache_check_parses_hit_and_miss() {
        let hit: CacheCheckResponse = serde_json::from_value(json!({
            "cached": true,
            "result": {"perspectives": [], "synthesis": null}
        }))
        .unwrap();
        assert!(hit.cached);
        assert!(hit.result.is_some());

        let miss: CacheCheckResponse = serde_json::from_value(json!({"cached": false})).unwrap();
        assert!(!miss.cached);
        assert!(miss.result.is_none());
    }
}
